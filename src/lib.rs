//! Find genome rearrangements in a one-to-one pairwise alignment of two genomes.
//!
//! The pipeline turns alignment blocks into a graph of alignment ends, links
//! ends that face each other within a genome, walks the alternating
//! aligned/facing links into chains, and reports the chains that are neither
//! collinear nor explained by assembly joins or gap fills.

pub mod libs;

pub use libs::error::{Error, Result};
pub use libs::io::{reader, writer};
