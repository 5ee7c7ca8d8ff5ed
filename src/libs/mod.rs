pub mod classify;
pub mod edge;
pub mod error;
pub mod facing;
pub mod gap;
pub mod io;
pub mod linked;
pub mod maf;
pub mod names;
pub mod pipeline;
pub mod report;
