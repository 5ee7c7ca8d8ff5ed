//! Alignment ends.
//!
//! Every accepted alignment block gives four [`Edge`]s: its start and end in
//! genome 1 and its start and end in genome 2. Edges live in one `Vec`
//! indexed by serial number and refer to each other by serial.

use crate::libs::error::{Error, Result};
use crate::libs::maf::{MafAli, MafComp};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Genome {
    First,
    Second,
}

impl Genome {
    pub fn number(&self) -> u8 {
        match self {
            Genome::First => 1,
            Genome::Second => 2,
        }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Which end of an alignment, on the forward strand.
///
/// `End` orders before `Start`, so at equal coordinates the end of one
/// alignment sorts next to the start of the following one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EndType {
    End,
    Start,
}

impl EndType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndType::End => "end",
            EndType::Start => "start",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub serial: usize,
    pub genome: Genome,
    pub name: String,
    /// Zero-based, forward strand
    pub coordinate: u64,
    pub end_type: EndType,
    /// The same alignment end in the other genome
    pub aligned: usize,
    /// The end of a neighbouring alignment that this one abuts
    pub facing: Option<usize>,
}

impl Edge {
    /// Position order used for facing and for sorting the report.
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.genome
            .cmp(&other.genome)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.coordinate.cmp(&other.coordinate))
            .then_with(|| self.end_type.cmp(&other.end_type))
    }
}

/// `name:coordinate[` for a start, `name:coordinate]` for an end.
impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracket = match self.end_type {
            EndType::Start => '[',
            EndType::End => ']',
        };
        write!(f, "{}:{}{}", self.name, self.coordinate, bracket)
    }
}

/// Edges of all accepted alignments plus a tally of what was read.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub edges: Vec<Edge>,
    pub accepted: usize,
    pub rejected: usize,
}

/// Forward-strand `(begin, end)` of a component, each tagged with the end
/// type it represents. Reverse-strand blocks run backwards, so the first
/// position is an `End` there.
fn component_ends(comp: &MafComp) -> [(u64, EndType); 2] {
    if comp.is_reverse() {
        let begin = comp.src_size - comp.start;
        [(begin, EndType::End), (begin - comp.size, EndType::Start)]
    } else {
        [
            (comp.start, EndType::Start),
            (comp.start + comp.size, EndType::End),
        ]
    }
}

/// Turns alignment blocks into edges, skipping blocks whose mismap
/// probability is above `max_mismap`.
///
/// For the k-th accepted block the serials are `4k..4k+4`: genome-1 begin,
/// genome-2 begin, genome-1 end, genome-2 end. Only the first two sequences
/// of a block are used.
pub fn alignment_edges<I>(alignments: I, max_mismap: f64) -> Result<Extraction>
where
    I: IntoIterator<Item = Result<MafAli>>,
{
    let mut extraction = Extraction::default();

    for ali in alignments {
        let ali = ali?;
        if !ali.is_reliable(max_mismap) {
            extraction.rejected += 1;
            continue;
        }
        if ali.components.len() < 2 {
            return Err(Error::parse(
                ali.line,
                format!(
                    "alignment block has {} sequence(s), need 2",
                    ali.components.len()
                ),
            ));
        }

        let base = extraction.edges.len();
        let ends1 = component_ends(&ali.components[0]);
        let ends2 = component_ends(&ali.components[1]);

        for (k, (end1, end2)) in ends1.iter().zip(ends2.iter()).enumerate() {
            let serial1 = base + 2 * k;
            let serial2 = serial1 + 1;
            extraction.edges.push(Edge {
                serial: serial1,
                genome: Genome::First,
                name: ali.components[0].src.clone(),
                coordinate: end1.0,
                end_type: end1.1,
                aligned: serial2,
                facing: None,
            });
            extraction.edges.push(Edge {
                serial: serial2,
                genome: Genome::Second,
                name: ali.components[1].src.clone(),
                coordinate: end2.0,
                end_type: end2.1,
                aligned: serial1,
                facing: None,
            });
        }
        extraction.accepted += 1;
    }

    log::info!(
        "{} alignments accepted, {} rejected by mismap, {} edges",
        extraction.accepted,
        extraction.rejected,
        extraction.edges.len()
    );

    Ok(extraction)
}
