//! Decides which chains are rearrangements.
//!
//! Short chains and 4-edge loops are plain collinear alignment. Two open
//! patterns are assembly artifacts rather than biology: an end join (two
//! alignments meeting at a scaffold boundary) and a gap fill (a small
//! insertion sitting exactly where the other assembly has a gap).

use crate::libs::edge::Edge;
use crate::libs::error::{Error, Result};
use crate::libs::gap::{GapIndex, Pool};
use crate::libs::linked::LinkedEdges;
use crate::libs::names;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChainClass {
    /// Fewer than 4 edges: an alignment end facing nothing
    Unlinked,
    /// A closed loop of 4 edges
    Collinear,
    EndJoin,
    GapFill,
    Rearranged,
}

impl ChainClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainClass::Unlinked => "unlinked",
            ChainClass::Collinear => "collinear",
            ChainClass::EndJoin => "end-join",
            ChainClass::GapFill => "gap-fill",
            ChainClass::Rearranged => "rearranged",
        }
    }
}

impl fmt::Display for ChainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Two ends of the same genome could be joined in reality. On one sequence
/// that needs an unordered gap between them; across sequences the names
/// must be compatible.
pub fn is_compatible_edges(x: &Edge, y: &Edge, gaps: &GapIndex) -> Result<bool> {
    if x.name == y.name {
        Ok(!gaps.between(Pool::Unordered, x, y)?.is_empty())
    } else {
        Ok(names::is_compatible(&x.name, &y.name))
    }
}

fn chain_edges<'a>(chain: &LinkedEdges, edges: &'a [Edge]) -> Vec<&'a Edge> {
    chain.edges.iter().map(|&i| &edges[i]).collect()
}

pub fn is_end_join(chain: &LinkedEdges, edges: &[Edge], gaps: &GapIndex) -> Result<bool> {
    if chain.closed || chain.len() != 4 {
        return Ok(false);
    }
    let e = chain_edges(chain, edges);
    is_compatible_edges(e[0], e[3], gaps)
}

/// The inner ends `e1` and `e6` must be a start and an end that do not
/// cross: a start at or after the end, or an end at or before the start,
/// is rejected.
pub fn is_consistent_order(e1: &Edge, e6: &Edge) -> bool {
    if e1.end_type == e6.end_type {
        return false;
    }
    if e1.end_type > e6.end_type && e1.coordinate >= e6.coordinate {
        return false;
    }
    if e1.end_type < e6.end_type && e1.coordinate <= e6.coordinate {
        return false;
    }
    true
}

pub fn is_gap_fill(chain: &LinkedEdges, edges: &[Edge], gaps: &GapIndex) -> Result<bool> {
    if chain.closed || chain.len() != 8 {
        return Ok(false);
    }
    let e = chain_edges(chain, edges);

    if !names::is_compatible(&e[0].name, &e[7].name) {
        return Ok(false);
    }
    if e[1].name != e[6].name || !is_consistent_order(e[1], e[6]) {
        return Ok(false);
    }
    if gaps.between(Pool::All, e[3], e[4])?.is_empty() {
        return Ok(false);
    }
    Ok(is_compatible_edges(e[0], e[3], gaps)? && is_compatible_edges(e[7], e[3], gaps)?)
}

pub fn classify(chain: &LinkedEdges, edges: &[Edge], gaps: &GapIndex) -> Result<ChainClass> {
    let n = chain.len();
    if n % 2 != 0 {
        return Err(Error::invariant(format!("odd chain length {}", n)));
    }

    let class = if n == 4 && chain.closed {
        ChainClass::Collinear
    } else if n < 4 {
        ChainClass::Unlinked
    } else if is_end_join(chain, edges, gaps)? {
        ChainClass::EndJoin
    } else if is_gap_fill(chain, edges, gaps)? {
        ChainClass::GapFill
    } else {
        ChainClass::Rearranged
    };

    if n >= 4 {
        log::debug!("{} chain of {} edges from {}", class, n, edges[chain.first()]);
    }
    Ok(class)
}
