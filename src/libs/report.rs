//! Text rendering of rearranged chains.
//!
//! One line per chain, space-separated. Edges print as `name:coordinate[`
//! (start) or `name:coordinate]` (end). Between two consecutive edges of the
//! same genome, any assembly gaps are listed as `gapLEN` or
//! `gapLEN1,LEN2,...`.

use crate::libs::edge::Edge;
use crate::libs::error::Result;
use crate::libs::gap::{Gap, GapIndex, Pool};
use crate::libs::linked::LinkedEdges;
use itertools::Itertools;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Edge(&'a Edge),
    Gaps(Vec<&'a Gap>),
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Edge(edge) => write!(f, "{}", edge),
            Token::Gaps(gaps) => write!(f, "gap{}", gaps.iter().map(|g| g.len()).join(",")),
        }
    }
}

/// Edges of the chain with gap tokens interleaved. Uses every gap, not only
/// unordered ones.
pub fn tokens<'a>(
    chain: &LinkedEdges,
    edges: &'a [Edge],
    gaps: &'a GapIndex,
) -> Result<Vec<Token<'a>>> {
    let mut tokens = vec![];
    for (i, &serial) in chain.edges.iter().enumerate() {
        let x = &edges[serial];
        tokens.push(Token::Edge(x));

        let Some(&next) = chain.edges.get(i + 1) else {
            continue;
        };
        let y = &edges[next];
        if x.genome != y.genome {
            continue;
        }
        let between = gaps.between(Pool::All, x, y)?;
        if !between.is_empty() {
            tokens.push(Token::Gaps(between));
        }
    }
    Ok(tokens)
}

pub fn format_chain(chain: &LinkedEdges, edges: &[Edge], gaps: &GapIndex) -> Result<String> {
    Ok(tokens(chain, edges, gaps)?.iter().join(" "))
}

/// Orders chains by the position of their first edge.
pub fn sort_chains(chains: &mut [&LinkedEdges], edges: &[Edge]) {
    chains.sort_by(|a, b| edges[a.first()].cmp_position(&edges[b.first()]));
}

pub fn write_chains<W: Write>(
    writer: &mut W,
    chains: &[&LinkedEdges],
    edges: &[Edge],
    gaps: &GapIndex,
) -> Result<()> {
    for chain in chains {
        writeln!(writer, "{}", format_chain(chain, edges, gaps)?)?;
    }
    Ok(())
}
