//! Chains of linked edges.
//!
//! Aligned links join the two genomes, facing links join neighbours within a
//! genome. Every edge has exactly one aligned partner and at most one facing
//! partner, so the connected components are alternating paths or cycles.
//! Walking them gives the chains.

use crate::libs::edge::Edge;
use crate::libs::error::{Error, Result};
use std::collections::VecDeque;

/// Serials of one chain, in walking order. An open chain begins with an
/// edge without a facing partner and alternates aligned, facing, aligned,
/// and so on up to an edge without a facing partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedEdges {
    pub edges: Vec<usize>,
    pub closed: bool,
}

impl LinkedEdges {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn first(&self) -> usize {
        self.edges[0]
    }
}

/// Walks every edge into exactly one chain.
pub fn linked_edges(edges: &[Edge]) -> Result<Vec<LinkedEdges>> {
    let mut consumed = vec![false; edges.len()];
    let mut chains = vec![];

    for x in 0..edges.len() {
        if consumed[x] {
            continue;
        }
        let chain = walk(edges, x, &mut consumed)?;
        chains.push(chain);
    }

    log::info!("{} chains", chains.len());
    Ok(chains)
}

fn take(consumed: &mut [bool], serial: usize, edges: &[Edge]) -> Result<()> {
    if consumed[serial] {
        return Err(Error::invariant(format!(
            "{} (serial {}) reached twice",
            edges[serial], serial
        )));
    }
    consumed[serial] = true;
    Ok(())
}

fn walk(edges: &[Edge], x: usize, consumed: &mut [bool]) -> Result<LinkedEdges> {
    let mut chain = VecDeque::new();
    let mut closed = false;

    // forward: facing, then aligned
    let mut y = x;
    loop {
        if consumed[y] {
            if y != x {
                return Err(Error::invariant(format!(
                    "chain from {} re-entered at {}",
                    edges[x], edges[y]
                )));
            }
            closed = true;
            break;
        }
        take(consumed, y, edges)?;
        chain.push_back(y);

        let Some(facing) = edges[y].facing else {
            break;
        };
        take(consumed, facing, edges)?;
        chain.push_back(facing);
        y = edges[facing].aligned;
    }

    // backward: aligned, then facing
    if !closed {
        let mut y = x;
        loop {
            let aligned = edges[y].aligned;
            take(consumed, aligned, edges)?;
            chain.push_front(aligned);

            let Some(facing) = edges[aligned].facing else {
                break;
            };
            take(consumed, facing, edges)?;
            chain.push_front(facing);
            y = facing;
        }
    }

    let chain = LinkedEdges {
        edges: chain.into(),
        closed,
    };
    if chain.len() % 2 != 0 {
        return Err(Error::invariant(format!(
            "chain from {} has odd length {}",
            edges[x],
            chain.len()
        )));
    }
    if edges[chain.first()].facing.is_some() != closed {
        return Err(Error::invariant(format!(
            "chain from {} is {} but its first edge says otherwise",
            edges[x],
            if closed { "closed" } else { "open" }
        )));
    }

    Ok(chain)
}
