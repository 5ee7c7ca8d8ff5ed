use crate::libs::classify::{classify, ChainClass};
use crate::libs::edge::{alignment_edges, Edge};
use crate::libs::error::Result;
use crate::libs::facing::resolve_facing;
use crate::libs::gap::GapIndex;
use crate::libs::linked::{linked_edges, LinkedEdges};
use crate::libs::maf::MafReader;
use crate::libs::report;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Default ceiling for the mismap probability of an alignment.
pub const DEFAULT_MAX_MISMAP: f64 = 1e-5;

/// Default maximum distance between two facing ends.
pub const DEFAULT_MAX_DISTANCE: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Alignments with a higher mismap probability are dropped
    pub max_mismap: f64,
    /// Ends further apart than this never face each other
    pub max_distance: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_mismap: DEFAULT_MAX_MISMAP,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// The full edge graph of one run with every chain classified.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub edges: Vec<Edge>,
    pub chains: Vec<(LinkedEdges, ChainClass)>,
    pub accepted: usize,
    pub rejected: usize,
}

impl Analysis {
    /// Reads a pairwise MAF and runs every stage up to classification.
    pub fn from_maf<R: BufRead>(maf: R, gaps: &GapIndex, config: &Config) -> Result<Self> {
        let extraction = alignment_edges(MafReader::new(maf), config.max_mismap)?;
        let mut edges = extraction.edges;
        resolve_facing(&mut edges, config.max_distance, gaps)?;

        let mut chains = vec![];
        for chain in linked_edges(&edges)? {
            let class = classify(&chain, &edges, gaps)?;
            chains.push((chain, class));
        }

        Ok(Self {
            edges,
            chains,
            accepted: extraction.accepted,
            rejected: extraction.rejected,
        })
    }

    /// Rearranged chains, ordered by their first edge.
    pub fn rearrangements(&self) -> Vec<&LinkedEdges> {
        let mut found: Vec<&LinkedEdges> = self
            .chains
            .iter()
            .filter(|(_, class)| *class == ChainClass::Rearranged)
            .map(|(chain, _)| chain)
            .collect();
        report::sort_chains(&mut found, &self.edges);
        found
    }

    /// Number of chains of each class.
    pub fn class_counts(&self) -> BTreeMap<ChainClass, usize> {
        let mut counts = BTreeMap::new();
        for (_, class) in &self.chains {
            *counts.entry(*class).or_insert(0) += 1;
        }
        counts
    }

    pub fn report_lines(&self, gaps: &GapIndex) -> Result<Vec<String>> {
        self.rearrangements()
            .into_iter()
            .map(|chain| report::format_chain(chain, &self.edges, gaps))
            .collect()
    }

    pub fn write_report<W: Write>(&self, writer: &mut W, gaps: &GapIndex) -> Result<()> {
        report::write_chains(writer, &self.rearrangements(), &self.edges, gaps)
    }
}

/// Report lines for the rearrangements in a pairwise MAF.
pub fn find_rearrangements<R: BufRead>(
    maf: R,
    gaps: &GapIndex,
    config: &Config,
) -> Result<Vec<String>> {
    Analysis::from_maf(maf, gaps, config)?.report_lines(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_mismap, 1e-5);
        assert_eq!(config.max_distance, 1_000_000_000);
    }

    #[test]
    fn test_empty_input() {
        let analysis = Analysis::from_maf("".as_bytes(), &GapIndex::default(), &Config::default())
            .unwrap();
        assert!(analysis.edges.is_empty());
        assert!(analysis.chains.is_empty());
        assert!(analysis.rearrangements().is_empty());
    }

    #[test]
    fn test_class_counts() {
        let input = "\
a score=1
s g1.chr1 100 50 + 1000 A
s g2.chr1 100 50 + 1000 A
";
        let analysis =
            Analysis::from_maf(input.as_bytes(), &GapIndex::default(), &Config::default())
                .unwrap();
        let counts = analysis.class_counts();
        assert_eq!(counts.get(&ChainClass::Unlinked), Some(&2));
        assert_eq!(counts.get(&ChainClass::Rearranged), None);
    }
}
