//! Links each alignment end to the end of the neighbouring alignment that it
//! abuts in the same genome.

use crate::libs::edge::{Edge, EndType};
use crate::libs::error::{Error, Result};
use crate::libs::gap::{GapIndex, Pool};

/// Whether `left` and `right` (in position order) can be treated as truly
/// adjacent: same sequence, close enough, and no unordered gap in between.
pub fn is_facing(left: &Edge, right: &Edge, max_distance: u64, gaps: &GapIndex) -> Result<bool> {
    if left.genome != right.genome || left.name != right.name {
        return Ok(false);
    }
    if left.coordinate > right.coordinate {
        return Err(Error::invariant(format!(
            "facing test out of order: {} after {}",
            left, right
        )));
    }
    if right.coordinate - left.coordinate > max_distance {
        return Ok(false);
    }
    Ok(gaps.between(Pool::Unordered, left, right)?.is_empty())
}

/// Sets `facing` on every edge and returns the number of facing pairs.
///
/// In position order a one-to-one alignment gives alternating start and end
/// edges on each sequence, so an end can only face the start right after
/// it, and a start only the end right before it.
pub fn resolve_facing(edges: &mut [Edge], max_distance: u64, gaps: &GapIndex) -> Result<usize> {
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&a, &b| edges[a].cmp_position(&edges[b]));

    let mut facings = vec![None; edges.len()];
    for (i, &serial) in order.iter().enumerate() {
        let x = &edges[serial];
        let expected = if i % 2 == 1 {
            EndType::End
        } else {
            EndType::Start
        };
        if x.end_type != expected {
            return Err(Error::invariant(format!(
                "{} is not an alignment {} in position order; do alignments overlap?",
                x,
                expected.as_str()
            )));
        }

        let neighbour = if i % 2 == 1 {
            order.get(i + 1).map(|&next| (serial, next))
        } else if i > 0 {
            Some((order[i - 1], serial))
        } else {
            None
        };
        if let Some((left, right)) = neighbour {
            if is_facing(&edges[left], &edges[right], max_distance, gaps)? {
                facings[serial] = Some(if left == serial { right } else { left });
            }
        }
    }

    let mut pairs = 0;
    for (edge, facing) in edges.iter_mut().zip(facings) {
        if facing.is_some() {
            pairs += 1;
        }
        edge.facing = facing;
    }
    log::info!("{} facing pairs", pairs / 2);

    Ok(pairs / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::edge::alignment_edges;
    use crate::libs::gap::{Gap, GenomeGaps};
    use crate::libs::maf::MafReader;

    fn edges_of(input: &str) -> Vec<Edge> {
        alignment_edges(MafReader::new(input.as_bytes()), 1e-5)
            .unwrap()
            .edges
    }

    // two blocks, adjacent in both genomes
    const COLLINEAR: &str = "\
a score=1
s g1.chr1 100 50 + 1000 A
s g2.chr1 100 50 + 1000 A

a score=1
s g1.chr1 200 50 + 1000 A
s g2.chr1 300 50 + 1000 A
";

    #[test]
    fn test_facing_pairs() {
        let mut edges = edges_of(COLLINEAR);
        let pairs = resolve_facing(&mut edges, 1_000_000_000, &GapIndex::default()).unwrap();
        assert_eq!(pairs, 2);

        // g1 end of block 0 (150) faces g1 start of block 1 (200)
        assert_eq!(edges[2].facing, Some(4));
        assert_eq!(edges[4].facing, Some(2));
        assert_eq!(edges[3].facing, Some(5));
        // outermost ends face nothing
        assert_eq!(edges[0].facing, None);
        assert_eq!(edges[7].facing, None);

        for edge in &edges {
            if let Some(f) = edge.facing {
                assert_eq!(edges[f].facing, Some(edge.serial));
            }
        }
    }

    #[test]
    fn test_max_distance() {
        let mut edges = edges_of(COLLINEAR);
        // g1 distance is 50, g2 distance is 150
        let pairs = resolve_facing(&mut edges, 100, &GapIndex::default()).unwrap();
        assert_eq!(pairs, 1);
        assert_eq!(edges[2].facing, Some(4));
        assert_eq!(edges[3].facing, None);
        assert_eq!(edges[5].facing, None);
    }

    #[test]
    fn test_unordered_gap_blocks_facing() {
        let gap = |name: &str, is_ordered| Gap {
            name: name.to_string(),
            begin: 160,
            end: 180,
            is_ordered,
        };

        let mut edges = edges_of(COLLINEAR);
        let gaps = GapIndex::new(GenomeGaps::new(vec![gap("chr1", true)]), Default::default());
        resolve_facing(&mut edges, 1_000_000_000, &gaps).unwrap();
        assert_eq!(edges[2].facing, Some(4));

        let mut edges = edges_of(COLLINEAR);
        let gaps = GapIndex::new(GenomeGaps::new(vec![gap("chr1", false)]), Default::default());
        resolve_facing(&mut edges, 1_000_000_000, &gaps).unwrap();
        assert_eq!(edges[2].facing, None);
        assert_eq!(edges[4].facing, None);
        // genome 2 has no gaps
        assert_eq!(edges[3].facing, Some(5));
    }

    #[test]
    fn test_different_sequences() {
        let input = "\
a score=1
s g1.chr1 100 50 + 1000 A
s g2.chr1 100 50 + 1000 A

a score=1
s g1.chr2 200 50 + 1000 A
s g2.chr1 300 50 + 1000 A
";
        let mut edges = edges_of(input);
        resolve_facing(&mut edges, 1_000_000_000, &GapIndex::default()).unwrap();
        assert_eq!(edges[2].facing, None);
        assert_eq!(edges[3].facing, Some(5));
    }

    #[test]
    fn test_overlapping_alignments() {
        let input = "\
a score=1
s g1.chr1 100 50 + 1000 A
s g2.chr1 100 50 + 1000 A

a score=1
s g1.chr1 120 50 + 1000 A
s g2.chr1 300 50 + 1000 A
";
        let mut edges = edges_of(input);
        let result = resolve_facing(&mut edges, 1_000_000_000, &GapIndex::default());
        assert!(matches!(result, Err(Error::Invariant(_))));
    }
}
