//! Heuristics on sequence names.
//!
//! These work for UCSC-style assemblies (hg19, panTro4, ponAbe2, mm10,
//! canFam3). Names that do not look like chromosomes are treated
//! permissively.

/// Drops the genome prefix, if any: `hg19.chr1` -> `chr1`.
///
/// ```
/// assert_eq!(rearr::libs::names::name_only("hg19.chr1"), "chr1");
/// assert_eq!(rearr::libs::names::name_only("chr1"), "chr1");
/// ```
pub fn name_only(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Drops the fragment suffix, if any: `chr1_gl000191_random` -> `chr1`.
pub fn name_base(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// Whether the relative order and orientation of gaps on this sequence can
/// be trusted.
pub fn is_ordered_chromosome(name: &str) -> bool {
    !name.contains('_') && !name.contains('U')
}

/// Placed chromosomes only; `chrUn_*` and non-`chr` names are unknown.
pub fn is_known_chromosome(name: &str) -> bool {
    !name.contains('U') && name.contains("chr")
}

/// Two sequences may be neighbours in the real genome: they are fragments
/// of the same chromosome, or at least one of them is unplaced.
pub fn is_compatible(name1: &str, name2: &str) -> bool {
    if !is_known_chromosome(name1) || !is_known_chromosome(name2) {
        return true;
    }
    name_base(name_only(name1)) == name_base(name_only(name2))
}
