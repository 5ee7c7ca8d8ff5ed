//! Assembly gaps of the two genomes.
//!
//! Gaps are read from AGP files or UCSC `gap` tables. Each genome keeps two
//! sorted pools: every gap, and the gaps on sequences whose order and
//! orientation is not trusted ("unordered"). Unordered gaps decide whether
//! two nearby alignment ends really abut; the full pool is used to spot gap
//! fills and to annotate the report.

use crate::libs::edge::{Edge, Genome};
use crate::libs::error::{Error, Result};
use crate::libs::names;
use std::io::BufRead;

/// A half-open, zero-based interval of unknown bases.
///
/// The field order matters: the derived `Ord` sorts by name, begin, end.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Gap {
    pub name: String,
    pub begin: u64,
    pub end: u64,
    pub is_ordered: bool,
}

impl Gap {
    pub fn len(&self) -> u64 {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Which gap pool a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    All,
    Unordered,
}

/// A sorted list of gaps, searchable by interval.
#[derive(Debug, Clone, Default)]
pub struct GapSet {
    gaps: Vec<Gap>,
}

impl GapSet {
    pub fn new(mut gaps: Vec<Gap>) -> Self {
        gaps.sort();
        Self { gaps }
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Gap> {
        self.gaps.iter()
    }

    /// Gaps on `name` that begin within `[min(a, b), max(a, b))`.
    ///
    /// A returned gap reaching past `max(a, b)` means an alignment runs into
    /// a gap. That is logged and the gap is still returned.
    pub fn between(&self, name: &str, a: u64, b: u64) -> Vec<&Gap> {
        let lo = a.min(b);
        let hi = a.max(b);
        let probe = |pos: u64| Gap {
            name: name.to_string(),
            begin: pos,
            end: pos,
            is_ordered: false,
        };
        let lo_probe = probe(lo);
        let hi_probe = probe(hi);

        let first = self.gaps.partition_point(|g| g <= &lo_probe);
        let mut found = vec![];
        for gap in self.gaps[first..].iter().take_while(|g| *g < &hi_probe) {
            if gap.end > hi {
                log::warn!(
                    "a gap overlaps an alignment: {}:{}-{} extends past {}",
                    gap.name,
                    gap.begin,
                    gap.end,
                    hi
                );
            }
            found.push(gap);
        }
        found
    }
}

/// Both pools of one genome.
#[derive(Debug, Clone, Default)]
pub struct GenomeGaps {
    pub all: GapSet,
    pub unordered: GapSet,
}

impl GenomeGaps {
    pub fn new(gaps: Vec<Gap>) -> Self {
        let unordered = gaps.iter().filter(|g| !g.is_ordered).cloned().collect();
        Self {
            all: GapSet::new(gaps),
            unordered: GapSet::new(unordered),
        }
    }

    /// Reads gaps from AGP or UCSC gap-table lines.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Ok(Self::new(read_gaps(reader)?))
    }

    /// Reads a gap file; `stdin` and `.gz` are accepted.
    pub fn from_path(path: &str) -> Result<Self> {
        Self::from_reader(crate::reader(path)?)
    }

    pub fn pool(&self, pool: Pool) -> &GapSet {
        match pool {
            Pool::All => &self.all,
            Pool::Unordered => &self.unordered,
        }
    }
}

/// Gaps of genome 1 and genome 2. A genome without a gap file has empty
/// pools, so gap tests never block for it.
#[derive(Debug, Clone, Default)]
pub struct GapIndex {
    pub genome1: GenomeGaps,
    pub genome2: GenomeGaps,
}

impl GapIndex {
    pub fn new(genome1: GenomeGaps, genome2: GenomeGaps) -> Self {
        Self { genome1, genome2 }
    }

    pub fn genome(&self, genome: Genome) -> &GenomeGaps {
        match genome {
            Genome::First => &self.genome1,
            Genome::Second => &self.genome2,
        }
    }

    /// Gaps lying between two ends on the same sequence of the same genome.
    pub fn between(&self, pool: Pool, a: &Edge, b: &Edge) -> Result<Vec<&Gap>> {
        if a.genome != b.genome || a.name != b.name {
            return Err(Error::invariant(format!(
                "gap query across sequences: {} and {}",
                a, b
            )));
        }
        let gaps = self.genome(a.genome).pool(pool);
        Ok(gaps.between(names::name_only(&a.name), a.coordinate, b.coordinate))
    }
}

/// Parses gap records, keeping only `N` and `U` components.
///
/// Accepted layouts, whitespace separated:
///
/// * AGP: `object beg end part type length gap_type linkage evidence`
/// * UCSC gap table: `bin chrom chromStart chromEnd ix n size type bridge`
///
/// ```
/// let input = "\
/// chr1\t1\t10000\t1\tN\t10000\ttelomere\tno\tna
/// chr1\t10001\t177417\t2\tF\tAP006221.1\t36117\t203417\t-
/// 585\tchr1_random\t200\t300\t5\tN\t100\tcontig\tno
/// ";
/// let gaps = rearr::libs::gap::read_gaps(input.as_bytes()).unwrap();
/// assert_eq!(gaps.len(), 2);
/// assert_eq!(gaps[0].begin, 0);
/// assert!(gaps[0].is_ordered);
/// assert_eq!(gaps[1].name, "chr1_random");
/// assert_eq!(gaps[1].begin, 200);
/// assert!(!gaps[1].is_ordered);
/// ```
pub fn read_gaps<R: BufRead>(reader: R) -> Result<Vec<Gap>> {
    let mut gaps = vec![];

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields: Vec<&str> = trimmed.split_whitespace().collect();
        // UCSC tables carry a leading bin column
        if fields.len() > 4 && fields[4].bytes().all(|b| b.is_ascii_digit()) {
            fields.remove(0);
        }
        if fields.len() < 6 {
            return Err(Error::parse(
                line_no,
                format!("expected at least 6 gap fields, got {}", fields.len()),
            ));
        }
        if fields[4] != "N" && fields[4] != "U" {
            continue;
        }

        let name = fields[0].to_string();
        let end: u64 = fields[2]
            .parse()
            .map_err(|_| Error::parse(line_no, format!("invalid gap end: {}", fields[2])))?;
        let length: u64 = fields[5]
            .parse()
            .map_err(|_| Error::parse(line_no, format!("invalid gap length: {}", fields[5])))?;
        let begin = end.checked_sub(length).ok_or_else(|| {
            Error::parse(
                line_no,
                format!("gap length {} exceeds end {}", length, end),
            )
        })?;
        let is_ordered = names::is_ordered_chromosome(&name) || fields.get(7) == Some(&"yes");

        gaps.push(Gap {
            name,
            begin,
            end,
            is_ordered,
        });
    }

    Ok(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(name: &str, begin: u64, end: u64, is_ordered: bool) -> Gap {
        Gap {
            name: name.to_string(),
            begin,
            end,
            is_ordered,
        }
    }

    #[test]
    fn test_read_gaps_linkage() {
        let input = "\
# comment

scaffold_3 1 500 1 W contig_1 1 500 +
scaffold_3 501 600 2 N 100 scaffold yes paired-ends
scaffold_3 601 700 3 N 100 scaffold no na
scaffold_3 701 800 4 U 100 contig
";
        let gaps = read_gaps(input.as_bytes()).unwrap();
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0], gap("scaffold_3", 500, 600, true));
        assert_eq!(gaps[1], gap("scaffold_3", 600, 700, false));
        // no linkage column
        assert_eq!(gaps[2], gap("scaffold_3", 700, 800, false));
    }

    #[test]
    fn test_read_gaps_errors() {
        match read_gaps("chr1 1 100 1 N".as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected {:?}", other),
        }
        match read_gaps("chr1 1 100 1 N\nchr1 1 1x0 2 N 10 x no".as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert!(read_gaps("chr1 1 1x0 2 N 10 x no".as_bytes()).is_err());
        assert!(read_gaps("chr1 1 10 2 N 100 x no".as_bytes()).is_err());
    }

    #[test]
    fn test_pools() {
        let gaps = GenomeGaps::new(vec![
            gap("chr2", 50, 60, true),
            gap("chr1_random", 10, 20, false),
            gap("chr1", 300, 400, true),
        ]);
        assert_eq!(gaps.all.len(), 3);
        assert_eq!(gaps.unordered.len(), 1);

        let names: Vec<&str> = gaps.all.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chr1_random", "chr2"]);
    }

    #[test]
    fn test_between() {
        let set = GapSet::new(vec![
            gap("chr1", 100, 110, true),
            gap("chr1", 200, 250, true),
            gap("chr1", 400, 420, true),
            gap("chr2", 150, 160, true),
        ]);

        let found = set.between("chr1", 90, 300);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].begin, 100);
        assert_eq!(found[1].begin, 200);

        // argument order does not matter
        assert_eq!(set.between("chr1", 300, 90).len(), 2);

        // a gap starting exactly at the lower bound counts
        assert_eq!(set.between("chr1", 100, 150).len(), 1);
        // one starting at the upper bound does not
        assert_eq!(set.between("chr1", 50, 100).len(), 0);

        assert!(set.between("chr3", 0, 1000).is_empty());
        assert_eq!(set.between("chr2", 0, 1000).len(), 1);
    }

    // Collects warnings logged on the current thread.
    struct WarnCapture;

    thread_local! {
        static WARNINGS: std::cell::RefCell<Vec<String>> = Default::default();
    }

    impl log::Log for WarnCapture {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: WarnCapture = WarnCapture;

    fn warnings_of<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(log::LevelFilter::Warn);
        });
        WARNINGS.with(|w| w.borrow_mut().clear());
        let result = f();
        let warnings = WARNINGS.with(|w| w.borrow_mut().drain(..).collect());
        (result, warnings)
    }

    #[test]
    fn test_between_overlap_still_reported() {
        let set = GapSet::new(vec![gap("chr1", 100, 200, true)]);

        // gap runs past the upper end: a warning, not a failure
        let (found, warnings) = warnings_of(|| set.between("chr1", 50, 150));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), 100);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("chr1:100-200 extends past 150"));

        let (found, warnings) = warnings_of(|| set.between("chr1", 50, 250));
        assert_eq!(found.len(), 1);
        assert!(warnings.is_empty());
    }
}
