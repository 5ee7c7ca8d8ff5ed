use crate::libs::error::{Error, Result};
use std::io::{self, BufRead};

/// One `s` line. `start` is zero-based on the strand given by `strand`.
#[derive(Debug, Clone, Default)]
pub struct MafComp {
    pub src: String,
    pub start: u64,
    pub size: u64,
    pub strand: char,
    pub src_size: u64,
}

impl MafComp {
    pub fn is_reverse(&self) -> bool {
        self.strand == '-'
    }
}

/// One alignment block.
#[derive(Debug, Clone, Default)]
pub struct MafAli {
    /// Line number of the `a` line
    pub line: usize,
    /// Probability that the block is misplaced, from `mismap=`
    pub mismap: Option<f64>,
    pub components: Vec<MafComp>,
}

impl MafAli {
    /// Blocks without a mismap annotation are always kept.
    pub fn is_reliable(&self, max_mismap: f64) -> bool {
        match self.mismap {
            Some(p) => p <= max_mismap,
            None => true,
        }
    }
}

pub struct MafReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
    pending: Option<String>,
}

impl<R: BufRead> MafReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            lines: inner.lines(),
            line_no: 0,
            pending: None,
        }
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        if let Some(line) = self.pending.take() {
            return Some(Ok(line));
        }
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }

    fn parse_a_line(&self, line: &str) -> Result<MafAli> {
        let mut ali = MafAli {
            line: self.line_no,
            ..Default::default()
        };
        for field in line.split_whitespace().skip(1) {
            // score and other annotations are not used
            let Some(value) = field.strip_prefix("mismap=") else {
                continue;
            };
            if ali.mismap.is_none() {
                let p = value.parse().map_err(|_| {
                    Error::parse(self.line_no, format!("invalid mismap: {}", value))
                })?;
                ali.mismap = Some(p);
            }
        }
        Ok(ali)
    }

    fn parse_s_line(&self, line: &str) -> Result<MafComp> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 {
            return Err(Error::parse(
                self.line_no,
                format!("expected at least 6 fields in s line, got {}", fields.len()),
            ));
        }

        let number = |idx: usize, what: &str| -> Result<u64> {
            fields[idx].parse().map_err(|_| {
                Error::parse(self.line_no, format!("invalid {}: {}", what, fields[idx]))
            })
        };
        let start = number(2, "start")?;
        let size = number(3, "size")?;
        let src_size = number(5, "source size")?;

        let strand = match fields[4] {
            "+" => '+',
            "-" => '-',
            other => {
                return Err(Error::parse(
                    self.line_no,
                    format!("invalid strand: {}", other),
                ))
            }
        };
        if start.checked_add(size).map_or(true, |end| end > src_size) {
            return Err(Error::parse(
                self.line_no,
                format!(
                    "{}: {} + {} runs past sequence length {}",
                    fields[1], start, size, src_size
                ),
            ));
        }

        Ok(MafComp {
            src: fields[1].to_string(),
            start,
            size,
            strand,
            src_size,
        })
    }
}

impl<R: BufRead> Iterator for MafReader<R> {
    type Item = Result<MafAli>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current: Option<MafAli> = None;

        loop {
            let line = match self.next_line() {
                None => return current.map(Ok),
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e.into())),
            };

            match line.bytes().next() {
                Some(b'a') => {
                    if current.is_some() {
                        // the next block starts without a blank line
                        self.pending = Some(line);
                        return current.map(Ok);
                    }
                    match self.parse_a_line(&line) {
                        Ok(ali) => current = Some(ali),
                        Err(e) => return Some(Err(e)),
                    }
                }
                Some(b's') => {
                    let comp = match self.parse_s_line(&line) {
                        Ok(comp) => comp,
                        Err(e) => return Some(Err(e)),
                    };
                    match current.as_mut() {
                        Some(ali) => ali.components.push(comp),
                        None => {
                            return Some(Err(Error::parse(
                                self.line_no,
                                "s line outside of an alignment block",
                            )))
                        }
                    }
                }
                None if current.is_some() => return current.map(Ok),
                // comments, q/i/e/p lines
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maf() {
        let input = "\
# LAST version 1256
#
a score=1000 mismap=1e-09
s hg19.chr1 100 50 + 1000 ACGT
s mm10.chr3 200 50 - 2000 ACGT
q mm10.chr3 ~~~~

a score=12 mismap=0.5
s hg19.chr2 10 5 + 1000 ACGT
s mm10.chr7 20 5 + 2000 ACGT
a score=20
s hg19.chr2 30 5 + 1000 ACGT
s mm10.chr7 40 5 + 2000 ACGT
";
        let blocks: Vec<MafAli> = MafReader::new(input.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0].line, 3);
        assert_eq!(blocks[0].mismap, Some(1e-9));
        assert_eq!(blocks[0].components.len(), 2);
        assert_eq!(blocks[0].components[1].src, "mm10.chr3");
        assert!(blocks[0].components[1].is_reverse());
        assert_eq!(blocks[0].components[1].src_size, 2000);

        assert!(!blocks[1].is_reliable(1e-5));
        assert!(blocks[1].is_reliable(0.5));

        // no blank line before the third block
        assert_eq!(blocks[2].line, 11);
        assert_eq!(blocks[2].mismap, None);
        assert!(blocks[2].is_reliable(0.0));
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("s hg19.chr1 100 50 + 1000 ACGT\n", 1),
            ("a score=1\ns hg19.chr1 100 50 + 1000\ns mm10 x 5 + 10\n", 3),
            ("a score=1\ns hg19.chr1 100 50 + 1000\ns mm10 1 5 ?\n", 3),
            ("a score=1\ns hg19.chr1 100 50 * 1000 A\n", 2),
            ("a score=1\ns hg19.chr1 990 50 + 1000 A\n", 2),
            ("a score=1\ns x 18446744073709551615 2 + 5 A\n", 2),
            ("a score=1\ns x 3 18446744073709551615 - 5 A\n", 2),
            ("a mismap=abc\n", 1),
        ];
        for (input, expected) in cases {
            let result: Result<Vec<MafAli>> = MafReader::new(input.as_bytes()).collect();
            match result {
                Err(Error::Parse { line, .. }) => assert_eq!(line, expected, "{}", input),
                other => panic!("{} gave {:?}", input, other),
            }
        }
    }
}
