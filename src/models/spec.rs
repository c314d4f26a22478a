//! Textual partition specifications.
//!
//! Asset and flow configuration describes a partition with two columns: a
//! specification kind and a partition string. Three kinds are supported:
//!
//! | Kind | Partition string | Blocks for N = 12 |
//! |------|------------------|-------------------|
//! | `uniform` | `"4"` | `1:4, 5:8, 9:12` |
//! | `explicit` | `"3;3;6"` | `1:3, 4:6, 7:12` |
//! | `math` | `"2x3+1x6"` | `1:3, 4:6, 7:12` |
//!
//! In the `math` form each term `RxD` stands for `R` consecutive blocks of
//! length `D`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Partition;
use crate::error::{PartitionError, Result};

/// How to build a partition of a representative period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "specification", content = "partition", rename_all = "lowercase")]
pub enum PartitionSpec {
    /// Equal blocks of the given length.
    Uniform(usize),
    /// Block lengths, in order.
    Explicit(Vec<usize>),
    /// Sum of `RxD` terms.
    Math(String),
}

impl Default for PartitionSpec {
    /// Hourly resolution.
    fn default() -> Self {
        Self::Uniform(1)
    }
}

impl PartitionSpec {
    /// Parses a specification kind and its partition string.
    pub fn parse(kind: &str, partition: &str) -> Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform(parse_number(partition)?)),
            "explicit" => Ok(Self::Explicit(parse_explicit(partition)?)),
            "math" => {
                parse_math(partition)?;
                Ok(Self::Math(partition.trim().to_string()))
            }
            other => Err(PartitionError::InvalidSpecification(format!(
                "unknown specification kind '{other}'"
            ))),
        }
    }

    /// Builds the partition of `1..=span` this specification describes.
    pub fn build(&self, span: usize) -> Result<Partition> {
        match self {
            Self::Uniform(len) => Partition::uniform(*len, span),
            Self::Explicit(lengths) => {
                let total = checked_total(lengths.iter().map(|&len| (1, len)))?;
                check_total(total, span)?;
                Partition::from_lengths(lengths)
            }
            Self::Math(expr) => {
                let terms = parse_math(expr)?;
                check_total(checked_total(terms.iter().copied())?, span)?;
                // Every term has a positive length, so the expansion is
                // bounded by `span` once the total matches.
                let lengths: Vec<usize> = terms
                    .iter()
                    .flat_map(|&(repeats, len)| std::iter::repeat(len).take(repeats))
                    .collect();
                Partition::from_lengths(&lengths)
            }
        }
    }
}

impl fmt::Display for PartitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(len) => write!(f, "uniform({len})"),
            Self::Explicit(lengths) => {
                let parts: Vec<String> = lengths.iter().map(|l| l.to_string()).collect();
                write!(f, "explicit({})", parts.join(";"))
            }
            Self::Math(expr) => write!(f, "math({expr})"),
        }
    }
}

/// Sum of `repeats * len` over all terms, or an error on overflow.
fn checked_total(terms: impl IntoIterator<Item = (usize, usize)>) -> Result<usize> {
    terms
        .into_iter()
        .try_fold(0usize, |total, (repeats, len)| {
            repeats.checked_mul(len)?.checked_add(total)
        })
        .ok_or_else(|| {
            PartitionError::InvalidSpecification(
                "block lengths overflow the time index".to_string(),
            )
        })
}

fn check_total(total: usize, span: usize) -> Result<()> {
    if total != span {
        return Err(PartitionError::InvalidSpecification(format!(
            "block lengths sum to {total}, expected {span}"
        )));
    }
    Ok(())
}

fn parse_number(text: &str) -> Result<usize> {
    let text = text.trim();
    text.parse().map_err(|_| {
        PartitionError::InvalidSpecification(format!("'{text}' is not a non-negative integer"))
    })
}

fn parse_explicit(text: &str) -> Result<Vec<usize>> {
    text.split(';').map(parse_number).collect()
}

/// Parses `RxD+RxD+...` into `(repeats, len)` terms.
fn parse_math(text: &str) -> Result<Vec<(usize, usize)>> {
    let mut terms = Vec::new();
    for term in text.split('+') {
        let (repeats, len) = term.split_once('x').ok_or_else(|| {
            PartitionError::InvalidSpecification(format!(
                "term '{}' is not of the form RxD",
                term.trim()
            ))
        })?;
        let repeats = parse_number(repeats)?;
        let len = parse_number(len)?;
        if repeats > 0 && len == 0 {
            return Err(PartitionError::InvalidSpecification(format!(
                "term '{}' has zero block length",
                term.trim()
            )));
        }
        terms.push((repeats, len));
    }
    checked_total(terms.iter().copied())?;
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_spec() {
        let spec = PartitionSpec::parse("uniform", "4").unwrap();
        assert_eq!(spec, PartitionSpec::Uniform(4));
        assert_eq!(
            spec.build(12).unwrap(),
            Partition::from_pairs(&[(1, 4), (5, 8), (9, 12)])
        );
    }

    #[test]
    fn test_explicit_spec() {
        let spec = PartitionSpec::parse("explicit", "3;3;6").unwrap();
        assert_eq!(spec, PartitionSpec::Explicit(vec![3, 3, 6]));
        assert_eq!(
            spec.build(12).unwrap(),
            Partition::from_pairs(&[(1, 3), (4, 6), (7, 12)])
        );
    }

    #[test]
    fn test_math_spec() {
        let spec = PartitionSpec::parse("math", "3x4+2x3").unwrap();
        assert_eq!(
            spec.build(18).unwrap(),
            Partition::from_pairs(&[(1, 4), (5, 8), (9, 12), (13, 15), (16, 18)])
        );
    }

    #[test]
    fn test_math_matches_explicit() {
        let math = PartitionSpec::parse("math", "2x3+1x6").unwrap();
        let explicit = PartitionSpec::parse("explicit", "3;3;6").unwrap();
        assert_eq!(math.build(12).unwrap(), explicit.build(12).unwrap());
    }

    #[test]
    fn test_span_mismatch_rejected() {
        let spec = PartitionSpec::Explicit(vec![4, 4]);
        assert!(matches!(
            spec.build(12),
            Err(PartitionError::InvalidSpecification(_))
        ));
        assert!(PartitionSpec::Uniform(5).build(12).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(PartitionSpec::parse("fancy", "4").is_err());
        assert!(PartitionSpec::parse("uniform", "four").is_err());
        assert!(PartitionSpec::parse("explicit", "3;;3").is_err());
        assert!(PartitionSpec::parse("math", "3*4").is_err());
    }

    #[test]
    fn test_oversized_explicit_length_rejected() {
        let spec = PartitionSpec::parse("explicit", &format!("{};1", usize::MAX)).unwrap();
        assert!(matches!(
            spec.build(12),
            Err(PartitionError::InvalidSpecification(_))
        ));
    }

    #[test]
    fn test_oversized_math_repeat_rejected() {
        assert!(matches!(
            PartitionSpec::parse("math", &format!("{}x1+1x1", usize::MAX)),
            Err(PartitionError::InvalidSpecification(_))
        ));
        let half = 1usize << (usize::BITS / 2);
        assert!(PartitionSpec::parse("math", &format!("{half}x{half}")).is_err());
        assert!(PartitionSpec::parse("math", "3x0").is_err());

        // A huge repeat count alone parses but cannot match a small span.
        let spec = PartitionSpec::parse("math", &format!("{}x1", usize::MAX)).unwrap();
        assert!(matches!(
            spec.build(12),
            Err(PartitionError::InvalidSpecification(_))
        ));
        // Unparsed values are checked the same way.
        assert!(PartitionSpec::Math(format!("{}x2", usize::MAX))
            .build(12)
            .is_err());
    }

    #[test]
    fn test_kind_case_insensitive() {
        assert_eq!(
            PartitionSpec::parse("Uniform", " 2 ").unwrap(),
            PartitionSpec::Uniform(2)
        );
    }

    #[test]
    fn test_serde_tagged() {
        let spec = PartitionSpec::Explicit(vec![2, 2]);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"specification":"explicit","partition":[2,2]}"#);
        let back: PartitionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
