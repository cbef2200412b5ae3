use std::sync::LazyLock;

use regex::Regex;

use super::{Candidate, Strategy, StrategyKind};
use crate::normalize::NormalizedText;

// "F.No.1 MPH Scaling Counts: 100 Value: 100" — fully labeled table row.
static LABELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bF\.?\s*No\.?\s*(\d{1,3})\s+(?:.+?)\s*Counts?\s*:\s*(\d{1,4})\s+Value\s*:\s*(\d{1,4})",
    )
    .unwrap()
});

// "1 MPH Scaling 100 100 Cnts" — positional row: number, description, counts
// figure, value figure, unit marker.
static POSITIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\s+[A-Za-z][A-Za-z0-9 /().-]*?\s+(\d{1,4})\s+(\d{1,4})\s*(?:Cnts|Units)\b")
        .unwrap()
});

/// Highest-precedence strategy: rows that expose function number,
/// description, a counts figure and a final value figure. The value figure
/// is authoritative when both are present.
pub struct StructuredTable;

impl Strategy for StructuredTable {
    fn kind(&self) -> StrategyKind {
        StrategyKind::StructuredTable
    }

    fn extract(&self, text: &NormalizedText) -> Vec<Candidate> {
        let mut out = Vec::new();
        for line in text.lines() {
            for caps in LABELED_RE.captures_iter(line) {
                if let (Some(f), Some(v)) = (parse(&caps, 1), parse(&caps, 3)) {
                    out.push(Candidate {
                        function: f,
                        value: v,
                        origin: StrategyKind::StructuredTable,
                    });
                }
            }
            for caps in POSITIONAL_RE.captures_iter(line) {
                if let (Some(f), Some(v)) = (parse(&caps, 1), parse(&caps, 3)) {
                    out.push(Candidate {
                        function: f,
                        value: v,
                        origin: StrategyKind::StructuredTable,
                    });
                }
            }
        }
        out
    }
}

fn parse(caps: &regex::Captures<'_>, group: usize) -> Option<i64> {
    caps.get(group)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn run(text: &str) -> Vec<(i64, i64)> {
        StructuredTable
            .extract(&normalize(text))
            .into_iter()
            .map(|c| (c.function, c.value))
            .collect()
    }

    #[test]
    fn labeled_row() {
        assert_eq!(run("F.No.1 MPH Scaling Counts: 100 Value: 100"), [(1, 100)]);
    }

    #[test]
    fn labeled_row_value_figure_wins_over_counts() {
        // Provisional counts figure differs from the final value figure.
        assert_eq!(run("F.No.2 Minimum Speed Counts: 40 Value: 45"), [(2, 45)]);
    }

    #[test]
    fn positional_row() {
        assert_eq!(run("3 Controlled Acceleration 15 15 Cnts"), [(3, 15)]);
        assert_eq!(run("11 Current Limit 248 250 Units"), [(11, 250)]);
    }

    #[test]
    fn several_records_on_one_line() {
        assert_eq!(
            run("1 MPH Scaling 100 100 Cnts 3 Controlled Acceleration 15 15 Cnts"),
            [(1, 100), (3, 15)]
        );
    }

    #[test]
    fn ignores_rows_without_the_full_shape() {
        assert!(run("7 99").is_empty());
        assert!(run("F.No.7 Reverse Speed Limit 70").is_empty());
        assert!(run("no digits here").is_empty());
    }
}
