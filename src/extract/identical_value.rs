use std::sync::LazyLock;

use regex::Regex;

use super::{Candidate, Strategy, StrategyKind};
use crate::normalize::NormalizedText;

// "7 Reverse Speed Limit 70 70 A" — function number, optional description,
// two numeric fields, terminating unit token. The two fields must be equal;
// the equality check happens in code, the regex only finds the shape.
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d{1,3})\s+(?:[A-Za-z][A-Za-z0-9 /().-]*?\s+)?(\d{1,4})\s+(\d{1,4})\s*(?:Cnts\b|Units\b|A\b|V\b|MPH\b|%)",
    )
    .unwrap()
});

/// Vendor export where a row repeats its value twice before the unit token.
/// Requiring the repetition makes a match high-confidence and disambiguates
/// this export family from the generic inline shape.
pub struct IdenticalValue;

impl Strategy for IdenticalValue {
    fn kind(&self) -> StrategyKind {
        StrategyKind::IdenticalValue
    }

    fn extract(&self, text: &NormalizedText) -> Vec<Candidate> {
        let mut out = Vec::new();
        for line in text.lines() {
            for caps in ROW_RE.captures_iter(line) {
                let (Some(f), Some(a), Some(b)) =
                    (parse(&caps, 1), parse(&caps, 2), parse(&caps, 3))
                else {
                    continue;
                };
                if a != b {
                    continue;
                }
                out.push(Candidate {
                    function: f,
                    value: a,
                    origin: StrategyKind::IdenticalValue,
                });
            }
        }
        out
    }
}

fn parse(caps: &regex::Captures<'_>, group: usize) -> Option<i64> {
    caps.get(group)?.as_str().parse().ok()
}
