use std::sync::LazyLock;

use regex::Regex;

use super::{Candidate, Strategy, StrategyKind};
use crate::normalize::NormalizedText;

// "5 Creep Speed 12 Cnts" / "3 Controlled Acceleration 15 15 Cnts" —
// number, description, one or two numeric fields, unit token. The export
// convention shows a provisional figure before the final one, so when two
// fields appear the second is authoritative. Best-effort tie-break, not a
// guarantee of the format.
static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d{1,3})\s+[A-Za-z][A-Za-z0-9 /().-]*?\s+(\d{1,4})(?:\s+(\d{1,4}))?\s*(?:Cnts\b|Units\b|A\b|V\b|MPH\b|%)",
    )
    .unwrap()
});

/// Single-line "description + value(s) + unit" groups, the shape the blob
/// splitter produces.
pub struct InlineDelimited;

impl Strategy for InlineDelimited {
    fn kind(&self) -> StrategyKind {
        StrategyKind::InlineDelimited
    }

    fn extract(&self, text: &NormalizedText) -> Vec<Candidate> {
        let mut out = Vec::new();
        for line in text.lines() {
            for caps in GROUP_RE.captures_iter(line) {
                let Some(f) = parse(&caps, 1) else { continue };
                // Second numeric field wins when present.
                let Some(v) = parse(&caps, 3).or_else(|| parse(&caps, 2)) else {
                    continue;
                };
                out.push(Candidate {
                    function: f,
                    value: v,
                    origin: StrategyKind::InlineDelimited,
                });
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
        InlineDelimited
            .extract(&normalize(text))
            .into_iter()
            .map(|c| (c.function, c.value))
            .collect()
    }

    #[test]
    fn single_value_group() {
        assert_eq!(run("5 Emergency Deceleration 12 Cnts"), [(5, 12)]);
    }

    #[test]
    fn second_value_is_authoritative() {
        assert_eq!(run("3 Controlled Acceleration 14 15 Cnts"), [(3, 15)]);
    }

    #[test]
    fn unit_token_variants() {
        assert_eq!(run("13 Plug Current Limit 90 %"), [(13, 90)]);
        assert_eq!(run("15 Battery Volts 24 V"), [(15, 24)]);
    }

    #[test]
    fn requires_description_and_unit() {
        assert!(run("7 99").is_empty());
        assert!(run("12 300").is_empty());
    }
}
