use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{Candidate, Strategy, StrategyKind};
use crate::normalize::NormalizedText;

// Sub-patterns in trust order. The first one to claim a function number owns
// it within this strategy; later sub-patterns never overwrite.
static SUB_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "F.No.7 Reverse Speed Limit 70" — marker, number, anything, value.
        Regex::new(r"(?i)\bF\.?\s*No\.?\s*(\d{1,3})\D+?(\d{1,4})\b").unwrap(),
        // "F7: 70" / "F.7 = 70"
        Regex::new(r"(?i)\bF\s*\.?\s*(\d{1,3})\s*[:=]\s*(\d{1,4})\b").unwrap(),
        // "Function 7: 70" / "Function 7 70"
        Regex::new(r"(?i)\bfunction\s+(\d{1,3})(?:\s*[:=]\s*|\s+)(\d{1,4})\b").unwrap(),
    ]
});

/// Key/value pairs in "F.No. N ... N" style, in several vendor spellings.
pub struct KeyValue;

impl Strategy for KeyValue {
    fn kind(&self) -> StrategyKind {
        StrategyKind::KeyValue
    }

    fn extract(&self, text: &NormalizedText) -> Vec<Candidate> {
        let mut claimed: HashSet<i64> = HashSet::new();
        let mut out = Vec::new();
        for re in SUB_PATTERNS.iter() {
            for line in text.lines() {
                for caps in re.captures_iter(line) {
                    let (Some(f), Some(v)) = (parse(&caps, 1), parse(&caps, 2)) else {
                        continue;
                    };
                    if claimed.insert(f) {
                        out.push(Candidate {
                            function: f,
                            value: v,
                            origin: StrategyKind::KeyValue,
                        });
                    }
                }
            }
        }
        out
    }
}

fn parse(caps: &regex::Captures<'_>, group: usize) -> Option<i64> {
    caps.get(group)?.as_str().parse().ok()
}
