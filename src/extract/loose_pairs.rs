use std::sync::LazyLock;

use regex::Regex;

use super::{Candidate, Strategy, StrategyKind};
use crate::normalize::NormalizedText;

// A whole line that is nothing but two small integers with a light delimiter
// between them: "7 99", "7-99", "7: 99". Anything longer is left to the
// higher-precedence strategies; picking pairs out of the middle of richer
// rows would just manufacture noise.
static PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})(?:\s*[-:,;|]\s*|\s+)(\d{1,3})$").unwrap());

/// Lowest-precedence fallback; only ever fills gaps the precise strategies
/// left behind.
pub struct LoosePairs;

impl Strategy for LoosePairs {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LoosePairs
    }

    fn extract(&self, text: &NormalizedText) -> Vec<Candidate> {
        let mut out = Vec::new();
        for line in text.lines() {
            let Some(caps) = PAIR_RE.captures(line) else {
                continue;
            };
            let (Some(f), Some(v)) = (parse(&caps, 1), parse(&caps, 2)) else {
                continue;
            };
            out.push(Candidate {
                function: f,
                value: v,
                origin: StrategyKind::LoosePairs,
            });
        }
        out
    }
}

fn parse(caps: &regex::Captures<'_>, group: usize) -> Option<i64> {
    caps.get(group)?.as_str().parse().ok()
}
