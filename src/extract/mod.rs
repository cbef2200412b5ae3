pub mod identical_value;
pub mod inline_delimited;
pub mod key_value;
pub mod loose_pairs;
pub mod structured_table;

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::normalize::{normalize, NormalizedText};
use crate::validate;

/// Raw per-page text as handed over by the document text provider.
#[derive(Debug, Clone)]
pub struct PageText {
    pub index: usize,
    pub text: String,
}

/// Function number → value. BTreeMap so iteration (and the preview built
/// from it) is ascending by function number.
pub type SettingsMap = BTreeMap<u32, u32>;

/// An unvalidated (function, value) pair proposed by one strategy. `i64`
/// because nothing has been range-checked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub function: i64,
    pub value: i64,
    pub origin: StrategyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    StructuredTable,
    KeyValue,
    IdenticalValue,
    InlineDelimited,
    LoosePairs,
}

/// One extraction strategy: a pure function from normalized text to
/// candidates. Returns an empty list when its target shape is absent;
/// never panics on malformed input.
pub trait Strategy {
    fn kind(&self) -> StrategyKind;
    fn extract(&self, text: &NormalizedText) -> Vec<Candidate>;
}

/// Fixed precedence order. Earlier strategies are more precise and own any
/// function number they claim; later ones only fill gaps.
fn cascade() -> [&'static (dyn Strategy + Sync); 5] {
    [
        &structured_table::StructuredTable,
        &key_value::KeyValue,
        &identical_value::IdenticalValue,
        &inline_delimited::InlineDelimited,
        &loose_pairs::LoosePairs,
    ]
}

/// Once this many settings are validated, remaining lower-precedence
/// strategies are skipped; noisy fallbacks only run when little was found.
pub const SUFFICIENCY_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub valid: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub settings: SettingsMap,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub confidence: f64,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// Fold candidates into the settings map. A candidate is admitted iff it
/// passes validation and its function number is not already claimed; the
/// earliest contributor owns a function number for the whole parse. A valid
/// duplicate is discarded without touching either counter.
pub fn merge(settings: &mut SettingsMap, tally: &mut Tally, candidates: Vec<Candidate>) {
    for c in candidates {
        if !validate::is_valid_function_number(c.function) || !validate::is_valid_value(c.value) {
            debug!(function = c.function, value = c.value, origin = ?c.origin, "candidate out of range");
            tally.invalid += 1;
            continue;
        }
        let function = c.function as u32;
        if settings.contains_key(&function) {
            continue;
        }
        settings.insert(function, c.value as u32);
        tally.valid += 1;
    }
}

/// `valid / (valid + invalid)`, with fixed bonuses for large harvests.
/// The 20/50 thresholds are inherited behavior, not re-derived.
pub fn confidence(valid: usize, invalid: usize) -> f64 {
    let total = valid + invalid;
    if total == 0 {
        return 0.0;
    }
    let mut score = valid as f64 / total as f64;
    if valid > 20 {
        score += 0.1;
    }
    if valid > 50 {
        score += 0.1;
    }
    score.min(1.0)
}

/// Run the whole pipeline over one page of raw text. Always returns a
/// well-formed result; an empty map with confidence 0 is the no-match case.
pub fn extract_page(raw: &str) -> ExtractionResult {
    let text = normalize(raw);
    let mut settings = SettingsMap::new();
    let mut tally = Tally::default();

    for strategy in cascade() {
        if tally.valid >= SUFFICIENCY_THRESHOLD {
            debug!(skipped = ?strategy.kind(), found = tally.valid, "sufficiency reached");
            break;
        }
        let candidates = strategy.extract(&text);
        debug!(strategy = ?strategy.kind(), candidates = candidates.len(), "strategy pass");
        merge(&mut settings, &mut tally, candidates);
    }

    ExtractionResult {
        confidence: confidence(tally.valid, tally.invalid),
        valid_count: tally.valid,
        invalid_count: tally.invalid,
        settings,
    }
}

/// Extract every page in parallel, then fold the per-page maps in strictly
/// ascending page order: a function number found on an earlier page is never
/// overwritten by a later page. Counters are recomputed over the fold so a
/// function rediscovered on a later page is not counted twice.
pub fn extract_document(pages: &[PageText]) -> ExtractionResult {
    let mut ordered: Vec<&PageText> = pages.iter().collect();
    ordered.sort_by_key(|p| p.index);

    let per_page: Vec<ExtractionResult> =
        ordered.par_iter().map(|p| extract_page(&p.text)).collect();

    let mut settings = SettingsMap::new();
    let mut invalid = 0;
    for page in per_page {
        invalid += page.invalid_count;
        for (function, value) in page.settings {
            settings.entry(function).or_insert(value);
        }
    }

    let valid = settings.len();
    ExtractionResult {
        confidence: confidence(valid, invalid),
        valid_count: valid,
        invalid_count: invalid,
        settings,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings(pairs: &[(u32, u32)]) -> SettingsMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn scenario_labeled_row() {
        let r = extract_page("F.No.1 MPH Scaling Counts: 100 Value: 100");
        assert_eq!(r.settings, settings(&[(1, 100)]));
        assert_eq!(r.valid_count, 1);
        assert_eq!(r.invalid_count, 0);
        assert!((r.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scenario_flattened_blob() {
        let r = extract_page("1 MPH Scaling 100 100 Cnts 3 Controlled Acceleration 15 15 Cnts");
        assert_eq!(r.settings, settings(&[(1, 100), (3, 15)]));
    }

    #[test]
    fn scenario_no_digits() {
        let r = extract_page("this page contains no digits at all");
        assert!(r.is_empty());
        assert_eq!(r.valid_count, 0);
        assert_eq!(r.invalid_count, 0);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn scenario_precise_strategy_beats_loose_fallback() {
        let r = extract_page("F.No.7 Reverse Speed Limit 70\n7 99");
        assert_eq!(r.settings.get(&7), Some(&70));
        assert_eq!(r.valid_count, 1);
    }

    #[test]
    fn scenario_out_of_range_function_dropped() {
        let r = extract_page("200 50");
        assert!(r.settings.is_empty());
        assert_eq!(r.invalid_count, 1);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn out_of_range_value_dropped() {
        let mut map = SettingsMap::new();
        let mut tally = Tally::default();
        merge(
            &mut map,
            &mut tally,
            vec![Candidate {
                function: 11,
                value: 1500,
                origin: StrategyKind::KeyValue,
            }],
        );
        assert!(map.is_empty());
        assert_eq!(tally, Tally { valid: 0, invalid: 1 });
    }

    #[test]
    fn merge_first_contributor_wins() {
        let mut map = SettingsMap::new();
        let mut tally = Tally::default();
        let first = Candidate {
            function: 7,
            value: 70,
            origin: StrategyKind::KeyValue,
        };
        let later = Candidate {
            function: 7,
            value: 99,
            origin: StrategyKind::LoosePairs,
        };
        merge(&mut map, &mut tally, vec![first]);
        merge(&mut map, &mut tally, vec![later]);
        assert_eq!(map.get(&7), Some(&70));
        // The valid duplicate affects neither counter.
        assert_eq!(tally, Tally { valid: 1, invalid: 0 });
    }

    #[test]
    fn sufficiency_gate_skips_loose_fallback() {
        let text = "1 MPH Scaling 10 10 Cnts\n\
                    2 Minimum Speed 20 20 Cnts\n\
                    3 Controlled Acceleration 30 30 Cnts\n\
                    4 Controlled Deceleration 40 40 Cnts\n\
                    5 Emergency Deceleration 50 50 Cnts\n\
                    90 90";
        let r = extract_page(text);
        // Five precise rows reach the threshold; "90 90" would only be
        // matched by the loose fallback, which must not have run.
        assert_eq!(r.settings.len(), 5);
        assert!(!r.settings.contains_key(&90));
    }

    #[test]
    fn loose_fallback_runs_below_threshold() {
        let r = extract_page("90 90");
        assert_eq!(r.settings, settings(&[(90, 90)]));
    }

    #[test]
    fn confidence_base_ratio() {
        assert_eq!(confidence(0, 0), 0.0);
        assert!((confidence(3, 1) - 0.75).abs() < 1e-9);
        assert!((confidence(4, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn confidence_bonus_thresholds() {
        // 21/30 = 0.7, plus the >20 bonus.
        assert!((confidence(21, 9) - 0.8).abs() < 1e-9);
        // 51/100 = 0.51, plus both bonuses.
        assert!((confidence(51, 49) - 0.71).abs() < 1e-9);
        // Exactly 20 gets no bonus.
        assert!((confidence(20, 20) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn confidence_clamped_to_one() {
        assert!((confidence(60, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn confidence_monotone_in_valid_count() {
        for invalid in 0..20 {
            let mut prev = 0.0;
            for valid in 0..80 {
                let c = confidence(valid, invalid);
                assert!(c >= prev, "confidence dropped at valid={valid} invalid={invalid}");
                prev = c;
            }
        }
    }

    #[test]
    fn document_fold_earlier_page_wins() {
        let pages = vec![
            PageText {
                index: 0,
                text: "F.No.1 MPH Scaling Counts: 10 Value: 10".into(),
            },
            PageText {
                index: 1,
                text: "F.No.1 MPH Scaling Counts: 99 Value: 99\n\
                       F.No.2 Minimum Speed Counts: 5 Value: 5"
                    .into(),
            },
        ];
        let r = extract_document(&pages);
        assert_eq!(r.settings, settings(&[(1, 10), (2, 5)]));
        // Function 1 is rediscovered on page 1 but counted once.
        assert_eq!(r.valid_count, 2);
    }

    #[test]
    fn document_fold_orders_by_page_index_not_slice_order() {
        let pages = vec![
            PageText {
                index: 5,
                text: "F.No.3 Controlled Acceleration Counts: 99 Value: 99".into(),
            },
            PageText {
                index: 0,
                text: "F.No.3 Controlled Acceleration Counts: 15 Value: 15".into(),
            },
        ];
        let r = extract_document(&pages);
        assert_eq!(r.settings.get(&3), Some(&15));
    }

    #[test]
    fn empty_document() {
        let r = extract_document(&[]);
        assert!(r.is_empty());
        assert_eq!(r.confidence, 0.0);
    }

    proptest! {
        #[test]
        fn map_invariants_hold_on_arbitrary_input(input in "\\PC{0,400}") {
            let r = extract_page(&input);
            for (&function, &value) in &r.settings {
                prop_assert!((1..=128).contains(&function));
                prop_assert!(value <= 999);
            }
            prop_assert!((0.0..=1.0).contains(&r.confidence));
            prop_assert_eq!(r.valid_count, r.settings.len());
        }

        #[test]
        fn never_panics_on_numeric_noise(input in "[0-9 .:%AVF-]{0,200}") {
            let _ = extract_page(&input);
        }
    }
}
