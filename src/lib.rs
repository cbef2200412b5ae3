//! Settings extraction pipeline for motor-controller configuration exports.
//!
//! Takes loosely structured per-page text from heterogeneous export tools and
//! recovers a map of numbered function parameters to integer values:
//! normalize → strategy cascade → merge (validated, first-strategy-wins) →
//! confidence score → preview.

pub mod extract;
pub mod normalize;
pub mod preview;
pub mod registry;
pub mod validate;

pub use extract::{
    extract_document, extract_page, Candidate, ExtractionResult, PageText, SettingsMap, Strategy,
    StrategyKind,
};
pub use normalize::{normalize, NormalizedText};
pub use preview::{build_preview, PreviewRow};
pub use registry::FunctionDefinition;
