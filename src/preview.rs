use serde::Serialize;

use crate::extract::SettingsMap;
use crate::registry;

/// One settings entry decorated with its registry metadata for human review.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub function: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub expected_min: u32,
    pub expected_max: u32,
    pub value: u32,
    pub in_range: bool,
}

/// Decorate the final map for display, ascending by function number.
/// Read-only: never changes the map contents.
pub fn build_preview(settings: &SettingsMap) -> Vec<PreviewRow> {
    settings
        .iter()
        .map(|(&function, &value)| {
            let def = registry::definition(function);
            let (expected_min, expected_max) = def.expected_range;
            PreviewRow {
                function,
                name: def.name,
                description: def.description,
                expected_min,
                expected_max,
                value,
                in_range: (expected_min..=expected_max).contains(&value),
            }
        })
        .collect()
}
