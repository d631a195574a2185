use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of screening a piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    pub categories: BTreeMap<String, bool>,
}

impl ModerationResult {
    /// Names of the categories the content was flagged for
    pub fn flagged_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|(_, hit)| **hit)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
