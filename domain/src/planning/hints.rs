//! Planning hints derived from the prompt

use super::location::extract_locations;
use serde::{Deserialize, Serialize};

/// Context passed alongside a prompt to the planner and the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningHints {
    /// Places mentioned in the prompt, at most five
    pub locations: Vec<String>,
}

impl PlanningHints {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            locations: extract_locations(prompt),
        }
    }

    pub fn with_locations(locations: Vec<String>) -> Self {
        Self { locations }
    }

    pub fn has_locations(&self) -> bool {
        !self.locations.is_empty()
    }
}
