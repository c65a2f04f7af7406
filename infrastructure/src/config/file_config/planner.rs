//! Query planner configuration from TOML (`[planner]` section)

use crate::planner::{DEFAULT_API_BASE, DEFAULT_CONTACT_FOCUS, DEFAULT_MAX_QUERIES, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

/// Which planner backs the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerKind {
    /// Chat model over the OpenAI-compatible API
    #[default]
    Llm,
    /// Fixed templates, no network
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlannerConfig {
    pub kind: PlannerKind,
    /// Base URL of the chat completions API
    pub api_base: String,
    /// API key (legacy env: `OPENAI_API_KEY`)
    pub api_key: Option<String>,
    /// Model for initial planning (legacy env: `OPENAI_MODEL`)
    pub model: String,
    /// Model for diversification, defaults to `model` (legacy env: `OPENAI_MODEL_DIVERSIFY`)
    pub diversify_model: Option<String>,
    pub max_queries: usize,
    /// Contact channel the queries should favour ("email", "phone", ...)
    pub contact_focus: String,
    pub timeout_seconds: u64,
}

impl Default for FilePlannerConfig {
    fn default() -> Self {
        Self {
            kind: PlannerKind::Llm,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            diversify_model: None,
            max_queries: DEFAULT_MAX_QUERIES,
            contact_focus: DEFAULT_CONTACT_FOCUS.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_kind_deserialize() {
        let toml_str = r#"
[planner]
kind = "template"
max_queries = 3
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.planner.kind, PlannerKind::Template);
        assert_eq!(config.planner.max_queries, 3);
        assert_eq!(config.planner.model, "gpt-3.5-turbo");
    }
}
