//! Search source configuration from TOML (`[search]` section)

use crate::search::{DEFAULT_CSE_URL, DEFAULT_EXCLUDED_SITES, DEFAULT_TIMEOUT_SECS};
use prospect_application::EngineParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Custom Search API key (legacy env: `GOOGLE_API_KEY`)
    pub api_key: Option<String>,
    /// Custom Search engine id (legacy env: `GOOGLE_CSE_ID`)
    pub engine_id: Option<String>,
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Items fetched beyond what a request needs
    pub headroom: usize,
    /// Ask for broader queries at most once per session
    pub diversify_once: bool,
    /// Sites excluded from every query with `-site:`
    pub excluded_sites: Vec<String>,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            base_url: DEFAULT_CSE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            headroom: 10,
            diversify_once: true,
            excluded_sites: DEFAULT_EXCLUDED_SITES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileSearchConfig {
    pub fn to_engine_params(&self) -> EngineParams {
        EngineParams::default()
            .with_headroom(self.headroom)
            .with_diversify_once(self.diversify_once)
    }
}
