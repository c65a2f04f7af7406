//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: &[&str] = &["prospect.toml", ".prospect.toml"];

/// Environment variables kept from earlier deployments, and the config
/// keys they map to.
pub const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("GOOGLE_API_KEY", "search.api_key"),
    ("GOOGLE_CSE_ID", "search.engine_id"),
    ("OPENAI_API_KEY", "planner.api_key"),
    ("OPENAI_MODEL", "planner.model"),
    ("OPENAI_MODEL_DIVERSIFY", "planner.diversify_model"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (`GOOGLE_API_KEY`, `OPENAI_API_KEY`, ...)
    /// 2. `PROSPECT_<SECTION>__<KEY>` environment variables
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./prospect.toml` or `./.prospect.toml`
    /// 5. Global: `~/.config/prospect-search/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load defaults overlaid with environment variables only
    pub fn load_env_only() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed("PROSPECT_").split("__"))
            .merge(Self::legacy_env())
    }

    fn legacy_env() -> Env {
        Env::raw().filter_map(|key| {
            LEGACY_ENV_KEYS
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map(|(_, path)| (*path).into())
        })
    }

    /// Get the global config file path
    ///
    /// Returns `<config dir>/prospect-search/config.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("prospect-search").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Legacy:  {}", legacy_names());
        println!("  [ENV  ] Prefix:  PROSPECT_<SECTION>__<KEY>");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./prospect.toml or ./.prospect.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

fn legacy_names() -> String {
    LEGACY_ENV_KEYS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.search.timeout_seconds, 12);
        assert!(config.search.diversify_once);
        assert_eq!(config.collector.max_chunk_size, 10);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("prospect-search"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[collector]
max_chunk_size = 3
overfetch_factor = 1.5

[search]
headroom = 25
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.collector.max_chunk_size, 3);
        assert_eq!(config.collector.overfetch_factor, 1.5);
        assert_eq!(config.search.headroom, 25);
        // untouched keys keep defaults
        assert_eq!(config.collector.max_total_pull, 200);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[collector]\nmax_chunk_size = \"many\"\n").unwrap();
        assert!(ConfigLoader::load(Some(&path)).is_err());
    }

    #[test]
    fn test_project_config_prefers_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::project_config_in(dir.path()).is_none());

        std::fs::write(dir.path().join(".prospect.toml"), "").unwrap();
        std::fs::write(dir.path().join("prospect.toml"), "").unwrap();
        let found = ConfigLoader::project_config_in(dir.path()).unwrap();
        assert!(found.ends_with("prospect.toml"));
        assert!(!found.to_string_lossy().ends_with(".prospect.toml"));
    }

    #[test]
    fn test_legacy_keys_target_known_sections() {
        for (_, path) in LEGACY_ENV_KEYS {
            assert!(path.starts_with("search.") || path.starts_with("planner."));
        }
    }
}
