//! Game configuration loader.

use std::path::Path;

use embers_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config: GameConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.spread_falloff.near > config.spread_falloff.far {
            anyhow::bail!(
                "Invalid spread falloff in {}: near {} exceeds far {}",
                path.display(),
                config.spread_falloff.near,
                config.spread_falloff.far
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pickup_radius = 2.5\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.pickup_radius, 2.5);
        assert_eq!(config.cover_epsilon_sqr, GameConfig::DEFAULT_COVER_EPSILON_SQR);
    }

    #[test]
    fn inverted_falloff_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[spread_falloff]\nnear = 0.8\nfar = 0.2\n").unwrap();

        assert!(ConfigLoader::load(&path).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
