//! Engine configuration from the environment.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::infrastructure::content::DEFAULT_LOCALE;

/// Where the engine finds rules data and keeps saved characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Root of the rules catalogs (`<data_dir>/<locale>/*.json`).
    pub data_dir: PathBuf,
    /// Directory character files are written to.
    pub store_dir: PathBuf,
    /// Rules locale requested by this install.
    pub locale: String,
}

impl EngineSettings {
    /// Reads `MYTHFORGE_DATA_DIR`, `MYTHFORGE_STORE_DIR` and
    /// `MYTHFORGE_LOCALE`, falling back to `data/`, a per-user data
    /// directory, and `"en"` respectively.
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env is fine; explicit environment always wins.
        let _ = dotenvy::dotenv();

        let data_dir = std::env::var("MYTHFORGE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let store_dir = std::env::var("MYTHFORGE_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_store_dir());
        let locale =
            std::env::var("MYTHFORGE_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
        anyhow::ensure!(
            !locale.trim().is_empty(),
            "MYTHFORGE_LOCALE is set but empty"
        );

        Ok(Self {
            data_dir,
            store_dir,
            locale,
        })
    }
}

fn default_store_dir() -> PathBuf {
    match ProjectDirs::from("io", "mythforge", "engine") {
        Some(dirs) => dirs.data_dir().join("characters"),
        None => PathBuf::from("characters"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test mutates the process environment, so every scenario runs
    // inside it sequentially.
    #[test]
    fn reads_overrides_then_falls_back_to_defaults() {
        std::env::set_var("MYTHFORGE_DATA_DIR", "/srv/rules");
        std::env::set_var("MYTHFORGE_STORE_DIR", "/srv/characters");
        std::env::set_var("MYTHFORGE_LOCALE", "de");
        let overridden = EngineSettings::from_env().unwrap();
        assert_eq!(overridden.data_dir, PathBuf::from("/srv/rules"));
        assert_eq!(overridden.store_dir, PathBuf::from("/srv/characters"));
        assert_eq!(overridden.locale, "de");

        std::env::set_var("MYTHFORGE_LOCALE", "  ");
        assert!(EngineSettings::from_env().is_err());

        std::env::remove_var("MYTHFORGE_DATA_DIR");
        std::env::remove_var("MYTHFORGE_STORE_DIR");
        std::env::remove_var("MYTHFORGE_LOCALE");
        let defaults = EngineSettings::from_env().unwrap();
        assert_eq!(defaults.data_dir, PathBuf::from("data"));
        assert_eq!(defaults.locale, DEFAULT_LOCALE);
        assert!(defaults.store_dir.ends_with("characters"));
    }
}
