//! Optional TOML configuration file and reference dataset resolution.
//!
//! Precedence for every setting: command-line flag, then config file, then
//! defaults. The reference directory additionally honours
//! `SEMANTIC_BRIDGE_REFERENCE_DIR` before falling back to the embedded copy.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bridge_model::AnalysisOptions;
use bridge_standards::{REFERENCE_ENV_VAR, ReferenceDataset};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "semantic-bridge.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reference dataset directory. Relative paths resolve against the config file.
    pub reference_dir: Option<PathBuf>,
    pub analysis: AnalysisOptions,
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parse config")
    }

    /// Reads a config file, resolving `reference_dir` against its directory.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("in {}", path.display()))?;
        if let (Some(dir), Some(base)) = (&config.reference_dir, path.parent())
            && dir.is_relative()
        {
            config.reference_dir = Some(base.join(dir));
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads the explicit config file, or `semantic-bridge.toml` in `cwd` if
    /// present, or defaults. An explicit path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            return Self::load_file(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// Where the reference dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceChoice {
    Directory(PathBuf),
    Builtin,
}

/// Flag, then config file, then environment, then the embedded copy.
pub fn resolve_reference(
    flag: Option<&Path>,
    config: &Config,
    env: Option<OsString>,
) -> ReferenceChoice {
    if let Some(dir) = flag {
        return ReferenceChoice::Directory(dir.to_path_buf());
    }
    if let Some(dir) = &config.reference_dir {
        return ReferenceChoice::Directory(dir.clone());
    }
    match env.filter(|value| !value.is_empty()) {
        Some(value) => ReferenceChoice::Directory(PathBuf::from(value)),
        None => ReferenceChoice::Builtin,
    }
}

/// [`resolve_reference`] reading the environment variable.
pub fn reference_from_env(flag: Option<&Path>, config: &Config) -> ReferenceChoice {
    resolve_reference(flag, config, std::env::var_os(REFERENCE_ENV_VAR))
}

pub fn load_dataset(choice: &ReferenceChoice) -> Result<ReferenceDataset> {
    let dataset = match choice {
        ReferenceChoice::Directory(dir) => ReferenceDataset::load(dir)
            .with_context(|| format!("load reference dataset from {}", dir.display()))?,
        ReferenceChoice::Builtin => {
            ReferenceDataset::builtin().context("load embedded reference dataset")?
        }
    };
    info!(
        source = %dataset.source(),
        fingerprint = dataset.fingerprint(),
        issues = dataset.issues().len(),
        "reference dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn analysis_section_overrides_defaults() {
        let config = Config::from_toml(
            r#"
            reference_dir = "data/reference"

            [analysis]
            min_confidence = 0.85
            context = "trygghet"
            "#,
        )
        .unwrap();
        assert_eq!(config.reference_dir, Some(PathBuf::from("data/reference")));
        assert_eq!(config.analysis.min_confidence, 0.85);
        assert_eq!(config.analysis.min_frequency, 2);
        assert_eq!(config.analysis.context.as_deref(), Some("trygghet"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("reference = \"x\"").is_err());
    }

    #[test]
    fn reference_precedence() {
        let config = Config {
            reference_dir: Some(PathBuf::from("from-config")),
            ..Config::default()
        };
        let env = || Some(OsString::from("from-env"));

        assert_eq!(
            resolve_reference(Some(Path::new("from-flag")), &config, env()),
            ReferenceChoice::Directory(PathBuf::from("from-flag"))
        );
        assert_eq!(
            resolve_reference(None, &config, env()),
            ReferenceChoice::Directory(PathBuf::from("from-config"))
        );
        assert_eq!(
            resolve_reference(None, &Config::default(), env()),
            ReferenceChoice::Directory(PathBuf::from("from-env"))
        );
        assert_eq!(
            resolve_reference(None, &Config::default(), Some(OsString::new())),
            ReferenceChoice::Builtin
        );
    }
}
