use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::profile::SourceId;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard_config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_readme_path")]
    pub readme_path: PathBuf,
    /// Informational; runs are triggered externally.
    #[serde(default = "default_frequency")]
    pub update_frequency: String,
    #[serde(default)]
    pub profiles: Profiles,
    #[serde(default)]
    pub sections: Sections,
}

/// Profile URL per source. A missing key means the source is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub researchgate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_scholar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl Profiles {
    pub fn url(&self, id: SourceId) -> Option<&str> {
        match id {
            SourceId::ResearchGate => self.researchgate.as_deref(),
            SourceId::GoogleScholar => self.google_scholar.as_deref(),
            SourceId::LinkedIn => self.linkedin.as_deref(),
        }
    }
}

/// Section toggles. Advisory: the document template is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub about: bool,
    pub publications: bool,
    pub citations: bool,
    pub research_interests: bool,
    pub education: bool,
    pub experience: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            about: true,
            publications: true,
            citations: true,
            research_interests: true,
            education: true,
            experience: true,
        }
    }
}

fn default_readme_path() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_frequency() -> String {
    "daily".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            readme_path: default_readme_path(),
            update_frequency: default_frequency(),
            profiles: Profiles {
                researchgate: Some("https://www.researchgate.net/profile/Yu-Hao-Tseng".into()),
                google_scholar: Some(
                    "https://scholar.google.com/citations?user=_zozF1AAAAAJ".into(),
                ),
                linkedin: Some("https://www.linkedin.com/in/yu-hao-tseng-70316221b/".into()),
            },
            sections: Sections::default(),
        }
    }
}

/// Load the config at `path`, writing and returning the default one if the
/// file does not exist. A malformed file is an error.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let config = Config::default();
            write(path, &config)?;
            info!("Created default config at {}", path.display());
            return Ok(config);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config)?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)
}
