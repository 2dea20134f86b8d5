use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternate config file.
pub(crate) const CONFIG_ENV: &str = "CLAIMREG_CONFIG";
const CONFIG_FILE_NAME: &str = "config.toml";

pub(crate) const DEFAULT_SIGNER: &str = "ผู้อำนวยการ";
pub(crate) const DEFAULT_RECIPIENT: &str =
    "รองอธิการบดีฝ่ายวิชาการและวิจัย,ผู้อำนวยการสำนักการเงิน";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) store: StoreConfig,
    pub(crate) form: FormConfig,
    pub(crate) stamp: StampConfig,
    pub(crate) logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct StoreConfig {
    /// Overrides the platform data directory.
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) ledger_file: String,
    pub(crate) targets_file: String,
    pub(crate) font_cache_file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct FormConfig {
    pub(crate) signer: String,
    pub(crate) recipient: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StampConfig {
    /// Blank form the stamp sheet is laid over.
    pub(crate) template: Option<PathBuf>,
    pub(crate) thai_font: Option<PathBuf>,
    /// TOML coordinate table replacing the built-in one.
    pub(crate) layout: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// error, warn, info, debug or trace
    pub(crate) level: String,
}

/// Fallback values for the signer and recipient boxes of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormDefaults {
    pub(crate) signer: String,
    pub(crate) recipient: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            ledger_file: "database_claims.csv".into(),
            targets_file: "budget_targets.csv".into(),
            font_cache_file: "THSarabunNew.ttf".into(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            signer: DEFAULT_SIGNER.into(),
            recipient: DEFAULT_RECIPIENT.into(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Config {
    /// Load from `$CLAIMREG_CONFIG`, else the platform config directory.
    /// A missing file yields the defaults; a malformed one is an error.
    pub(crate) fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => match project_dirs() {
                Some(dirs) => dirs.config_dir().join(CONFIG_FILE_NAME),
                None => return Ok(Self::default()),
            },
        };
        Self::from_path(&path)
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config: {}", path.display()))
            }
        };
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Configured data directory, else the platform one.
    pub(crate) fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store.data_dir {
            return Ok(dir.clone());
        }
        let dirs = project_dirs()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub(crate) fn form_defaults(&self) -> FormDefaults {
        let pick = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.trim().to_string()
            }
        };
        FormDefaults {
            signer: pick(&self.form.signer, DEFAULT_SIGNER),
            recipient: pick(&self.form.recipient, DEFAULT_RECIPIENT),
        }
    }
}

impl Default for FormDefaults {
    fn default() -> Self {
        Config::default().form_defaults()
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("th", "claimreg", "ClaimReg")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
