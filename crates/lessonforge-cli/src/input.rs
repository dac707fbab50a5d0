//! Reading problem, curriculum and configuration files.

use std::path::{Path, PathBuf};

use lessonforge::{
    normalize, ConfigError, CurriculumError, RawCurriculum, TimetableConfig, TimetableProblem,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{}: unsupported file type (expected .json, .toml, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Curriculum error: {0}")]
    Curriculum(#[from] CurriculumError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Timetable(#[from] lessonforge::TimetableError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialization format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Deserializes `text` in this format.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, String> {
        match self {
            Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let format = Format::from_path(path).ok_or_else(|| CliError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(event = "input_read", path = %path.display(), format = ?format, bytes = text.len());

    format.parse(&text).map_err(|message| CliError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Loads a problem file, normalizing raw curriculum rows when `raw` is set.
pub fn load_problem(path: &Path, raw: bool) -> Result<TimetableProblem, CliError> {
    if raw {
        let curriculum: RawCurriculum = read(path)?;
        Ok(normalize(&curriculum)?)
    } else {
        read(path)
    }
}

pub fn load_raw(path: &Path) -> Result<RawCurriculum, CliError> {
    read(path)
}

/// Loads a configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<TimetableConfig, CliError> {
    let Some(path) = path else {
        return Ok(TimetableConfig::default());
    };
    let config = match Format::from_path(path) {
        Some(Format::Yaml) => TimetableConfig::from_yaml_file(path)?,
        Some(Format::Toml) => TimetableConfig::from_toml_file(path)?,
        _ => {
            return Err(CliError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    Ok(config)
}
