//! Error type shared by configuration loading and wave construction.
//!
//! Gameplay outcomes (a lost life, a lost game) are never errors; they are
//! ordinary state values on [`crate::wave::Wave`] and
//! [`crate::invaders::Invaders`]. Only invalid setup reaches this type.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// A formation was requested with no rows or no columns.
    EmptyFormation { rows: usize, cols: usize },

    /// The cells handed to a grid do not fill its declared shape.
    FormationShape {
        rows: usize,
        cols: usize,
        cells: usize,
    },

    /// A configuration value is outside its usable range.
    InvalidConstant {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// The configuration file could not be read.
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyFormation { rows, cols } => write!(
                f,
                "alien formation must have at least one row and one column (got {rows}x{cols})"
            ),
            GameError::FormationShape { rows, cols, cells } => write!(
                f,
                "a {rows}x{cols} formation needs {} cells, got {cells}",
                rows * cols
            ),
            GameError::InvalidConstant {
                name,
                value,
                expected,
            } => write!(f, "config value `{name}` = {value} is invalid: expected {expected}"),
            GameError::ConfigRead { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            GameError::ConfigParse { path, source } => {
                write!(f, "cannot parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            GameError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
