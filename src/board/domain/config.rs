//! Product policy knobs for the board engine.

use super::ColumnId;
use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Environment variable overriding [`BoardConfig::max_columns`].
pub const MAX_COLUMNS_ENV: &str = "CORKBOARD_MAX_COLUMNS";
/// Environment variable overriding [`BoardConfig::default_column`].
pub const DEFAULT_COLUMN_ENV: &str = "CORKBOARD_DEFAULT_COLUMN";
/// Environment variable overriding [`BoardConfig::cache_key`].
pub const CACHE_KEY_ENV: &str = "CORKBOARD_CACHE_KEY";

/// Configuration for board transitions and persistence keys.
///
/// # Examples
///
/// ```
/// use corkboard::board::domain::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.max_columns, 5);
/// assert_eq!(config.default_column.as_str(), "todo");
///
/// let custom = BoardConfig::from_json_str(r#"{"maxColumns": 8}"#).unwrap();
/// assert_eq!(custom.max_columns, 8);
/// assert_eq!(custom.default_column.as_str(), "todo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    /// Maximum number of columns a board may hold.
    pub max_columns: usize,
    /// Column that receives new and relocated tasks.
    pub default_column: ColumnId,
    /// Title used when the default column has to be recreated.
    pub default_column_title: String,
    /// Local cache key under which the board is stored.
    pub cache_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_columns: 5,
            default_column: ColumnId::new("todo"),
            default_column_title: "Todo".to_owned(),
            cache_key: "board-state".to_owned(),
        }
    }
}

/// Errors raised while reading configuration overrides.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration document could not be parsed.
    #[error("invalid board configuration: {0}")]
    InvalidDocument(String),

    /// An environment override holds an unusable value.
    #[error("invalid value '{value}' for {name}")]
    InvalidValue {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

impl BoardConfig {
    /// Parses a JSON configuration document; absent fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDocument`] for malformed JSON and
    /// [`ConfigError::InvalidValue`] for a zero column limit or blank ids.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)
            .map_err(|err| ConfigError::InvalidDocument(err.to_string()))?;
        config.checked()
    }

    /// Applies `CORKBOARD_*` environment overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an override cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Applies `CORKBOARD_*` environment overrides on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an override cannot be used.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(raw) = read_env(MAX_COLUMNS_ENV) {
            self.max_columns = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: MAX_COLUMNS_ENV,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = read_env(DEFAULT_COLUMN_ENV) {
            self.default_column = ColumnId::new(raw.trim());
        }
        if let Some(raw) = read_env(CACHE_KEY_ENV) {
            raw.trim().clone_into(&mut self.cache_key);
        }
        self.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.max_columns == 0 {
            return Err(ConfigError::InvalidValue {
                name: "maxColumns",
                value: "0".to_owned(),
            });
        }
        if self.default_column.as_str().trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "defaultColumn",
                value: self.default_column.to_string(),
            });
        }
        if self.cache_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "cacheKey",
                value: self.cache_key,
            });
        }
        Ok(self)
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
