use std::fs::File;
use std::io::BufReader;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;


pub const DEFAULT_MAX_LEVEL: u32 = 15;
pub const DEFAULT_MIN_WIDTH: f64 = 1e-10;
pub const DEFAULT_CACHE_DIGITS: u32 = 12;

const MAX_LEVEL_LIMIT: u32 = 30;
const CACHE_DIGITS_LIMIT: u32 = 308;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),
    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String
    }
}

/// 自適應積分器的常數。缺少的欄位以預設值補上，預設值即為原始演算法的行為。
///
/// ```json
/// { "max_level": 15, "min_width": 1e-10, "cache_digits": 12 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    /// 遞迴深度超過此值時改用 Simpson 估計直接結束
    pub max_level: u32,
    /// 區間寬度小於此值視為退化區間，積分為 0
    pub min_width: f64,
    /// 快取 key 保留的小數位數
    pub cache_digits: u32
}

impl Default for IntegrationSettings {
    fn default() -> IntegrationSettings {
        IntegrationSettings {
            max_level: DEFAULT_MAX_LEVEL,
            min_width: DEFAULT_MIN_WIDTH,
            cache_digits: DEFAULT_CACHE_DIGITS
        }
    }
}

impl IntegrationSettings {
    pub fn from_json(json_value: serde_json::Value) -> Result<IntegrationSettings, ConfigurationError> {
        let settings: IntegrationSettings = serde_json::from_value(json_value)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_reader(file_path: &str) -> Result<IntegrationSettings, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json(json_value)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.min_width.is_finite() || self.min_width < 0.0 {
            return Err(ConfigurationError::InvalidValue {
                field: "min_width",
                message: format!("must be finite and non-negative, got {}", self.min_width)
            });
        }
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(ConfigurationError::InvalidValue {
                field: "max_level",
                message: format!("must not exceed {}, got {}", MAX_LEVEL_LIMIT, self.max_level)
            });
        }
        if self.cache_digits > CACHE_DIGITS_LIMIT {
            return Err(ConfigurationError::InvalidValue {
                field: "cache_digits",
                message: format!("must not exceed {}, got {}", CACHE_DIGITS_LIMIT, self.cache_digits)
            });
        }
        Ok(())
    }
}
