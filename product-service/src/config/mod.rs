use crate::services::DEFAULT_DATABASE;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Upper bound for every single store call.
    pub timeout_secs: u64,
}

impl MongoConfig {
    pub fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ProductConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let timeout_secs = parse_timeout_secs(&get_env(
            &["STORE_TIMEOUT_SECS"],
            Some(&DEFAULT_STORE_TIMEOUT_SECS.to_string()),
            is_prod,
        )?)?;

        Ok(ProductConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env(&["MONGODB_URI", "MongoURL"], None, is_prod)?,
                database: get_env(&["MONGODB_DATABASE"], Some(DEFAULT_DATABASE), is_prod)?,
                timeout_secs,
            },
        })
    }
}

/// A zero timeout would fail every store call before the driver runs.
fn parse_timeout_secs(raw: &str) -> Result<u64, AppError> {
    let secs = raw.trim().parse::<u64>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("STORE_TIMEOUT_SECS is not a number: {}", e))
    })?;
    if secs < 1 {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "STORE_TIMEOUT_SECS must be at least 1, got {}",
            secs
        )));
    }
    Ok(secs)
}

/// Returns the first of `keys` that is set. Outside production a missing
/// variable falls back to `default`.
fn get_env(keys: &[&str], default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    if let Some(val) = keys.iter().find_map(|key| env::var(key).ok()) {
        return Ok(val);
    }

    let key = keys.first().copied().unwrap_or_default();
    if is_prod {
        Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        )))
    } else if let Some(def) = default {
        Ok(def.to_string())
    } else {
        Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            key
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_outside_production() {
        let value = get_env(&["PRODUCT_TEST_UNSET_A"], Some("product_db"), false).unwrap();
        assert_eq!(value, "product_db");
    }

    #[test]
    fn production_requires_every_variable() {
        let err = get_env(&["PRODUCT_TEST_UNSET_B"], Some("product_db"), true).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn missing_variable_without_default_is_an_error() {
        assert!(get_env(&["PRODUCT_TEST_UNSET_C"], None, false).is_err());
    }

    #[test]
    fn later_keys_act_as_aliases() {
        env::set_var("PRODUCT_TEST_LEGACY_URI", "mongodb://legacy:27017");
        let value = get_env(
            &["PRODUCT_TEST_UNSET_D", "PRODUCT_TEST_LEGACY_URI"],
            None,
            false,
        )
        .unwrap();
        assert_eq!(value, "mongodb://legacy:27017");
    }

    #[test]
    fn op_timeout_is_in_seconds() {
        let mongo = MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        };
        assert_eq!(mongo.op_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse_timeout_secs("0").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn timeout_must_be_a_number() {
        assert!(matches!(
            parse_timeout_secs("ten"),
            Err(AppError::ConfigError(_))
        ));
        assert!(parse_timeout_secs("-1").is_err());
    }

    #[test]
    fn positive_timeout_is_accepted() {
        assert_eq!(parse_timeout_secs("1").unwrap(), 1);
        assert_eq!(parse_timeout_secs(" 10 ").unwrap(), 10);
    }

    #[test]
    fn default_database_matches_existing_deployments() {
        let value = get_env(&["PRODUCT_TEST_UNSET_E"], Some(DEFAULT_DATABASE), false).unwrap();
        assert_eq!(value, "golangAPI");
    }
}
