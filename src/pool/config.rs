//! Worker pool configuration.

use crate::builder::BuildError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Sizing for a bounded worker pool.
///
/// Deserializes from a partial object; missing fields take their defaults.
///
/// ```rust
/// use statem::pool::PoolConfig;
///
/// let config: PoolConfig = serde_json::from_str(r#"{"max_workers": 8}"#).unwrap();
/// assert_eq!(config.max_workers, 8);
/// assert_eq!(config.max_idle_secs, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of dispatches running at once
    pub max_workers: usize,

    /// How long an idle worker thread is kept before it is reclaimed
    pub max_idle_secs: u64,
}

impl PoolConfig {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            ..Self::default()
        }
    }

    pub fn max_idle(&self) -> Duration {
        Duration::from_secs(self.max_idle_secs)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        match self.problem() {
            Some(reason) => Err(BuildError::InvalidPoolConfig(reason)),
            None => Ok(()),
        }
    }

    /// Why this config cannot back a pool, if it cannot.
    pub(crate) fn problem(&self) -> Option<String> {
        if self.max_workers == 0 {
            return Some("max_workers must be at least 1".to_string());
        }
        if self.max_workers > Semaphore::MAX_PERMITS {
            return Some(format!(
                "max_workers must be at most {}, got {}",
                Semaphore::MAX_PERMITS,
                self.max_workers
            ));
        }
        None
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: 256,
            max_idle_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: PoolConfig = serde_json::from_str(r#"{"max_idle_secs": 2}"#).unwrap();
        assert_eq!(config.max_workers, 256);
        assert_eq!(config.max_idle(), Duration::from_secs(2));
    }

    #[test]
    fn zero_workers_is_invalid() {
        assert!(PoolConfig::new(0).validate().is_err());
        assert!(PoolConfig::new(1).validate().is_ok());
    }

    #[test]
    fn worker_count_above_permit_limit_is_invalid() {
        let config: PoolConfig =
            serde_json::from_str(r#"{"max_workers": 18446744073709551615}"#).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, BuildError::InvalidPoolConfig(ref reason) if reason.contains("at most")));
        assert!(PoolConfig::new(Semaphore::MAX_PERMITS).validate().is_ok());
    }
}
