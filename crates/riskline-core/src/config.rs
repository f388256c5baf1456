//! Configuration loaded from environment variables.

use std::env;

use crate::error::ConfigError;

/// Default number of audit events returned by a recent-history read.
pub const DEFAULT_AUDIT_LIMIT: i64 = 200;

/// Upper bound a gateway controller clamps recent-history reads to.
pub const DEFAULT_AUDIT_MAX_LIMIT: i64 = 1000;

/// Default size of the database connection pool.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime configuration for the audit and risk profile core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailConfig {
    /// Window used when a caller asks for recent audit events without a limit.
    pub audit_default_limit: i64,
    /// Largest window a controller may request.
    pub audit_max_limit: i64,
    /// Connection string for the durable store, if one is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: u32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            audit_default_limit: DEFAULT_AUDIT_LIMIT,
            audit_max_limit: DEFAULT_AUDIT_MAX_LIMIT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl TrailConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RISKLINE_AUDIT_DEFAULT_LIMIT`: default recent-history window (default: 200)
    /// - `RISKLINE_AUDIT_MAX_LIMIT`: maximum recent-history window (default: 1000)
    /// - `DATABASE_URL`: `PostgreSQL` connection string
    /// - `RISKLINE_DB_MAX_CONNECTIONS`: pool size (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let audit_default_limit =
            parse_positive(&lookup, "RISKLINE_AUDIT_DEFAULT_LIMIT", DEFAULT_AUDIT_LIMIT)?;
        let audit_max_limit =
            parse_positive(&lookup, "RISKLINE_AUDIT_MAX_LIMIT", DEFAULT_AUDIT_MAX_LIMIT)?;

        if audit_max_limit < audit_default_limit {
            return Err(ConfigError::Invalid {
                var: "RISKLINE_AUDIT_MAX_LIMIT".to_string(),
                reason: format!(
                    "must be at least RISKLINE_AUDIT_DEFAULT_LIMIT ({audit_default_limit})"
                ),
            });
        }

        let db_max_connections = match lookup("RISKLINE_DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "RISKLINE_DB_MAX_CONNECTIONS".to_string(),
                        reason: format!("expected a positive integer, got '{raw}'"),
                    })
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            audit_default_limit,
            audit_max_limit,
            database_url,
            db_max_connections,
        })
    }

    /// The database URL, or `ConfigError::Missing` when unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::Missing {
                var: "DATABASE_URL".to_string(),
            })
    }
}

fn parse_positive<F>(lookup: &F, var: &str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: format!("expected a positive integer, got '{raw}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = TrailConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TrailConfig::default());
        assert_eq!(config.audit_default_limit, 200);
        assert_eq!(config.audit_max_limit, 1000);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = TrailConfig::from_lookup(lookup_from(&[
            ("RISKLINE_AUDIT_DEFAULT_LIMIT", "50"),
            ("RISKLINE_AUDIT_MAX_LIMIT", "500"),
            ("DATABASE_URL", "postgres://localhost/riskline"),
            ("RISKLINE_DB_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.audit_default_limit, 50);
        assert_eq!(config.audit_max_limit, 500);
        assert_eq!(
            config.require_database_url().unwrap(),
            "postgres://localhost/riskline"
        );
        assert_eq!(config.db_max_connections, 4);
    }

    #[test]
    fn test_rejects_non_numeric_limit() {
        let err = TrailConfig::from_lookup(lookup_from(&[(
            "RISKLINE_AUDIT_DEFAULT_LIMIT",
            "lots",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "RISKLINE_AUDIT_DEFAULT_LIMIT"));
    }

    #[test]
    fn test_rejects_zero_limit() {
        assert!(
            TrailConfig::from_lookup(lookup_from(&[("RISKLINE_AUDIT_MAX_LIMIT", "0")])).is_err()
        );
    }

    #[test]
    fn test_rejects_max_below_default() {
        let err = TrailConfig::from_lookup(lookup_from(&[
            ("RISKLINE_AUDIT_DEFAULT_LIMIT", "300"),
            ("RISKLINE_AUDIT_MAX_LIMIT", "100"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "RISKLINE_AUDIT_MAX_LIMIT"));
    }

    #[test]
    fn test_blank_database_url_is_missing() {
        let config = TrailConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(
            config.require_database_url().unwrap_err(),
            ConfigError::Missing {
                var: "DATABASE_URL".into()
            }
        );
    }
}
