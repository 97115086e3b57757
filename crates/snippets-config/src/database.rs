use anyhow::{Context, bail};

use crate::{env_lookup, parse_var};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` (required) and `DATABASE_MAX_CONNECTIONS` (default 10).
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or is not a PostgreSQL URL.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            bail!("DATABASE_URL must use the postgres:// or postgresql:// scheme");
        }

        let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;

        Ok(Self {
            url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn test_missing_url_fails() {
        assert!(DatabaseConfig::from_lookup(map_lookup(&[])).is_err());
    }

    #[test]
    fn test_both_schemes_accepted() {
        for url in ["postgres://u:p@localhost/db", "postgresql://u:p@localhost/db"] {
            let vars = [("DATABASE_URL", url)];
            let config = DatabaseConfig::from_lookup(map_lookup(&vars)).unwrap();
            assert_eq!(config.url, url);
            assert_eq!(config.max_connections, 10);
        }
    }

    #[test]
    fn test_other_scheme_rejected() {
        let vars = [("DATABASE_URL", "mysql://localhost/db")];
        assert!(DatabaseConfig::from_lookup(map_lookup(&vars)).is_err());
    }

    #[test]
    fn test_max_connections_override() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DATABASE_MAX_CONNECTIONS", "25"),
        ];
        let config = DatabaseConfig::from_lookup(map_lookup(&vars)).unwrap();
        assert_eq!(config.max_connections, 25);
    }

    #[test]
    fn test_invalid_max_connections_fails() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DATABASE_MAX_CONNECTIONS", "lots"),
        ];
        let err = DatabaseConfig::from_lookup(map_lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }
}
