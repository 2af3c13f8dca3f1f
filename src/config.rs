use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

use crate::diversity::SecondaryTargets;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    pub default: String,
    pub supported: Vec<String>,
}

impl LocaleConfig {
    /// Narrows a requested tag to a supported locale, matching on the primary
    /// subtag when the full tag is unknown (`en-GB` -> `en`).
    pub fn resolve(&self, requested: &str) -> Option<&str> {
        let requested = requested.to_ascii_lowercase();
        let primary = requested.split(['-', '_']).next().unwrap_or_default();
        self.supported
            .iter()
            .find(|s| **s == requested)
            .or_else(|| self.supported.iter().find(|s| **s == primary))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub locales: LocaleConfig,
    pub prebiotic_weekly_target: u32,
    pub probiotic_weekly_target: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store = match std::env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("postgres") | Err(_) => StoreBackend::Postgres,
            Ok(other) => anyhow::bail!("unsupported STORE_BACKEND `{other}`"),
        };
        let database_url = std::env::var("DATABASE_URL").ok();
        if store == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set for the postgres store");
        }

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutrigoal".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutrigoal-users".into()),
        };

        let default_locale = std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "es".into());
        let mut supported: Vec<String> = std::env::var("SUPPORTED_LOCALES")
            .unwrap_or_else(|_| "es,en".into())
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !supported.contains(&default_locale) {
            supported.push(default_locale.clone());
        }

        let port: u16 = match std::env::var("APP_PORT") {
            Ok(raw) => raw.parse().with_context(|| format!("APP_PORT `{raw}`"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            store,
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10),
            jwt,
            locales: LocaleConfig {
                default: default_locale,
                supported,
            },
            prebiotic_weekly_target: parse_var("PREBIOTIC_WEEKLY_TARGET", 5),
            probiotic_weekly_target: parse_var("PROBIOTIC_WEEKLY_TARGET", 3),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("APP_HOST `{}`", self.host))
    }

    pub fn secondary_targets(&self) -> SecondaryTargets {
        SecondaryTargets {
            prebiotic: self.prebiotic_weekly_target,
            probiotic: self.probiotic_weekly_target,
        }
    }
}

fn parse_var(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleConfig {
        LocaleConfig {
            default: "es".into(),
            supported: vec!["es".into(), "en".into()],
        }
    }

    #[test]
    fn region_tags_fall_back_to_primary_language() {
        let l = locales();
        assert_eq!(l.resolve("en-GB"), Some("en"));
        assert_eq!(l.resolve("ES"), Some("es"));
        assert_eq!(l.resolve("fr"), None);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let mut cfg = crate::state::testing::test_config();
        cfg.host = "127.0.0.1".into();
        cfg.port = 9090;
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "127.0.0.1:9090");

        cfg.host = "not a host".into();
        assert!(cfg.bind_addr().is_err());
    }
}
