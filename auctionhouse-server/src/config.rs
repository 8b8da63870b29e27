//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: full connection string, wins when set
//! - `DB_HOST` (localhost), `DB_PORT` (5432), `DB_NAME` (auction),
//!   `DB_USER` (postgres), `DB_PASSWORD` (empty)

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_NAME: &str = "auction";
const DEFAULT_USER: &str = "postgres";

/// Connection parameters for the auction database
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source (for testing)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            url: var("DATABASE_URL"),
            host: var("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: var("DB_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            name: var("DB_NAME").unwrap_or_else(|| DEFAULT_NAME.to_owned()),
            user: var("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_owned()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
        }
    }

    /// Override the connection string (e.g. from `--database-url`)
    pub fn with_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.url = url;
        }
        self
    }

    /// Build sqlx connect options.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not a valid connection string.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password))
    }

    /// Where we connect, without credentials (for logs)
    pub fn target(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_owned(),
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
