//! Server configuration.
//!
//! Read once at startup from the environment; the binary's command-line
//! flags and interactive prompts override individual values afterwards.

use std::time::Duration;

use football_api_scraper::ScrapeConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable overriding the Wikipedia base URL.
pub const WIKIPEDIA_URL_VAR: &str = "FOOTBALL_API_WIKIPEDIA_URL";

/// Environment variable overriding the Eurosport base URL.
pub const EUROSPORT_URL_VAR: &str = "FOOTBALL_API_EUROSPORT_URL";

/// Environment variable overriding the outbound fetch timeout, in seconds.
pub const TIMEOUT_SECS_VAR: &str = "FOOTBALL_API_TIMEOUT_SECS";

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: String,
    /// Listen port.
    pub port: u16,
    /// Settings shared by every extractor.
    pub scrape: ScrapeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            port: DEFAULT_PORT,
            scrape: ScrapeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(e) => log::warn!("Ignoring PORT={port:?}: {e}"),
            }
        }

        if let Some(url) = lookup(WIKIPEDIA_URL_VAR) {
            config.scrape = config.scrape.with_wikipedia_url(&url);
        }

        if let Some(url) = lookup(EUROSPORT_URL_VAR) {
            config.scrape = config.scrape.with_eurosport_url(&url);
        }

        if let Some(secs) = lookup(TIMEOUT_SECS_VAR) {
            match secs.parse() {
                Ok(secs) => config.scrape = config.scrape.with_timeout(Duration::from_secs(secs)),
                Err(e) => log::warn!("Ignoring {TIMEOUT_SECS_VAR}={secs:?}: {e}"),
            }
        }

        config
    }

    /// Overrides the listen address.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: &str) -> Self {
        bind_addr.clone_into(&mut self.bind_addr);
        self
    }

    /// Overrides the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
