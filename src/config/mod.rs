// Configuration module entry point
// Layers config.toml over SERVER_* environment variables over defaults

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{BundlesConfig, Config, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" location.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 80)?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("bundles.project_root", ".")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Config for tests: defaults with the bundle root pointed at a fixture
    /// directory and logging silenced.
    #[cfg(test)]
    pub fn for_project_root(root: &std::path::Path) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig { access_log: false },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
            bundles: BundlesConfig {
                project_root: root.display().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let cfg = Config::load_from("does-not-exist").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 80);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.bundles.project_root, ".");
    }

    #[test]
    fn socket_addr_parses() {
        let cfg = Config::load_from("does-not-exist").unwrap();
        assert!(cfg.socket_addr().is_ok());
    }
}
