// Configuration module entry point
// Loads the optional webstage.toml on top of built-in defaults and builds
// the server's runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{BundleConfig, Config, LoggingConfig, ServerConfig, StageConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "webstage";

const DEFAULT_EXCLUDE_DIRS: [&str; 2] = [".git", ".temp"];
const DEFAULT_EXCLUDE_SUFFIXES: [&str; 9] = [
    ".gitignore",
    ".py",
    ".bat",
    ".code-workspace",
    ".wbn",
    ".aux",
    ".log",
    ".out",
    ".gz",
];
const DEFAULT_BUNDLE_URL: &str = "https://peabrainiac.github.io/mandelbrotJS/";

impl Config {
    /// Load configuration from the default file in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error: every key has a default.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name(config_path).required(false))
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from a TOML string layered over the defaults
    pub fn from_toml(contents: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("stage.dir", ".temp")?
            .set_default("stage.exclude_dirs", to_values(&DEFAULT_EXCLUDE_DIRS))?
            .set_default(
                "stage.exclude_suffixes",
                to_values(&DEFAULT_EXCLUDE_SUFFIXES),
            )?
            .set_default("bundle.program", "gen-bundle")?
            .set_default("bundle.base_url", DEFAULT_BUNDLE_URL)?
            .set_default("bundle.primary_url", DEFAULT_BUNDLE_URL)?
            .set_default("bundle.output", "bundle.wbn")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.root", ".")?
            .set_default("server.server_name", "webstage/0.1")?
            .set_default("server.cross_origin_isolation", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn to_values(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.stage.dir, ".temp");
        assert_eq!(cfg.stage.exclude_dirs, vec![".git", ".temp"]);
        assert_eq!(cfg.stage.exclude_suffixes.len(), 9);
        assert!(cfg.stage.exclude_suffixes.contains(&".code-workspace".to_string()));
        assert_eq!(cfg.bundle.program, "gen-bundle");
        assert_eq!(cfg.bundle.output, "bundle.wbn");
        assert_eq!(cfg.bundle.base_url, DEFAULT_BUNDLE_URL);
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.cross_origin_isolation);
        assert!(cfg.server.mime_types.is_empty());
        assert!(cfg.logging.access_log_file.is_none());
    }

    #[test]
    fn test_default_socket_addr() {
        let cfg = Config::from_toml("").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_toml(
            r#"
            [server]
            port = 9000
            cross_origin_isolation = false

            [server.mime_types]
            glsl = "text/plain"

            [server.headers]
            cache-control = "no-store"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert!(!cfg.server.cross_origin_isolation);
        assert_eq!(cfg.server.mime_types["glsl"], "text/plain");
        assert_eq!(cfg.server.headers["cache-control"], "no-store");
        // Untouched sections keep their defaults
        assert_eq!(cfg.stage.dir, ".temp");
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::from_toml("").unwrap();
        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
