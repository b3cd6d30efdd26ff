// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub stage: StageConfig,
    pub bundle: BundleConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Staging mirror configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StageConfig {
    /// Staging directory, relative to the project root
    pub dir: String,
    /// Directory names never staged, at any depth
    pub exclude_dirs: Vec<String>,
    /// File name suffixes never copied
    pub exclude_suffixes: Vec<String>,
}

/// External bundle tool invocation
#[derive(Debug, Deserialize, Clone)]
pub struct BundleConfig {
    pub program: String,
    pub base_url: String,
    pub primary_url: String,
    pub output: String,
}

/// Development server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served, relative to the working directory
    pub root: String,
    pub server_name: String,
    /// Append COOP/COEP headers to every response
    pub cross_origin_isolation: bool,
    /// Extra extension -> content type entries
    #[serde(default)]
    pub mime_types: BTreeMap<String, String>,
    /// Extra headers appended to every response
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
