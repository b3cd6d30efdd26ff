// Application state module
// Everything a request needs, built once before serving and then read-only

use crate::config::Config;
use crate::error::ServerError;
use crate::http::{CrossOriginIsolation, HookList, MimeTable, StaticHeaders};
use std::path::PathBuf;

/// Application state shared by all connections
#[derive(Debug)]
pub struct AppState {
    /// Canonical document root
    pub root: PathBuf,
    pub mime: MimeTable,
    pub hooks: HookList,
    pub server_name: String,
    pub access_log: bool,
    pub access_log_format: String,
}

impl AppState {
    pub fn new(root: PathBuf, mime: MimeTable, hooks: HookList) -> Self {
        Self {
            root,
            mime,
            hooks,
            server_name: concat!("webstage/", env!("CARGO_PKG_VERSION")).to_string(),
            access_log: true,
            access_log_format: "common".to_string(),
        }
    }

    /// Build state from configuration
    ///
    /// The MIME table starts from the dev server defaults (including `.wasm`
    /// and `.wbn`) and is extended with `server.mime_types`. Hooks run in
    /// order: cross-origin isolation (if enabled), then `server.headers`.
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        let root = PathBuf::from(&config.server.root);
        let root = root
            .canonicalize()
            .map_err(|_| ServerError::RootNotFound(root.clone()))?;

        let mime = MimeTable::for_dev_server().with_entries(&config.server.mime_types);

        let mut hooks = HookList::new();
        if config.server.cross_origin_isolation {
            hooks.push(CrossOriginIsolation);
        }
        let extra = StaticHeaders::from_config(&config.server.headers)?;
        if !extra.is_empty() {
            hooks.push(extra);
        }

        Ok(Self {
            root,
            mime,
            hooks,
            server_name: config.server.server_name.clone(),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_default_hooks() {
        let mut config = Config::from_toml("").unwrap();
        let dir = tempfile::tempdir().unwrap();
        config.server.root = dir.path().display().to_string();

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.hooks.len(), 1);
        assert_eq!(state.mime.get("wbn"), Some("application/webbundle"));
        assert!(state.root.is_absolute());
    }

    #[test]
    fn test_from_config_without_isolation() {
        let mut config = Config::from_toml(
            r#"
            [server]
            cross_origin_isolation = false

            [server.headers]
            x-dev = "1"
            "#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        config.server.root = dir.path().display().to_string();

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.hooks.len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let mut config = Config::from_toml("").unwrap();
        config.server.root = "/definitely/not/a/real/webstage/root".to_string();
        assert!(matches!(
            AppState::from_config(&config),
            Err(ServerError::RootNotFound(_))
        ));
    }
}
