//! Process configuration read at the binary edge.

use std::path::PathBuf;

use anyhow::Context;

use learnhub_infra::FileSlot;

/// Environment variable overriding the session file location.
pub const SESSION_PATH_ENV: &str = "LEARNHUB_SESSION_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub session_path: PathBuf,
}

impl Config {
    /// Resolve configuration. Precedence: flag, then environment, then the
    /// platform data directory.
    pub fn resolve(session_flag: Option<PathBuf>) -> anyhow::Result<Self> {
        let env = std::env::var_os(SESSION_PATH_ENV).map(PathBuf::from);
        Self::resolve_from(session_flag, env, FileSlot::default_path())
    }

    fn resolve_from(
        flag: Option<PathBuf>,
        env: Option<PathBuf>,
        platform_default: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let session_path = flag
            .or(env.filter(|p| !p.as_os_str().is_empty()))
            .or(platform_default)
            .with_context(|| {
                format!("no data directory found; set {SESSION_PATH_ENV} or pass --session-file")
            })?;

        Ok(Self { session_path })
    }
}
