// Project-wide constants
//
// Centralised here so port numbers and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the HTTP server (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Default maximum accepted request body, in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "coach.toml";

/// Config file looked up under the home directory.
pub const HOME_CONFIG_FILE: &str = ".coach/config.toml";

/// Token budget for `/financial-coach` completions.
pub const ADVICE_MAX_TOKENS: u32 = 200;

/// Token budget for `/tips` completions.
pub const TIPS_MAX_TOKENS: u32 = 150;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "coach=info,tower_http=info";
