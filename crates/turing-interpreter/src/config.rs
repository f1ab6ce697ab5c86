//! Run configuration.

/// Environment variable consulted by [`Config::from_env`].
pub const STRICT_ENV_VAR: &str = "TURING_STRICT";

/// Settings fixed for the duration of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Reject implicit cross-type coercions. String concatenation with `+`
    /// is always allowed.
    pub strict_typing: bool,
}

impl Config {
    pub fn strict() -> Self {
        Self { strict_typing: true }
    }

    /// Reads `TURING_STRICT` (`1`, `true`, `yes`, `on`); anything else, or an
    /// unset variable, means non-strict.
    pub fn from_env() -> Self {
        let strict_typing = std::env::var(STRICT_ENV_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        Self { strict_typing }
    }
}
