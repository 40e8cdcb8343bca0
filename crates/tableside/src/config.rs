//! Platform configuration.

pub use crate::order_actor::ConcurrencyMode;

/// Runtime settings for a [`PlatformSystem`](crate::lifecycle::PlatformSystem).
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TABLESIDE_CHANNEL_BUFFER | 32 | request buffer of each collection |
/// | TABLESIDE_DEFAULT_TABLE_QUOTA | 3 | table quota without an active plan |
/// | TABLESIDE_ORDER_CONCURRENCY | last-write-wins | or `expect-prior` |
///
/// ```ignore
/// TABLESIDE_ORDER_CONCURRENCY=expect-prior cargo run
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    pub channel_buffer: usize,
    /// Conservative quota used when no entitled plan applies.
    pub default_table_quota: u32,
    pub order_concurrency: ConcurrencyMode,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            default_table_quota: 3,
            order_concurrency: ConcurrencyMode::LastWriteWins,
        }
    }
}

impl PlatformConfig {
    /// Loads the configuration from the environment, falling back to the
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            channel_buffer: std::env::var("TABLESIDE_CHANNEL_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.channel_buffer),
            default_table_quota: std::env::var("TABLESIDE_DEFAULT_TABLE_QUOTA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_table_quota),
            order_concurrency: std::env::var("TABLESIDE_ORDER_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.order_concurrency),
        }
    }
}
