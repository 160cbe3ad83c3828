//! Filesystem path constants.

/// Default config file path for `fedquota-check`.
pub const DEFAULT_CHECK_CONFIG: &str = "/etc/fedquota/config.yaml";
