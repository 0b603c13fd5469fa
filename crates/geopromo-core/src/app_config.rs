use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Whether offer derivation drops offers whose `valid_until` date has passed.
///
/// `Ignore` matches the catalog's own `is_active` flag as the only gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    #[default]
    Ignore,
    ExcludeExpired,
}

impl std::fmt::Display for ExpiryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryPolicy::Ignore => write!(f, "ignore"),
            ExpiryPolicy::ExcludeExpired => write!(f, "exclude-expired"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// `tracing-subscriber` filter directive, e.g. `info` or `geopromo_geofence=debug`.
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub offer_expiry_policy: ExpiryPolicy,
}
