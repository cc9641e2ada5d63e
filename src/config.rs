use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::models::ScoringBands;
use crate::services::auth::parse_argon2_hash;

/// HS256 keys shorter than the digest size are rejected
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Values that ship in sample configs and must never sign real tokens
const PLACEHOLDER_SECRETS: &[&str] = &["change-me", "changeme", "secret", "default"];

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    pub admin: AdminSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Largest accepted CSV import body
    pub max_import_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSettings {
    pub students_path: Option<PathBuf>,
    pub universities_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    pub email: String,
    /// Argon2 PHC string, e.g. from `uni-predict hash-password`
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_mins")]
    pub token_ttl_mins: i64,
}

fn default_token_ttl_mins() -> i64 { 60 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub bands: BandsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BandsConfig {
    #[serde(default = "default_pass_mark")]
    pub pass_mark: i32,
    #[serde(default = "default_failing_band")]
    pub failing_band: f64,
    #[serde(default = "default_below_threshold_band")]
    pub below_threshold_band: f64,
    #[serde(default = "default_base")]
    pub base: f64,
    #[serde(default = "default_max_bonus")]
    pub max_bonus: f64,
    #[serde(default = "default_bonus_span")]
    pub bonus_span: f64,
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
}

impl Default for BandsConfig {
    fn default() -> Self {
        Self {
            pass_mark: default_pass_mark(),
            failing_band: default_failing_band(),
            below_threshold_band: default_below_threshold_band(),
            base: default_base(),
            max_bonus: default_max_bonus(),
            bonus_span: default_bonus_span(),
            ceiling: default_ceiling(),
        }
    }
}

impl From<&BandsConfig> for ScoringBands {
    fn from(config: &BandsConfig) -> Self {
        Self {
            pass_mark: config.pass_mark,
            failing_band: config.failing_band,
            below_threshold_band: config.below_threshold_band,
            base: config.base,
            max_bonus: config.max_bonus,
            bonus_span: config.bonus_span,
            ceiling: config.ceiling,
        }
    }
}

fn default_pass_mark() -> i32 { 40 }
fn default_failing_band() -> f64 { 30.0 }
fn default_below_threshold_band() -> f64 { 60.0 }
fn default_base() -> f64 { 75.0 }
fn default_max_bonus() -> f64 { 25.0 }
fn default_bonus_span() -> f64 { 100.0 }
fn default_ceiling() -> f64 { 95.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with UNIPREDICT_)
    /// 5. ADMIN_PASSWORD_HASH / ADMIN_JWT_SECRET secrets
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        Self::finish(builder)
    }

    /// Load configuration from a custom path
    ///
    /// Environment variables and secret overrides apply exactly as in [`Settings::load`].
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::finish(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Layer the environment on top of the file sources, then deserialize and validate
    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            // e.g., UNIPREDICT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("UNIPREDICT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_secret_overrides(settings)?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject band values that would break the percentage bounds, and unusable admin secrets
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bands = &self.scoring.bands;
        if !(bands.ceiling > 0.0 && bands.ceiling <= 100.0) {
            return Err(ConfigError::Message(format!(
                "scoring.bands.ceiling must be in (0, 100], got {}",
                bands.ceiling
            )));
        }
        if bands.pass_mark < 0 {
            return Err(ConfigError::Message(format!(
                "scoring.bands.pass_mark must not be negative, got {}",
                bands.pass_mark
            )));
        }
        self.admin.validate()
    }
}

impl AdminSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.jwt_secret.trim();
        if secret.is_empty() {
            return Err(ConfigError::Message(
                "admin.jwt_secret must be set (ADMIN_JWT_SECRET)".to_string(),
            ));
        }
        if PLACEHOLDER_SECRETS.iter().any(|p| secret.eq_ignore_ascii_case(p)) {
            return Err(ConfigError::Message(
                "admin.jwt_secret is a placeholder value".to_string(),
            ));
        }
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "admin.jwt_secret must be at least {} bytes, got {}",
                MIN_JWT_SECRET_BYTES,
                secret.len()
            )));
        }

        if self.password_hash.trim().is_empty() {
            return Err(ConfigError::Message(
                "admin.password_hash must be set (ADMIN_PASSWORD_HASH)".to_string(),
            ));
        }
        parse_argon2_hash(self.password_hash.trim())
            .map_err(|e| ConfigError::Message(format!("admin.password_hash: {}", e)))?;

        if self.token_ttl_mins <= 0 {
            return Err(ConfigError::Message(format!(
                "admin.token_ttl_mins must be positive, got {}",
                self.token_ttl_mins
            )));
        }
        if chrono::Duration::try_minutes(self.token_ttl_mins).is_none() {
            return Err(ConfigError::Message(format!(
                "admin.token_ttl_mins is too large: {}",
                self.token_ttl_mins
            )));
        }
        Ok(())
    }
}

/// Let deployment secrets come from their conventional variable names
fn apply_secret_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(hash) = env::var("ADMIN_PASSWORD_HASH") {
        builder = builder.set_override("admin.password_hash", hash)?;
    }
    if let Ok(secret) = env::var("ADMIN_JWT_SECRET") {
        builder = builder.set_override("admin.jwt_secret", secret)?;
    }

    builder.build()
}
