use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use url::Url;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::OrderError;
use crate::models::enums::{LandingPage, OrderIntent, PaymentMethod, ShippingPreference, UserAction};
use crate::models::experience_context::DEFAULT_LOCALE;
use crate::models::money::Currency;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_CURRENCY: &str = "USD";
const CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "CHECKOUT";

/// Merchant-wide checkout defaults used to seed new orders.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CheckoutConfig {
    /// ISO-4217 code used when the caller does not name a currency
    #[serde(default = "default_currency")]
    #[validate(custom = "validate_currency_code")]
    pub default_currency: String,

    #[serde(default)]
    pub default_intent: OrderIntent,

    #[serde(default)]
    #[validate(length(max = 127))]
    pub brand_name: Option<String>,

    #[serde(default = "default_locale")]
    #[validate(length(min = 2, max = 10))]
    pub locale: String,

    #[serde(default)]
    pub landing_page: Option<LandingPage>,

    #[serde(default)]
    pub shipping_preference: Option<ShippingPreference>,

    #[serde(default)]
    pub user_action: Option<UserAction>,

    #[serde(default)]
    pub payment_method_preference: PaymentMethod,

    /// Where the payer lands after approving
    #[serde(default)]
    #[validate(custom = "validate_absolute_url")]
    pub return_url: Option<String>,

    #[serde(default)]
    #[validate(custom = "validate_absolute_url")]
    pub cancel_url: Option<String>,

    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            default_intent: OrderIntent::default(),
            brand_name: None,
            locale: default_locale(),
            landing_page: None,
            shipping_preference: None,
            user_action: None,
            payment_method_preference: PaymentMethod::default(),
            return_url: None,
            cancel_url: None,
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl CheckoutConfig {
    pub fn currency(&self) -> Result<Currency, OrderError> {
        self.default_currency.parse()
    }
}

#[derive(Debug, Error)]
pub enum CheckoutConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    match code.parse::<Currency>() {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("default_currency");
            err.message = Some("Must be a currency supported by the Orders API".into());
            Err(err)
        }
    }
}

fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => Ok(()),
        _ => {
            let mut err = ValidationError::new("url");
            err.message = Some("Must be an absolute http(s) URL".into());
            Err(err)
        }
    }
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Installs a `fmt` subscriber. `RUST_LOG` wins over `level` when set.
/// Calling this more than once is harmless.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;

    let default_directive = format!("paypal_orders={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

/// Loads configuration from `./config`, see [`load_config_from`].
pub fn load_config() -> Result<CheckoutConfig, CheckoutConfigError> {
    load_config_from(CONFIG_DIR)
}

/// Layers built-in defaults, `<dir>/default.*`, `<dir>/<RUN_ENV>.*` and
/// `CHECKOUT__*` environment variables, then validates the result.
pub fn load_config_from(dir: impl AsRef<Path>) -> Result<CheckoutConfig, CheckoutConfigError> {
    let dir = dir.as_ref();
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading checkout configuration for environment: {}", run_env);

    if !dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            dir.display()
        );
    }

    let config = Config::builder()
        .set_default("default_currency", DEFAULT_CURRENCY)?
        .set_default("default_intent", OrderIntent::default().as_str())?
        .set_default("locale", DEFAULT_LOCALE)?
        .set_default(
            "payment_method_preference",
            PaymentMethod::default().as_str(),
        )?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
        .add_source(File::with_name(&dir.join(&run_env).to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let checkout_config: CheckoutConfig = config.try_deserialize()?;

    checkout_config.validate().map_err(|e| {
        error!("Checkout configuration validation failed: {:?}", e);
        CheckoutConfigError::Validation(e)
    })?;

    info!("Checkout configuration loaded successfully");
    Ok(checkout_config)
}
