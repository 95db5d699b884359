//! Stripe Connect configuration

use serde::{Deserialize, Serialize};

/// Credentials and redirect targets for Stripe Connect onboarding
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeConfig {
    /// Secret API key (`sk_...`); empty disables the integration
    #[serde(default)]
    pub secret_key: String,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Country for newly created express accounts
    #[serde(default = "default_country")]
    pub country: String,

    /// Where Stripe sends the admin when an onboarding link expires
    #[serde(default = "default_settings_url")]
    pub refresh_url: String,

    /// Where Stripe sends the admin after onboarding
    #[serde(default = "default_settings_url")]
    pub return_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            api_base: default_api_base(),
            country: default_country(),
            refresh_url: default_settings_url(),
            return_url: default_settings_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl StripeConfig {
    /// Whether a secret key has been provided
    pub fn is_configured(&self) -> bool {
        !self.secret_key.trim().is_empty()
    }
}

fn default_api_base() -> String {
    String::from("https://api.stripe.com")
}

fn default_country() -> String {
    String::from("US")
}

fn default_settings_url() -> String {
    String::from("http://localhost:5173/admin/settings")
}

fn default_timeout() -> u64 {
    30
}
