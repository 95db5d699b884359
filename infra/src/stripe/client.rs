//! Form-encoded calls to the Stripe Connect API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, error, info};

use nbj_core::errors::{DomainError, DomainResult};
use nbj_core::services::ConnectAccountGateway;
use nbj_shared::StripeConfig;

use crate::InfrastructureError;

const SERVICE: &str = "Stripe";

#[derive(Debug, Deserialize)]
struct AccountResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AccountLinkResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Stripe Connect client authenticated with the platform secret key
pub struct StripeConnectClient {
    http: Client,
    config: StripeConfig,
}

impl StripeConnectClient {
    pub fn new(config: StripeConfig) -> Result<Self, InfrastructureError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        if config.is_configured() {
            info!(api_base = %config.api_base, "Stripe Connect client initialized");
        } else {
            info!("Stripe secret key not set; Connect onboarding disabled");
        }

        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn external(message: impl Into<String>) -> DomainError {
        DomainError::ExternalService {
            service: SERVICE.to_string(),
            message: message.into(),
        }
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> DomainResult<Response> {
        if !self.config.is_configured() {
            return Err(DomainError::NotConfigured {
                service: SERVICE.to_string(),
            });
        }

        debug!(path, "Calling Stripe");
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(&self.config.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, path, "Stripe request failed");
                Self::external(format!("request failed: {}", e))
            })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope
                .error
                .message
                .or(envelope.error.kind)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        error!(%status, path, message = %message, "Stripe returned an error");
        Err(Self::external(message))
    }
}

#[async_trait]
impl ConnectAccountGateway for StripeConnectClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn create_express_account(&self, email: &str) -> DomainResult<String> {
        let form = [
            ("type", "express"),
            ("country", self.config.country.as_str()),
            ("email", email),
            ("capabilities[card_payments][requested]", "true"),
            ("capabilities[transfers][requested]", "true"),
        ];
        let account: AccountResponse = self
            .post_form("/v1/accounts", &form)
            .await?
            .json()
            .await
            .map_err(|e| Self::external(format!("unexpected account response: {}", e)))?;

        info!(account_id = %account.id, "Stripe express account created");
        Ok(account.id)
    }

    async fn create_onboarding_link(&self, account_id: &str) -> DomainResult<String> {
        let form = [
            ("account", account_id),
            ("refresh_url", self.config.refresh_url.as_str()),
            ("return_url", self.config.return_url.as_str()),
            ("type", "account_onboarding"),
        ];
        let link: AccountLinkResponse = self
            .post_form("/v1/account_links", &form)
            .await?
            .json()
            .await
            .map_err(|e| Self::external(format!("unexpected account link response: {}", e)))?;

        Ok(link.url)
    }
}
