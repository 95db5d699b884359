//! Stripe Connect onboarding for administrators

mod gateway;
mod service;

pub use gateway::{ConnectAccountGateway, MockConnectAccountGateway};
pub use service::{OnboardingLink, StripeService};
