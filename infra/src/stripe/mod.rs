//! Stripe Connect over HTTPS

mod client;


pub use client::StripeConnectClient;
