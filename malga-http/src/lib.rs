#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport and resource clients for the Malga payment API.
//!
//! Implements the card and customer collaborators of the `malga` charge
//! pipeline over REST, and exposes the [`Malga`] facade for cards,
//! customers and charges.
//!
//! # Modules
//!
//! - [`constants`] - Base URLs, header names, environment variables, defaults
//! - `config` - `MalgaConfig` and environment loading (feature: `client`)
//! - `retry` - Retry middleware for the reqwest client (feature: `client`)
//! - `api` - Authenticated JSON transport and error mapping (feature: `client`)
//! - `cards`, `customers`, `charges` - Resource clients (feature: `client`)
//!
//! # Feature Flags
//!
//! - `client` (default) - The reqwest transport, resource clients and the
//!   `Malga` facade
//! - `telemetry` - Request spans, retry and failure logs via `tracing`

pub mod constants;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod cards;
#[cfg(feature = "client")]
pub mod charges;
#[cfg(feature = "client")]
mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod customers;
#[cfg(feature = "client")]
pub mod retry;

#[cfg(all(test, feature = "client"))]
mod testing;

#[cfg(feature = "client")]
pub use api::{Api, RequestOptions};
#[cfg(feature = "client")]
pub use client::Malga;
#[cfg(feature = "client")]
pub use config::{ConfigError, MalgaConfig};
pub use malga::{ApiError, MalgaError};
