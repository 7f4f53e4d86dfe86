//! Envios freight-quote integration.
//!
//! # Architecture
//!
//! - [`QuoteAdapter`] is the single entry point checkout uses: package in,
//!   offers out, never an error
//! - [`FreightClient`] does the HTTP work with `reqwest`
//! - [`QuoteCache`] keeps successful quote lists for 5 minutes via `moka`
//! - [`UninstallNotifier`] fires the uninstall webhook
//!
//! The freight API owns every pricing decision. This crate only translates
//! packages into requests and quotes into offers.
//!
//! # Example
//!
//! ```rust,ignore
//! use envios_freight::{FreightConfig, QuoteAdapter};
//!
//! let adapter = QuoteAdapter::new(FreightConfig::from_env()?)?;
//! let offers = adapter.calculate_shipping(&package).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod adapter;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod offers;
pub mod request;
pub mod response;
pub mod uninstall;

pub use adapter::QuoteAdapter;
pub use cache::QuoteCache;
pub use client::FreightClient;
pub use config::{ConfigError, FreightConfig};
pub use error::{QuoteError, ValidationError};
pub use request::QuoteRequest;
pub use response::Quote;
pub use uninstall::UninstallNotifier;
