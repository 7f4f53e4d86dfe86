//! Envios Core - Shared shipping types.
//!
//! This crate provides the types shared by every Envios component:
//! - `freight` - Freight API client and quote adapter
//! - `checkout` - Checkout shipping-rate service
//! - `cli` - Operator tools (manual quotes, uninstall webhook)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no caching. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Packages, postal codes, store units, offers, and delivery-time labels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
