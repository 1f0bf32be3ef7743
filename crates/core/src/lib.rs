//! Elegance Core - Shared types library.
//!
//! This crate provides the domain types used across all Elegance components:
//! - `storefront` - Page behaviors (cart manager, theme, forms, browser binding)
//! - `cli` - Command-line driver for the page behaviors
//!
//! # Architecture
//!
//! The core crate contains only types and their pure operations - no storage,
//! no rendering, no DOM access. This keeps the cart state machine testable
//! without any interface dependency.
//!
//! # Modules
//!
//! - [`types`] - Emails, unit prices, themes, line items and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
