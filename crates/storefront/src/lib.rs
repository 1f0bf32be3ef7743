//! Elegance Wardrobe storefront library.
//!
//! The page behaviors of the storefront: theme persistence, the homepage
//! greeting, the storage-backed cart and form validation. Everything is
//! driven through [`page::PageController`], which the browser binding
//! (feature `web`) and the `elegance` CLI share.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod forms;
pub mod greeting;
pub mod page;
pub mod render;
pub mod storage;
pub mod theme;
#[cfg(feature = "web")]
pub mod web;

pub use error::{Result, StorefrontError};
