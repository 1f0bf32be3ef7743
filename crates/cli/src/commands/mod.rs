//! Subcommand implementations.
//!
//! Each command drives the page the way a click or form submission would and
//! prints what the page would show.

pub mod cart;
pub mod forms;
pub mod home;
pub mod theme;
