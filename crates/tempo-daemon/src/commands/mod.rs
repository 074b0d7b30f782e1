//! IPC command handlers.
//!
//! Each submodule implements the commands for one category.

pub mod admin;
pub mod auth;
pub mod lifecycle;
pub mod profile;
