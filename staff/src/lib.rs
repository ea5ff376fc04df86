//! `ConsoleCraft` Staff
//!
//! Rank hierarchy and permission authority for the ConsoleCraft staff
//! dashboard, with the account directory, punishment log and dashboard
//! content it guards.

pub mod auth;
pub mod config;
pub mod content;
pub mod directory;
pub mod navigation;
pub mod permissions;
pub mod punishments;
