//! Coach Desk
//!
//! This crate tracks daily coach attendance, derives monthly net salaries
//! from it, and records player feedback with an email notification to the
//! player.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod feedback;
pub mod models;
pub mod notification;
pub mod store;
