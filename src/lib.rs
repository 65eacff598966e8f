//! MoneyTrack - Terminal-based personal budgeting application
//!
//! This library provides the core functionality for the MoneyTrack budgeting
//! application. It tracks a single active budget over a fixed date range,
//! records expense and income transactions against it, and derives a daily
//! spending allowance from what remains.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, budgets, transactions, categories)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Spending analytics
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use moneytrack::config::{paths::MoneyTrackPaths, settings::Settings};
//!
//! let paths = MoneyTrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::MoneyTrackError;
