//! Country indicators - latest GDP per capita and population per country
//!
//! This library fetches indicator series from a DataBank-style API, keeps the
//! most recent non-null observation per country, and writes per-indicator and
//! merged CSV tables.

pub mod collector;
pub mod config;
pub mod error;
pub mod indicators;
pub mod merge;
pub mod output;
pub mod reports;
pub mod utils;
