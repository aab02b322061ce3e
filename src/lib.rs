//! dulce - Daily-diary analysis tool
//!
//! Cleans a small daily-observation CSV (date, a 0/1 "sweets consumed" flag,
//! a 0/1 "on period" flag), computes descriptive summaries and a hand-rolled
//! Welch t-test with a normal-approximation p-value, and renders the results
//! as text, JSON, or an HTML chart report.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dataset;
pub mod html_output;
pub mod json_output;
pub mod summary;
pub mod verdict;
pub mod welch;
