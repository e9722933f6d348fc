//! quizdeck-core — Question parsing, countdown, navigation, and scoring.
//!
//! This crate holds everything about a timed multiple-choice test that does
//! not depend on how it is presented: the text-file parser, the test
//! session state, and the scoring engine.

pub mod config;
pub mod error;
pub mod model;
pub mod navigator;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod traits;
