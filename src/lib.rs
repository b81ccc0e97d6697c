// Sentiboard: exploratory dashboard for tweet sentiment predictions.
//
// This is the library root. Data flows one way through the modules:
// dataset -> {stats, inspect} -> viz -> output / web.

pub mod config;
pub mod dataset;
pub mod error;
pub mod inspect;
pub mod output;
pub mod session;
pub mod stats;
pub mod viz;

#[cfg(feature = "web")]
pub mod web;
