//! Command handlers for taskload CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod extract;
pub mod inspect;
pub mod obstacles;
pub mod score;
