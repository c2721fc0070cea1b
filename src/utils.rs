//! Miscellaneous utility functions for filesum.
//!
//! - [helpers]: color parsing, home directory handling, default file locations
//! - [cli]: command line argument handling
//! - [logging]: file based tracing setup

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{
    default_log_path, expand_home_path, get_home, parse_color, shorten_home_path,
};
