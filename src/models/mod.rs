//! Defines the data structures and models used throughout the application.
//!
//! This includes the platform catalogue, the user's download selections,
//! and the assembled command line handed to the external downloader.

mod command;
mod download;

pub use command::*;
pub use download::*;
