//! One-shot Garmin Connect activity fetcher.
//!
//! The binary resolves credentials (saved session first, then
//! username/password), fetches the most recent activities, and prints one
//! line per activity to stdout. The pieces are split so each can be tested
//! against a stub [`garmin_connect_client::GarminConnect`] implementation.

pub mod config;
pub mod report;
pub mod resolver;
