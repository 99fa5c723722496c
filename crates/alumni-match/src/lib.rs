pub mod config;
pub mod error;
pub mod import;
pub mod matching;
pub mod telemetry;
pub mod waitlist;
