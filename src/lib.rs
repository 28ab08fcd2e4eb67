/**
 * rust-kad
 * A Kademlia k-bucket with liveness-checked eviction
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */
use std::time::Duration;

#[cfg(feature = "clap")]
use clap::Parser;

pub mod common;
pub use self::common::{Contact, Entry, Error};

pub mod bucket;
pub use self::bucket::{Admission, KBucket, SharedBucket};

pub mod probe;
pub use self::probe::{AsyncProbe, Probe, TimeoutProbe};

pub mod prelude;

#[cfg(test)]
pub mod mock;

/// Bucket configuration
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "clap", derive(Parser))]
pub struct Config {
    /// Maximum number of contacts held in a bucket
    #[cfg_attr(feature = "clap", arg(long, default_value = "20"))]
    pub bucket_size: usize,

    /// Timeout for liveness probes of the eldest contact
    #[cfg_attr(feature = "clap", arg(long, default_value = "3s", value_parser = parse_duration))]
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bucket_size: 20,
            probe_timeout: Duration::from_secs(3),
        }
    }
}

/// Helper to parse durations from strings
#[cfg(feature = "clap")]
fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}
