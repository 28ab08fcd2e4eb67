/**
 * rust-kad
 * KBucket churn simulator
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use rand::Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kbucket::prelude::*;

type SimEntry = BucketEntry<u64, SocketAddr>;

#[derive(Debug, Parser)]
#[command(name = "kbucket-sim", about = "Simulate contact churn through a single k-bucket")]
struct Options {
    #[command(flatten)]
    config: Config,

    /// Number of distinct peers contacts are drawn from
    #[arg(long, default_value = "64")]
    peers: u64,

    /// Number of contacts to insert
    #[arg(long, default_value = "1000")]
    inserts: usize,

    /// Probability that a probed contact responds
    #[arg(long, default_value = "0.5")]
    liveness: f64,

    /// Mean simulated probe round trip
    #[arg(long, default_value = "10ms", value_parser = humantime::parse_duration)]
    latency: Duration,

    /// Log filter
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Probe with random liveness and latency
struct RandomProbe {
    liveness: f64,
    latency: Duration,
}

#[async_trait]
impl AsyncProbe<SimEntry> for RandomProbe {
    async fn probe(&self, contact: &SimEntry) -> bool {
        let (alive, delay) = {
            let mut rng = rand::thread_rng();
            let max = max_delay_micros(self.latency);
            (rng.gen_bool(self.liveness), Duration::from_micros(rng.gen_range(0..=max)))
        };

        debug!("probe {} at {} ({:?}, alive: {})", contact.id(), contact.info(), delay, alive);
        tokio::time::sleep(delay).await;

        alive
    }
}

/// Upper bound for simulated round trips, twice the mean latency
fn max_delay_micros(latency: Duration) -> u64 {
    u64::try_from(latency.as_micros())
        .unwrap_or(u64::MAX / 2)
        .saturating_mul(2)
}

#[derive(Default, Debug)]
struct Stats {
    promoted: usize,
    appended: usize,
    rejected: usize,
    evicted: usize,
}

#[tokio::main]
async fn main() -> Result<(), BucketError> {
    let opts = Options::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&opts.log_level))
        .try_init();

    let liveness = opts.liveness.clamp(0.0, 1.0);
    let probe = TimeoutProbe::from_config(
        RandomProbe {
            liveness,
            latency: opts.latency,
        },
        &opts.config,
    );

    let bucket = SharedBucket::from(KBucket::<SimEntry>::from_config(&opts.config)?);
    let mut stats = Stats::default();

    info!(
        "Simulating {} inserts over {} peers (bucket size: {}, liveness: {})",
        opts.inserts, opts.peers, opts.config.bucket_size, liveness
    );

    for _ in 0..opts.inserts {
        let id = rand::thread_rng().gen_range(1..=opts.peers.max(1));
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 10_000 + (id % 50_000) as u16));

        match bucket.insert(SimEntry::new(id, addr), &probe).await? {
            Admission::Promoted => stats.promoted += 1,
            Admission::Appended => stats.appended += 1,
            Admission::Rejected(_) => stats.rejected += 1,
            Admission::Evicted(e) => {
                debug!("evicted {}", e.id());
                stats.evicted += 1;
            }
        }
    }

    info!("{:?}", stats);
    info!("probes issued: {}", stats.rejected + stats.evicted);

    for (i, e) in bucket.snapshot().await.iter().enumerate() {
        println!("{:>3} {:>6} {}", i, e.id(), e.info());
    }

    Ok(())
}
