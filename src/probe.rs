/**
 * rust-kad
 * Liveness probe interfaces
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::Config;

/// Synchronous liveness probe, consulted by [`KBucket::insert`](crate::KBucket::insert)
/// when a full bucket must decide whether to keep its least-recently-seen contact.
///
/// Returns true if the contact responded. Any failure (including timeouts) maps to false.
pub trait Probe<C> {
    fn probe(&mut self, contact: &C) -> bool;
}

impl<C, F> Probe<C> for F
where
    F: FnMut(&C) -> bool,
{
    fn probe(&mut self, contact: &C) -> bool {
        (self)(contact)
    }
}

/// Asynchronous liveness probe, ie. a ping over the network
#[async_trait]
pub trait AsyncProbe<C>: Sync + Send
where
    C: Sync + Send,
{
    async fn probe(&self, contact: &C) -> bool;
}

/// TimeoutProbe bounds an [`AsyncProbe`], reporting any contact that has not
/// answered within the timeout as not alive
#[derive(Clone, Debug)]
pub struct TimeoutProbe<P> {
    inner: P,
    timeout: Duration,
}

impl<P> TimeoutProbe<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Create a probe wrapper using the configured probe timeout
    pub fn from_config(inner: P, config: &Config) -> Self {
        Self::new(inner, config.probe_timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait]
impl<C, P> AsyncProbe<C> for TimeoutProbe<P>
where
    C: Debug + Sync + Send,
    P: AsyncProbe<C>,
{
    async fn probe(&self, contact: &C) -> bool {
        match tokio::time::timeout(self.timeout, self.inner.probe(contact)).await {
            Ok(alive) => alive,
            Err(_) => {
                debug!(target: "kbucket", "[TimeoutProbe] no response from {:?} within {:?}", contact, self.timeout);
                false
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Slow(Duration, bool);

    #[async_trait]
    impl AsyncProbe<u64> for Slow {
        async fn probe(&self, _contact: &u64) -> bool {
            tokio::time::sleep(self.0).await;
            self.1
        }
    }

    #[test]
    fn test_closure_probe() {
        let mut calls = 0;
        let mut p = |c: &u64| {
            calls += 1;
            *c % 2 == 0
        };

        assert_eq!(true, Probe::probe(&mut p, &4));
        assert_eq!(false, Probe::probe(&mut p, &5));
        assert_eq!(2, calls);
    }

    #[tokio::test]
    async fn test_timeout_probe_answers() {
        let p = TimeoutProbe::new(Slow(Duration::from_millis(1), true), Duration::from_secs(5));
        assert_eq!(true, p.probe(&1u64).await);
    }

    #[tokio::test]
    async fn test_timeout_probe_expires() {
        let p = TimeoutProbe::new(Slow(Duration::from_secs(5), true), Duration::from_millis(10));
        assert_eq!(false, p.probe(&1u64).await);
    }

    #[test]
    fn test_timeout_from_config() {
        let mut config = Config::default();
        config.probe_timeout = Duration::from_millis(250);

        let p = TimeoutProbe::from_config(Slow(Duration::from_millis(0), true), &config);
        assert_eq!(Duration::from_millis(250), p.timeout());
    }
}
