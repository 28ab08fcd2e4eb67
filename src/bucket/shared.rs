/**
 * rust-kad
 * Shared KBucket handle
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */
use std::sync::Arc;

use futures::lock::Mutex;

use super::kbucket::{Admission, KBucket};
use crate::common::{Contact, Error};
use crate::probe::AsyncProbe;

/// SharedBucket wraps a [`KBucket`] for use from multiple tasks.
///
/// The bucket lock is held for the whole of an insert, including any pending
/// probe, so inserts on the same bucket are serialised.
pub struct SharedBucket<C> {
    inner: Arc<Mutex<KBucket<C>>>,
}

impl<C> Clone for SharedBucket<C> {
    fn clone(&self) -> Self {
        SharedBucket {
            inner: self.inner.clone(),
        }
    }
}

impl<C> From<KBucket<C>> for SharedBucket<C> {
    fn from(b: KBucket<C>) -> Self {
        SharedBucket {
            inner: Arc::new(Mutex::new(b)),
        }
    }
}

impl<C> SharedBucket<C>
where
    C: Contact + Sync + Send,
{
    pub fn new(bucket_size: usize) -> Result<Self, Error> {
        KBucket::new(bucket_size).map(SharedBucket::from)
    }

    pub async fn insert<P>(&self, contact: C, probe: &P) -> Result<Admission<C>, Error>
    where
        P: AsyncProbe<C> + ?Sized,
    {
        let mut b = self.inner.lock().await;
        b.insert_async(contact, probe).await
    }

    pub async fn snapshot(&self) -> Vec<C> {
        self.inner.lock().await.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::common::Entry;

    type TestEntry = Entry<u64, u16>;

    /// Probe that yields while pending and tracks overlapping calls
    #[derive(Default)]
    struct SlowProbe {
        active: AtomicUsize,
        max_active: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AsyncProbe<TestEntry> for SlowProbe {
        async fn probe(&self, _contact: &TestEntry) -> bool {
            let n = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(n, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(5)).await;

            self.active.fetch_sub(1, Ordering::SeqCst);
            false
        }
    }

    #[tokio::test]
    async fn test_shared_bucket_serialises_inserts() {
        let b = SharedBucket::<TestEntry>::new(2).unwrap();
        let probe = Arc::new(SlowProbe::default());

        b.insert(Entry::new(1, 1), probe.as_ref()).await.unwrap();
        b.insert(Entry::new(2, 2), probe.as_ref()).await.unwrap();

        let mut handles = vec![];
        for i in 3..7u64 {
            let b = b.clone();
            let probe = probe.clone();
            handles.push(tokio::spawn(async move {
                b.insert(Entry::new(i, i as u16), probe.as_ref()).await
            }));
        }

        for h in handles {
            let r = h.await.unwrap().unwrap();
            assert!(matches!(r, Admission::Evicted(_)));
        }

        assert_eq!(4, probe.calls.load(Ordering::SeqCst));
        assert_eq!(1, probe.max_active.load(Ordering::SeqCst));
        assert_eq!(2, b.len().await);
    }
}
