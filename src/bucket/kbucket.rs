/**
 * rust-kad
 * Kademlia KBucket implementation
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */
use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::common::{Contact, Error};
use crate::probe::{AsyncProbe, Probe};
use crate::Config;

/// Outcome of a [`KBucket::insert`]
#[derive(Clone, Debug, PartialEq)]
pub enum Admission<C> {
    /// Contact was already known and has been moved to the tail
    Promoted,
    /// Contact was added to a bucket with free space
    Appended,
    /// Bucket was full and the eldest contact is still alive, the new contact was discarded
    Rejected(C),
    /// Bucket was full and the eldest contact failed the probe, it has been
    /// replaced by the new contact
    Evicted(C),
}

impl<C> Admission<C> {
    /// Check whether the inserted contact is now held by the bucket
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Admission::Rejected(_))
    }
}

/// Result of the probe-free part of an insert
enum Prepared<C> {
    Done(Admission<C>),
    ProbeRequired(C),
}

/// KBucket implementation
/// This implements a single fixed-capacity bucket, ordered from the least-recently-seen
/// contact (head) to the most-recently-seen contact (tail).
pub struct KBucket<C> {
    bucket_size: usize,
    nodes: VecDeque<C>,
    updated: Option<Instant>,
}

impl<C> KBucket<C>
where
    C: Contact,
{
    /// Create a new KBucket with the given size
    pub fn new(bucket_size: usize) -> Result<KBucket<C>, Error> {
        if bucket_size == 0 {
            warn!(target: "kbucket", "[KBucket] refusing to create a zero sized bucket");
            return Err(Error::InvalidArgument);
        }

        Ok(KBucket {
            bucket_size,
            nodes: VecDeque::with_capacity(bucket_size),
            updated: None,
        })
    }

    /// Create a new KBucket using the configured bucket size
    pub fn from_config(config: &Config) -> Result<KBucket<C>, Error> {
        Self::new(config.bucket_size)
    }

    /// Insert a contact, probing the eldest contact for liveness if the bucket is full.
    ///
    /// The probe is called at most once, and only when the bucket is full and the
    /// contact is not already present.
    pub fn insert<P>(&mut self, contact: C, probe: &mut P) -> Result<Admission<C>, Error>
    where
        P: Probe<C> + ?Sized,
    {
        let contact = match self.prepare(contact)? {
            Prepared::Done(a) => return Ok(a),
            Prepared::ProbeRequired(c) => c,
        };

        let alive = match self.nodes.front() {
            Some(eldest) => probe.probe(eldest),
            None => false,
        };

        Ok(self.resolve(contact, alive))
    }

    /// Insert a contact using an asynchronous probe.
    ///
    /// Bucket state is not modified while the probe is pending, so dropping the
    /// returned future before completion leaves the bucket as it was.
    pub async fn insert_async<P>(&mut self, contact: C, probe: &P) -> Result<Admission<C>, Error>
    where
        C: Sync + Send,
        P: AsyncProbe<C> + ?Sized,
    {
        let contact = match self.prepare(contact)? {
            Prepared::Done(a) => return Ok(a),
            Prepared::ProbeRequired(c) => c,
        };

        let alive = match self.nodes.front() {
            Some(eldest) => probe.probe(eldest).await,
            None => false,
        };

        Ok(self.resolve(contact, alive))
    }

    /// Handle the cases that do not require a probe
    fn prepare(&mut self, contact: C) -> Result<Prepared<C>, Error> {
        if contact.is_nil() {
            warn!(target: "kbucket", "[KBucket] attempted to insert nil contact {:?}", contact);
            return Err(Error::InvalidArgument);
        }

        if let Some(i) = self.position(contact.id()) {
            trace!(target: "kbucket", "[KBucket] Promoting node {:?}", contact);
            self.nodes.remove(i);
            self.push(contact);
            return Ok(Prepared::Done(Admission::Promoted));
        }

        if self.nodes.len() < self.bucket_size {
            trace!(target: "kbucket", "[KBucket] Adding node {:?}", contact);
            self.push(contact);
            return Ok(Prepared::Done(Admission::Appended));
        }

        trace!(target: "kbucket", "[KBucket] Bucket full, probing eldest for node {:?}", contact);
        Ok(Prepared::ProbeRequired(contact))
    }

    /// Apply the probe result for the eldest contact
    fn resolve(&mut self, contact: C, alive: bool) -> Admission<C> {
        match self.nodes.pop_front() {
            Some(eldest) if alive => {
                debug!(target: "kbucket", "[KBucket] Eldest node {:?} alive, discarding {:?}", eldest, contact);
                self.push(eldest);
                Admission::Rejected(contact)
            }
            Some(eldest) => {
                debug!(target: "kbucket", "[KBucket] Evicting node {:?} for {:?}", eldest, contact);
                self.push(contact);
                Admission::Evicted(eldest)
            }
            None => {
                self.push(contact);
                Admission::Appended
            }
        }
    }

    /// Append a contact to the tail, marking it as seen
    fn push(&mut self, mut contact: C) {
        let now = Instant::now();
        contact.set_seen(now);
        self.nodes.push_back(contact);
        self.updated = Some(now);
    }

    fn position(&self, id: &C::Id) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }

    /// Clone the list of nodes currently in the bucket, least-recently-seen first
    pub fn snapshot(&self) -> Vec<C> {
        self.nodes.iter().cloned().collect()
    }

    /// Find a node in the bucket
    pub fn find(&self, id: &C::Id) -> Option<C> {
        self.nodes.iter().find(|n| n.id() == id).cloned()
    }

    /// Check whether a node with the given id is in the bucket
    pub fn contains(&self, id: &C::Id) -> bool {
        self.position(id).is_some()
    }

    /// Fetch the oldest node in the bucket, this is the next eviction candidate
    pub fn oldest(&self) -> Option<C> {
        self.nodes.front().cloned()
    }

    /// Fetch the most recently seen node in the bucket
    pub fn newest(&self) -> Option<C> {
        self.nodes.back().cloned()
    }

    /// Fetch last updated time
    pub fn updated(&self) -> Option<Instant> {
        self.updated
    }

    /// Fetch the maximum number of nodes in the bucket
    pub fn capacity(&self) -> usize {
        self.bucket_size
    }

    /// Fetch number of nodes in bucket
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the bucket holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether the bucket is at capacity
    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.bucket_size
    }
}
