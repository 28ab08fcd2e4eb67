/**
 * rust-kad
 * Bucket contact types
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */

use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::time::Instant;

/// Contact trait must be implemented for anything stored in a [`KBucket`](crate::KBucket)
pub trait Contact: Clone + Debug {
    /// Identity type, two contacts with equal ids are the same peer
    type Id: PartialEq + Debug;

    /// Fetch the identity of the contact
    fn id(&self) -> &Self::Id;

    /// Check whether the contact carries an unset identity.
    /// Nil contacts are rejected on insertion, by default no contact is nil.
    fn is_nil(&self) -> bool {
        false
    }

    /// Called by the bucket whenever the contact is appended or promoted
    fn set_seen(&mut self, _seen: Instant) {}
}

/// Entry is the default [`Contact`] implementation, pairing an id with
/// arbitrary peer information (ie. an address).
///
/// The default id (ie. all zeros) is reserved as the nil id, entries using it
/// cannot be inserted into a bucket.
#[derive(Clone, Debug, Eq)]
pub struct Entry<Id, Info> {
    id: Id,
    info: Info,
    seen: Option<Instant>,
}

impl<Id, Info> PartialEq for Entry<Id, Info>
where
    Id: PartialEq,
    Info: PartialEq,
{
    fn eq(&self, other: &Entry<Id, Info>) -> bool {
        self.id == other.id && self.info == other.info
    }
}

// Last seen time is excluded to match equality
impl<Id, Info> Hash for Entry<Id, Info>
where
    Id: Hash,
    Info: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.info.hash(state);
    }
}

impl<Id, Info> Entry<Id, Info>
where
    Id: Clone + Debug + 'static,
    Info: Clone + Debug + 'static,
{
    pub fn new(id: Id, info: Info) -> Entry<Id, Info> {
        Entry {
            id,
            info,
            seen: None,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn set_info(&mut self, info: &Info) {
        self.info = info.clone();
    }

    pub fn seen(&self) -> Option<Instant> {
        self.seen
    }
}

impl<Id, Info> Contact for Entry<Id, Info>
where
    Id: Default + PartialEq + Clone + Debug + 'static,
    Info: Clone + Debug + 'static,
{
    type Id = Id;

    fn id(&self) -> &Id {
        &self.id
    }

    /// Entries built from a default (zeroed) id are considered nil
    fn is_nil(&self) -> bool {
        self.id == Id::default()
    }

    fn set_seen(&mut self, seen: Instant) {
        self.seen = Some(seen);
    }
}

impl<Id, Info> From<(Id, Info)> for Entry<Id, Info>
where
    Id: Clone + Debug + 'static,
    Info: Clone + Debug + 'static,
{
    fn from(d: (Id, Info)) -> Entry<Id, Info> {
        Entry::new(d.0, d.1)
    }
}

impl<Id, Info> Into<(Id, Info)> for Entry<Id, Info> {
    fn into(self) -> (Id, Info) {
        (self.id, self.info)
    }
}
