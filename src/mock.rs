use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::common::Contact;
use crate::probe::{AsyncProbe, Probe};

/// MockProbe replays a scripted list of (expected contact id, liveness) pairs
pub struct MockProbe<Id> {
    expectations: Arc<Mutex<VecDeque<(Id, bool)>>>,
    calls: Arc<Mutex<usize>>,
}

impl<Id> From<Vec<(Id, bool)>> for MockProbe<Id> {
    fn from(v: Vec<(Id, bool)>) -> MockProbe<Id> {
        MockProbe {
            expectations: Arc::new(Mutex::new(v.into())),
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl<Id> Clone for MockProbe<Id> {
    fn clone(&self) -> Self {
        MockProbe {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<Id> MockProbe<Id>
where
    Id: PartialEq + Debug,
{
    /// Number of probes issued so far
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    /// Assert all expectations have been consumed
    pub fn done(&self) {
        assert_eq!(0, self.expectations.lock().unwrap().len(), "unused probe expectations");
    }

    fn next(&self, id: &Id) -> bool {
        *self.calls.lock().unwrap() += 1;

        let (expected, alive) = self
            .expectations
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected probe");

        assert_eq!(&expected, id, "probe target mismatch");

        alive
    }
}

impl<C, Id> Probe<C> for MockProbe<Id>
where
    C: Contact<Id = Id>,
    Id: PartialEq + Debug,
{
    fn probe(&mut self, contact: &C) -> bool {
        self.next(contact.id())
    }
}

#[async_trait]
impl<C, Id> AsyncProbe<C> for MockProbe<Id>
where
    C: Contact<Id = Id> + Sync + Send,
    Id: PartialEq + Debug + Send,
{
    async fn probe(&self, contact: &C) -> bool {
        self.next(contact.id())
    }
}
