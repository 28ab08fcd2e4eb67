pub use crate::bucket::{Admission, KBucket, SharedBucket};
pub use crate::common::{Contact, Entry as BucketEntry, Error as BucketError};
pub use crate::probe::{AsyncProbe, Probe, TimeoutProbe};
pub use crate::Config;
