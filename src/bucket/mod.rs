/**
 * rust-kad
 * KBucket and shared bucket handle
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */

pub mod kbucket;
pub use self::kbucket::{Admission, KBucket};

pub mod shared;
pub use self::shared::SharedBucket;
