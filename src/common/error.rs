/**
 * rust-kad
 * KBucket error types
 *
 * https://github.com/ryankurte/rust-kad
 * Copyright 2018 Ryan Kurte
 */

/// Errors returned by bucket operations
#[derive(PartialEq, Clone, Debug, strum::Display)]
pub enum Error {
    /// A zero capacity or a nil contact was supplied
    #[strum(serialize = "invalid argument")]
    InvalidArgument,
}

impl std::error::Error for Error {}
