pub mod entry;
pub use self::entry::{Contact, Entry};

pub mod error;
pub use self::error::Error;
