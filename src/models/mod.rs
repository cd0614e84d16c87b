//! Data models for the PoetryWorld application.
//!
//! These mirror the content store's row shapes; every row is decoded into
//! one of these types at the store boundary, never passed around untyped.

mod comment;
mod interaction;
mod poem;
mod profile;
mod taxonomy;

pub use comment::*;
pub use interaction::*;
pub use poem::*;
pub use profile::*;
pub use taxonomy::*;
