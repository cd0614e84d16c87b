//! Screen controllers.
//!
//! One controller per screen; each owns its in-memory state and is the only
//! mutator of that state. Backend effects run through the store handle the
//! controller was constructed with.
//!
//! Mutations are optimistic: the local state change lands immediately and a
//! failed remote write is logged, not rolled back. The next successful fetch
//! reconciles any divergence.

mod detail;
mod explore;
mod feed;
mod saved;

pub use detail::*;
pub use explore::*;
pub use feed::*;
pub use saved::*;
