//! In-process cache of immutable, labelled documents
//!
//! Documents are persisted through a [`Store`](crate::store::Store) and
//! located by label equality. Each [`Entry`] is reference counted and
//! maps its body lazily on first access.
//!
//! # Ownership
//!
//! | Holder | Reference | Effect of dropping |
//! |--------|-----------|--------------------|
//! | Cache → Entry | strong | releases the cache's share |
//! | Caller → Entry | strong | releases the caller's share |
//! | Entry → Store | weak | entry can no longer map its body |

pub mod entry;
pub mod filter;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use entry::Entry;
pub use filter::filter;
pub use registry::{Cache, RescanReport};
