//! Core domain entities.
//!
//! The service has a single entity, [`Link`], which binds a short code to its
//! destination URL and click counter. [`NewLink`] carries the fields supplied
//! at creation time; everything else is assigned by the store.

pub mod link;

pub use link::{Link, NewLink};
