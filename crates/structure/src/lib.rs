//! Immutable structures normalized from loose key/value input.
//!
//! Loose data (decoded JSON, or any [`Traversable`] pair source) is turned
//! into read-only [`Map`] and [`FixedList`] trees by a [`StructureFactory`].
//! Both containers share nested data through `Arc`, so clones are cheap and
//! concurrent reads need no locking.

/// Structure normalization errors.
pub mod error;
/// Factories turning loose input into structures.
pub mod factory;
mod json;
/// Scalar keys and borrowed key lookups.
pub mod key;
/// Fixed-length read-only list.
pub mod list;
/// Insertion-ordered read-only map.
pub mod map;
/// The map-or-list sum type.
pub mod structure;
/// Loose and normalized values.
pub mod value;

pub use error::{StructureError, ValueTypeError};
pub use factory::{RecursiveStructureFactory, StructureFactory};
pub use key::{Key, KeyRef};
pub use list::FixedList;
pub use map::{Map, MapIter};
pub use structure::{Structure, StructureIter};
pub use value::{Opaque, Traversable, Value, ValueKind};
