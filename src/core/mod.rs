//! Core domain models for healthfaq.
//!
//! Buffers, feature areas, payload shapes, question/answer pairs and the
//! session store. These are pure domain models with no I/O dependencies.

pub mod area;
pub mod buffer;
pub mod payload;
pub mod qa;
pub mod session;

pub use area::{FeatureArea, LATEST_OUTPUT, RESERVED_KEYS, is_reserved};
pub use buffer::{BufferMetadata, ContentBuffer};
pub use payload::Payload;
pub use qa::QaPair;
pub use session::{BufferStore, Identity, Session};
