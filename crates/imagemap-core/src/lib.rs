//! # ImageMap Core
//!
//! Error taxonomy and shared constants used by every crate of the image-map
//! editor. The designer engine raises [`AreaError`] at its deserialize and
//! import boundaries; the settings crate builds on the same conventions.

pub mod constants;
pub mod error;

pub use error::{AreaError, AreaResult};
