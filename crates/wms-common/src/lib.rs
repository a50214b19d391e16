//! Common types shared by the tile server crates.

pub mod bbox;
pub mod error;
pub mod mime;
pub mod target;

pub use bbox::{BboxParseError, BoundingBox};
pub use error::{WmsError, WmsResult};
pub use target::{RenderLimits, RenderTarget};
