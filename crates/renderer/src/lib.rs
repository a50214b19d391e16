//! Map rendering for tile requests.
//!
//! The request pipeline only knows the [`Renderer`] trait: given a pixel
//! size, a bounding box and an output format it returns encoded bytes.
//! [`MapRenderer`] is the concrete implementation, driven by a [`MapConfig`].

pub mod config;
pub mod map;
pub mod png;

use thiserror::Error;
use wms_common::{BoundingBox, RenderTarget};

pub use config::{GraticuleConfig, MapConfig, Rgba};
pub use map::MapRenderer;

/// Errors raised while producing an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid render target {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Invalid map configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An encoded image ready to be sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Encoded bytes.
    pub data: Vec<u8>,
    /// File extension of the encoding, e.g. `png`.
    pub extension: &'static str,
}

/// Produces encoded images for a target size and geographic extent.
///
/// Implementations are shared across request workers, so rendering takes
/// `&self` and must be safe for concurrent use.
pub trait Renderer: Send + Sync {
    /// File extensions this renderer can encode to.
    fn formats(&self) -> &[&'static str];

    /// Render `bbox` into an image of `target` pixels encoded as `extension`.
    ///
    /// May block for as long as the render takes.
    fn render(
        &self,
        target: RenderTarget,
        bbox: &BoundingBox,
        extension: &str,
    ) -> Result<RenderedImage, RenderError>;

    /// Whether `extension` is one of [`Renderer::formats`].
    fn supports(&self, extension: &str) -> bool {
        self.formats()
            .iter()
            .any(|f| f.eq_ignore_ascii_case(extension))
    }
}
