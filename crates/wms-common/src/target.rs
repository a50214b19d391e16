//! Render target dimensions and their upper bounds.

use crate::error::{WmsError, WmsResult};

/// Pixel dimensions requested for a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
}

impl RenderTarget {
    /// Number of pixels in the target.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Upper bound on render target size, so a request cannot force an
/// arbitrarily large image allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
        }
    }
}

fn default_max_dimension() -> u32 {
    4096
}

impl RenderLimits {
    /// Validate requested dimensions and build a target from them.
    pub fn target(&self, width: u32, height: u32) -> WmsResult<RenderTarget> {
        if width == 0 || height == 0 || width > self.max_width || height > self.max_height {
            return Err(WmsError::TargetOutOfRange {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }

        Ok(RenderTarget { width, height })
    }
}
