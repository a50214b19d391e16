//! Rasterizes a [`MapConfig`] for a requested extent.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;
use wms_common::{BoundingBox, RenderTarget};

use crate::config::{MapConfig, Rgba};
use crate::{png, RenderError, RenderedImage, Renderer};

const FORMATS: &[&str] = &["png"];

/// Renderer backed by an immutable, shared map configuration.
///
/// All per-request view state (size, extent) is passed into
/// [`Renderer::render`], so one instance serves every worker.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    config: Arc<MapConfig>,
}

impl MapRenderer {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Produce raw RGBA pixels for the extent.
    pub fn rasterize(&self, target: RenderTarget, bbox: &BoundingBox) -> Vec<u8> {
        let width = target.width as usize;
        let height = target.height as usize;
        let mut pixels = vec![0u8; target.pixel_count() * 4];
        if pixels.is_empty() {
            return pixels;
        }

        let res_x = bbox.width() / width as f64;
        let res_y = bbox.height() / height as f64;
        let degenerate = !(res_x > 0.0 && res_y > 0.0);

        let config = &*self.config;
        pixels
            .par_chunks_mut(width * 4)
            .enumerate()
            .for_each(|(row, line)| {
                // Rows run top to bottom, map y runs bottom to top
                let y = bbox.max_y - (row as f64 + 0.5) * res_y;
                let on_row_line = !degenerate && crosses_grid(config, y, res_y);

                for (col, px) in line.chunks_exact_mut(4).enumerate() {
                    let x = bbox.min_x + (col as f64 + 0.5) * res_x;
                    let color = if is_frame(config, col, row, width, height) {
                        config.border.unwrap_or(config.background)
                    } else if !degenerate && (on_row_line || crosses_grid(config, x, res_x)) {
                        config
                            .graticule
                            .as_ref()
                            .map(|g| g.color)
                            .unwrap_or(config.background)
                    } else {
                        config.background
                    };
                    px.copy_from_slice(&color.0);
                }
            });

        pixels
    }
}

impl Renderer for MapRenderer {
    fn formats(&self) -> &[&'static str] {
        FORMATS
    }

    fn render(
        &self,
        target: RenderTarget,
        bbox: &BoundingBox,
        extension: &str,
    ) -> Result<RenderedImage, RenderError> {
        if !self.supports(extension) {
            return Err(RenderError::UnsupportedFormat(extension.to_string()));
        }
        if target.width == 0 || target.height == 0 {
            return Err(RenderError::InvalidTarget {
                width: target.width,
                height: target.height,
            });
        }

        let pixels = self.rasterize(target, bbox);
        let data = png::encode(&pixels, target.width as usize, target.height as usize)?;

        debug!(
            width = target.width,
            height = target.height,
            bytes = data.len(),
            "Encoded map image"
        );

        Ok(RenderedImage {
            data,
            extension: "png",
        })
    }
}

/// Whether a grid line lies within the pixel centred on `coord`.
fn crosses_grid(config: &MapConfig, coord: f64, res: f64) -> bool {
    match &config.graticule {
        Some(g) => {
            let half = res / 2.0;
            ((coord - half) / g.step).floor() != ((coord + half) / g.step).floor()
        }
        None => false,
    }
}

fn is_frame(config: &MapConfig, col: usize, row: usize, width: usize, height: usize) -> bool {
    config.border.is_some() && (col == 0 || row == 0 || col + 1 == width || row + 1 == height)
}
