//! Map configuration loaded from YAML.
//!
//! Example:
//!
//! ```yaml
//! srs: "EPSG:4326"
//! background: [235, 242, 250, 255]
//! graticule:
//!   step: 10.0
//!   color: [160, 170, 185, 255]
//! border: [40, 40, 40, 255]
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::RenderError;

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
}

/// Grid lines drawn every `step` map units on both axes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraticuleConfig {
    pub step: f64,
    #[serde(default = "default_graticule_color")]
    pub color: Rgba,
}

/// Immutable map description shared by every render.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapConfig {
    /// Coordinate system label of the map's native units.
    #[serde(default = "default_srs")]
    pub srs: String,

    #[serde(default = "default_background")]
    pub background: Rgba,

    #[serde(default)]
    pub graticule: Option<GraticuleConfig>,

    /// Colour of a one-pixel frame around the image.
    #[serde(default)]
    pub border: Option<Rgba>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            srs: default_srs(),
            background: default_background(),
            graticule: Some(GraticuleConfig {
                step: 10.0,
                color: default_graticule_color(),
            }),
            border: None,
        }
    }
}

fn default_srs() -> String {
    "EPSG:4326".to_string()
}

fn default_background() -> Rgba {
    Rgba::new(235, 242, 250, 255)
}

fn default_graticule_color() -> Rgba {
    Rgba::new(160, 170, 185, 255)
}

impl MapConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RenderError> {
        let config: MapConfig =
            serde_yaml::from_str(yaml).map_err(|e| RenderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a map configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), srs = %config.srs, "Loaded map configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), RenderError> {
        if let Some(graticule) = &self.graticule {
            if !graticule.step.is_finite() || graticule.step <= 0.0 {
                return Err(RenderError::Config(format!(
                    "graticule step must be a positive number, got {}",
                    graticule.step
                )));
            }
        }
        Ok(())
    }
}
