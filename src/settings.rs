//! Rendering configuration shared by the linear renderer, the glyphs and the SVG surface.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Multiplier applied to every glyph's x extent.
    pub scale: f64,
    pub linewidth: f64,
    pub backbone_pad_left: f64,
    pub backbone_pad_right: f64,
    pub backbone_color: String,
    /// Margin around the drawn region in the exported SVG, in axis units.
    pub svg_padding: f64,
    pub pixels_per_unit: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            linewidth: 1.0,
            backbone_pad_left: 0.0,
            backbone_pad_right: 0.0,
            backbone_color: "#000000".to_string(),
            svg_padding: 4.0,
            pixels_per_unit: 8.0,
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(text).map_err(|e| anyhow!("Could not parse render settings: {e}"))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_path(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Could not read render settings '{path}': {e}"))?;
        Self::from_json_str(&text).map_err(|e| anyhow!("{e} (in '{path}')"))
    }

    fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(anyhow!("scale must be a positive number, got {}", self.scale));
        }
        if !(self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0) {
            return Err(anyhow!(
                "pixels_per_unit must be a positive number, got {}",
                self.pixels_per_unit
            ));
        }
        if self.linewidth < 0.0 || self.svg_padding < 0.0 {
            return Err(anyhow!("linewidth and svg_padding must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            RenderSettings::from_json_str(r#"{"scale": 2.0, "backbone_pad_left": 3}"#)
                .expect("parse settings");
        assert_eq!(settings.scale, 2.0);
        assert_eq!(settings.backbone_pad_left, 3.0);
        assert_eq!(settings.linewidth, 1.0);
        assert_eq!(settings.backbone_color, "#000000");
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(RenderSettings::from_json_str(r#"{"zoom": 2.0}"#).is_err());
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let err = RenderSettings::from_json_str(r#"{"scale": 0}"#).expect_err("zero scale");
        assert!(err.to_string().contains("scale"), "got: {err}");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"linewidth": 2.5}"#).expect("write settings");
        let settings =
            RenderSettings::load_from_path(&path.to_string_lossy()).expect("load settings");
        assert_eq!(settings.linewidth, 2.5);
    }
}
