use crate::{
    error::RenderError,
    glyphs::{GlyphContext, PartRenderers},
    part::PartDescriptor,
    settings::RenderSettings,
    surface::Surface,
};

/// Draws an ordered list of parts and reports the horizontal extent drawn.
pub trait DnaRenderer {
    fn render_dna(
        &self,
        surface: &mut dyn Surface,
        parts: &[PartDescriptor],
        part_renderers: &PartRenderers,
        plot_backbone: bool,
    ) -> Result<(f64, f64), RenderError>;
}

/// Lays parts out left to right, each glyph starting where the previous one ended.
#[derive(Clone, Debug, Default)]
pub struct LinearRenderer {
    settings: RenderSettings,
}

impl LinearRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}

impl DnaRenderer for LinearRenderer {
    fn render_dna(
        &self,
        surface: &mut dyn Surface,
        parts: &[PartDescriptor],
        part_renderers: &PartRenderers,
        plot_backbone: bool,
    ) -> Result<(f64, f64), RenderError> {
        let ctx = GlyphContext::from(&self.settings);
        let mut first_start: Option<f64> = None;
        let mut prev_end = 0.0;
        for part in parts {
            let renderer =
                part_renderers
                    .get(&part.part_type)
                    .ok_or_else(|| RenderError::UnknownPartType {
                        part_type: part.part_type.clone(),
                        part_name: part.name.clone(),
                    })?;
            let (start, end) = renderer(surface, part, prev_end, &ctx)?;
            first_start.get_or_insert(start);
            prev_end = end;
        }
        let first_start = first_start.unwrap_or(0.0);
        if plot_backbone {
            surface.polyline(
                &[
                    (first_start - self.settings.backbone_pad_left, 0.0),
                    (prev_end + self.settings.backbone_pad_right, 0.0),
                ],
                &self.settings.backbone_color,
                self.settings.linewidth,
            );
        }
        Ok((first_start, prev_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{glyphs::standard_part_renderers, surface::Point};

    #[derive(Default)]
    struct RecordingSurface {
        polylines: Vec<Vec<Point>>,
        polygons: usize,
    }

    impl Surface for RecordingSurface {
        fn polyline(&mut self, points: &[Point], _color: &str, _width: f64) {
            self.polylines.push(points.to_vec());
        }

        fn polygon(&mut self, _points: &[Point], _fill: &str, _edge_color: &str, _width: f64) {
            self.polygons += 1;
        }

        fn text(&mut self, _at: Point, _text: &str, _color: &str, _font_size: f64) {}
    }

    fn design() -> Vec<PartDescriptor> {
        vec![
            PartDescriptor::new("Promoter", "pTet"),
            PartDescriptor::new("RBS", "B0034"),
            PartDescriptor::new("CDS", "gfp"),
            PartDescriptor::new("Terminator", "B0015"),
        ]
    }

    #[test]
    fn test_parts_are_laid_out_consecutively() {
        let mut surface = RecordingSurface::default();
        let extent = LinearRenderer::default()
            .render_dna(&mut surface, &design(), &standard_part_renderers(), false)
            .expect("render design");
        // Promoter 10 + RBS 10 + CDS 30 + Terminator 6
        assert_eq!(extent, (0.0, 56.0));
        assert_eq!(surface.polygons, 3);
    }

    #[test]
    fn test_backbone_spans_extent_with_padding() {
        let settings = RenderSettings {
            backbone_pad_left: 2.0,
            backbone_pad_right: 3.0,
            ..RenderSettings::default()
        };
        let mut surface = RecordingSurface::default();
        LinearRenderer::new(settings)
            .render_dna(&mut surface, &design(), &standard_part_renderers(), true)
            .expect("render design");
        assert_eq!(
            surface.polylines.last(),
            Some(&vec![(-2.0, 0.0), (59.0, 0.0)])
        );
    }

    #[test]
    fn test_empty_design_has_zero_extent() {
        let mut surface = RecordingSurface::default();
        let extent = LinearRenderer::default()
            .render_dna(&mut surface, &[], &standard_part_renderers(), true)
            .expect("render nothing");
        assert_eq!(extent, (0.0, 0.0));
        assert_eq!(surface.polylines, vec![vec![(0.0, 0.0), (0.0, 0.0)]]);
    }

    #[test]
    fn test_missing_part_renderer_is_an_error() {
        let mut surface = RecordingSurface::default();
        let mut renderers = standard_part_renderers();
        renderers.remove("CDS");
        let err = LinearRenderer::default()
            .render_dna(&mut surface, &design(), &renderers, true)
            .expect_err("no CDS renderer");
        assert!(
            matches!(err, RenderError::UnknownPartType { ref part_type, .. } if part_type == "CDS"),
            "got: {err}"
        );
    }
}
