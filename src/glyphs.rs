//! SBOL Visual glyph renderers for the built-in part types.
//!
//! Every renderer draws one part starting at `prev_end` and returns the
//! `(start, end)` x range it occupies. Sizes are in axis units and can be
//! overridden per part through the options `x_extent`, `y_extent`,
//! `linewidth`, `color`, `edge_color` and `label`.

use crate::{
    error::RenderError,
    part::PartDescriptor,
    settings::RenderSettings,
    surface::{Point, Surface},
};
use std::collections::HashMap;
use std::f64::consts::PI;

const LABEL_FONT_SIZE: f64 = 2.5;
const LABEL_GAP: f64 = 2.0;
const ARC_SEGMENTS: usize = 24;

/// Per-call settings a glyph needs besides its own options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphContext {
    pub scale: f64,
    pub linewidth: f64,
}

impl From<&RenderSettings> for GlyphContext {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            scale: settings.scale,
            linewidth: settings.linewidth,
        }
    }
}

impl Default for GlyphContext {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

pub type PartRenderFn =
    fn(&mut dyn Surface, &PartDescriptor, f64, &GlyphContext) -> Result<(f64, f64), RenderError>;

/// Drawing functions keyed by part type name.
pub type PartRenderers = HashMap<String, PartRenderFn>;

struct GlyphStyle {
    start: f64,
    end: f64,
    y_extent: f64,
    linewidth: f64,
    color: String,
    edge_color: String,
}

fn non_negative_opt(part: &PartDescriptor, key: &str, default: f64) -> Result<f64, RenderError> {
    let value = part.opt_f64_or(key, default)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RenderError::InvalidOption {
            key: key.to_string(),
            part_name: part.name.clone(),
            reason: format!("must be a non-negative number, got {value}"),
        })
    }
}

impl GlyphStyle {
    fn resolve(
        part: &PartDescriptor,
        prev_end: f64,
        ctx: &GlyphContext,
        x_extent: f64,
        y_extent: f64,
        color: &str,
    ) -> Result<Self, RenderError> {
        let x_extent = non_negative_opt(part, "x_extent", x_extent)?;
        let start = prev_end;
        Ok(Self {
            start,
            end: start + x_extent * ctx.scale,
            y_extent: non_negative_opt(part, "y_extent", y_extent)?,
            linewidth: non_negative_opt(part, "linewidth", ctx.linewidth)?,
            color: part.opt_str("color")?.unwrap_or(color).to_string(),
            edge_color: part.opt_str("edge_color")?.unwrap_or("#000000").to_string(),
        })
    }

    fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    fn width(&self) -> f64 {
        self.end - self.start
    }

    fn label(
        &self,
        surface: &mut dyn Surface,
        part: &PartDescriptor,
        top: f64,
    ) -> Result<(), RenderError> {
        if let Some(label) = part.opt_str("label")? {
            if !label.is_empty() {
                surface.text((self.mid(), top + LABEL_GAP), label, "#000000", LABEL_FONT_SIZE);
            }
        }
        Ok(())
    }

    fn extent(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

fn arc(cx: f64, cy: f64, r: f64, from: f64, to: f64) -> Vec<Point> {
    (0..=ARC_SEGMENTS)
        .map(|i| {
            let angle = from + (to - from) * i as f64 / ARC_SEGMENTS as f64;
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

pub fn render_promoter(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 10.0, 10.0, "#000000")?;
    let head_length = part.opt_f64_or("arrowhead_length", 4.0)?.min(style.width());
    let head_height = part.opt_f64_or("arrowhead_height", 2.0)?;
    let y = style.y_extent;
    surface.polyline(
        &[(style.start, 0.0), (style.start, y), (style.end - head_length, y)],
        &style.color,
        style.linewidth,
    );
    surface.polygon(
        &[
            (style.end - head_length, y + head_height),
            (style.end, y),
            (style.end - head_length, y - head_height),
        ],
        &style.color,
        &style.color,
        style.linewidth,
    );
    style.label(surface, part, y + head_height)?;
    Ok(style.extent())
}

pub fn render_cds(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 30.0, 5.0, "#7f7f7f")?;
    let head_length = part.opt_f64_or("arrowhead_length", 8.0)?.min(style.width());
    let head_height = part.opt_f64_or("arrowhead_height", 4.0)?;
    let y = style.y_extent;
    let neck = style.end - head_length;
    surface.polygon(
        &[
            (style.start, -y),
            (neck, -y),
            (neck, -y - head_height),
            (style.end, 0.0),
            (neck, y + head_height),
            (neck, y),
            (style.start, y),
        ],
        &style.color,
        &style.edge_color,
        style.linewidth,
    );
    style.label(surface, part, y + head_height)?;
    Ok(style.extent())
}

pub fn render_terminator(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 6.0, 10.0, "#000000")?;
    let y = style.y_extent;
    surface.polyline(
        &[(style.mid(), 0.0), (style.mid(), y)],
        &style.color,
        style.linewidth,
    );
    surface.polyline(
        &[(style.start, y), (style.end, y)],
        &style.color,
        style.linewidth,
    );
    style.label(surface, part, y)?;
    Ok(style.extent())
}

pub fn render_rbs(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 10.0, 3.5, "#7f7f7f")?;
    let radius = style.width() / 2.0;
    let mut points = arc(style.mid(), 0.0, radius, 0.0, PI);
    for point in points.iter_mut() {
        // Squash the half circle to the requested height.
        if radius > 0.0 {
            point.1 *= style.y_extent / radius;
        }
    }
    surface.polygon(&points, &style.color, &style.edge_color, style.linewidth);
    style.label(surface, part, style.y_extent)?;
    Ok(style.extent())
}

pub fn render_operator(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 6.0, 3.0, "#ffffff")?;
    let y = style.y_extent;
    surface.polygon(
        &[(style.start, -y), (style.end, -y), (style.end, y), (style.start, y)],
        &style.color,
        &style.edge_color,
        style.linewidth,
    );
    style.label(surface, part, y)?;
    Ok(style.extent())
}

pub fn render_origin(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 8.0, 4.0, "#ffffff")?;
    let radius = style.width().min(2.0 * style.y_extent) / 2.0;
    let points = arc(style.mid(), 0.0, radius, 0.0, 2.0 * PI);
    surface.polygon(&points, &style.color, &style.edge_color, style.linewidth);
    style.label(surface, part, radius)?;
    Ok(style.extent())
}

pub fn render_scar(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 6.0, 1.5, "#ffffff")?;
    let y = style.y_extent;
    surface.polygon(
        &[(style.start, -y), (style.end, -y), (style.end, y), (style.start, y)],
        &style.color,
        &style.color,
        style.linewidth,
    );
    for level in [-y, y] {
        surface.polyline(
            &[(style.start, level), (style.end, level)],
            &style.edge_color,
            style.linewidth,
        );
    }
    style.label(surface, part, y)?;
    Ok(style.extent())
}

/// Restriction and recombination sites: a short vertical mark, with a
/// notch indicating the overhang side for sticky cutters.
pub fn render_site(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 2.0, 4.0, "#000000")?;
    let y = style.y_extent;
    let mid = style.mid();
    let half = style.width() / 2.0;
    let points: Vec<Point> = match part.part_type.as_str() {
        "5StickyRestrictionSite" | "5Overhang" => {
            vec![(mid - half, y), (mid - half, 0.0), (mid + half, 0.0), (mid + half, -y)]
        }
        "3StickyRestrictionSite" | "3Overhang" => {
            vec![(mid + half, y), (mid + half, 0.0), (mid - half, 0.0), (mid - half, -y)]
        }
        _ => vec![(mid, y), (mid, -y)],
    };
    surface.polyline(&points, &style.color, style.linewidth);
    style.label(surface, part, y)?;
    Ok(style.extent())
}

pub fn render_recombinase_site(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 6.0, 3.0, "#ffffff")?;
    let y = style.y_extent;
    surface.polygon(
        &[(style.start, y), (style.end, 0.0), (style.start, -y)],
        &style.color,
        &style.edge_color,
        style.linewidth,
    );
    style.label(surface, part, y)?;
    Ok(style.extent())
}

pub fn render_primer_binding_site(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 10.0, 2.0, "#000000")?;
    let y = style.y_extent;
    let head = (style.width() / 4.0).min(2.0);
    surface.polyline(
        &[(style.start, y), (style.end, y), (style.end - head, y + head)],
        &style.color,
        style.linewidth,
    );
    style.label(surface, part, y + head)?;
    Ok(style.extent())
}

/// Fallback glyph: a labelled box, used for part types without a dedicated shape.
pub fn render_user_defined(
    surface: &mut dyn Surface,
    part: &PartDescriptor,
    prev_end: f64,
    ctx: &GlyphContext,
) -> Result<(f64, f64), RenderError> {
    let style = GlyphStyle::resolve(part, prev_end, ctx, 12.0, 4.0, "#dddddd")?;
    let y = style.y_extent;
    surface.polygon(
        &[(style.start, -y), (style.end, -y), (style.end, y), (style.start, y)],
        &style.color,
        &style.edge_color,
        style.linewidth,
    );
    if part.opt_str("label")?.is_none() {
        surface.text((style.mid(), 0.0), &part.part_type, "#000000", LABEL_FONT_SIZE * 0.6);
    }
    style.label(surface, part, y)?;
    Ok(style.extent())
}

/// Directory covering every part type of the built-in SO term table.
pub fn standard_part_renderers() -> PartRenderers {
    let mut renderers = PartRenderers::new();
    for part_type in crate::SO_TERMS.part_types() {
        let renderer: PartRenderFn = match part_type {
            "Promoter" => render_promoter,
            "CDS" => render_cds,
            "Terminator" => render_terminator,
            "RBS" => render_rbs,
            "Operator" => render_operator,
            "Origin" => render_origin,
            "Scar" => render_scar,
            "RecombinaseSite" => render_recombinase_site,
            "PrimerBindingSite" => render_primer_binding_site,
            "RestrictionSite"
            | "BluntRestrictionSite"
            | "5StickyRestrictionSite"
            | "3StickyRestrictionSite"
            | "5Overhang"
            | "3Overhang" => render_site,
            _ => render_user_defined,
        };
        renderers.insert(part_type.to_string(), renderer);
    }
    renderers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SvgSurface;
    use serde_json::json;

    fn part_with_opts(part_type: &str, opts: serde_json::Value) -> PartDescriptor {
        let mut part = PartDescriptor::new(part_type, "p");
        part.opts = opts.as_object().cloned();
        part
    }

    #[test]
    fn test_standard_renderers_cover_all_part_types() {
        let renderers = standard_part_renderers();
        for part_type in crate::SO_TERMS.part_types() {
            assert!(renderers.contains_key(part_type), "missing {part_type}");
        }
    }

    #[test]
    fn test_every_standard_glyph_advances_from_prev_end() {
        let ctx = GlyphContext::default();
        for (part_type, renderer) in standard_part_renderers() {
            let mut surface = SvgSurface::new(&RenderSettings::default());
            let part = PartDescriptor::new(&part_type, "p");
            let (start, end) = renderer(&mut surface, &part, 5.0, &ctx).expect("draw glyph");
            assert_eq!(start, 5.0, "{part_type}");
            assert!(end > start, "{part_type}: {start}..{end}");
            assert!(!surface.is_empty(), "{part_type} drew nothing");
        }
    }

    #[test]
    fn test_x_extent_option_and_scale() {
        let ctx = GlyphContext {
            scale: 2.0,
            linewidth: 1.0,
        };
        let mut surface = SvgSurface::new(&RenderSettings::default());
        let part = part_with_opts("CDS", json!({"x_extent": 20}));
        let extent = render_cds(&mut surface, &part, 10.0, &ctx).expect("draw CDS");
        assert_eq!(extent, (10.0, 50.0));
    }

    #[test]
    fn test_negative_x_extent_is_rejected() {
        let mut surface = SvgSurface::new(&RenderSettings::default());
        let part = part_with_opts("Promoter", json!({"x_extent": -3}));
        let err = render_promoter(&mut surface, &part, 0.0, &GlyphContext::default())
            .expect_err("negative extent");
        assert!(matches!(err, RenderError::InvalidOption { .. }));
    }

    #[test]
    fn test_negative_y_extent_and_linewidth_are_rejected() {
        let mut surface = SvgSurface::new(&RenderSettings::default());
        for (key, opts) in [
            ("y_extent", json!({"y_extent": -2})),
            ("linewidth", json!({"linewidth": -1.5})),
        ] {
            let part = part_with_opts("CDS", opts);
            let err = render_cds(&mut surface, &part, 0.0, &GlyphContext::default())
                .expect_err("negative option");
            assert!(
                matches!(err, RenderError::InvalidOption { key: ref k, .. } if k == key),
                "got: {err}"
            );
        }
        assert!(surface.is_empty());
    }

    #[test]
    fn test_label_option_is_drawn() {
        let mut surface = SvgSurface::new(&RenderSettings::default());
        let part = part_with_opts("Terminator", json!({"label": "B0015"}));
        render_terminator(&mut surface, &part, 0.0, &GlyphContext::default())
            .expect("draw terminator");
        assert!(surface.to_svg_string().contains("B0015"));
    }
}
