//! Drawing surfaces for glyph renderers. Coordinates are in axis units with
//! the backbone at y = 0 and positive y pointing up.

use crate::settings::RenderSettings;
use svg::Document;
use svg::node::element::{Polygon, Polyline, Rectangle, Text};

pub type Point = (f64, f64);

/// Average advance of one character relative to the font size.
const CHAR_WIDTH_EM: f64 = 0.6;

pub trait Surface {
    fn polyline(&mut self, points: &[Point], color: &str, width: f64);
    fn polygon(&mut self, points: &[Point], fill: &str, edge_color: &str, width: f64);
    fn text(&mut self, at: Point, text: &str, color: &str, font_size: f64);
}

#[derive(Clone, Debug)]
enum Mark {
    Polyline {
        points: Vec<Point>,
        color: String,
        width: f64,
    },
    Polygon {
        points: Vec<Point>,
        fill: String,
        edge_color: String,
        width: f64,
    },
    Text {
        at: Point,
        text: String,
        color: String,
        font_size: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn around(point: Point) -> Self {
        Self {
            min_x: point.0,
            min_y: point.1,
            max_x: point.0,
            max_y: point.1,
        }
    }

    fn include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.0);
        self.min_y = self.min_y.min(point.1);
        self.max_x = self.max_x.max(point.0);
        self.max_y = self.max_y.max(point.1);
    }
}

/// Collects marks and serialises them as an SVG document sized to the drawn region.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    marks: Vec<Mark>,
    bounds: Option<Bounds>,
    padding: f64,
    pixels_per_unit: f64,
}

impl SvgSurface {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            marks: vec![],
            bounds: None,
            padding: settings.svg_padding,
            pixels_per_unit: settings.pixels_per_unit,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    fn track(&mut self, points: &[Point]) {
        for point in points {
            match self.bounds.as_mut() {
                Some(bounds) => bounds.include(*point),
                None => self.bounds = Some(Bounds::around(*point)),
            }
        }
    }

    pub fn to_document(&self) -> Document {
        let bounds = self.bounds.unwrap_or(Bounds::around((0.0, 0.0)));
        let ppu = self.pixels_per_unit;
        let pad = self.padding;
        let width = (bounds.max_x - bounds.min_x + 2.0 * pad) * ppu;
        let height = (bounds.max_y - bounds.min_y + 2.0 * pad) * ppu;
        let to_px = |(x, y): Point| -> Point {
            ((x - bounds.min_x + pad) * ppu, (bounds.max_y - y + pad) * ppu)
        };
        let points_attr = |points: &[Point]| -> String {
            points
                .iter()
                .map(|p| {
                    let (x, y) = to_px(*p);
                    format!("{x:.2},{y:.2}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut doc = Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("width", width)
            .set("height", height)
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", "#ffffff"),
            );
        for mark in &self.marks {
            doc = match mark {
                Mark::Polyline {
                    points,
                    color,
                    width,
                } => doc.add(
                    Polyline::new()
                        .set("points", points_attr(points))
                        .set("fill", "none")
                        .set("stroke", color.as_str())
                        .set("stroke-width", width * ppu / 4.0)
                        .set("stroke-linejoin", "round"),
                ),
                Mark::Polygon {
                    points,
                    fill,
                    edge_color,
                    width,
                } => doc.add(
                    Polygon::new()
                        .set("points", points_attr(points))
                        .set("fill", fill.as_str())
                        .set("stroke", edge_color.as_str())
                        .set("stroke-width", width * ppu / 4.0),
                ),
                Mark::Text {
                    at,
                    text,
                    color,
                    font_size,
                } => {
                    let (x, y) = to_px(*at);
                    doc.add(
                        Text::new(text.as_str())
                            .set("x", x)
                            .set("y", y)
                            .set("fill", color.as_str())
                            .set("font-family", "Arial, Helvetica, sans-serif")
                            .set("font-size", font_size * ppu)
                            .set("text-anchor", "middle"),
                    )
                }
            };
        }
        doc
    }

    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }
}

impl Surface for SvgSurface {
    fn polyline(&mut self, points: &[Point], color: &str, width: f64) {
        self.track(points);
        self.marks.push(Mark::Polyline {
            points: points.to_vec(),
            color: color.to_string(),
            width,
        });
    }

    fn polygon(&mut self, points: &[Point], fill: &str, edge_color: &str, width: f64) {
        self.track(points);
        self.marks.push(Mark::Polygon {
            points: points.to_vec(),
            fill: fill.to_string(),
            edge_color: edge_color.to_string(),
            width,
        });
    }

    fn text(&mut self, at: Point, text: &str, color: &str, font_size: f64) {
        // Labels are centred on `at` with the baseline at `at.1`.
        let half_width = text.chars().count() as f64 * font_size * CHAR_WIDTH_EM / 2.0;
        self.track(&[
            (at.0 - half_width, at.1),
            (at.0 + half_width, at.1 + font_size),
        ]);
        self.marks.push(Mark::Text {
            at,
            text: text.to_string(),
            color: color.to_string(),
            font_size,
        });
    }
}
