//! Diagram settings.

use serde::{Deserialize, Serialize};

use crate::domain::InvalidSettings;

/// A point on the diagram canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// A color: a name, `[r, g, b]`, or `[r, g, b, alpha]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    pub fn named(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

/// A diagram layer, drawn in the configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    BusLines,
    BusLabels,
    StopPoints,
    StopLabels,
}

/// Configuration for diagram rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas width.
    pub width: f64,

    /// Canvas height.
    pub height: f64,

    /// Distance kept between the outermost stops and the canvas edge.
    pub padding: f64,

    /// Margin of the itinerary backdrop beyond the canvas.
    pub outer_margin: f64,

    pub stop_radius: f64,
    pub line_width: f64,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Point,
    pub underlayer_color: Color,
    pub underlayer_width: f64,

    /// Bus line colors, assigned in bus name order and reused cyclically.
    pub color_palette: Vec<Color>,

    pub bus_label_font_size: u32,
    pub bus_label_offset: Point,
    pub layers: Vec<Layer>,
}

impl RenderSettings {
    /// Reject settings that cannot produce a diagram.
    pub fn validate(&self) -> Result<(), InvalidSettings> {
        if !(self.width.is_finite() && self.width >= 0.0) {
            return Err(InvalidSettings::new("width", "must be non-negative"));
        }
        if !(self.height.is_finite() && self.height >= 0.0) {
            return Err(InvalidSettings::new("height", "must be non-negative"));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(InvalidSettings::new("padding", "must be non-negative"));
        }
        if 2.0 * self.padding > self.width.min(self.height) {
            return Err(InvalidSettings::new("padding", "must fit twice on the canvas"));
        }
        if self.color_palette.is_empty() {
            return Err(InvalidSettings::new("color_palette", "must not be empty"));
        }
        Ok(())
    }

    /// Palette color for the bus at `order` in name order.
    pub fn bus_color(&self, order: usize) -> &Color {
        &self.color_palette[order % self.color_palette.len()]
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            outer_margin: 150.0,
            stop_radius: 5.0,
            line_width: 14.0,
            stop_label_font_size: 20,
            stop_label_offset: Point::new(7.0, -3.0),
            underlayer_color: Color::Rgba(255, 255, 255, 0.85),
            underlayer_width: 3.0,
            color_palette: vec![
                Color::named("green"),
                Color::Rgb(255, 160, 0),
                Color::named("red"),
            ],
            bus_label_font_size: 20,
            bus_label_offset: Point::new(7.0, 15.0),
            layers: vec![
                Layer::BusLines,
                Layer::BusLabels,
                Layer::StopPoints,
                Layer::StopLabels,
            ],
        }
    }
}
