use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use crate::drivers::error::{GridPlotError, Result};
/// RGB color parsed from a matplotlib-style spec (`"b"`, `"#1f77b4"`, `"red"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl TraceColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| GridPlotError::InvalidColor(spec.into()));
        }
        let color = match spec.to_ascii_lowercase().as_str() {
            "b" | "blue" => Self::rgb(0, 0, 255),
            "g" | "green" => Self::rgb(0, 128, 0),
            "r" | "red" => Self::rgb(255, 0, 0),
            "c" | "cyan" => Self::rgb(0, 191, 191),
            "m" | "magenta" => Self::rgb(191, 0, 191),
            "y" | "yellow" => Self::rgb(191, 191, 0),
            "k" | "black" => Self::rgb(0, 0, 0),
            "w" | "white" => Self::rgb(255, 255, 255),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            _ => return Err(GridPlotError::InvalidColor(spec.into())),
        };
        Ok(color)
    }
    fn parse_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
    pub fn to_rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}
impl Default for TraceColor {
    fn default() -> Self {
        Self::rgb(0, 0, 255)
    }
}
impl TryFrom<String> for TraceColor {
    type Error = GridPlotError;
    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}
impl From<TraceColor> for String {
    fn from(value: TraceColor) -> Self {
        format!("#{:02x}{:02x}{:02x}", value.r, value.g, value.b)
    }
}
/// Which cells keep their axis ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// Only channel 0 shows ticks and the amplitude label; dense grids stay readable.
    #[default]
    FirstCellOnly,
    AllCells,
    NoCells,
}
/// Where the channel name goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    /// Centered text inside the cell.
    #[default]
    InCell,
    Title,
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub channel_count: usize,
    pub trace_color: TraceColor,
    pub trace_label: String,
    /// Present the figure once every cell is drawn.
    pub show: bool,
    /// Explicit vertical range for every cell; derived from the data when absent.
    pub y_range: Option<(f64, f64)>,
    /// Headroom factor applied to the global peak when `y_range` is absent.
    pub y_margin: f64,
    pub band_opacity: f64,
    pub tick_policy: TickPolicy,
    pub label_placement: LabelPlacement,
    pub y_axis_label: String,
    pub x_axis_label: String,
    pub label_font_size: f64,
    /// Channel name position in axes fractions (x from the left, y from the bottom).
    pub label_anchor: (f64, f64),
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            channel_count: 1,
            trace_color: TraceColor::default(),
            trace_label: "spkr".into(),
            show: true,
            y_range: None,
            y_margin: 1.5,
            band_opacity: 0.5,
            tick_policy: TickPolicy::default(),
            label_placement: LabelPlacement::default(),
            y_axis_label: "Z-score".into(),
            x_axis_label: "Time (s)".into(),
            label_font_size: 8.0,
            label_anchor: (0.5, 0.25),
        }
    }
}
impl RenderConfig {
    pub fn new(channel_count: usize) -> Self {
        Self {
            channel_count,
            ..Self::default()
        }
    }
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn with_color(mut self, color: TraceColor) -> Self {
        self.trace_color = color;
        self
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.trace_label = label.into();
        self
    }
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }
    pub fn validate(&self) -> Result<()> {
        if self.channel_count == 0 {
            return Err(GridPlotError::NoChannels);
        }
        if let Some((min, max)) = self.y_range {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(GridPlotError::InvalidYRange { min, max });
            }
        }
        if !(self.y_margin.is_finite() && self.y_margin > 0.0) {
            return Err(GridPlotError::InvalidConfig(format!(
                "y_margin must be positive, got {}",
                self.y_margin
            )));
        }
        if !(0.0..=1.0).contains(&self.band_opacity) {
            return Err(GridPlotError::InvalidConfig(format!(
                "band_opacity must lie in [0, 1], got {}",
                self.band_opacity
            )));
        }
        if !(self.label_font_size > 0.0) {
            return Err(GridPlotError::InvalidConfig(format!(
                "label_font_size must be positive, got {}",
                self.label_font_size
            )));
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn color_specs() {
        assert_eq!(TraceColor::parse("b").unwrap(), TraceColor::rgb(0, 0, 255));
        assert_eq!(TraceColor::parse("R").unwrap(), TraceColor::rgb(255, 0, 0));
        assert_eq!(
            TraceColor::parse("#1f77b4").unwrap(),
            TraceColor::rgb(0x1f, 0x77, 0xb4)
        );
        assert!(TraceColor::parse("#12345").is_err());
        assert!(TraceColor::parse("chartreuse-ish").is_err());
    }
    #[test]
    fn defaults_mirror_dense_grid_layout() {
        let config = RenderConfig::new(10);
        assert_eq!(config.channel_count, 10);
        assert_eq!(config.trace_label, "spkr");
        assert!(config.show);
        assert_eq!(config.y_range, None);
        assert_eq!(config.y_margin, 1.5);
        assert_eq!(config.band_opacity, 0.5);
        assert_eq!(config.tick_policy, TickPolicy::FirstCellOnly);
        assert_eq!(config.label_placement, LabelPlacement::InCell);
        assert!(config.validate().is_ok());
    }
    #[test]
    fn json_overrides_selected_fields() {
        let config = RenderConfig::from_json(
            r##"{"channel_count": 4, "trace_color": "#ff0000", "show": false,
                 "y_range": [-0.5, 0.5], "tick_policy": "all_cells"}"##,
        )
        .unwrap();
        assert_eq!(config.channel_count, 4);
        assert_eq!(config.trace_color, TraceColor::rgb(255, 0, 0));
        assert!(!config.show);
        assert_eq!(config.y_range, Some((-0.5, 0.5)));
        assert_eq!(config.tick_policy, TickPolicy::AllCells);
        assert_eq!(config.trace_label, "spkr");
    }
    #[test]
    fn json_rejects_bad_values() {
        assert!(matches!(
            RenderConfig::from_json(r#"{"trace_color": "nope"}"#),
            Err(GridPlotError::InvalidConfig(_))
        ));
        assert!(matches!(
            RenderConfig::from_json(r#"{"y_range": [1.0, -1.0]}"#),
            Err(GridPlotError::InvalidYRange { .. })
        ));
    }
    #[test]
    fn color_round_trips_through_json() {
        let config = RenderConfig::default().with_color(TraceColor::rgb(1, 2, 3));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"#010203\""));
        assert_eq!(RenderConfig::from_json(&json).unwrap(), config);
    }
}
