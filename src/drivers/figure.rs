use std::io::Cursor;
use std::ops::Range;
use std::path::PathBuf;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use crate::drivers::config::TraceColor;
use crate::drivers::error::{GridPlotError, Result};
use crate::drivers::layout::GridShape;
/// Tick state of one axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Ticks {
    Hidden,
    Auto,
    Fixed(Vec<f64>),
}
impl Ticks {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Ticks::Hidden)
    }
}
/// Averaged trace with its error band, in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    pub label: String,
    pub color: TraceColor,
    pub band_opacity: f64,
    pub times: Vec<f64>,
    pub erp: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}
/// Text placed inside a cell at a fractional position of the plotting area.
#[derive(Clone, Debug, PartialEq)]
pub struct CellText {
    pub text: String,
    pub anchor: (f64, f64),
    pub font_size: f64,
}
/// Channel name drawn above the cell instead of inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    pub text: String,
    pub font_size: f64,
}
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: TraceColor,
}
/// Everything drawn into one grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub index: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_ticks: Ticks,
    pub y_ticks: Ticks,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: Option<Title>,
    pub annotation: Option<CellText>,
    pub origin_lines: bool,
    pub traces: Vec<TraceRecord>,
    /// `None` when the cell carries no legend.
    pub legend: Option<Vec<LegendEntry>>,
}
impl Axes {
    fn legend_entries(&self) -> Vec<LegendEntry> {
        self.traces
            .iter()
            .map(|t| LegendEntry {
                label: t.label.clone(),
                color: t.color,
            })
            .collect()
    }
}
/// Drawing surface that a [`Figure`] forwards cells to.
pub trait Canvas {
    fn draw_cell(&mut self, grid: GridShape, axes: &Axes) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}
/// Explicit figure handle: a canvas plus the record of every cell drawn on it.
///
/// Drawing is additive. Rendering into a cell that already exists appends the
/// new traces to it, the way a second condition is overlaid on the first, and
/// the canvas redraws the whole cell so every trace shares the latest range.
pub struct Figure<C: Canvas = RasterCanvas> {
    canvas: C,
    grid: Option<GridShape>,
    axes: Vec<Axes>,
    shown: usize,
}
impl<C: Canvas> Figure<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            grid: None,
            axes: Vec::new(),
            shown: 0,
        }
    }
    pub fn canvas(&self) -> &C {
        &self.canvas
    }
    /// Grid of the most recent render.
    pub fn grid(&self) -> Option<GridShape> {
        self.grid
    }
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }
    pub fn axes_at(&self, index: usize) -> Option<&Axes> {
        self.axes.iter().find(|a| a.index == index)
    }
    /// Number of times the figure has been presented.
    pub fn shown(&self) -> usize {
        self.shown
    }
    pub fn add_axes(&mut self, grid: GridShape, mut axes: Axes) -> Result<()> {
        if self.grid != Some(grid) {
            // a different layout starts a fresh set of cells
            self.axes.clear();
            self.grid = Some(grid);
        }
        let existing = self.axes.iter().position(|a| a.index == axes.index);
        let mut merged = match existing {
            Some(i) => {
                let mut traces = self.axes[i].traces.clone();
                traces.append(&mut axes.traces);
                Axes { traces, ..axes }
            }
            None => axes,
        };
        if merged.legend.is_some() {
            merged.legend = Some(merged.legend_entries());
        }
        self.canvas.draw_cell(grid, &merged)?;
        match existing {
            Some(i) => self.axes[i] = merged,
            None => self.axes.push(merged),
        }
        Ok(())
    }
    pub fn show(&mut self) -> Result<()> {
        self.canvas.present()?;
        self.shown += 1;
        log::info!("figure presented ({} cells)", self.axes.len());
        Ok(())
    }
}
impl Figure<RasterCanvas> {
    pub fn raster(width: u32, height: u32) -> Self {
        Self::new(RasterCanvas::new(width, height))
    }
}
/// Linear f64 axis whose ticks sit exactly on the given points.
struct KeyedAxis {
    inner: RangedCoordf64,
    points: Vec<f64>,
}
impl KeyedAxis {
    fn new(range: Range<f64>, ticks: &Ticks) -> Self {
        let points = match ticks {
            Ticks::Fixed(points) => points.clone(),
            Ticks::Auto => (0..5)
                .map(|i| range.start + (range.end - range.start) * i as f64 / 4.0)
                .collect(),
            Ticks::Hidden => Vec::new(),
        };
        Self {
            inner: range.into(),
            points,
        }
    }
}
impl Ranged for KeyedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;
    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }
    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.points.clone()
    }
    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}
/// `0.25` rather than `0.250`, `-0.2` rather than `-0.20000000000000001`.
fn tick_label(value: &f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
/// plotters bitmap canvas over an owned RGB buffer.
pub struct RasterCanvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    output: Option<PathBuf>,
    tick_font_size: f64,
}
impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let background = WHITE;
        let buffer = [background.0, background.1, background.2].repeat((width * height) as usize);
        Self {
            width,
            height,
            buffer,
            output: None,
            tick_font_size: 10.0,
        }
    }
    /// PNG destination written on every [`Canvas::present`].
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.buffer, self.width, self.height)
    }
}
impl Canvas for RasterCanvas {
    fn draw_cell(&mut self, grid: GridShape, axes: &Axes) -> Result<()> {
        let tick_font = self.tick_font_size;
        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();
        let cells = root.split_evenly((grid.rows, grid.cols));
        let area = cells.get(axes.index).ok_or_else(|| {
            GridPlotError::Plot(format!(
                "cell {} outside a {}x{} grid",
                axes.index, grid.rows, grid.cols
            ))
        })?;
        // earlier traces are redrawn from the record, at this cell's current range
        area.fill(&WHITE)?;
        let (x0, x1) = axes.x_range;
        let (y0, y1) = axes.y_range;
        let left = if axes.y_ticks.is_visible() || axes.y_label.is_some() { 45 } else { 0 };
        let bottom = if axes.x_ticks.is_visible() || axes.x_label.is_some() { 35 } else { 0 };
        let mut builder = ChartBuilder::on(area);
        builder
            .margin(4)
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, bottom);
        if let Some(title) = &axes.title {
            builder.caption(&title.text, ("sans-serif", title.font_size).into_font());
        }
        let mut chart =
            builder.build_cartesian_2d(KeyedAxis::new(x0..x1, &axes.x_ticks), y0..y1)?;
        {
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .label_style(("sans-serif", tick_font).into_font())
                .axis_desc_style(("sans-serif", tick_font).into_font())
                .x_label_formatter(&tick_label)
                .y_labels(5);
            if !axes.x_ticks.is_visible() {
                mesh.disable_x_axis();
            }
            if !axes.y_ticks.is_visible() {
                mesh.disable_y_axis();
            }
            if let Some(label) = &axes.x_label {
                mesh.x_desc(label.as_str());
            }
            if let Some(label) = &axes.y_label {
                mesh.y_desc(label.as_str());
            }
            mesh.draw()?;
        }
        chart
            .plotting_area()
            .draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1)))?;
        for trace in &axes.traces {
            let color = trace.color.to_rgb();
            let mut band: Vec<(f64, f64)> = trace
                .times
                .iter()
                .copied()
                .zip(trace.upper.iter().copied())
                .collect();
            band.extend(
                trace
                    .times
                    .iter()
                    .copied()
                    .zip(trace.lower.iter().copied())
                    .rev(),
            );
            chart.draw_series(std::iter::once(Polygon::new(
                band,
                color.mix(trace.band_opacity).filled(),
            )))?;
            chart.draw_series(LineSeries::new(
                trace.times.iter().copied().zip(trace.erp.iter().copied()),
                &color,
            ))?;
        }
        if axes.origin_lines {
            if x0 <= 0.0 && 0.0 <= x1 {
                chart.draw_series(LineSeries::new(
                    vec![(0.0, y0), (0.0, y1)],
                    BLACK.stroke_width(1),
                ))?;
            }
            if y0 <= 0.0 && 0.0 <= y1 {
                chart.draw_series(LineSeries::new(
                    vec![(x0, 0.0), (x1, 0.0)],
                    BLACK.stroke_width(1),
                ))?;
            }
        }
        if let Some(text) = &axes.annotation {
            let at = (
                x0 + (x1 - x0) * text.anchor.0,
                y0 + (y1 - y0) * text.anchor.1,
            );
            let style = ("sans-serif", text.font_size)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            chart
                .plotting_area()
                .draw(&Text::new(text.text.clone(), at, style))?;
        }
        if let Some(entries) = &axes.legend {
            for entry in entries {
                let color = entry.color.to_rgb();
                chart
                    .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                    .label(entry.label.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
            chart
                .configure_series_labels()
                .label_font(("sans-serif", tick_font).into_font())
                .border_style(&BLACK.mix(0.3))
                .background_style(&WHITE.mix(0.8))
                .draw()?;
        }
        root.present()?;
        log::debug!(
            "drew cell {} ({} traces) at {:?}",
            axes.index,
            axes.traces.len(),
            grid.position(axes.index)
        );
        Ok(())
    }
    fn present(&mut self) -> Result<()> {
        match &self.output {
            Some(path) => {
                let png = self.to_png()?;
                std::fs::write(path, png)?;
                log::info!("figure written to {}", path.display());
            }
            None => log::warn!("figure has no output path; nothing to present"),
        }
        Ok(())
    }
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| GridPlotError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
/// Canvas that only records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub draws: Vec<(GridShape, Axes)>,
    pub presented: usize,
}
impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}
impl Canvas for RecordingCanvas {
    fn draw_cell(&mut self, grid: GridShape, axes: &Axes) -> Result<()> {
        self.draws.push((grid, axes.clone()));
        Ok(())
    }
    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}
