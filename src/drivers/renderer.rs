use crate::drivers::config::{LabelPlacement, RenderConfig, TickPolicy};
use crate::drivers::epochs::EpochedDataset;
use crate::drivers::error::{GridPlotError, Result};
use crate::drivers::figure::{Axes, Canvas, CellText, Figure, Ticks, Title, TraceRecord};
use crate::drivers::layout::GridShape;
use crate::drivers::stats::ChannelStats;
/// Fully computed layout for one render call; nothing has been drawn yet.
#[derive(Clone, Debug)]
pub struct GridPlan {
    pub grid: GridShape,
    /// Peak absolute value of the trial average across every channel.
    pub global_max: f64,
    pub axes: Vec<Axes>,
}
/// Draws one cell per channel: averaged trace, standard-error band, origin lines.
pub struct GridTraceRenderer {
    config: RenderConfig,
}
impl GridTraceRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
    /// Runs every check and statistic up front so a failure leaves the figure untouched.
    pub fn plan<S: AsRef<str>>(&self, dataset: &EpochedDataset, labels: &[S]) -> Result<GridPlan> {
        let config = &self.config;
        let count = config.channel_count;
        if count > dataset.n_channels() {
            return Err(GridPlotError::ChannelOutOfRange {
                requested: count,
                available: dataset.n_channels(),
            });
        }
        if count > labels.len() {
            return Err(GridPlotError::MissingLabels {
                requested: count,
                available: labels.len(),
            });
        }
        if dataset.n_trials() == 0 {
            return Err(GridPlotError::EmptyTrials);
        }
        let grid = GridShape::for_channels(count)?;
        let global_max = dataset.global_max_abs()?;
        let y_range = match config.y_range {
            Some(range) => range,
            None if global_max > 0.0 => (-global_max * config.y_margin, global_max * config.y_margin),
            None => {
                log::warn!("averaged signal is flat; falling back to a unit y range");
                (-1.0, 1.0)
            }
        };
        let x_range = (dataset.tmin(), dataset.tmax());
        let mut axes = Vec::with_capacity(count);
        for (ch, label) in labels.iter().take(count).enumerate() {
            let stats = ChannelStats::compute(dataset, ch)?;
            let first = ch == 0;
            let ticks = match config.tick_policy {
                TickPolicy::FirstCellOnly if first => Ticks::Auto,
                TickPolicy::FirstCellOnly => Ticks::Hidden,
                TickPolicy::AllCells => Ticks::Auto,
                TickPolicy::NoCells => Ticks::Hidden,
            };
            let y_label = (first && ticks.is_visible()).then(|| config.y_axis_label.clone());
            let label: &str = label.as_ref();
            let label = label.to_string();
            let (title, annotation) = match config.label_placement {
                LabelPlacement::InCell => (
                    None,
                    Some(CellText {
                        text: label,
                        anchor: config.label_anchor,
                        font_size: config.label_font_size,
                    }),
                ),
                LabelPlacement::Title => (
                    Some(Title {
                        text: label,
                        font_size: config.label_font_size,
                    }),
                    None,
                ),
            };
            axes.push(Axes {
                index: ch,
                x_range,
                y_range,
                x_ticks: ticks.clone(),
                y_ticks: ticks,
                x_label: None,
                y_label,
                title,
                annotation,
                origin_lines: true,
                traces: vec![TraceRecord {
                    label: config.trace_label.clone(),
                    color: config.trace_color,
                    band_opacity: config.band_opacity,
                    times: dataset.times().to_vec(),
                    lower: stats.lower().to_vec(),
                    upper: stats.upper().to_vec(),
                    erp: stats.erp.to_vec(),
                }],
                legend: None,
            });
        }
        if let Some(last) = axes.last_mut() {
            last.x_ticks = Ticks::Fixed(vec![dataset.tmin(), 0.0, dataset.tmax()]);
            last.x_label = Some(config.x_axis_label.clone());
            last.legend = Some(Vec::new());
        }
        Ok(GridPlan {
            grid,
            global_max,
            axes,
        })
    }
    pub fn render<C: Canvas, S: AsRef<str>>(
        &self,
        figure: &mut Figure<C>,
        dataset: &EpochedDataset,
        labels: &[S],
    ) -> Result<()> {
        let plan = self.plan(dataset, labels)?;
        log::info!(
            "rendering {} channels ({} trials) as a {}x{} grid, peak {:.3}",
            plan.axes.len(),
            dataset.n_trials(),
            plan.grid.rows,
            plan.grid.cols,
            plan.global_max
        );
        for axes in plan.axes {
            figure.add_axes(plan.grid, axes)?;
        }
        if self.config.show {
            figure.show()?;
        }
        Ok(())
    }
}
/// One-shot form of [`GridTraceRenderer::render`].
pub fn plot_epochs<C: Canvas, S: AsRef<str>>(
    figure: &mut Figure<C>,
    dataset: &EpochedDataset,
    config: &RenderConfig,
    labels: &[S],
) -> Result<()> {
    GridTraceRenderer::new(config.clone())?.render(figure, dataset, labels)
}
