// src/drivers/mod.rs
pub mod config;
pub mod epochs;
pub mod error;
pub mod figure;
pub mod layout;
pub mod renderer;
pub mod simulate;
pub mod stats;
pub use config::{LabelPlacement, RenderConfig, TickPolicy, TraceColor};
pub use epochs::EpochedDataset;
pub use error::{ErrorKind, GridPlotError};
pub use figure::{
    Axes, Canvas, CellText, Figure, LegendEntry, RasterCanvas, RecordingCanvas, Ticks, Title,
    TraceRecord,
};
pub use layout::GridShape;
pub use renderer::{plot_epochs, GridPlan, GridTraceRenderer};
pub use simulate::SimulatedEpochs;
pub use stats::ChannelStats;
