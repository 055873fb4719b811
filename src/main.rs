// src/main.rs
// 演示: 两个条件叠加到同一张网格图, 写出 PNG
use anyhow::{Context, Result};
use epoch_grid::{
    plot_epochs, Figure, RasterCanvas, RenderConfig, SimulatedEpochs, TraceColor,
};
fn load_config(path: Option<&str>, channel_count: usize) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::new(channel_count));
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {path}"))?;
    let config = RenderConfig::from_json(&json)
        .with_context(|| format!("invalid config {path}"))?;
    Ok(config)
}
fn main() -> Result<()> {
    env_logger::init();
    // 用法: epoch-grid [output.png] [config.json]
    let args: Vec<String> = std::env::args().collect();
    let output = args.get(1).map(String::as_str).unwrap_or("epochs.png");
    let target = SimulatedEpochs::default();
    let control = SimulatedEpochs {
        amplitude: 0.5,
        seed: target.seed + 1,
        ..target.clone()
    };
    let labels = target.channel_names();
    let base = load_config(args.get(2).map(String::as_str), target.n_channels)?;
    let mut figure = Figure::new(RasterCanvas::new(1200, 900).with_output(output));
    let first = RenderConfig {
        show: false,
        ..base.clone()
    };
    plot_epochs(
        &mut figure,
        &target.generate().context("failed to simulate target epochs")?,
        &first,
        &labels,
    )?;
    let second = base
        .with_color(TraceColor::parse("r")?)
        .with_label("control")
        .with_show(true);
    plot_epochs(
        &mut figure,
        &control.generate().context("failed to simulate control epochs")?,
        &second,
        &labels,
    )?;
    log::info!("wrote {output}");
    Ok(())
}
