use thiserror::Error;
/// Coarse classification of [`GridPlotError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A statistic could not be computed (no trials, non-finite values).
    Numeric,
    /// Channel count exceeds the data channels or the label list.
    Bounds,
    /// Malformed dataset or configuration.
    Input,
    /// Failure inside the plotting / encoding layer.
    Backend,
}
#[derive(Debug, Error)]
pub enum GridPlotError {
    #[error("dataset has no trials; standard error is undefined")]
    EmptyTrials,
    #[error("non-finite statistic at channel {channel}, sample {sample}")]
    NonFinite { channel: usize, sample: usize },
    #[error("channel count must be at least one")]
    NoChannels,
    #[error("channel count {requested} exceeds the {available} channels in the dataset")]
    ChannelOutOfRange { requested: usize, available: usize },
    #[error("channel count {requested} exceeds the {available} channel labels supplied")]
    MissingLabels { requested: usize, available: usize },
    #[error("time axis has {actual} values but epochs have {expected} samples")]
    TimeAxisMismatch { expected: usize, actual: usize },
    #[error("epochs have no samples along the time axis")]
    EmptyTimeAxis,
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("tmin {tmin} is greater than tmax {tmax}")]
    InvalidTimeBounds { tmin: f64, tmax: f64 },
    #[error("invalid y range: min {min} must be finite and below max {max}")]
    InvalidYRange { min: f64, max: f64 },
    #[error("unrecognised color spec `{0}`")]
    InvalidColor(String),
    #[error("invalid render config: {0}")]
    InvalidConfig(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to write figure: {0}")]
    Io(#[from] std::io::Error),
}
impl GridPlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridPlotError::EmptyTrials | GridPlotError::NonFinite { .. } => ErrorKind::Numeric,
            GridPlotError::NoChannels
            | GridPlotError::ChannelOutOfRange { .. }
            | GridPlotError::MissingLabels { .. } => ErrorKind::Bounds,
            GridPlotError::Plot(_) | GridPlotError::Io(_) => ErrorKind::Backend,
            _ => ErrorKind::Input,
        }
    }
    pub fn is_numeric(&self) -> bool {
        self.kind() == ErrorKind::Numeric
    }
    pub fn is_bounds(&self) -> bool {
        self.kind() == ErrorKind::Bounds
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for GridPlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        GridPlotError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for GridPlotError {
    fn from(value: image::ImageError) -> Self {
        GridPlotError::Plot(value.to_string())
    }
}
impl From<serde_json::Error> for GridPlotError {
    fn from(value: serde_json::Error) -> Self {
        GridPlotError::InvalidConfig(value.to_string())
    }
}
pub type Result<T> = std::result::Result<T, GridPlotError>;
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn kinds_follow_failure_class() {
        assert!(GridPlotError::EmptyTrials.is_numeric());
        assert!(GridPlotError::NonFinite { channel: 0, sample: 3 }.is_numeric());
        assert!(GridPlotError::ChannelOutOfRange { requested: 9, available: 4 }.is_bounds());
        assert!(GridPlotError::MissingLabels { requested: 9, available: 4 }.is_bounds());
        assert_eq!(GridPlotError::InvalidColor("zz".into()).kind(), ErrorKind::Input);
        assert_eq!(GridPlotError::Plot("x".into()).kind(), ErrorKind::Backend);
    }
}
