use ndarray::{Array2, Array3, ArrayView2, Axis};
use crate::drivers::error::{GridPlotError, Result};
/// Epoched recording: trials x channels x samples, plus the time axis in seconds.
#[derive(Clone, Debug)]
pub struct EpochedDataset {
    data: Array3<f64>,
    times: Vec<f64>,
    tmin: f64,
    tmax: f64,
}
impl EpochedDataset {
    /// Bounds are taken from the first and last entry of `times`.
    pub fn new(data: Array3<f64>, times: Vec<f64>) -> Result<Self> {
        let tmin = times.first().copied().ok_or(GridPlotError::EmptyTimeAxis)?;
        let tmax = times.last().copied().ok_or(GridPlotError::EmptyTimeAxis)?;
        Self::with_bounds(data, times, tmin, tmax)
    }
    pub fn with_bounds(data: Array3<f64>, times: Vec<f64>, tmin: f64, tmax: f64) -> Result<Self> {
        let n_times = data.len_of(Axis(2));
        if n_times == 0 {
            return Err(GridPlotError::EmptyTimeAxis);
        }
        if times.len() != n_times {
            return Err(GridPlotError::TimeAxisMismatch {
                expected: n_times,
                actual: times.len(),
            });
        }
        if !(tmin <= tmax) {
            return Err(GridPlotError::InvalidTimeBounds { tmin, tmax });
        }
        Ok(Self {
            data,
            times,
            tmin,
            tmax,
        })
    }
    /// Time axis is `tmin + i / sfreq`, the way MNE lays out epochs.
    pub fn from_sample_rate(data: Array3<f64>, tmin: f64, sfreq: f64) -> Result<Self> {
        if !(sfreq > 0.0) {
            return Err(GridPlotError::InvalidSampleRate);
        }
        let times = (0..data.len_of(Axis(2)))
            .map(|i| tmin + i as f64 / sfreq)
            .collect();
        Self::new(data, times)
    }
    pub fn n_trials(&self) -> usize {
        self.data.len_of(Axis(0))
    }
    pub fn n_channels(&self) -> usize {
        self.data.len_of(Axis(1))
    }
    pub fn n_times(&self) -> usize {
        self.data.len_of(Axis(2))
    }
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }
    pub fn times(&self) -> &[f64] {
        &self.times
    }
    pub fn tmin(&self) -> f64 {
        self.tmin
    }
    pub fn tmax(&self) -> f64 {
        self.tmax
    }
    /// Trials x samples view of one channel.
    pub fn channel(&self, channel: usize) -> Result<ArrayView2<'_, f64>> {
        if channel >= self.n_channels() {
            return Err(GridPlotError::ChannelOutOfRange {
                requested: channel + 1,
                available: self.n_channels(),
            });
        }
        Ok(self.data.index_axis(Axis(1), channel))
    }
    /// Trial-averaged (evoked) response, channels x samples.
    pub fn average(&self) -> Result<Array2<f64>> {
        self.data
            .mean_axis(Axis(0))
            .ok_or(GridPlotError::EmptyTrials)
    }
    /// Largest absolute value of the evoked response over every channel and sample.
    pub fn global_max_abs(&self) -> Result<f64> {
        let evoked = self.average()?;
        if let Some(((channel, sample), _)) = evoked.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(GridPlotError::NonFinite { channel, sample });
        }
        Ok(evoked.iter().fold(0.0f64, |acc, v| acc.max(v.abs())))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array3;
    #[test]
    fn bounds_follow_time_axis() {
        let data = Array3::<f64>::zeros((2, 3, 4));
        let ds = EpochedDataset::new(data, vec![-0.1, 0.0, 0.1, 0.2]).unwrap();
        assert_eq!(ds.n_trials(), 2);
        assert_eq!(ds.n_channels(), 3);
        assert_eq!(ds.n_times(), 4);
        assert_eq!(ds.tmin(), -0.1);
        assert_eq!(ds.tmax(), 0.2);
    }
    #[test]
    fn time_axis_length_must_match() {
        let data = Array3::<f64>::zeros((2, 3, 4));
        let err = EpochedDataset::new(data, vec![0.0, 0.1]).unwrap_err();
        assert!(matches!(
            err,
            GridPlotError::TimeAxisMismatch { expected: 4, actual: 2 }
        ));
    }
    #[test]
    fn sample_rate_builds_time_axis() {
        let data = Array3::<f64>::zeros((1, 1, 5));
        let ds = EpochedDataset::from_sample_rate(data, -0.2, 10.0).unwrap();
        assert_abs_diff_eq!(ds.times()[0], -0.2);
        assert_abs_diff_eq!(ds.times()[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ds.tmax(), 0.2, epsilon = 1e-12);
        let bad = EpochedDataset::from_sample_rate(Array3::zeros((1, 1, 5)), 0.0, 0.0);
        assert!(matches!(bad, Err(GridPlotError::InvalidSampleRate)));
    }
    #[test]
    fn global_max_spans_all_channels() {
        let mut data = Array3::<f64>::zeros((2, 3, 2));
        // channel 2 averages to -2.0 at sample 1
        data[[0, 2, 1]] = -1.0;
        data[[1, 2, 1]] = -3.0;
        data[[0, 0, 0]] = 1.0;
        let ds = EpochedDataset::new(data, vec![0.0, 0.1]).unwrap();
        assert_abs_diff_eq!(ds.global_max_abs().unwrap(), 2.0);
    }
    #[test]
    fn no_trials_is_numeric_error() {
        let ds = EpochedDataset::new(Array3::zeros((0, 2, 3)), vec![0.0, 0.1, 0.2]).unwrap();
        assert!(ds.average().unwrap_err().is_numeric());
        assert!(ds.global_max_abs().unwrap_err().is_numeric());
    }
}
