use ndarray::{Array1, Axis};
use crate::drivers::epochs::EpochedDataset;
use crate::drivers::error::{GridPlotError, Result};
/// Trial statistics for one channel: the averaged trace and its standard error.
#[derive(Clone, Debug)]
pub struct ChannelStats {
    pub channel: usize,
    pub erp: Array1<f64>,
    pub stderr: Array1<f64>,
}
impl ChannelStats {
    /// Mean over trials and `std / sqrt(n_trials)`, where std is the population
    /// standard deviation (no degrees-of-freedom correction).
    pub fn compute(dataset: &EpochedDataset, channel: usize) -> Result<Self> {
        let trials = dataset.channel(channel)?;
        let n_trials = trials.len_of(Axis(0));
        if n_trials == 0 {
            return Err(GridPlotError::EmptyTrials);
        }
        let erp = trials
            .mean_axis(Axis(0))
            .ok_or(GridPlotError::EmptyTrials)?;
        let stderr = trials.std_axis(Axis(0), 0.0) / (n_trials as f64).sqrt();
        let non_finite = erp
            .iter()
            .zip(stderr.iter())
            .position(|(m, s)| !m.is_finite() || !s.is_finite());
        if let Some(sample) = non_finite {
            return Err(GridPlotError::NonFinite { channel, sample });
        }
        Ok(Self {
            channel,
            erp,
            stderr,
        })
    }
    pub fn lower(&self) -> Array1<f64> {
        &self.erp - &self.stderr
    }
    pub fn upper(&self) -> Array1<f64> {
        &self.erp + &self.stderr
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array3;
    fn four_trials() -> EpochedDataset {
        let data = Array3::from_shape_vec(
            (4, 1, 3),
            vec![1.0, 2.0, 3.0, 3.0, 4.0, 5.0, 5.0, 6.0, 7.0, 7.0, 8.0, 9.0],
        )
        .unwrap();
        EpochedDataset::new(data, vec![-0.1, 0.0, 0.1]).unwrap()
    }
    #[test]
    fn erp_is_trial_mean() {
        let stats = ChannelStats::compute(&four_trials(), 0).unwrap();
        assert_eq!(stats.erp.to_vec(), vec![4.0, 5.0, 6.0]);
    }
    #[test]
    fn stderr_uses_population_std() {
        let stats = ChannelStats::compute(&four_trials(), 0).unwrap();
        // deviations are -3, -1, 1, 3 at every sample -> variance 5
        let expected = 5.0f64.sqrt() / 2.0;
        for &s in stats.stderr.iter() {
            assert_abs_diff_eq!(s, expected, epsilon = 1e-12);
        }
        let lower = stats.lower();
        let upper = stats.upper();
        for t in 0..3 {
            assert_eq!(lower[t], stats.erp[t] - stats.stderr[t]);
            assert_eq!(upper[t], stats.erp[t] + stats.stderr[t]);
        }
    }
    #[test]
    fn zero_trials_fail() {
        let ds = EpochedDataset::new(Array3::zeros((0, 1, 3)), vec![0.0, 0.1, 0.2]).unwrap();
        let err = ChannelStats::compute(&ds, 0).unwrap_err();
        assert!(matches!(err, GridPlotError::EmptyTrials));
    }
    #[test]
    fn nan_input_is_rejected() {
        let mut data = Array3::<f64>::zeros((2, 1, 3));
        data[[1, 0, 2]] = f64::NAN;
        let ds = EpochedDataset::new(data, vec![0.0, 0.1, 0.2]).unwrap();
        let err = ChannelStats::compute(&ds, 0).unwrap_err();
        assert!(matches!(err, GridPlotError::NonFinite { channel: 0, sample: 2 }));
    }
}
