use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::epochs::EpochedDataset;
use crate::drivers::error::{GridPlotError, Result};
/// Synthetic epochs: one Gaussian deflection per channel plus uniform noise.
#[derive(Clone, Debug)]
pub struct SimulatedEpochs {
    pub n_trials: usize,
    pub n_channels: usize,
    pub sfreq: f64,
    pub tmin: f64,
    pub tmax: f64,
    /// Latency of the deflection in seconds.
    pub peak_latency: f64,
    pub peak_width: f64,
    pub amplitude: f64,
    /// Half-width of the uniform noise added to every sample.
    pub noise: f64,
    pub seed: u64,
}
impl Default for SimulatedEpochs {
    fn default() -> Self {
        Self {
            n_trials: 40,
            n_channels: 16,
            sfreq: 128.0,
            tmin: -0.2,
            tmax: 0.8,
            peak_latency: 0.1,
            peak_width: 0.05,
            amplitude: 2.0,
            noise: 1.0,
            seed: 7,
        }
    }
}
impl SimulatedEpochs {
    pub fn generate(&self) -> Result<EpochedDataset> {
        if !(self.sfreq > 0.0) {
            return Err(GridPlotError::InvalidSampleRate);
        }
        if !(self.tmin <= self.tmax) {
            return Err(GridPlotError::InvalidTimeBounds {
                tmin: self.tmin,
                tmax: self.tmax,
            });
        }
        let n_times = ((self.tmax - self.tmin) * self.sfreq).round() as usize + 1;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut data = Array3::<f64>::zeros((self.n_trials, self.n_channels, n_times));
        for ((_, ch, t), value) in data.indexed_iter_mut() {
            let time = self.tmin + t as f64 / self.sfreq;
            // alternate polarity and shrink towards the back of the montage
            let sign = if ch % 2 == 0 { 1.0 } else { -1.0 };
            let gain = 1.0 / (1.0 + ch as f64 * 0.1);
            let z = (time - self.peak_latency) / self.peak_width;
            let erp = sign * gain * self.amplitude * (-0.5 * z * z).exp();
            let noise = if self.noise > 0.0 {
                rng.gen_range(-self.noise..self.noise)
            } else {
                0.0
            };
            *value = erp + noise;
        }
        EpochedDataset::from_sample_rate(data, self.tmin, self.sfreq)
    }
    /// `E0`, `E1`, ... one per channel.
    pub fn channel_names(&self) -> Vec<String> {
        (0..self.n_channels).map(|i| format!("E{i}")).collect()
    }
}
