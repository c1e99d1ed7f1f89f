//! Channel simulation.
//!
//! The AWGN channel adds zero-mean Gaussian noise whose power is derived from
//! the transmit power and a target SNR. The random source is injected so runs
//! can be made reproducible.

use crate::error::{LinkError, LinkResult};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// Anything that turns a transmitted signal into a received one
pub trait Channel {
    fn transmit(&mut self, signal: &[f64], average_power: f64) -> LinkResult<Vec<f64>>;

    fn name(&self) -> &'static str;
}

/// Noise power for a signal of power `average_power` at `snr_db`:
/// Pn = Pm / 10^(SNR/10)
pub fn noise_power(average_power: f64, snr_db: f64) -> f64 {
    average_power / 10f64.powf(snr_db / 10.0)
}

/// Additive white Gaussian noise channel
#[derive(Debug, Clone)]
pub struct AwgnChannel<R: Rng = StdRng> {
    snr_db: f64,
    rng: R,
}

impl AwgnChannel<StdRng> {
    /// Reproducible channel
    pub fn new_from_seed(snr_db: f64, seed: u64) -> LinkResult<Self> {
        Self::with_rng(snr_db, StdRng::seed_from_u64(seed))
    }

    /// Channel seeded from OS entropy
    pub fn new_from_entropy(snr_db: f64) -> LinkResult<Self> {
        Self::with_rng(snr_db, StdRng::from_os_rng())
    }
}

impl<R: Rng> AwgnChannel<R> {
    pub fn with_rng(snr_db: f64, rng: R) -> LinkResult<Self> {
        if !snr_db.is_finite() {
            return Err(LinkError::invalid_parameter(
                "snr",
                format!("SNR must be a finite number of dB, got {}", snr_db),
            ));
        }
        Ok(Self { snr_db, rng })
    }

    /// Add one independent N(0, √Pn) draw to every sample
    pub fn apply(&mut self, signal: &[f64], average_power: f64) -> LinkResult<Vec<f64>> {
        if !average_power.is_finite() || average_power < 0.0 {
            return Err(LinkError::invalid_parameter(
                "average_power",
                format!("signal power must be finite and non-negative, got {}", average_power),
            ));
        }

        let pn = noise_power(average_power, self.snr_db);
        let distr = Normal::new(0.0, pn.sqrt()).map_err(|e| {
            LinkError::invalid_parameter("noise_sigma", format!("{}", e))
        })?;

        debug!(
            "AWGN: Pm = {:.6} W, SNR = {} dB, Pn = {:.6} W",
            average_power, self.snr_db, pn
        );

        let received = signal
            .iter()
            .map(|&s| s + distr.sample(&mut self.rng))
            .collect();
        Ok(received)
    }
}

impl<R: Rng> Channel for AwgnChannel<R> {
    fn transmit(&mut self, signal: &[f64], average_power: f64) -> LinkResult<Vec<f64>> {
        self.apply(signal, average_power)
    }

    fn name(&self) -> &'static str {
        "awgn"
    }
}

/// Noiseless channel; the received signal equals the transmitted one
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealChannel;

impl Channel for IdealChannel {
    fn transmit(&mut self, signal: &[f64], _average_power: f64) -> LinkResult<Vec<f64>> {
        Ok(signal.to_vec())
    }

    fn name(&self) -> &'static str {
        "ideal"
    }
}
