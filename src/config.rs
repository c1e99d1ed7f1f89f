/// Link configuration shared by every stage of a run
use crate::error::{LinkError, LinkResult};
use crate::modem::validate_carrier;
use crate::utils::consts::{DEFAULT_CARRIER_FREQ, DEFAULT_SAMPLES_PER_PERIOD, DEFAULT_SNR_DB};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Carrier frequency fc (Hz)
    pub carrier_freq: f64,
    /// Samples per carrier period (mpp)
    pub samples_per_period: usize,
    /// Channel SNR (dB)
    pub snr_db: f64,
    /// Fixed noise seed; None draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            carrier_freq: DEFAULT_CARRIER_FREQ,
            samples_per_period: DEFAULT_SAMPLES_PER_PERIOD,
            snr_db: DEFAULT_SNR_DB,
            seed: None,
        }
    }
}

impl LinkConfig {
    /// Parse a JSON config. Validation is left to the caller, after any overrides.
    pub fn from_json_file(path: &Path) -> LinkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        info!("Loaded link configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> LinkResult<()> {
        validate_carrier(self.carrier_freq, self.samples_per_period)?;
        if !self.snr_db.is_finite() {
            return Err(LinkError::invalid_parameter(
                "snr",
                format!("SNR must be a finite number of dB, got {}", self.snr_db),
            ));
        }
        Ok(())
    }

    /// Sample rate implied by fc and mpp (Hz)
    pub fn sample_rate(&self) -> f64 {
        self.carrier_freq * self.samples_per_period as f64
    }

    pub fn with_snr(&self, snr_db: f64) -> Self {
        Self {
            snr_db,
            ..self.clone()
        }
    }
}
