use serde::{Deserialize, Serialize};
use std::path::Path;

/// Leading window of each signal of a run, for an external plotting layer
#[derive(Serialize, Deserialize)]
pub struct SignalDump {
    pub carrier_freq: f64,
    pub samples_per_period: usize,
    pub snr_db: f64,
    pub time: Vec<f64>,
    pub transmit: Vec<f64>,
    pub received: Vec<f64>,
    pub demodulated: Vec<f64>,
    pub baseband: Vec<f64>,
}

impl SignalDump {
    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer(file, self)?;
        Ok(())
    }
}

/// First `n` samples, or the whole signal when shorter
pub fn window(signal: &[f64], n: usize) -> Vec<f64> {
    signal[..n.min(signal.len())].to_vec()
}
