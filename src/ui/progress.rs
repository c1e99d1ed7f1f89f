use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct ProgressManager {
    mp: MultiProgress,
    bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            mp: MultiProgress::new(),
            bars: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Hidden bars, for tests and non-interactive runs
    pub fn hidden() -> Self {
        let mp = MultiProgress::new();
        mp.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        Self {
            mp,
            bars: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register a new bar under `id`. Ids must be unique.
    pub fn create_bar(
        &self,
        id: &str,
        total: u64,
        template: &str,
        message: &str,
    ) -> Result<(), String> {
        let mut bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;

        if bars.contains_key(id) {
            return Err(format!("Progress bar '{}' already exists", id));
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| format!("Bad template: {}", e))?
            .progress_chars("█▉▊▋▌▍▎▏ ");
        let pb = self
            .mp
            .add(ProgressBar::new(total));
        pb.set_style(style);
        pb.set_message(message.to_string());

        bars.insert(id.to_string(), pb);
        Ok(())
    }

    /// Advance a bar by `value`
    pub fn inc(&self, id: &str, value: u64) -> Result<(), String> {
        let bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        if let Some(pb) = bars.get(id) {
            pb.inc(value);
            Ok(())
        } else {
            Err(format!("Progress bar '{}' not found", id))
        }
    }

    pub fn set_message(&self, id: &str, message: &str) -> Result<(), String> {
        let bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        if let Some(pb) = bars.get(id) {
            pb.set_message(message.to_string());
            Ok(())
        } else {
            Err(format!("Progress bar '{}' not found", id))
        }
    }

    /// Finish a bar, leaving it on screen
    pub fn finish(&self, id: &str, message: &str) -> Result<(), String> {
        let bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        if let Some(pb) = bars.get(id) {
            pb.finish_with_message(message.to_string());
            Ok(())
        } else {
            Err(format!("Progress bar '{}' not found", id))
        }
    }

}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

pub mod templates {
    pub const SWEEP: &str =
        "SWEEP [{bar:30.cyan}] {percent}% ({pos}/{len} trials) {msg}";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_lifecycle() {
        let pm = ProgressManager::hidden();
        pm.create_bar("sweep", 10, templates::SWEEP, "start").unwrap();
        assert!(pm.create_bar("sweep", 5, templates::SWEEP, "dup").is_err());

        pm.inc("sweep", 3).unwrap();
        pm.inc("sweep", 2).unwrap();
        pm.set_message("sweep", "SNR 0 dB").unwrap();
        pm.finish("sweep", "done").unwrap();

        assert!(pm.inc("missing", 1).is_err());
        assert!(pm.set_message("missing", "x").is_err());
        assert!(pm.finish("missing", "x").is_err());
    }
}
