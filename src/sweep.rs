/// Bit error rate versus SNR over repeated seeded trials
use crate::codec::BitStream;
use crate::config::LinkConfig;
use crate::channel::AwgnChannel;
use crate::error::{LinkError, LinkResult};
use crate::link::QamLink;
use crate::ui::progress::{ProgressManager, templates};
use crate::utils::consts::MAX_SWEEP_POINTS;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

const BAR_ID: &str = "sweep";

#[derive(Clone, Debug, Serialize)]
pub struct SweepPoint {
    pub snr_db: f64,
    pub trials: usize,
    pub bits: usize,
    pub errors: usize,
    /// Mean over all trials (total errors / total bits)
    pub bit_error_rate: f64,
}

/// `start, start + step, ...` up to and including `stop`
pub fn snr_range(start: f64, stop: f64, step: f64) -> LinkResult<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(LinkError::invalid_parameter(
            "snr_step",
            format!("step must be positive, got {}", step),
        ));
    }
    if !start.is_finite() || !stop.is_finite() || stop < start {
        return Err(LinkError::invalid_parameter(
            "snr_range",
            format!("need finite start <= stop, got {}..{}", start, stop),
        ));
    }
    let intervals = ((stop - start) / step + 1e-9).floor();
    if !(intervals < MAX_SWEEP_POINTS as f64) {
        return Err(LinkError::invalid_parameter(
            "snr_step",
            format!(
                "step {} over {}..{} exceeds {} sweep points",
                step, start, stop, MAX_SWEEP_POINTS
            ),
        ));
    }
    let count = intervals as usize + 1;
    Ok((0..count).map(|k| start + step * k as f64).collect())
}

/// Seed of one trial, derived from the base seed and its position in the sweep
pub fn trial_seed(base: u64, point: usize, trial: usize) -> u64 {
    base.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(((point as u64) << 32) ^ trial as u64)
}

/// Run `trials` independent noisy transmissions of `bits` at every SNR
pub fn run_sweep(
    bits: &BitStream,
    base: &LinkConfig,
    snrs: &[f64],
    trials: usize,
    progress: &ProgressManager,
) -> LinkResult<Vec<SweepPoint>> {
    if bits.is_empty() {
        return Err(LinkError::invalid_parameter("payload", "sweep needs at least one bit"));
    }
    if trials == 0 || snrs.is_empty() {
        return Err(LinkError::invalid_parameter(
            "trials",
            "sweep needs at least one SNR point and one trial",
        ));
    }

    let base_seed = base.seed.unwrap_or_else(rand::random);
    let _ = progress.create_bar(
        BAR_ID,
        (snrs.len() * trials) as u64,
        templates::SWEEP,
        "starting",
    );

    let mut points = Vec::with_capacity(snrs.len());
    for (point_idx, &snr_db) in snrs.iter().enumerate() {
        let link = QamLink::new(base.with_snr(snr_db))?;
        let _ = progress.set_message(BAR_ID, &format!("SNR {:.1} dB", snr_db));

        let errors: Vec<usize> = (0..trials)
            .into_par_iter()
            .map(|trial| -> LinkResult<usize> {
                let seed = trial_seed(base_seed, point_idx, trial);
                let mut channel = AwgnChannel::new_from_seed(snr_db, seed)?;
                let transmission = link.transmit_bits(bits, &mut channel)?;
                let _ = progress.inc(BAR_ID, 1);
                Ok(transmission.report.errors)
            })
            .collect::<LinkResult<Vec<usize>>>()?;

        let total_errors: usize = errors.iter().sum();
        let total_bits = bits.len() * trials;
        let point = SweepPoint {
            snr_db,
            trials,
            bits: total_bits,
            errors: total_errors,
            bit_error_rate: total_errors as f64 / total_bits as f64,
        };
        info!(
            "SNR {:>6.2} dB: {} errors in {} bits, BER {:.6}",
            point.snr_db, point.errors, point.bits, point.bit_error_rate
        );
        points.push(point);
    }

    let _ = progress.finish(BAR_ID, "done");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::bytes_to_bits;

    #[test]
    fn test_snr_range_inclusive() {
        assert_eq!(snr_range(-4.0, 4.0, 2.0).unwrap(), vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
        assert_eq!(snr_range(0.0, 0.0, 1.0).unwrap(), vec![0.0]);
        assert_eq!(snr_range(0.0, 1.0, 0.3).unwrap().len(), 4);
        assert!(snr_range(0.0, 1.0, 0.0).is_err());
        assert!(snr_range(2.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_tiny_step_is_rejected_not_overflowed() {
        for step in [1e-300, 1e-9, f64::MIN_POSITIVE] {
            assert!(matches!(
                snr_range(-10.0, 10.0, step),
                Err(LinkError::InvalidParameter { name: "snr_step", .. })
            ));
        }
        let at_cap = snr_range(0.0, (MAX_SWEEP_POINTS - 1) as f64, 1.0).unwrap();
        assert_eq!(at_cap.len(), MAX_SWEEP_POINTS);
    }

    #[test]
    fn test_trial_seeds_differ() {
        assert_ne!(trial_seed(1, 0, 0), trial_seed(1, 0, 1));
        assert_ne!(trial_seed(1, 0, 0), trial_seed(1, 1, 0));
        assert_eq!(trial_seed(7, 2, 3), trial_seed(7, 2, 3));
    }

    #[test]
    fn test_sweep_is_reproducible_and_bounded() {
        let bits = bytes_to_bits(b"sweep payload");
        let config = LinkConfig {
            seed: Some(99),
            ..LinkConfig::default()
        };
        let snrs = [-8.0, 0.0];

        let a = run_sweep(&bits, &config, &snrs, 4, &ProgressManager::hidden()).unwrap();
        let b = run_sweep(&bits, &config, &snrs, 4, &ProgressManager::hidden()).unwrap();

        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.errors, pb.errors);
            assert!((0.0..=1.0).contains(&pa.bit_error_rate));
            assert_eq!(pa.bits, bits.len() * 4);
        }
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let config = LinkConfig::default();
        let pm = ProgressManager::hidden();
        assert!(run_sweep(&BitStream::default(), &config, &[0.0], 1, &pm).is_err());
        let bits = bytes_to_bits(&[1]);
        assert!(run_sweep(&bits, &config, &[], 1, &pm).is_err());
        assert!(run_sweep(&bits, &config, &[0.0], 0, &pm).is_err());
    }
}
