/// QAM modem: carriers, modulator and energy-detection demodulator
pub mod carrier;
pub mod demodulator;
pub mod modulator;

pub use carrier::{Carrier, CarrierKind};
pub use demodulator::{Demodulated, QamDemodulator};
pub use modulator::{ModulatedSignal, QamModulator, RailSignal};

use crate::error::{LinkError, LinkResult};
use crate::utils::consts::MIN_SAMPLES_PER_PERIOD;
use tracing::debug;

/// The two reference carriers, generated once per session
#[derive(Clone, Debug)]
pub struct CarrierPair {
    pub in_phase: Carrier,
    pub quadrature: Carrier,
}

impl CarrierPair {
    pub fn new(carrier_freq: f64, samples_per_period: usize) -> LinkResult<Self> {
        validate_carrier(carrier_freq, samples_per_period)?;

        let in_phase = Carrier::generate(carrier_freq, samples_per_period, CarrierKind::InPhase);
        let quadrature =
            Carrier::generate(carrier_freq, samples_per_period, CarrierKind::Quadrature);

        debug!(
            "Carriers ready: fc = {} Hz, mpp = {}, Es_I = {:.4}, Es_Q = {:.4}",
            carrier_freq,
            samples_per_period,
            in_phase.energy(),
            quadrature.energy()
        );

        Ok(Self {
            in_phase,
            quadrature,
        })
    }

    pub fn samples_per_period(&self) -> usize {
        self.in_phase.len()
    }

    pub fn carrier_freq(&self) -> f64 {
        self.in_phase.carrier_freq()
    }

    pub fn period(&self) -> f64 {
        self.in_phase.period()
    }
}

pub fn validate_carrier(carrier_freq: f64, samples_per_period: usize) -> LinkResult<()> {
    if !carrier_freq.is_finite() || carrier_freq <= 0.0 {
        return Err(LinkError::invalid_parameter(
            "fc",
            format!("carrier frequency must be positive and finite, got {}", carrier_freq),
        ));
    }
    if samples_per_period < MIN_SAMPLES_PER_PERIOD {
        return Err(LinkError::invalid_parameter(
            "mpp",
            format!(
                "need at least {} samples per period, got {}",
                MIN_SAMPLES_PER_PERIOD, samples_per_period
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(CarrierPair::new(0.0, 20).is_err());
        assert!(CarrierPair::new(-5.0, 20).is_err());
        assert!(CarrierPair::new(f64::NAN, 20).is_err());
        assert!(CarrierPair::new(5000.0, 1).is_err());
        assert!(CarrierPair::new(5000.0, MIN_SAMPLES_PER_PERIOD).is_ok());
    }

    #[test]
    fn test_two_and_three_samples_leave_quadrature_empty() {
        use crate::codec::BitStream;

        for mpp in [2usize, 3] {
            let pair = CarrierPair::new(5000.0, mpp).unwrap();
            // sine sampled only at 0, Tc/2, Tc: zero up to rounding
            assert!(pair.quadrature.energy() < 1e-25, "mpp = {}", mpp);
            assert!(pair.in_phase.energy() > 1.9);

            // the I rail still decodes; Q decisions carry no information
            let bits = BitStream::from_bits(vec![1, 1, 0, 0, 1, 0, 0, 1]).unwrap();
            let signal = QamModulator::new(&pair).modulate(&bits).unwrap();
            let rx = QamDemodulator::new(&pair).demodulate(&signal.transmit).unwrap();
            let i_tx: Vec<u8> = bits.iter().step_by(2).copied().collect();
            let i_rx: Vec<u8> = rx.bits.iter().step_by(2).copied().collect();
            assert_eq!(i_rx, i_tx);
        }
    }

    #[test]
    fn test_pair_shares_geometry() {
        let pair = CarrierPair::new(2500.0, 16).unwrap();
        assert_eq!(pair.samples_per_period(), 16);
        assert_eq!(pair.quadrature.len(), 16);
        assert!((pair.period() - 4e-4).abs() < 1e-15);
    }
}
