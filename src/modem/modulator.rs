/// Bipolar keying of the I/Q rails and passband combination
use super::carrier::{Carrier, CarrierKind, linspace};
use super::CarrierPair;
use crate::codec::BitStream;
use crate::error::{LinkError, LinkResult};
use rayon::prelude::*;
use tracing::{debug, info};

/// Output of one rail: the keyed carrier and its 0/1 information waveform
#[derive(Clone, Debug, Default)]
pub struct RailSignal {
    pub waveform: Vec<f64>,
    pub baseband: Vec<f64>,
}

/// Everything the transmitter hands downstream
#[derive(Clone, Debug)]
pub struct ModulatedSignal {
    /// I + Q, sample-wise
    pub transmit: Vec<f64>,
    pub in_phase: RailSignal,
    pub quadrature: RailSignal,
    /// Simulation time grid, `linspace(0, N·Tc, N·mpp)`
    pub time: Vec<f64>,
    /// Carrier period Tc (s)
    pub period: f64,
    /// Number of symbol intervals N
    pub symbol_count: usize,
    /// Average transmit power Pm (W)
    pub average_power: f64,
}

impl ModulatedSignal {
    /// Sum of both rails' information waveforms (0, 1 or 2 per sample)
    pub fn baseband(&self) -> Vec<f64> {
        self.in_phase
            .baseband
            .iter()
            .zip(&self.quadrature.baseband)
            .map(|(i, q)| i + q)
            .collect()
    }
}

pub struct QamModulator<'a> {
    carriers: &'a CarrierPair,
}

impl<'a> QamModulator<'a> {
    pub fn new(carriers: &'a CarrierPair) -> Self {
        Self { carriers }
    }

    /// Modulate a paired bit stream. Odd-length streams are rejected.
    pub fn modulate(&self, bits: &BitStream) -> LinkResult<ModulatedSignal> {
        if !bits.is_paired() {
            return Err(LinkError::invalid_length(
                "modulator",
                format!("I/Q pairing needs an even bit count, got {}", bits.len()),
            ));
        }
        debug!("Modulating {} I/Q symbol pairs", bits.symbol_pairs());
        Ok(self.modulate_pairs(bits))
    }

    /// Modulate without the pairing check. A trailing unpaired bit is ignored.
    pub fn modulate_pairs(&self, bits: &[u8]) -> ModulatedSignal {
        let symbol_count = bits.len() / 2;
        let mpp = self.carriers.samples_per_period();
        let period = self.carriers.period();

        let in_phase = self.modulate_rail(bits, &self.carriers.in_phase);
        let quadrature = self.modulate_rail(bits, &self.carriers.quadrature);

        let transmit: Vec<f64> = in_phase
            .waveform
            .iter()
            .zip(&quadrature.waveform)
            .map(|(i, q)| i + q)
            .collect();

        let time = linspace(0.0, symbol_count as f64 * period, symbol_count * mpp);
        let average_power = average_power(&transmit, &time, symbol_count as f64 * period);

        info!(
            "Modulated {} bits into {} symbols ({} samples), Pm = {:.6} W",
            bits.len(),
            symbol_count,
            transmit.len(),
            average_power
        );

        ModulatedSignal {
            transmit,
            in_phase,
            quadrature,
            time,
            period,
            symbol_count,
            average_power,
        }
    }

    /// Key one rail: bit 2k feeds the in-phase rail, bit 2k+1 the quadrature rail.
    /// Symbol 1 emits the carrier, symbol 0 its negation.
    pub fn modulate_rail(&self, bits: &[u8], carrier: &Carrier) -> RailSignal {
        let offset = match carrier.kind() {
            CarrierKind::InPhase => 0,
            CarrierKind::Quadrature => 1,
        };
        let symbols: Vec<u8> = bits
            .iter()
            .skip(offset)
            .step_by(2)
            .take(bits.len() / 2)
            .copied()
            .collect();

        let mpp = carrier.len();
        let total = symbols.len() * mpp;
        if total == 0 {
            return RailSignal::default();
        }

        let mut waveform = vec![0.0; total];
        let mut baseband = vec![0.0; total];

        waveform
            .par_chunks_mut(mpp)
            .zip(baseband.par_chunks_mut(mpp))
            .zip(symbols.par_iter())
            .for_each(|((wave, level), &symbol)| {
                if symbol == 1 {
                    wave.copy_from_slice(carrier.samples());
                    level.fill(1.0);
                } else {
                    for (out, &c) in wave.iter_mut().zip(carrier.samples()) {
                        *out = -c;
                    }
                }
            });

        debug!(
            "{} rail: {} symbols, {} samples",
            carrier.kind().name(),
            symbols.len(),
            total
        );

        RailSignal { waveform, baseband }
    }
}

/// Trapezoidal integral of `y` over the grid `x`
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| (xw[1] - xw[0]) * (yw[0] + yw[1]) / 2.0)
        .sum()
}

/// Time-average of `signal²` over `duration`. An empty signal has zero power.
pub fn average_power(signal: &[f64], time: &[f64], duration: f64) -> f64 {
    if signal.is_empty() || duration <= 0.0 {
        return 0.0;
    }
    let squared: Vec<f64> = signal.iter().map(|s| s * s).collect();
    trapezoid(&squared, time) / duration
}
