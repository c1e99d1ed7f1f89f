/// Energy-detection demodulator for the paired I/Q rails
use super::CarrierPair;
use crate::codec::BitStream;
use crate::error::{LinkError, LinkResult};
use rayon::prelude::*;
use tracing::{debug, info};

/// Recovered bits plus the diagnostic waveform and per-symbol correlations
#[derive(Clone, Debug, Default)]
pub struct Demodulated {
    pub bits: BitStream,
    /// prod_I + prod_Q for every window, for plotting only
    pub waveform: Vec<f64>,
    pub in_phase_energy: Vec<f64>,
    pub quadrature_energy: Vec<f64>,
}

pub struct QamDemodulator<'a> {
    carriers: &'a CarrierPair,
}

impl<'a> QamDemodulator<'a> {
    pub fn new(carriers: &'a CarrierPair) -> Self {
        Self { carriers }
    }

    /// Correlate every `mpp` window against both carriers and decide each rail
    pub fn demodulate(&self, received: &[f64]) -> LinkResult<Demodulated> {
        let mpp = self.carriers.samples_per_period();
        if received.len() % mpp != 0 {
            return Err(LinkError::invalid_length(
                "demodulator",
                format!(
                    "received {} samples, not a multiple of {} samples per period",
                    received.len(),
                    mpp
                ),
            ));
        }

        let symbol_count = received.len() / mpp;
        let carrier_i = self.carriers.in_phase.samples();
        let carrier_q = self.carriers.quadrature.samples();

        debug!(
            "Es_I = {:.4}, Es_Q = {:.4}",
            self.carriers.in_phase.energy(),
            self.carriers.quadrature.energy()
        );

        let mut waveform = vec![0.0; received.len()];
        let energies: Vec<(f64, f64)> = if symbol_count == 0 {
            Vec::new()
        } else {
            waveform
                .par_chunks_mut(mpp)
                .zip(received.par_chunks(mpp))
                .map(|(out, window)| {
                    let mut ep_i = 0.0;
                    let mut ep_q = 0.0;
                    for (k, &sample) in window.iter().enumerate() {
                        let product_i = sample * carrier_i[k];
                        let product_q = sample * carrier_q[k];
                        ep_i += product_i;
                        ep_q += product_q;
                        out[k] = product_i + product_q;
                    }
                    (ep_i, ep_q)
                })
                .collect()
        };

        // interleave back in original order: even positions I, odd positions Q
        let mut bits = Vec::with_capacity(2 * symbol_count);
        for &(ep_i, ep_q) in &energies {
            bits.push(decide(ep_i));
            bits.push(decide(ep_q));
        }

        let (in_phase_energy, quadrature_energy): (Vec<f64>, Vec<f64>) =
            energies.into_iter().unzip();

        info!(
            "Demodulated {} symbols into {} bits",
            symbol_count,
            bits.len()
        );

        Ok(Demodulated {
            bits: BitStream::from_bits(bits)?,
            waveform,
            in_phase_energy,
            quadrature_energy,
        })
    }
}

/// Bit 1 iff the correlation energy is strictly positive; exactly 0.0 gives 0
pub fn decide(energy: f64) -> u8 {
    if energy > 0.0 { 1 } else { 0 }
}
