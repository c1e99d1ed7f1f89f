/// End-to-end link: bits -> QAM -> channel -> energy detection -> bits
use crate::ber::{self, ErrorReport};
use crate::channel::{AwgnChannel, Channel};
use crate::codec::{BitStream, bits_to_bytes, bytes_to_bits};
use crate::config::LinkConfig;
use crate::error::LinkResult;
use crate::modem::{CarrierPair, Demodulated, ModulatedSignal, QamDemodulator, QamModulator};
use crate::payload::Payload;
use crate::utils::dump::{SignalDump, window};
use tracing::info;

/// Signals and bits of one pass through the chain
#[derive(Clone, Debug)]
pub struct Transmission {
    pub tx_bits: BitStream,
    pub signal: ModulatedSignal,
    pub received: Vec<f64>,
    pub demodulated: Demodulated,
    pub report: ErrorReport,
}

#[derive(Clone, Debug)]
pub struct LinkReport {
    pub transmission: Transmission,
    pub recovered: Payload,
}

impl Transmission {
    pub fn rx_bits(&self) -> &BitStream {
        &self.demodulated.bits
    }

    pub fn dump(&self, config: &LinkConfig, samples: usize) -> SignalDump {
        SignalDump {
            carrier_freq: config.carrier_freq,
            samples_per_period: config.samples_per_period,
            snr_db: config.snr_db,
            time: window(&self.signal.time, samples),
            transmit: window(&self.signal.transmit, samples),
            received: window(&self.received, samples),
            demodulated: window(&self.demodulated.waveform, samples),
            baseband: window(&self.signal.baseband(), samples),
        }
    }
}

pub struct QamLink {
    config: LinkConfig,
    carriers: CarrierPair,
}

impl QamLink {
    pub fn new(config: LinkConfig) -> LinkResult<Self> {
        config.validate()?;
        let carriers = CarrierPair::new(config.carrier_freq, config.samples_per_period)?;
        info!(
            "QAM link: fc = {} Hz, mpp = {}, SNR = {} dB",
            config.carrier_freq, config.samples_per_period, config.snr_db
        );
        Ok(Self { config, carriers })
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// AWGN channel at the configured SNR, seeded when the config has a seed
    pub fn awgn_channel(&self) -> LinkResult<AwgnChannel> {
        match self.config.seed {
            Some(seed) => AwgnChannel::new_from_seed(self.config.snr_db, seed),
            None => AwgnChannel::new_from_entropy(self.config.snr_db),
        }
    }

    /// Push a paired bit stream through modulator, `channel` and demodulator
    pub fn transmit_bits<C: Channel>(
        &self,
        bits: &BitStream,
        channel: &mut C,
    ) -> LinkResult<Transmission> {
        let signal = QamModulator::new(&self.carriers).modulate(bits)?;
        let received = channel.transmit(&signal.transmit, signal.average_power)?;
        let demodulated = QamDemodulator::new(&self.carriers).demodulate(&received)?;
        let report = ber::evaluate(bits, &demodulated.bits)?;

        info!("Channel '{}': {}", channel.name(), report);

        Ok(Transmission {
            tx_bits: bits.clone(),
            signal,
            received,
            demodulated,
            report,
        })
    }

    /// Full run on a payload: encode, transmit, decode, refold
    pub fn run<C: Channel>(&self, payload: &Payload, channel: &mut C) -> LinkResult<LinkReport> {
        let bits = bytes_to_bits(&payload.bytes);
        let transmission = self.transmit_bits(&bits, channel)?;

        let rx_bits = transmission.rx_bits();
        let bytes = bits_to_bytes(rx_bits, rx_bits.len())?;
        let recovered = Payload::reconstruct(bytes, &payload.dimensions)?;

        Ok(LinkReport {
            transmission,
            recovered,
        })
    }

    /// `run` over the configured AWGN channel
    pub fn simulate(&self, payload: &Payload) -> LinkResult<LinkReport> {
        let mut channel = self.awgn_channel()?;
        self.run(payload, &mut channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::IdealChannel;

    fn config(snr_db: f64) -> LinkConfig {
        LinkConfig {
            snr_db,
            seed: Some(2024),
            ..LinkConfig::default()
        }
    }

    #[test]
    fn test_noiseless_payload_survives() {
        let link = QamLink::new(config(0.0)).unwrap();
        let payload = Payload::flat(b"arenal".to_vec());

        let report = link.run(&payload, &mut IdealChannel).unwrap();
        assert_eq!(report.recovered, payload);
        assert!(report.transmission.report.is_error_free());
        assert_eq!(report.transmission.signal.transmit.len(), 6 * 4 * 20);
    }

    #[test]
    fn test_high_snr_is_error_free() {
        let link = QamLink::new(config(30.0)).unwrap();
        let payload = Payload::flat((0..=255).collect());
        let report = link.simulate(&payload).unwrap();
        assert_eq!(report.transmission.report.errors, 0);
        assert_eq!(report.recovered.bytes, payload.bytes);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let link = QamLink::new(config(-5.0)).unwrap();
        let payload = Payload::flat(vec![0x5A; 64]);
        let a = link.simulate(&payload).unwrap();
        let b = link.simulate(&payload).unwrap();
        assert_eq!(a.transmission.received, b.transmission.received);
        assert_eq!(a.transmission.report.errors, b.transmission.report.errors);
    }

    #[test]
    fn test_empty_payload() {
        let link = QamLink::new(config(0.0)).unwrap();
        let report = link.simulate(&Payload::flat(Vec::new())).unwrap();
        let tx = &report.transmission;
        assert!(tx.signal.transmit.is_empty());
        assert!(tx.received.is_empty());
        assert_eq!(tx.report.errors, 0);
        assert!(!tx.report.is_defined());
        assert!(report.recovered.is_empty());
    }

    #[test]
    fn test_dump_window() {
        let link = QamLink::new(config(10.0)).unwrap();
        let payload = Payload::flat(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let report = link.simulate(&payload).unwrap();
        let dump = report.transmission.dump(link.config(), 100);
        assert_eq!(dump.transmit.len(), 100);
        assert_eq!(dump.received.len(), 100);
        assert_eq!(dump.demodulated.len(), 100);
        assert_eq!(dump.samples_per_period, 20);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut bad = config(0.0);
        bad.samples_per_period = 1;
        assert!(QamLink::new(bad).is_err());
    }
}
