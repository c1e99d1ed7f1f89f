/// One period of the in-phase / quadrature carriers
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarrierKind {
    /// cos(2π fc t)
    InPhase,
    /// sin(2π fc t)
    Quadrature,
}

impl CarrierKind {
    pub fn name(&self) -> &'static str {
        match self {
            CarrierKind::InPhase => "I",
            CarrierKind::Quadrature => "Q",
        }
    }
}

/// A single sampled carrier period, shared read-only by modulator and demodulator
#[derive(Clone, Debug)]
pub struct Carrier {
    kind: CarrierKind,
    carrier_freq: f64,
    samples: Vec<f64>,
}

impl Carrier {
    /// Sample one period with `mpp` points spanning the closed interval
    /// `[0, 1/fc]`. The last sample sits exactly on the period boundary.
    pub fn generate(carrier_freq: f64, mpp: usize, kind: CarrierKind) -> Self {
        let samples = linspace(0.0, 1.0 / carrier_freq, mpp)
            .into_iter()
            .map(|t| {
                let phase = 2.0 * PI * carrier_freq * t;
                match kind {
                    CarrierKind::InPhase => phase.cos(),
                    CarrierKind::Quadrature => phase.sin(),
                }
            })
            .collect();

        Self {
            kind,
            carrier_freq,
            samples,
        }
    }

    pub fn kind(&self) -> CarrierKind {
        self.kind
    }

    pub fn carrier_freq(&self) -> f64 {
        self.carrier_freq
    }

    pub fn period(&self) -> f64 {
        1.0 / self.carrier_freq
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Pseudo-energy of one period: Σ c[k]²
    pub fn energy(&self) -> f64 {
        self.samples.iter().map(|c| c * c).sum()
    }
}

/// `num` evenly spaced points over `[start, stop]`, both ends included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut points: Vec<f64> = (0..num)
                .map(|k| start + step * k as f64)
                .collect();
            // exact endpoint, no accumulated rounding
            points[num - 1] = stop;
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_includes_endpoints() {
        let t = linspace(0.0, 1.0, 5);
        assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_linspace_last_point_is_stop_exactly() {
        for (stop, num) in [(0.1, 7usize), (1.0 / 5000.0, 20), (0.3, 11), (4.0 * 1.0 / 3000.0, 80)] {
            let t = linspace(0.0, stop, num);
            assert_eq!(t.len(), num);
            assert_eq!(t[num - 1], stop);
        }
    }

    #[test]
    fn test_cosine_endpoint_duplicates_first_sample() {
        let carrier = Carrier::generate(5000.0, 20, CarrierKind::InPhase);
        assert_eq!(carrier.len(), 20);
        assert!((carrier.samples()[0] - 1.0).abs() < 1e-12);
        // last sample lands on one full period
        assert!((carrier.samples()[19] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sine_starts_and_ends_at_zero() {
        let carrier = Carrier::generate(5000.0, 20, CarrierKind::Quadrature);
        assert!(carrier.samples()[0].abs() < 1e-12);
        assert!(carrier.samples()[19].abs() < 1e-9);
        let peak = carrier
            .samples()
            .iter()
            .fold(0.0f64, |acc, &x| acc.max(x.abs()));
        assert!(peak <= 1.0 && peak > 0.95);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Carrier::generate(1234.5, 33, CarrierKind::Quadrature);
        let b = Carrier::generate(1234.5, 33, CarrierKind::Quadrature);
        assert_eq!(a.samples(), b.samples());
        assert!(a.energy() > 0.0);
    }
}
