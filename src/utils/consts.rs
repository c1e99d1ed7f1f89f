/// Default log level, overridable through RUST_LOG
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Link Parameters
// ============================================================================

/// Carrier frequency shared by the I and Q rails (Hz)
pub const DEFAULT_CARRIER_FREQ: f64 = 5000.0;

/// Samples per carrier period
pub const DEFAULT_SAMPLES_PER_PERIOD: usize = 20;

/// Channel signal-to-noise ratio (dB)
pub const DEFAULT_SNR_DB: f64 = -5.0;

/// Smallest accepted samples-per-period (linspace needs two points).
/// At 2 or 3 the endpoint-inclusive sine carrier samples to (numerically)
/// zero, so the Q rail carries no energy.
pub const MIN_SAMPLES_PER_PERIOD: usize = 2;

/// Samples kept in a signal dump for plotting
pub const DUMP_WINDOW_SAMPLES: usize = 600;

// ============================================================================
// Sweep Parameters
// ============================================================================

pub const DEFAULT_SWEEP_SNR_START: f64 = -10.0;

pub const DEFAULT_SWEEP_SNR_STOP: f64 = 10.0;

pub const DEFAULT_SWEEP_SNR_STEP: f64 = 2.0;

pub const DEFAULT_SWEEP_TRIALS: usize = 20;

/// Upper bound on SNR points in one sweep
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Random payload size for sweeps (bytes)
pub const DEFAULT_SWEEP_PAYLOAD_BYTES: usize = 256;
