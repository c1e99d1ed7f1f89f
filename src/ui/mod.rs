pub mod progress;

use crate::config::LinkConfig;
use crate::sweep::SweepPoint;

pub fn print_banner(config: &LinkConfig) {
    println!(
        "QAMLink-rs: 2 x bipolar rails @ fc={:.1} kHz, {} samples/period (Fs={:.1} kHz)",
        config.carrier_freq / 1e3,
        config.samples_per_period,
        config.sample_rate() / 1e3
    );
}

pub fn print_sweep_table(points: &[SweepPoint]) {
    println!("{:>10} {:>8} {:>12} {:>10}", "SNR [dB]", "trials", "errors", "BER");
    for point in points {
        println!(
            "{:>10.2} {:>8} {:>12} {:>10.6}",
            point.snr_db, point.trials, point.errors, point.bit_error_rate
        );
    }
}
