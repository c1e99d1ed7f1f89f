use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qamlink_rs::payload::{Dimensions, Payload};
use qamlink_rs::sweep::{run_sweep, snr_range};
use qamlink_rs::ui::{self, progress::ProgressManager};
use qamlink_rs::utils::consts::*;
use qamlink_rs::utils::io::{write_binary_file, write_to_txt, write_to_wav};
use qamlink_rs::utils::logging::init_logging;
use qamlink_rs::{LinkConfig, QamLink, bytes_to_bits};
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LinkArgs {
    /// JSON link configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Carrier frequency [Hz]
    #[arg(long)]
    fc: Option<f64>,
    /// Samples per carrier period
    #[arg(long)]
    mpp: Option<usize>,
    /// Noise seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one payload through the link and report bit errors
    Simulate {
        #[command(flatten)]
        link: LinkArgs,
        /// Channel SNR [dB]
        #[arg(long, allow_hyphen_values = true)]
        snr: Option<f64>,
        #[arg(short, long, conflicts_with = "random_bytes")]
        input: Option<PathBuf>,
        /// Use a random payload of this many bytes
        #[arg(long)]
        random_bytes: Option<usize>,
        /// Payload shape, e.g. 120x80x3
        #[arg(long)]
        shape: Option<Dimensions>,
        /// Write the recovered bytes here
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the first samples of every signal as JSON
        #[arg(long)]
        dump: Option<PathBuf>,
        #[arg(long, default_value_t = DUMP_WINDOW_SAMPLES)]
        dump_samples: usize,
        /// Write tx/rx/demodulated signals as WAV and text files
        #[arg(long)]
        wav_dir: Option<PathBuf>,
    },
    /// BER versus SNR over many seeded trials
    Sweep {
        #[command(flatten)]
        link: LinkArgs,
        #[arg(long, default_value_t = DEFAULT_SWEEP_SNR_START, allow_hyphen_values = true)]
        snr_start: f64,
        #[arg(long, default_value_t = DEFAULT_SWEEP_SNR_STOP, allow_hyphen_values = true)]
        snr_stop: f64,
        #[arg(long, default_value_t = DEFAULT_SWEEP_SNR_STEP)]
        snr_step: f64,
        #[arg(long, default_value_t = DEFAULT_SWEEP_TRIALS)]
        trials: usize,
        #[arg(long, default_value_t = DEFAULT_SWEEP_PAYLOAD_BYTES)]
        random_bytes: usize,
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn load_config(args: &LinkArgs, snr: Option<f64>) -> anyhow::Result<LinkConfig> {
    let mut config = match &args.config {
        Some(path) => LinkConfig::from_json_file(path)?,
        None => LinkConfig::default(),
    };
    if let Some(fc) = args.fc {
        config.carrier_freq = fc;
    }
    if let Some(mpp) = args.mpp {
        config.samples_per_period = mpp;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(snr) = snr {
        config.snr_db = snr;
    }
    config.validate()?;
    Ok(config)
}

fn seeded_rng(seed: Option<u64>) -> rand::rngs::StdRng {
    match seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_os_rng(),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            link,
            snr,
            input,
            random_bytes,
            shape,
            output,
            dump,
            dump_samples,
            wav_dir,
        } => {
            let config = load_config(&link, snr)?;
            ui::print_banner(&config);

            let payload = match (input, random_bytes) {
                (Some(path), _) => Payload::from_file(&path, shape)
                    .with_context(|| format!("loading payload {}", path.display()))?,
                (None, Some(n)) => Payload::random(n, &mut seeded_rng(config.seed)),
                (None, None) => anyhow::bail!("either --input or --random-bytes is required"),
            };

            let qam = QamLink::new(config.clone())?;
            let report = qam.simulate(&payload)?;
            let tx = &report.transmission;

            if let Some(path) = output {
                write_binary_file(&path, &report.recovered.bytes)?;
                info!(
                    "Recovered payload ({}) written to {}",
                    report.recovered.dimensions,
                    path.display()
                );
            }
            if let Some(path) = dump {
                tx.dump(&config, dump_samples).save_json(&path)?;
                info!("Signal dump written to {}", path.display());
            }
            if let Some(dir) = wav_dir {
                let rate = config.sample_rate().round() as u32;
                write_to_wav(&tx.signal.transmit, rate, &dir.join("transmit.wav"))?;
                write_to_wav(&tx.received, rate, &dir.join("received.wav"))?;
                write_to_wav(&tx.demodulated.waveform, rate, &dir.join("demodulated.wav"))?;
                write_to_txt(&tx.received, &dir.join("received.txt"))?;
                info!("Signals written to {}", dir.display());
            }

            println!("{}", tx.report);
        }
        Commands::Sweep {
            link,
            snr_start,
            snr_stop,
            snr_step,
            trials,
            random_bytes,
            json,
        } => {
            let config = load_config(&link, None)?;
            ui::print_banner(&config);

            let snrs = snr_range(snr_start, snr_stop, snr_step)?;
            let payload = Payload::random(random_bytes, &mut seeded_rng(config.seed));
            let bits = bytes_to_bits(&payload.bytes);

            let progress = ProgressManager::new();
            let points = run_sweep(&bits, &config, &snrs, trials, &progress)?;
            ui::print_sweep_table(&points);

            if let Some(path) = json {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(std::io::BufWriter::new(file), &points)?;
                info!("Sweep results written to {}", path.display());
            }
        }
    }

    Ok(())
}
