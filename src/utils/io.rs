use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

pub fn read_binary_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

pub fn write_binary_file(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data)
}

pub fn write_to_txt(samples: &[f64], path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = io::BufWriter::new(File::create(path)?);
    for &sample in samples {
        writeln!(file, "{:.6}", sample)?;
    }
    file.flush()
}

/// 16-bit mono WAV, peak-normalised (noisy signals exceed ±1)
pub fn write_to_wav(
    signal: &[f64],
    sample_rate: u32,
    filename: &Path,
) -> io::Result<()> {
    if let Some(parent) = filename.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(filename, spec)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("{err}")))?;

    let peak = signal
        .iter()
        .fold(0.0f64, |acc, &x| acc.max(x.abs()));
    let scale = if peak > 0.0 { 1.0 / peak } else { 1.0 };
    let amplitude = i16::MAX as f64;

    for &sample in signal {
        writer
            .write_sample((sample * scale * amplitude) as i16)
            .map_err(|err| {
                io::Error::new(io::ErrorKind::Other, format!("{err}"))
            })?;
    }
    writer
        .finalize()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("{err}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("payload.bin");
        write_binary_file(&path, &[1, 2, 3, 255]).unwrap();
        assert_eq!(read_binary_file(&path).unwrap(), vec![1, 2, 3, 255]);
    }

    #[test]
    fn test_wav_is_peak_normalised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.wav");
        write_to_wav(&[0.0, 2.0, -1.0], 100_000, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 100_000);
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(samples, vec![0, i16::MAX, -(i16::MAX / 2)]);
    }

    #[test]
    fn test_txt_one_sample_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rx.txt");
        write_to_txt(&[0.5, -0.25], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "0.500000\n-0.250000\n");
    }
}
