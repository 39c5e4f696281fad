//! Test signal generation command.

use adt_io::{StereoSamples, WavSpec, write_wav_stereo};
use clap::{Args, ValueEnum};
use std::f32::consts::PI;
use std::path::PathBuf;

/// Test signal shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Signal {
    /// Linear ramp from `-amplitude` to `+amplitude`
    Ramp,
    /// Sine tone at `--frequency`
    #[default]
    Sine,
    /// One sample of `amplitude` at frame 0, then silence
    Impulse,
}

/// Arguments for `adt generate`.
#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Signal shape (identical on both channels)
    #[arg(long, value_enum, default_value_t = Signal::Sine)]
    signal: Signal,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Sine frequency in Hz
    #[arg(long, default_value = "440.0")]
    frequency: f32,

    /// Amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Frames that fit in a stereo WAV data chunk at `bit_depth`.
fn max_frames(bit_depth: u16) -> u64 {
    let bytes_per_frame = 2 * u64::from(bit_depth.div_ceil(8).max(1));
    u64::from(u32::MAX) / bytes_per_frame
}

/// Number of frames for `duration` seconds at `sample_rate`.
///
/// Fails if the result would not fit in a WAV file.
fn frame_count(duration: f32, sample_rate: u32, bit_depth: u16) -> anyhow::Result<usize> {
    let frames = (f64::from(duration) * f64::from(sample_rate)).round();
    let limit = max_frames(bit_depth);
    if frames > limit as f64 {
        anyhow::bail!(
            "{duration}s at {sample_rate} Hz needs {frames} frames, \
             more than the {limit} a {bit_depth}-bit stereo WAV can hold"
        );
    }
    Ok(frames as usize)
}

/// Builds `frames` samples of `signal`.
pub fn render_signal(
    signal: Signal,
    frames: usize,
    sample_rate: u32,
    frequency: f32,
    amplitude: f32,
) -> Vec<f32> {
    match signal {
        Signal::Ramp => {
            let span = frames.saturating_sub(1).max(1) as f32;
            (0..frames)
                .map(|i| amplitude * (2.0 * i as f32 / span - 1.0))
                .collect()
        }
        Signal::Sine => {
            let step = 2.0 * PI * frequency / sample_rate as f32;
            (0..frames)
                .map(|i| amplitude * (step * i as f32).sin())
                .collect()
        }
        Signal::Impulse => {
            let mut samples = vec![0.0; frames];
            if let Some(first) = samples.first_mut() {
                *first = amplitude;
            }
            samples
        }
    }
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("duration must be positive, got {}", args.duration);
    }
    if args.sample_rate == 0 {
        anyhow::bail!("sample rate must be positive");
    }

    let frames = frame_count(args.duration, args.sample_rate, args.bit_depth)?;
    let mono = render_signal(
        args.signal,
        frames,
        args.sample_rate,
        args.frequency,
        args.amplitude.clamp(0.0, 1.0),
    );
    let samples = StereoSamples::from_mono(mono);

    let spec = WavSpec::stereo(args.sample_rate).with_bit_depth(args.bit_depth);
    write_wav_stereo(&args.output, &samples, spec)?;

    tracing::info!(
        signal = ?args.signal,
        frames,
        sample_rate = args.sample_rate,
        "generated test signal"
    );
    println!(
        "Wrote {:?} signal: {} frames at {} Hz to {}",
        args.signal,
        frames,
        args.sample_rate,
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_spans_full_range() {
        let ramp = render_signal(Signal::Ramp, 5, 48000, 440.0, 1.0);
        assert_eq!(ramp, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn impulse_is_single_sample() {
        let imp = render_signal(Signal::Impulse, 4, 48000, 440.0, 0.5);
        assert_eq!(imp, vec![0.5, 0.0, 0.0, 0.0]);
        assert!(render_signal(Signal::Impulse, 0, 48000, 440.0, 0.5).is_empty());
    }

    #[test]
    fn frame_count_rounds_duration() {
        assert_eq!(frame_count(1.0, 48000, 32).unwrap(), 48000);
        assert_eq!(frame_count(0.5, 44100, 16).unwrap(), 22050);
    }

    #[test]
    fn frame_count_rejects_oversized_files() {
        assert!(frame_count(1.0e9, 48000, 32).is_err());
        assert!(frame_count(f32::MAX, 48000, 16).is_err());

        let limit = max_frames(16) as f32;
        assert!(frame_count(limit / 2000.0, 1000, 16).is_ok());
        assert!(frame_count(limit / 500.0, 1000, 16).is_err());
    }

    #[test]
    fn sine_stays_within_amplitude() {
        let sine = render_signal(Signal::Sine, 4800, 48000, 1000.0, 0.8);
        assert_eq!(sine[0], 0.0);
        assert!(sine.iter().all(|s| s.abs() <= 0.8 + 1e-6));
    }
}
