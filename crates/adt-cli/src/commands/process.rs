//! File-based ADT processing command.

use adt_config::{BlockSizing, RenderConfig};
use adt_core::{DelayOffsetProcessor, MIN_SAMPLE_RATE};
use adt_io::{BlockPlan, Renderer, read_wav_stereo, write_wav_stereo};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;

/// Inclusive block size range parsed from `MIN..MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaryRange {
    min: usize,
    max: usize,
}

impl FromStr for VaryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once("..")
            .ok_or_else(|| format!("invalid range '{s}' (expected MIN..MAX)"))?;
        let max = max.strip_prefix('=').unwrap_or(max);
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid block size '{v}': {e}"))
        };
        Ok(Self {
            min: parse(min)?,
            max: parse(max)?,
        })
    }
}

/// Arguments for `adt process`.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Fixed processing block size
    #[arg(long, conflicts_with = "vary")]
    block_size: Option<usize>,

    /// Vary block sizes pseudo-randomly within MIN..MAX
    #[arg(long, value_name = "MIN..MAX")]
    vary: Option<VaryRange>,

    /// Seed for varying block sizes (from --vary or the config file)
    #[arg(long)]
    seed: Option<u32>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Append silence so the delayed right-channel tail is not cut off
    #[arg(long)]
    flush: bool,

    /// Render config file (TOML); defaults to the user config file if present
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ProcessArgs {
    /// Applies command-line overrides on top of `config`.
    fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(block_size) = self.block_size {
            config = config.with_block_size(block_size);
        }
        if let Some(range) = self.vary {
            config = config.with_vary(range.min, range.max);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(bit_depth) = self.bit_depth {
            config = config.with_bit_depth(bit_depth);
        }
        if self.flush {
            config = config.with_flush(true);
        }
        config
    }
}

fn block_plan(sizing: BlockSizing) -> BlockPlan {
    match sizing {
        BlockSizing::Fixed(n) => BlockPlan::Fixed(n),
        BlockSizing::Varying { min, max, seed } => BlockPlan::Varying { min, max, seed },
    }
}

/// Run the process command.
pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let config = args.apply(RenderConfig::load_or_default(args.config.as_deref())?);
    config.validate()?;
    tracing::debug!(?config, "render config");

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    if sample_rate < MIN_SAMPLE_RATE {
        anyhow::bail!(
            "sample rate {} Hz is below the minimum of {} Hz",
            spec.sample_rate,
            MIN_SAMPLE_RATE
        );
    }

    let adt = DelayOffsetProcessor::new(sample_rate)?;
    let offset = adt.offset_samples();
    let plan = block_plan(config.block_sizing());
    let mut renderer = Renderer::new(adt, plan)?.with_flush(config.flush);

    match plan {
        BlockPlan::Fixed(n) => println!("Processing in {n}-sample blocks..."),
        BlockPlan::Varying { min, max, seed } => {
            println!("Processing in {min}..={max}-sample blocks (seed {seed})...");
        }
    }
    println!("  Right channel offset: {offset} samples");

    let pb = ProgressBar::new(renderer.output_len(samples.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = renderer.render_with_progress(&samples, |n| pb.inc(n as u64))?;
    pb.finish_with_message("done");

    let stats = renderer.stats();
    println!(
        "\n{} blocks ({}..={} samples), {} samples flushed",
        stats.blocks, stats.min_block, stats.max_block, stats.flushed
    );

    let out_spec = spec.with_bit_depth(config.bit_depth);
    println!("Writing {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}
