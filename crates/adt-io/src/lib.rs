//! Offline audio I/O for the ADT effect.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for loading/saving stereo audio
//! - **File metadata**: [`read_wav_info`] for header-only inspection
//! - **Block rendering**: [`Renderer`] for driving an [`Effect`](adt_core::Effect) over a whole
//!   file in fixed or varying block sizes, the way a plugin host would
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adt_core::DelayOffsetProcessor;
//! use adt_io::{BlockPlan, Renderer, read_wav_stereo, write_wav_stereo};
//!
//! let (samples, spec) = read_wav_stereo("input.wav")?;
//!
//! let adt = DelayOffsetProcessor::new(spec.sample_rate as f32)?;
//! let mut renderer = Renderer::new(adt, BlockPlan::Fixed(512))?.with_flush(true);
//! let processed = renderer.render(&samples)?;
//!
//! write_wav_stereo("output.wav", &processed, spec)?;
//! ```

mod render;
mod wav;

pub use render::{BlockPlan, BlockSizes, RenderStats, Renderer};
pub use wav::{
    StereoSamples, SUPPORTED_BIT_DEPTHS, WavFormat, WavInfo, WavSpec, read_wav_info,
    read_wav_stereo, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The effect refused a block during rendering.
    #[error("Block rejected at sample {position}: {source}")]
    Block {
        /// Index of the first sample of the refused block.
        position: usize,
        /// Refusal reported by the effect.
        source: adt_core::BlockError,
    },

    /// The block plan cannot drive an effect.
    #[error("Invalid block plan: {0}")]
    InvalidBlockPlan(&'static str),

    /// The requested bit depth is not one of 16, 24 or 32.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
