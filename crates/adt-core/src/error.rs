//! Error types for processor construction and block processing.
//!
//! Construction failures ([`AdtError`]) mean no processor exists. Block
//! failures ([`BlockError`]) are never fatal: the rejected call performs no
//! writes and the processor stays usable for the next block.

use thiserror::Error;

/// Errors that can occur while constructing a processor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdtError {
    /// The carry-over buffer could not be allocated.
    #[error("failed to allocate carry-over buffer of {requested} samples")]
    ResourceExhausted {
        /// Number of samples that were requested.
        requested: usize,
    },

    /// The sample rate is not a finite, positive number.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),
}

/// Reasons a block was refused.
///
/// A refused block leaves every output buffer and the carry-over state
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BlockError {
    /// The block holds fewer than two samples.
    #[error("block of {total} sample(s) is too short to process")]
    TooFewSamples {
        /// Requested sample count.
        total: usize,
    },

    /// The processor's sample rate is below [`MIN_SAMPLE_RATE`](crate::MIN_SAMPLE_RATE).
    #[error("sample rate {sample_rate} Hz is below the 1000 Hz minimum")]
    SampleRateTooLow {
        /// The processor's sample rate.
        sample_rate: f32,
    },

    /// A channel buffer is shorter than the requested sample count.
    #[error("channel buffer holds {len} samples but the block needs {total}")]
    BufferTooShort {
        /// Requested sample count.
        total: usize,
        /// Length of the shortest buffer supplied.
        len: usize,
    },
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn resource_exhausted_display() {
        let err = AdtError::ResourceExhausted { requested: 220 };
        assert_eq!(
            err.to_string(),
            "failed to allocate carry-over buffer of 220 samples"
        );
    }

    #[test]
    fn too_few_samples_display() {
        let err = BlockError::TooFewSamples { total: 1 };
        assert_eq!(
            err.to_string(),
            "block of 1 sample(s) is too short to process"
        );
    }

    #[test]
    fn buffer_too_short_display() {
        let err = BlockError::BufferTooShort {
            total: 512,
            len: 256,
        };
        let msg = err.to_string();
        assert!(msg.contains("256"), "got: {msg}");
        assert!(msg.contains("512"), "got: {msg}");
    }
}
