//! Delay-offset stream processor.
//!
//! Delays the right channel by a fixed number of samples across a stream of
//! variably sized blocks, using a carry-over buffer that holds the right
//! input not yet emitted.
//!
//! ```text
//!            block N input (right)                  carry (after N-1)
//!   ┌──────────────────────┬──────────┐            ┌──────────┐
//!   │  head: total-offset  │   tail   │            │  offset  │
//!   └──────────┬───────────┴────┬─────┘            └────┬─────┘
//!              │                └──────► carry (after N) │
//!              ▼                                        ▼
//!   output:  ┌──────────┬──────────────────────┐
//!            │  carry   │        head          │
//!            └──────────┴──────────────────────┘
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::effect::Effect;
use crate::error::{AdtError, BlockError};
use crate::offset::{MIN_SAMPLE_RATE, offset_samples};

/// Streaming fixed-offset delay for the right channel of a stereo pair.
///
/// The left channel is the timing reference and passes through unchanged.
/// The right channel comes out [`offset_samples`](Self::offset_samples)
/// late; on a fresh (reset) processor that offset is filled with silence.
///
/// # Lifecycle
///
/// 1. [`new`](Self::new) allocates the carry-over buffer.
/// 2. [`reset`](Self::reset) zero-fills it. Call before the first block and
///    whenever playback restarts.
/// 3. [`process`](Self::process) / [`process_inplace`](Self::process_inplace)
///    run once per block.
/// 4. Dropping the processor releases the buffer.
///
/// # Block sizes
///
/// Blocks may vary in size from call to call. Blocks shorter than the offset
/// are supported: their output comes entirely from the carried samples and
/// the carry-over buffer shifts by the block length.
///
/// # Example
///
/// ```rust
/// use adt_core::DelayOffsetProcessor;
///
/// let mut adt = DelayOffsetProcessor::new(8000.0).unwrap();
/// adt.reset();
/// assert_eq!(adt.offset_samples(), 40);
///
/// let ramp: Vec<f32> = (0..64).map(|i| i as f32).collect();
/// let mut left = [0.0; 64];
/// let mut right = [0.0; 64];
/// adt.process(64, &ramp, &ramp, &mut left, &mut right).unwrap();
///
/// assert_eq!(right[40], 0.0);
/// assert_eq!(right[63], 23.0);
/// assert_eq!(adt.carry()[0], 24.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayOffsetProcessor {
    sample_rate: f32,
    offset_samples: usize,
    /// Right-channel input received but not yet emitted, oldest first.
    carry: Vec<f32>,
}

impl DelayOffsetProcessor {
    /// Creates a processor for the given sample rate.
    ///
    /// The offset is derived once from the rate. A rate so low that the
    /// offset rounds to zero is accepted here, but such a processor refuses
    /// every block (see [`MIN_SAMPLE_RATE`]).
    ///
    /// # Errors
    ///
    /// - [`AdtError::InvalidSampleRate`] if `sample_rate` is not finite and
    ///   positive.
    /// - [`AdtError::ResourceExhausted`] if the carry-over buffer cannot be
    ///   allocated. No partial processor is returned.
    pub fn new(sample_rate: f32) -> Result<Self, AdtError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AdtError::InvalidSampleRate(sample_rate));
        }

        let offset_samples = offset_samples(sample_rate);
        let mut carry = Vec::new();
        carry
            .try_reserve_exact(offset_samples)
            .map_err(|_| AdtError::ResourceExhausted {
                requested: offset_samples,
            })?;
        carry.resize(offset_samples, 0.0);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, offset_samples, "adt: processor created");

        Ok(Self {
            sample_rate,
            offset_samples,
            carry,
        })
    }

    /// Returns the sample rate fixed at construction.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Returns the right-channel offset in samples.
    pub fn offset_samples(&self) -> usize {
        self.offset_samples
    }

    /// Returns the carry-over buffer, oldest sample first.
    ///
    /// These samples open the right output of the next block.
    pub fn carry(&self) -> &[f32] {
        &self.carry
    }

    /// Zero-fills the carry-over buffer.
    ///
    /// The next block's right output starts with `offset_samples` of
    /// silence. Idempotent.
    pub fn reset(&mut self) {
        self.carry.fill(0.0);

        #[cfg(feature = "tracing")]
        tracing::debug!(offset_samples = self.offset_samples, "adt: carry reset");
    }

    /// Processes one block of `total_samples` from separate input and output
    /// buffers.
    ///
    /// - `output_left[..total]` receives `input_left[..total]` unchanged.
    /// - `output_right` receives the carried samples followed by the head
    ///   of `input_right`; the unconsumed tail of `input_right` becomes the
    ///   new carry.
    ///
    /// Buffers may be longer than `total_samples`; samples past it are
    /// neither read nor written.
    ///
    /// # Errors
    ///
    /// Returns a [`BlockError`] and writes nothing (outputs and carry stay
    /// as they were) if `total_samples <= 1`, the sample rate is below
    /// [`MIN_SAMPLE_RATE`], or any buffer is shorter than `total_samples`.
    pub fn process(
        &mut self,
        total_samples: usize,
        input_left: &[f32],
        input_right: &[f32],
        output_left: &mut [f32],
        output_right: &mut [f32],
    ) -> Result<(), BlockError> {
        let shortest = input_left
            .len()
            .min(input_right.len())
            .min(output_left.len())
            .min(output_right.len());
        self.check_block(total_samples, shortest)?;

        let total = total_samples;
        let offset = self.offset_samples;

        output_left[..total].copy_from_slice(&input_left[..total]);

        if total >= offset {
            let fresh = total - offset;
            output_right[..offset].copy_from_slice(&self.carry);
            output_right[offset..total].copy_from_slice(&input_right[..fresh]);
            self.carry.copy_from_slice(&input_right[fresh..total]);
        } else {
            // Whole block comes from the carry; the rest of it moves up.
            output_right[..total].copy_from_slice(&self.carry[..total]);
            self.carry.copy_within(total.., 0);
            self.carry[offset - total..].copy_from_slice(&input_right[..total]);
        }

        Ok(())
    }

    /// Processes one block in place, for hosts that alias inputs and outputs.
    ///
    /// `left` is untouched (passthrough). `right[..total_samples]` is replaced
    /// by its delayed version. Same stream semantics and refusals as
    /// [`process`](Self::process).
    pub fn process_inplace(
        &mut self,
        total_samples: usize,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), BlockError> {
        self.check_block(total_samples, left.len().min(right.len()))?;

        let total = total_samples;
        let offset = self.offset_samples;
        let right = &mut right[..total];

        if total >= offset {
            // Tail rotates to the front, then trades places with the carry.
            right.rotate_right(offset);
            right[..offset].swap_with_slice(&mut self.carry);
        } else {
            right.swap_with_slice(&mut self.carry[..total]);
            self.carry.rotate_left(total);
        }

        Ok(())
    }

    fn check_block(&self, total_samples: usize, shortest: usize) -> Result<(), BlockError> {
        if total_samples <= 1 {
            return Err(BlockError::TooFewSamples {
                total: total_samples,
            });
        }
        if self.sample_rate < MIN_SAMPLE_RATE {
            return Err(BlockError::SampleRateTooLow {
                sample_rate: self.sample_rate,
            });
        }
        if shortest < total_samples {
            return Err(BlockError::BufferTooShort {
                total: total_samples,
                len: shortest,
            });
        }
        Ok(())
    }
}

impl Effect for DelayOffsetProcessor {
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) -> Result<(), BlockError> {
        self.process(left_in.len(), left_in, right_in, left_out, right_out)
    }

    fn process_block_stereo_inplace(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), BlockError> {
        self.process_inplace(left.len(), left, right)
    }

    fn reset(&mut self) {
        DelayOffsetProcessor::reset(self);
    }

    fn latency_samples(&self) -> usize {
        self.offset_samples
    }
}
