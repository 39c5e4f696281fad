//! Stereo block-processing trait.
//!
//! The [`Effect`] trait is the seam between the DSP core and whatever drives
//! it: the plugin host lifecycle in `adt-host` and the offline renderer in
//! `adt-io` both hold effects through it.
//!
//! ## Design Decisions
//!
//! - **Stereo blocks**: ADT treats the two channels differently, so the
//!   trait works on channel pairs rather than mono samples.
//!
//! - **Fallible blocks**: A block can be refused (see [`BlockError`]). The
//!   caller decides what a refusal means for it.
//!
//! - **Object-safe**: Drivers store `Box<dyn Effect + Send>`.
//!
//! - **No allocations**: All methods are callable from a real-time audio
//!   thread.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::error::BlockError;

/// Core trait for stereo audio effects processed in blocks.
///
/// # Example
///
/// ```rust
/// use adt_core::{BlockError, Effect};
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn process_block_stereo(
///         &mut self,
///         left_in: &[f32],
///         right_in: &[f32],
///         left_out: &mut [f32],
///         right_out: &mut [f32],
///     ) -> Result<(), BlockError> {
///         left_out.copy_from_slice(right_in);
///         right_out.copy_from_slice(left_in);
///         Ok(())
///     }
///
///     fn process_block_stereo_inplace(
///         &mut self,
///         left: &mut [f32],
///         right: &mut [f32],
///     ) -> Result<(), BlockError> {
///         left.swap_with_slice(right);
///         Ok(())
///     }
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process one stereo block from separate input and output buffers.
    ///
    /// The block length is `left_in.len()`. The other buffers must be at
    /// least that long.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) -> Result<(), BlockError>;

    /// Process one stereo block in place.
    ///
    /// The block length is `left.len()`; `right` must be at least that long.
    fn process_block_stereo_inplace(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), BlockError>;

    /// Reset internal state.
    ///
    /// Called when playback starts or restarts so no stale audio leaks into
    /// the new stream.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Used by hosts for delay compensation and by offline renderers to
    /// flush the delayed tail. Default returns 0.
    fn latency_samples(&self) -> usize {
        0
    }
}

impl<T: Effect + ?Sized> Effect for &mut T {
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) -> Result<(), BlockError> {
        (**self).process_block_stereo(left_in, right_in, left_out, right_out)
    }

    fn process_block_stereo_inplace(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), BlockError> {
        (**self).process_block_stereo_inplace(left, right)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn latency_samples(&self) -> usize {
        (**self).latency_samples()
    }
}

impl<T: Effect + ?Sized> Effect for Box<T> {
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) -> Result<(), BlockError> {
        (**self).process_block_stereo(left_in, right_in, left_out, right_out)
    }

    fn process_block_stereo_inplace(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), BlockError> {
        (**self).process_block_stereo_inplace(left, right)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn latency_samples(&self) -> usize {
        (**self).latency_samples()
    }
}
