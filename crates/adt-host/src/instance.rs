//! Plugin instance and its lifecycle state machine.
//!
//! ```text
//! instantiate ─► Constructed ─activate─► Active ─┐
//!                     ▲                   │  ▲   │ run
//!                     └────deactivate─────┘  └───┘
//!                 cleanup (any state) ─► dropped
//! ```
//!
//! Everything here runs on the host's audio thread: `run` never allocates
//! and never locks.

use adt_core::{BlockError, DelayOffsetProcessor};
use thiserror::Error;

use crate::descriptor::PluginDescriptor;
use crate::error::HostError;
use crate::port::{PortBindings, PortRole};

/// Lifecycle state of an [`AdtInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// Instantiated; carry-over contents are not yet defined for playback.
    Constructed,
    /// Activated; `run` processes audio.
    Active,
}

/// Why a `run` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SkipReason {
    /// The host passed no instance.
    #[error("received no plugin instance")]
    NullHandle,
    /// `run` was called before `activate` (or after `deactivate`).
    #[error("plugin instance is not active")]
    Inactive,
    /// A port had no buffer bound.
    #[error("port '{0}' is not connected")]
    Unconnected(PortRole),
    /// The processor refused the block.
    #[error(transparent)]
    Block(#[from] BlockError),
}

/// Result of one `run` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// The block was processed and the output ports written.
    Processed,
    /// Nothing was written. The reason has already been logged.
    Skipped(SkipReason),
}

impl RunOutcome {
    /// Returns `true` if the block was processed.
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed)
    }
}

/// Per-instance block counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceStats {
    /// Blocks processed since instantiation.
    pub processed: u64,
    /// Blocks skipped since instantiation.
    pub skipped: u64,
}

/// A live ADT plugin instance.
///
/// Owns its [`DelayOffsetProcessor`]. Instances share no state, so several
/// can run side by side on different threads.
#[derive(Debug)]
pub struct AdtInstance {
    label: &'static str,
    processor: DelayOffsetProcessor,
    state: InstanceState,
    stats: InstanceStats,
}

impl AdtInstance {
    /// Creates an instance at the host's sample rate.
    ///
    /// # Errors
    ///
    /// - [`HostError::UnsupportedSampleRate`] if `sample_rate` is 0.
    /// - [`HostError::Instantiate`] if the processor cannot be built (e.g.
    ///   the carry-over buffer allocation fails).
    pub fn instantiate(descriptor: &PluginDescriptor, sample_rate: u64) -> Result<Self, HostError> {
        if sample_rate == 0 {
            return Err(HostError::UnsupportedSampleRate(sample_rate));
        }
        let processor = DelayOffsetProcessor::new(sample_rate as f32)?;

        tracing::debug!(
            plugin = descriptor.label,
            sample_rate,
            offset_samples = processor.offset_samples(),
            "instantiate"
        );

        Ok(Self {
            label: descriptor.label,
            processor,
            state: InstanceState::Constructed,
            stats: InstanceStats::default(),
        })
    }

    /// Resets the carry-over buffer to silence and enables `run`.
    ///
    /// Calling it on an already active instance restarts the stream.
    pub fn activate(&mut self) {
        self.processor.reset();
        self.state = InstanceState::Active;
        tracing::debug!(plugin = self.label, "activate");
    }

    /// Disables `run` until the next [`activate`](Self::activate).
    pub fn deactivate(&mut self) {
        self.state = InstanceState::Constructed;
        tracing::debug!(plugin = self.label, "deactivate");
    }

    /// Processes one block of `sample_count` samples through the bound ports.
    ///
    /// Never fails from the host's point of view: any refusal (inactive
    /// instance, unbound port, invalid block) is logged at `warn` level and
    /// reported as [`RunOutcome::Skipped`], with the output buffers left
    /// untouched.
    pub fn run(&mut self, sample_count: usize, ports: PortBindings<'_>) -> RunOutcome {
        match self.try_run(sample_count, ports) {
            Ok(()) => {
                self.stats.processed += 1;
                RunOutcome::Processed
            }
            Err(reason) => {
                self.stats.skipped += 1;
                tracing::warn!(
                    plugin = self.label,
                    sample_count,
                    %reason,
                    "plugin not executed"
                );
                RunOutcome::Skipped(reason)
            }
        }
    }

    fn try_run(&mut self, sample_count: usize, ports: PortBindings<'_>) -> Result<(), SkipReason> {
        if self.state != InstanceState::Active {
            return Err(SkipReason::Inactive);
        }
        let (input_left, input_right, output_left, output_right) =
            ports.into_buffers().map_err(SkipReason::Unconnected)?;

        self.processor.process(
            sample_count,
            input_left,
            input_right,
            output_left,
            output_right,
        )?;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Block counters.
    pub fn stats(&self) -> InstanceStats {
        self.stats
    }

    /// Sample rate the instance was created with.
    pub fn sample_rate(&self) -> f32 {
        self.processor.sample_rate()
    }

    /// Latency introduced on the right channel, in samples.
    pub fn latency_samples(&self) -> usize {
        self.processor.offset_samples()
    }

    /// Read access to the underlying processor.
    pub fn processor(&self) -> &DelayOffsetProcessor {
        &self.processor
    }
}

/// Runs `handle` if present.
///
/// Models a host passing a null instance: `None` is logged and skipped.
pub fn run_handle(
    handle: Option<&mut AdtInstance>,
    sample_count: usize,
    ports: PortBindings<'_>,
) -> RunOutcome {
    match handle {
        Some(instance) => instance.run(sample_count, ports),
        None => {
            let reason = SkipReason::NullHandle;
            tracing::warn!(sample_count, %reason, "plugin not executed");
            RunOutcome::Skipped(reason)
        }
    }
}

/// Releases an instance and its carry-over buffer.
///
/// `None` (a null or already released handle) is a no-op.
pub fn cleanup(handle: Option<AdtInstance>) {
    if let Some(instance) = handle {
        tracing::debug!(plugin = instance.label, stats = ?instance.stats, "cleanup");
        drop(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adt_core::AdtError;

    fn instance(sample_rate: u64) -> AdtInstance {
        AdtInstance::instantiate(&PluginDescriptor::adt(), sample_rate).unwrap()
    }

    #[test]
    fn instantiate_starts_constructed() {
        let adt = instance(44100);
        assert_eq!(adt.state(), InstanceState::Constructed);
        assert_eq!(adt.latency_samples(), 220);
        assert_eq!(adt.sample_rate(), 44100.0);
        assert_eq!(adt.stats(), InstanceStats::default());
    }

    #[test]
    fn instantiate_rejects_zero_rate() {
        let err = AdtInstance::instantiate(&PluginDescriptor::adt(), 0).unwrap_err();
        assert!(matches!(err, HostError::UnsupportedSampleRate(0)));
    }

    #[test]
    fn instantiate_reports_failed_allocation() {
        let err = AdtInstance::instantiate(&PluginDescriptor::adt(), u64::MAX).unwrap_err();
        assert!(matches!(
            err,
            HostError::Instantiate(AdtError::ResourceExhausted { .. })
        ));
    }

    #[test]
    fn run_before_activate_is_skipped() {
        let mut adt = instance(48000);
        let input = [1.0f32; 64];
        let mut out_l = [9.0f32; 64];
        let mut out_r = [9.0f32; 64];

        let outcome = adt.run(
            64,
            PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
        );

        assert_eq!(outcome, RunOutcome::Skipped(SkipReason::Inactive));
        assert_eq!(out_l, [9.0; 64]);
        assert_eq!(out_r, [9.0; 64]);
        assert_eq!(adt.stats().skipped, 1);
    }

    #[test]
    fn deactivate_stops_processing() {
        let mut adt = instance(48000);
        adt.activate();
        adt.deactivate();
        assert_eq!(adt.state(), InstanceState::Constructed);

        let input = [1.0f32; 8];
        let mut out_l = [0.0f32; 8];
        let mut out_r = [0.0f32; 8];
        let outcome = adt.run(
            8,
            PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
        );
        assert!(!outcome.is_processed());
    }

    #[test]
    fn block_refusal_maps_to_skip_reason() {
        let mut adt = instance(48000);
        adt.activate();
        let input = [1.0f32; 8];
        let mut out_l = [0.0f32; 8];
        let mut out_r = [0.0f32; 8];

        let outcome = adt.run(
            1,
            PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
        );

        assert_eq!(
            outcome,
            RunOutcome::Skipped(SkipReason::Block(BlockError::TooFewSamples { total: 1 }))
        );
    }

    #[test]
    fn null_handle_is_skipped() {
        let outcome = run_handle(None, 512, PortBindings::new());
        assert_eq!(outcome, RunOutcome::Skipped(SkipReason::NullHandle));
    }

    #[test]
    fn cleanup_accepts_none() {
        cleanup(None);
        cleanup(Some(instance(8000)));
    }
}
