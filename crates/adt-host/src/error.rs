//! Error types for host lifecycle operations.

use adt_core::AdtError;
use thiserror::Error;

use crate::descriptor::PortDirection;
use crate::port::PortRole;

/// Errors a host can receive from the lifecycle API.
///
/// Block-level refusals are not errors here; they surface as
/// [`RunOutcome::Skipped`](crate::RunOutcome::Skipped).
#[derive(Debug, Error)]
pub enum HostError {
    /// The processor could not be created; no instance exists.
    #[error("failed to instantiate plugin: {0}")]
    Instantiate(#[from] AdtError),

    /// The sample rate cannot be represented as a positive `f32`.
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(u64),

    /// The port index does not name one of the plugin's ports.
    #[error("unknown port index: {0}")]
    UnknownPort(usize),

    /// A buffer was bound against the port's data direction.
    #[error("port '{role}' expects an {expected:?} buffer")]
    PortDirection {
        /// Port that was bound.
        role: PortRole,
        /// Direction the port requires.
        expected: PortDirection,
    },
}
