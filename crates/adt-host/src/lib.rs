//! Plugin host lifecycle adapter for the ADT effect.
//!
//! This crate models the contract a plugin host (LADSPA-style) drives a
//! plugin through, on top of [`adt_core::DelayOffsetProcessor`]:
//!
//! | Host call | Rust |
//! |-----------|------|
//! | `ladspa_descriptor(index)` | [`descriptor`] |
//! | `instantiate(descriptor, rate)` | [`AdtInstance::instantiate`] |
//! | `activate(handle)` | [`AdtInstance::activate`] |
//! | `connect_port(handle, port, data)` | [`PortBindings::connect`] |
//! | `run(handle, sample_count)` | [`AdtInstance::run`] / [`run_handle`] |
//! | `deactivate(handle)` | [`AdtInstance::deactivate`] |
//! | `cleanup(handle)` | [`cleanup`] |
//!
//! # Differences from a C plugin ABI
//!
//! - The descriptor is a plain value ([`PluginDescriptor`]) built on demand.
//!   Nothing is allocated at load time or freed at unload.
//! - Port buffers are bound per call. A [`PortBindings`] borrows the host's
//!   buffers for exactly one [`run`](AdtInstance::run), so an instance can
//!   never hold a stale pointer between calls.
//! - A refused block is reported as a [`RunOutcome::Skipped`] and logged
//!   with `tracing`; it never aborts the host.
//!
//! # Example
//!
//! ```rust
//! use adt_host::{AdtInstance, PortBindings, RunOutcome, descriptor};
//!
//! let desc = descriptor(0).unwrap();
//! let mut adt = AdtInstance::instantiate(&desc, 48000).unwrap();
//! adt.activate();
//!
//! let input = vec![0.5f32; 512];
//! let mut out_left = vec![0.0f32; 512];
//! let mut out_right = vec![0.0f32; 512];
//!
//! let ports = PortBindings::stereo(&input, &input, &mut out_left, &mut out_right);
//! assert_eq!(adt.run(512, ports), RunOutcome::Processed);
//! assert_eq!(out_right[239], 0.0);
//! assert_eq!(out_right[240], 0.5);
//!
//! adt_host::cleanup(Some(adt));
//! ```

pub mod descriptor;
pub mod error;
pub mod instance;
pub mod port;

pub use descriptor::{
    PluginDescriptor, PluginProperties, PortDescriptor, PortDirection, PortKind, UNIQUE_ID,
    descriptor,
};
pub use error::HostError;
pub use instance::{
    AdtInstance, InstanceState, InstanceStats, RunOutcome, SkipReason, cleanup, run_handle,
};
pub use port::{PortBindings, PortBuffer, PortRole};
