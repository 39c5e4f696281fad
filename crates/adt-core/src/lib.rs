//! ADT Core - artificial double tracking DSP
//!
//! Artificial Double Tracking (ADT) fakes two layered performances by
//! staggering the stereo channels: the left channel passes straight through
//! while the right channel is delayed by a fixed 5 ms offset.
//!
//! # Core Abstractions
//!
//! - [`DelayOffsetProcessor`] - Streaming right-channel delay with a carry-over buffer
//! - [`Effect`] - Object-safe stereo block-processing trait
//! - [`StereoSamples`] - Owned left/right buffers for file-level processing
//!
//! ## Timing
//!
//! - [`offset_samples`] - Converts the fixed [`OFFSET_MS`] into samples
//! - [`MIN_SAMPLE_RATE`] - Lowest rate at which blocks are processed
//!
//! # Streaming Delay
//!
//! The processor owns a carry-over buffer exactly `offset_samples` long. Each
//! block, the right output is assembled from the carried tail of the previous
//! block followed by the head of the current right input; the current tail
//! is then stored for the next call. Chaining contiguous blocks therefore
//! yields the input delayed by exactly `offset_samples`, independent of how
//! the host chunks the stream.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! adt-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use adt_core::DelayOffsetProcessor;
//!
//! let mut adt = DelayOffsetProcessor::new(48000.0).unwrap();
//! adt.reset();
//!
//! let left = vec![0.25; 512];
//! let right = vec![0.5; 512];
//! let mut out_left = vec![0.0; 512];
//! let mut out_right = vec![0.0; 512];
//!
//! adt.process(512, &left, &right, &mut out_left, &mut out_right).unwrap();
//!
//! assert_eq!(out_left, left);
//! assert!(out_right[..240].iter().all(|&s| s == 0.0));
//! assert!(out_right[240..].iter().all(|&s| s == 0.5));
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: All memory is allocated at construction; processing
//!   never allocates or locks
//! - **Refuse, don't corrupt**: Invalid blocks are rejected before any write
//! - **Borrowed buffers**: Channel slices are borrowed per call, never retained

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod effect;
pub mod error;
pub mod offset;
pub mod processor;
pub mod stereo_samples;

// Re-export main types at crate root
pub use effect::Effect;
pub use error::{AdtError, BlockError};
pub use offset::{MIN_SAMPLE_RATE, OFFSET_MS, offset_samples};
pub use processor::DelayOffsetProcessor;
pub use stereo_samples::StereoSamples;
