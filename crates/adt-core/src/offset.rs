//! Fixed channel-offset timing.
//!
//! The ADT offset is a compile-time constant in milliseconds. It is converted
//! to a whole number of samples once per processor, rounding down.
//!
//! | Sample rate | Offset |
//! |-------------|--------|
//! | 8 kHz | 40 samples |
//! | 44.1 kHz | 220 samples |
//! | 48 kHz | 240 samples |
//! | 96 kHz | 480 samples |

/// Offset between the left and right channels, in milliseconds.
pub const OFFSET_MS: u32 = 5;

/// Lowest sample rate (Hz) at which blocks are processed.
///
/// Below this the offset can round down to nothing, so the processor refuses
/// to run rather than produce a zero-length "delay".
pub const MIN_SAMPLE_RATE: f32 = 1000.0;

/// Converts [`OFFSET_MS`] to samples at the given sample rate.
///
/// Computes `floor(sample_rate * OFFSET_MS / 1000)` in double precision so
/// integer rates convert exactly. Non-finite or non-positive rates yield 0.
///
/// # Example
///
/// ```rust
/// use adt_core::offset_samples;
///
/// assert_eq!(offset_samples(44100.0), 220);
/// assert_eq!(offset_samples(48000.0), 240);
/// ```
pub fn offset_samples(sample_rate: f32) -> usize {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return 0;
    }
    let samples = f64::from(sample_rate) * f64::from(OFFSET_MS) / 1000.0;
    libm::floor(samples) as usize
}
