//! Property-based tests for the delay-offset stream processor.
//!
//! Verifies the streaming invariants under randomized block chunking:
//! exact right-channel delay, bit-exact left passthrough, and in-place /
//! out-of-place equivalence.

use adt_core::{DelayOffsetProcessor, offset_samples};
use proptest::prelude::*;

/// Sample rates the properties are checked at.
const SAMPLE_RATES: [f32; 4] = [8000.0, 22050.0, 44100.0, 48000.0];

/// Split `total` into consecutive block sizes drawn from `sizes`, cycling.
/// The final block absorbs any remainder so no block is shorter than 2.
fn block_sizes(total: usize, sizes: &[usize]) -> Vec<usize> {
    let mut out = Vec::new();
    let mut remaining = total;
    let mut i = 0;
    while remaining > 0 {
        let mut size = sizes[i % sizes.len()].min(remaining);
        if remaining - size < 2 {
            size = remaining;
        }
        out.push(size);
        remaining -= size;
        i += 1;
    }
    out
}

/// Run `input` through a fresh processor in the given block sizes and return
/// the concatenated (left, right) output.
fn render(
    sample_rate: f32,
    left: &[f32],
    right: &[f32],
    sizes: &[usize],
) -> (Vec<f32>, Vec<f32>, DelayOffsetProcessor) {
    let mut adt = DelayOffsetProcessor::new(sample_rate).unwrap();
    adt.reset();

    let mut out_left = vec![0.0; left.len()];
    let mut out_right = vec![0.0; right.len()];
    let mut start = 0;
    for &size in sizes {
        let end = start + size;
        adt.process(
            size,
            &left[start..end],
            &right[start..end],
            &mut out_left[start..end],
            &mut out_right[start..end],
        )
        .unwrap();
        start = end;
    }
    (out_left, out_right, adt)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For chunk sizes at least as long as the offset, the right output is
    /// the right input delayed by exactly `offset_samples`, preceded by
    /// silence, and the carry holds the unemitted tail.
    #[test]
    fn right_channel_is_delayed_exactly(
        rate_idx in 0usize..4,
        extra in prop::collection::vec(0usize..600, 1..8),
        signal in prop::collection::vec(-1.0f32..=1.0f32, 2000..4000),
    ) {
        let sample_rate = SAMPLE_RATES[rate_idx];
        let offset = offset_samples(sample_rate);
        let sizes: Vec<usize> = extra.iter().map(|e| offset + e).collect();
        let plan = block_sizes(signal.len(), &sizes);

        let left = vec![0.0; signal.len()];
        let (_, out_right, adt) = render(sample_rate, &left, &signal, &plan);

        prop_assert!(out_right[..offset].iter().all(|&s| s == 0.0));
        prop_assert_eq!(&out_right[offset..], &signal[..signal.len() - offset]);
        prop_assert_eq!(adt.carry(), &signal[signal.len() - offset..]);
    }

    /// Blocks shorter than the offset keep the delay exact.
    #[test]
    fn short_blocks_keep_exact_delay(
        sizes in prop::collection::vec(2usize..64, 1..16),
        signal in prop::collection::vec(-1.0f32..=1.0f32, 400..1200),
    ) {
        let sample_rate = 44100.0;
        let offset = offset_samples(sample_rate);
        let plan = block_sizes(signal.len(), &sizes);

        let left = vec![0.0; signal.len()];
        let (_, out_right, _) = render(sample_rate, &left, &signal, &plan);

        prop_assert!(out_right[..offset].iter().all(|&s| s == 0.0));
        prop_assert_eq!(&out_right[offset..], &signal[..signal.len() - offset]);
    }

    /// The left channel is copied bit-for-bit regardless of block size or
    /// carry state.
    #[test]
    fn left_channel_passes_through(
        rate_idx in 0usize..4,
        sizes in prop::collection::vec(2usize..1024, 1..8),
        left in prop::collection::vec(prop::num::f32::ANY, 256..2048),
    ) {
        let sample_rate = SAMPLE_RATES[rate_idx];
        let plan = block_sizes(left.len(), &sizes);
        let right: Vec<f32> = (0..left.len()).map(|i| i as f32).collect();

        let (out_left, _, _) = render(sample_rate, &left, &right, &plan);

        for (a, b) in left.iter().zip(out_left.iter()) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    /// In-place processing produces the same stream and carry as
    /// out-of-place processing.
    #[test]
    fn inplace_matches_out_of_place(
        sizes in prop::collection::vec(2usize..700, 1..8),
        signal in prop::collection::vec(-1.0f32..=1.0f32, 500..3000),
    ) {
        let sample_rate = 48000.0;
        let plan = block_sizes(signal.len(), &sizes);
        let (_, expected, reference) = render(sample_rate, &signal, &signal, &plan);

        let mut adt = DelayOffsetProcessor::new(sample_rate).unwrap();
        adt.reset();
        let mut left = signal.clone();
        let mut right = signal.clone();
        let mut start = 0;
        for &size in &plan {
            let end = start + size;
            adt.process_inplace(size, &mut left[start..end], &mut right[start..end])
                .unwrap();
            start = end;
        }

        prop_assert_eq!(&left, &signal);
        prop_assert_eq!(&right, &expected);
        prop_assert_eq!(adt.carry(), reference.carry());
    }
}
