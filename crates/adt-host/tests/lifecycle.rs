//! Host lifecycle tests: instantiate, connect, activate, run across
//! varying block sizes, deactivate, cleanup.

use adt_host::{
    AdtInstance, InstanceState, PortBindings, PortBuffer, PortRole, RunOutcome, SkipReason,
    cleanup, descriptor, run_handle,
};

const BLOCK_SIZES: &[usize] = &[2, 7, 32, 64, 128, 239, 240, 241, 512, 1024, 4096];

fn ramp(start: usize, len: usize) -> Vec<f32> {
    (start..start + len).map(|i| (i + 1) as f32).collect()
}

/// Runs `signal` through `adt` in blocks of the given sizes, binding ports
/// by raw index as a C host would.
fn run_blocks(adt: &mut AdtInstance, signal: &[f32], sizes: &[usize]) -> (Vec<f32>, Vec<f32>) {
    let mut left = Vec::with_capacity(signal.len());
    let mut right = Vec::with_capacity(signal.len());
    let mut pos = 0;
    let mut sizes = sizes.iter().cycle();

    while pos < signal.len() {
        let remaining = signal.len() - pos;
        let mut n = (*sizes.next().unwrap()).min(remaining);
        // A trailing single sample would be refused; fold it into this block.
        if remaining - n == 1 {
            n = remaining;
        }
        let input = &signal[pos..pos + n];
        let mut out_l = vec![0.0f32; n];
        let mut out_r = vec![0.0f32; n];

        let mut ports = PortBindings::new();
        ports.connect(0, PortBuffer::Input(input)).unwrap();
        ports.connect(1, PortBuffer::Input(input)).unwrap();
        ports.connect(2, PortBuffer::Output(&mut out_l)).unwrap();
        ports.connect(3, PortBuffer::Output(&mut out_r)).unwrap();

        assert_eq!(adt.run(n, ports), RunOutcome::Processed);
        left.extend_from_slice(&out_l);
        right.extend_from_slice(&out_r);
        pos += n;
    }
    (left, right)
}

// ============================================================================
// Full lifecycle
// ============================================================================

#[test]
fn full_lifecycle_at_common_rates() {
    for (rate, offset) in [(44100u64, 220), (48000, 240), (96000, 480), (8000, 40)] {
        let desc = descriptor(0).unwrap();
        let mut adt = AdtInstance::instantiate(&desc, rate).unwrap();
        assert_eq!(adt.latency_samples(), offset);
        adt.activate();
        assert_eq!(adt.state(), InstanceState::Active);

        let signal = ramp(0, 8192);
        let (left, right) = run_blocks(&mut adt, &signal, BLOCK_SIZES);
        assert_eq!(left.len(), signal.len());

        assert_eq!(left, signal, "left must pass through at {rate} Hz");
        assert!(right[..offset].iter().all(|&s| s == 0.0));
        assert_eq!(&right[offset..], &signal[..signal.len() - offset]);

        adt.deactivate();
        assert_eq!(adt.state(), InstanceState::Constructed);
        assert_eq!(adt.stats().skipped, 0);
        cleanup(Some(adt));
    }
}

#[test]
fn reactivation_clears_history() {
    let desc = descriptor(0).unwrap();
    let mut adt = AdtInstance::instantiate(&desc, 48000).unwrap();
    adt.activate();
    let _ = run_blocks(&mut adt, &ramp(0, 1000), &[500]);

    adt.deactivate();
    adt.activate();

    let (_, right) = run_blocks(&mut adt, &ramp(0, 480), &[480]);
    assert!(right[..240].iter().all(|&s| s == 0.0));
    assert_eq!(right[240], 1.0);
}

#[test]
fn instances_are_independent() {
    let desc = descriptor(0).unwrap();
    let mut a = AdtInstance::instantiate(&desc, 44100).unwrap();
    let mut b = AdtInstance::instantiate(&desc, 44100).unwrap();
    a.activate();
    b.activate();

    let (_, right_a1) = run_blocks(&mut a, &vec![1.0; 512], &[512]);
    let (_, right_b) = run_blocks(&mut b, &vec![2.0; 512], &[512]);
    let (_, right_a2) = run_blocks(&mut a, &vec![3.0; 512], &[512]);

    assert_eq!(right_a1[220], 1.0);
    assert_eq!(right_b[220], 2.0);
    // Carry of instance `a` is unaffected by `b`.
    assert_eq!(right_a2[0], 1.0);
    assert_eq!(right_a2[220], 3.0);
}

// ============================================================================
// Skipped runs
// ============================================================================

#[test]
fn unconnected_port_is_skipped_and_outputs_untouched() {
    let desc = descriptor(0).unwrap();
    let mut adt = AdtInstance::instantiate(&desc, 48000).unwrap();
    adt.activate();

    let input = [1.0f32; 64];
    let mut out_l = [7.0f32; 64];

    let mut ports = PortBindings::new();
    ports.connect_input(PortRole::InputLeft, &input).unwrap();
    ports.connect_input(PortRole::InputRight, &input).unwrap();
    ports
        .connect_output(PortRole::OutputLeft, &mut out_l)
        .unwrap();

    let outcome = adt.run(64, ports);
    assert_eq!(
        outcome,
        RunOutcome::Skipped(SkipReason::Unconnected(PortRole::OutputRight))
    );
    assert!(out_l.iter().all(|&s| s == 7.0));
    assert_eq!(adt.stats().skipped, 1);
    assert_eq!(adt.stats().processed, 0);
}

#[test]
fn refused_block_does_not_advance_stream() {
    let desc = descriptor(0).unwrap();
    let mut adt = AdtInstance::instantiate(&desc, 48000).unwrap();
    adt.activate();

    let input = [5.0f32; 4];
    let mut out_l = [0.0f32; 4];
    let mut out_r = [0.0f32; 4];
    let outcome = adt.run(
        1,
        PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
    );
    assert!(matches!(outcome, RunOutcome::Skipped(SkipReason::Block(_))));

    let (_, right) = run_blocks(&mut adt, &ramp(0, 480), &[480]);
    assert!(right[..240].iter().all(|&s| s == 0.0));
    assert_eq!(right[240], 1.0);
}

#[test]
fn sample_count_longer_than_buffers_is_skipped() {
    let desc = descriptor(0).unwrap();
    let mut adt = AdtInstance::instantiate(&desc, 48000).unwrap();
    adt.activate();

    let input = [1.0f32; 16];
    let mut out_l = [3.0f32; 16];
    let mut out_r = [3.0f32; 16];
    let outcome = adt.run(
        32,
        PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
    );

    assert!(matches!(outcome, RunOutcome::Skipped(SkipReason::Block(_))));
    assert!(out_r.iter().all(|&s| s == 3.0));
}

#[test]
fn run_handle_forwards_to_instance() {
    let desc = descriptor(0).unwrap();
    let mut adt = AdtInstance::instantiate(&desc, 48000).unwrap();
    adt.activate();

    let input = [1.0f32; 32];
    let mut out_l = [0.0f32; 32];
    let mut out_r = [0.0f32; 32];
    let outcome = run_handle(
        Some(&mut adt),
        32,
        PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
    );
    assert!(outcome.is_processed());
    assert_eq!(out_l, input);

    let outcome = run_handle(None, 32, PortBindings::new());
    assert_eq!(outcome, RunOutcome::Skipped(SkipReason::NullHandle));
}

#[test]
fn instantiate_below_minimum_rate_still_refuses_blocks() {
    let desc = descriptor(0).unwrap();
    let mut adt = AdtInstance::instantiate(&desc, 500).unwrap();
    adt.activate();

    let input = [1.0f32; 64];
    let mut out_l = [0.0f32; 64];
    let mut out_r = [0.0f32; 64];
    let outcome = adt.run(
        64,
        PortBindings::stereo(&input, &input, &mut out_l, &mut out_r),
    );
    assert!(matches!(outcome, RunOutcome::Skipped(SkipReason::Block(_))));
}
