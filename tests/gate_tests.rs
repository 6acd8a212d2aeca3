// Host-side tests for the frame invalidation gate.

use showcase_core::gate::FrameGate;

#[test]
fn gate_starts_dirty() {
    let mut gate = FrameGate::new();
    assert!(gate.is_dirty());
    let mut runs = 0;
    assert!(gate.consume(|| runs += 1));
    assert_eq!(runs, 1);
    assert!(!gate.is_dirty());
}

#[test]
fn gate_coalesces_marks_within_a_frame() {
    let mut gate = FrameGate::new();
    gate.consume(|| {});
    let mut runs = 0;
    for _ in 0..25 {
        gate.mark_dirty();
    }
    assert!(gate.consume(|| runs += 1));
    assert!(!gate.consume(|| runs += 1));
    assert_eq!(runs, 1);
}

#[test]
fn clean_gate_does_nothing() {
    let mut gate = FrameGate::new();
    gate.consume(|| {});
    let mut ran = false;
    assert!(!gate.consume(|| ran = true));
    assert!(!ran);
}
