use super::*;

#[test]
fn burst_of_edits_renders_once_after_quiet_period() {
    let t0 = Instant::now();
    let mut d = RenderDebouncer::default();
    d.note_edit(t0);
    d.note_edit(t0 + Duration::from_millis(4));
    d.note_edit(t0 + Duration::from_millis(8));

    assert!(!d.poll(t0 + Duration::from_millis(12)));
    assert_eq!(
        d.remaining(t0 + Duration::from_millis(12)),
        Some(Duration::from_millis(6))
    );
    assert!(d.poll(t0 + Duration::from_millis(18)));
    assert!(!d.poll(t0 + Duration::from_millis(40)));
    assert!(!d.is_pending());
}

#[test]
fn flush_reports_pending_state() {
    let mut d = RenderDebouncer::new(Duration::from_millis(50));
    assert!(!d.flush());
    d.note_edit(Instant::now());
    assert!(d.is_pending());
    assert!(d.flush());
    assert!(!d.is_pending());
}
