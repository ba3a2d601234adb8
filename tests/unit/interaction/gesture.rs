use super::*;

#[test]
fn pinch_scale_follows_distance_ratio() {
    assert_eq!(pinch_scale(1.0, 100.0, 200.0, 0.1, 5.0), Some(2.0));
    assert_eq!(pinch_scale(1.5, 100.0, 50.0, 0.1, 5.0), Some(0.75));
}

#[test]
fn pinch_scale_clamps() {
    assert_eq!(pinch_scale(1.0, 100.0, 1000.0, 0.1, 5.0), Some(5.0));
    assert_eq!(pinch_scale(1.0, 100.0, 1.0, 0.1, 5.0), Some(0.1));
}

#[test]
fn degenerate_start_distance_is_ignored() {
    assert_eq!(pinch_scale(1.0, 0.0, 10.0, 0.1, 5.0), None);
    assert_eq!(pinch_scale(1.0, 10.0, f64::INFINITY, 0.1, 5.0), None);
}

#[test]
fn constructors_capture_start_bookkeeping() {
    let p = PanelId::from("a");
    let g = GestureState::pinch(p.clone(), Point::new(0.0, 0.0), Point::new(3.0, 4.0), 1.25);
    assert_eq!(
        g,
        GestureState::Pinching {
            panel: p.clone(),
            start_distance: 5.0,
            start_scale: 1.25
        }
    );
    assert_eq!(g.panel(), Some(&p));
    assert_eq!(g.name(), "pinching");
    assert!(GestureState::default().is_idle());
    assert!(GestureState::default().panel().is_none());
}
