use super::*;
use crate::{
    interaction::state::PanelState,
    layout::{solver::resolve_panels, template::GridTemplate},
};

fn two_panels() -> Vec<PanelRect> {
    resolve_panels(&GridTemplate::uniform(2, 1), 400.0, 200.0, 2, 0.0)
}

#[test]
fn pointer_down_hit_starts_drag_and_activates() {
    let panels = two_panels();
    let mut ctl = InteractionController::new();
    let intents = ctl.pointer_down(Point::new(250.0, 50.0), &panels);
    assert_eq!(
        intents,
        vec![PanelIntent::PanelActivated {
            index: 1,
            panel: PanelId::from("panel-2"),
        }]
    );
    assert!(matches!(ctl.state(), GestureState::Dragging { .. }));
}

#[test]
fn pointer_down_miss_stays_idle() {
    let panels = two_panels();
    let mut ctl = InteractionController::new();
    assert!(ctl.pointer_down(Point::new(500.0, 50.0), &panels).is_empty());
    assert!(ctl.state().is_idle());
}

#[test]
fn drag_accumulates_incremental_deltas() {
    let panels = two_panels();
    let mut state = PanelState::default();
    let mut ctl = InteractionController::new();
    state.apply(ctl.pointer_down(Point::new(10.0, 10.0), &panels));
    state.apply(ctl.pointer_move(Point::new(15.0, 12.0), &state.transforms));
    state.apply(ctl.pointer_move(Point::new(25.0, 2.0), &state.transforms));
    let t = state.transform(&PanelId::from("panel-1"));
    assert_eq!((t.translate_x, t.translate_y), (15.0, -8.0));
    assert_eq!(t.scale, 1.0);
}

#[test]
fn drag_keeps_moving_after_pointer_leaves_the_panel() {
    let panels = two_panels();
    let mut state = PanelState::default();
    let mut ctl = InteractionController::new();
    state.apply(ctl.pointer_down(Point::new(190.0, 10.0), &panels));
    state.apply(ctl.pointer_move(Point::new(260.0, 10.0), &state.transforms));
    assert_eq!(state.transform(&PanelId::from("panel-1")).translate_x, 70.0);
    assert_eq!(
        state.transform(&PanelId::from("panel-2")),
        PanelTransform::default()
    );
}

#[test]
fn pointer_up_discards_bookkeeping() {
    let panels = two_panels();
    let mut state = PanelState::default();
    let mut ctl = InteractionController::new();
    state.apply(ctl.pointer_down(Point::new(10.0, 10.0), &panels));
    ctl.pointer_up();
    assert!(ctl.pointer_move(Point::new(90.0, 90.0), &state.transforms).is_empty());

    // A fresh gesture measures from its own start point.
    state.apply(ctl.pointer_down(Point::new(50.0, 50.0), &panels));
    state.apply(ctl.pointer_move(Point::new(51.0, 50.0), &state.transforms));
    assert_eq!(state.transform(&PanelId::from("panel-1")).translate_x, 1.0);
}

#[test]
fn zero_delta_moves_emit_nothing() {
    let panels = two_panels();
    let state = PanelState::default();
    let mut ctl = InteractionController::new();
    ctl.pointer_down(Point::new(10.0, 10.0), &panels);
    assert!(ctl.pointer_move(Point::new(10.0, 10.0), &state.transforms).is_empty());
}

#[test]
fn pinch_scales_from_gesture_start_and_clamps() {
    let panels = two_panels();
    let mut state = PanelState::default();
    let mut ctl = InteractionController::new();
    let a = Point::new(50.0, 100.0);
    state.apply(ctl.touch_start(&[a], &panels, &state.transforms));
    state.apply(ctl.touch_start(
        &[a, Point::new(150.0, 100.0)],
        &panels,
        &state.transforms,
    ));
    assert!(matches!(ctl.state(), GestureState::Pinching { .. }));

    state.apply(ctl.touch_move(&[a, Point::new(250.0, 100.0)], &state.transforms));
    assert_eq!(state.transform(&PanelId::from("panel-1")).scale, 2.0);

    state.apply(ctl.touch_move(&[a, Point::new(1050.0, 100.0)], &state.transforms));
    assert_eq!(state.transform(&PanelId::from("panel-1")).scale, 5.0);
}

#[test]
fn pinch_preserves_translation() {
    let panels = two_panels();
    let mut state = PanelState::default();
    state.transforms.insert(
        PanelId::from("panel-1"),
        PanelTransform {
            scale: 1.0,
            translate_x: 7.0,
            translate_y: -3.0,
        },
    );
    let mut ctl = InteractionController::new();
    let (a, b) = (Point::new(10.0, 10.0), Point::new(110.0, 10.0));
    state.apply(ctl.touch_start(&[a, b], &panels, &state.transforms));
    state.apply(ctl.touch_move(&[a, Point::new(60.0, 10.0)], &state.transforms));
    let t = state.transform(&PanelId::from("panel-1"));
    assert_eq!((t.scale, t.translate_x, t.translate_y), (0.5, 7.0, -3.0));
}

#[test]
fn lifting_one_finger_returns_to_drag_without_jump() {
    let panels = two_panels();
    let mut state = PanelState::default();
    let mut ctl = InteractionController::new();
    let (a, b) = (Point::new(10.0, 10.0), Point::new(110.0, 10.0));
    state.apply(ctl.touch_start(&[a, b], &panels, &state.transforms));
    ctl.touch_end(&[b], &state.transforms);
    assert_eq!(
        ctl.state(),
        &GestureState::Dragging {
            panel: PanelId::from("panel-1"),
            last: b,
        }
    );
    state.apply(ctl.touch_move(&[Point::new(112.0, 10.0)], &state.transforms));
    assert_eq!(state.transform(&PanelId::from("panel-1")).translate_x, 2.0);

    ctl.touch_end(&[], &state.transforms);
    assert!(ctl.state().is_idle());
}

#[test]
fn unmatched_touch_end_resets_to_idle() {
    let mut ctl = InteractionController::new();
    ctl.touch_end(&[Point::new(1.0, 1.0)], &TransformMap::new());
    assert!(ctl.state().is_idle());
}

#[test]
fn degenerate_pinch_distance_is_ignored() {
    let panels = two_panels();
    let state = PanelState::default();
    let mut ctl = InteractionController::new();
    let a = Point::new(20.0, 20.0);
    ctl.touch_start(&[a, a], &panels, &state.transforms);
    assert!(ctl.touch_move(&[a, Point::new(80.0, 20.0)], &state.transforms).is_empty());
}

#[test]
fn reset_and_caption_edit_intents() {
    let ctl = InteractionController::new();
    let p = PanelId::from("panel-1");
    assert_eq!(
        ctl.reset_transform(&p),
        PanelIntent::TransformChanged {
            panel: p.clone(),
            transform: PanelTransform::default(),
        }
    );

    let mut captions = CaptionMap::new();
    captions.insert(
        p.clone(),
        CaptionSpec {
            pos_y: Some(-40.0),
            ..CaptionSpec::default()
        },
    );
    let intent = ctl.edit_caption(&captions, &p, |c| c.text = Some("hello".to_string()));
    let PanelIntent::CaptionChanged { caption, .. } = intent else {
        panic!("expected caption intent");
    };
    assert_eq!(caption.text.as_deref(), Some("hello"));
    assert_eq!(caption.pos_y, Some(-40.0));
}
