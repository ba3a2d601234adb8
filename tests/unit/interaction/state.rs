use super::*;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl PanelSink for Recorder {
    fn on_panel_transform_change(&mut self, panel: &PanelId, transform: PanelTransform) {
        self.events
            .push(format!("transform {panel} {}", transform.scale));
    }

    fn on_panel_text_change(&mut self, panel: &PanelId, caption: &CaptionSpec) {
        self.events.push(format!(
            "text {panel} {}",
            caption.text.as_deref().unwrap_or("")
        ));
    }
}

#[test]
fn default_transform_is_identity() {
    let t = PanelTransform::default();
    assert_eq!((t.scale, t.translate_x, t.translate_y), (1.0, 0.0, 0.0));
}

#[test]
fn with_scale_clamps_and_keeps_old_scale_for_nan() {
    let t = PanelTransform::default();
    assert_eq!(t.with_scale(9.0).scale, MAX_SCALE);
    assert_eq!(t.with_scale(0.0).scale, MIN_SCALE);
    assert_eq!(t.with_scale(f64::NAN).scale, 1.0);
}

#[test]
fn effective_scale_guards_invalid_values() {
    let bad = PanelTransform {
        scale: -3.0,
        ..PanelTransform::default()
    };
    assert_eq!(bad.effective_scale(), 1.0);
}

#[test]
fn dispatch_routes_to_callbacks_in_order() {
    let mut rec = Recorder::default();
    let intents = vec![
        PanelIntent::TransformChanged {
            panel: PanelId::from("a"),
            transform: PanelTransform::default().with_scale(2.0),
        },
        PanelIntent::CaptionChanged {
            panel: PanelId::from("b"),
            caption: CaptionSpec {
                text: Some("hi".to_string()),
                ..CaptionSpec::default()
            },
        },
        PanelIntent::PanelActivated {
            index: 0,
            panel: PanelId::from("a"),
        },
    ];
    dispatch_all(intents, &mut rec);
    assert_eq!(rec.events, vec!["transform a 2", "text b hi"]);
}

#[test]
fn panel_state_applies_intents() {
    let mut state = PanelState::default();
    let a = PanelId::from("a");
    state.apply([
        PanelIntent::PanelActivated {
            index: 3,
            panel: a.clone(),
        },
        PanelIntent::TransformChanged {
            panel: a.clone(),
            transform: PanelTransform::default().translated(4.0, -2.0),
        },
    ]);
    assert_eq!(state.active, Some((3, a.clone())));
    assert_eq!(state.transform(&a).translate_x, 4.0);
    assert_eq!(state.transform(&PanelId::from("zz")), PanelTransform::default());
}
