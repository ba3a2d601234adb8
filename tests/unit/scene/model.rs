use super::*;

const SCENE: &str = r##"{
    "templateId": "feature-top",
    "aspectRatio": "4:5",
    "baseWidth": 400,
    "panelCount": 3,
    "images": ["a.png", "b.png"],
    "panelImages": { "main": 0, "left": 1 },
    "transforms": { "main": { "scale": 1.5, "translateX": 10, "translateY": 0 } },
    "captions": { "main": { "text": "top text", "posY": 100 } },
    "defaultCaption": { "fontFamily": "Anton" },
    "borderThickness": 4,
    "borderColor": "#000000"
}"##;

#[test]
fn scene_json_parses_and_validates() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.aspect_ratio, AspectRatio::Portrait);
    assert_eq!(scene.canvas(), Canvas { width: 400, height: 500 });
    assert_eq!(scene.transforms[&PanelId::from("main")].scale, 1.5);
    assert_eq!(scene.border().thickness, 4.0);
    assert_eq!(scene.default_caption.font_family.as_deref(), Some("Anton"));
}

#[test]
fn scene_resolves_named_panels_through_registry() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    let panels = scene.resolve_panels(&TemplateRegistry::builtin());
    let ids: Vec<_> = panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["main", "left", "right"]);
    assert_eq!(panels[0].x, 4.0);
}

#[test]
fn numeric_ratio_overrides_tag() {
    let mut scene = Scene::from_json_str(SCENE).unwrap();
    scene.aspect_ratio_value = Some(2.0);
    assert_eq!(scene.canvas(), Canvas { width: 400, height: 200 });
}

#[test]
fn aspect_tags_parse() {
    assert_eq!(AspectRatio::parse("16:9").unwrap(), AspectRatio::Widescreen);
    assert_eq!(AspectRatio::parse("2:1").unwrap(), AspectRatio::Custom(2.0));
    assert_eq!(AspectRatio::parse("1.5").unwrap(), AspectRatio::Custom(1.5));
    assert!(AspectRatio::parse("0:1").is_err());
    assert!(AspectRatio::parse("wide").is_err());
    assert_eq!(String::from(AspectRatio::Story), "9:16");
}

#[test]
fn validation_rejects_dangling_image_refs() {
    let mut scene = Scene::from_json_str(SCENE).unwrap();
    scene.panel_images.insert(PanelId::from("right"), 5);
    assert!(matches!(
        scene.validate(),
        Err(PanelGridError::Validation(_))
    ));
}

#[test]
fn bad_json_is_a_serde_error() {
    assert!(matches!(
        Scene::from_json_str("{ \"panelCount\": "),
        Err(PanelGridError::Serde(_))
    ));
}

#[test]
fn missing_images_are_skipped() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    let images = scene.load_images(Path::new("/nonexistent-panelgrid-dir"));
    assert!(images.is_empty());
}
