use super::*;

#[test]
fn builtin_templates_all_parse() {
    let reg = TemplateRegistry::builtin();
    for id in reg.ids() {
        let desc = reg.get(id).unwrap();
        let t = GridTemplate::parse(desc).unwrap_or_else(|e| panic!("{id}: {e}"));
        assert!(t.declared_panels() > 0, "{id}");
    }
}

#[test]
fn feature_top_gives_hero_two_thirds_of_height() {
    let reg = TemplateRegistry::builtin();
    let panels = reg.resolve("feature-top", 300.0, 300.0, 3, 0.0);
    assert_eq!(panels[0].id.as_str(), "main");
    assert_eq!(panels[0].height, 200.0);
    assert_eq!(panels[1].y, 200.0);
}

#[test]
fn mosaic_declares_five_panels() {
    let reg = TemplateRegistry::builtin();
    let panels = reg.resolve("mosaic-5", 300.0, 200.0, 5, 0.0);
    let ids: Vec<_> = panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["hero", "a", "b", "c", "d"]);
    assert_eq!(panels[0].width, 200.0);
}

#[test]
fn unknown_id_falls_back_to_square_root_grid() {
    let reg = TemplateRegistry::builtin();
    let panels = reg.resolve("does-not-exist", 200.0, 200.0, 4, 0.0);
    assert_eq!(panels.len(), 4);
    assert_eq!(panels[3].x, 100.0);
    assert_eq!(panels[3].y, 100.0);
}
