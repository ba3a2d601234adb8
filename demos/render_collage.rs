use std::{collections::BTreeMap, path::Path};

use panelgrid::{
    AspectRatio, CaptionSpec, Compositor, CompositorSettings, FontBook, InteractionController,
    PanelId, PanelState, Point, PreparedImage, RenderMode, Rgba8, Scene, TemplateRegistry,
};

fn first_font_in(dir: &Path) -> Option<std::path::PathBuf> {
    let mut fonts: Vec<_> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
        })
        .collect();
    fonts.sort();
    fonts.into_iter().next()
}

fn gradient(w: u32, h: u32, from: [u8; 3], to: [u8; 3]) -> anyhow::Result<PreparedImage> {
    let mut rgba = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let t = f64::from(y) / f64::from(h.max(2) - 1);
        for _ in 0..w {
            for c in 0..3 {
                let v = f64::from(from[c]) + (f64::from(to[c]) - f64::from(from[c])) * t;
                rgba.push(v.round() as u8);
            }
            rgba.push(255);
        }
    }
    Ok(PreparedImage::from_rgba8(w, h, rgba)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut scene = Scene::from_json_str(r#"{ "templateId": "mosaic-5", "panelCount": 5 }"#)?;
    scene.aspect_ratio = AspectRatio::Portrait;
    scene.base_width = 720;
    scene.border_thickness = 6.0;
    scene.border_color = Rgba8::WHITE;
    scene.images = vec!["warm".into(), "cool".into(), "moss".into()];
    for (panel, image) in [("hero", 0), ("a", 1), ("c", 2)] {
        scene.panel_images.insert(PanelId::from(panel), image);
    }
    scene.captions.insert(
        PanelId::from("hero"),
        CaptionSpec {
            text: Some("WHEN THE COLLAGE\nRENDERS FIRST TRY".to_string()),
            ..CaptionSpec::default()
        },
    );
    scene.validate()?;

    let mut images = BTreeMap::new();
    images.insert(0, gradient(320, 200, [250, 120, 40], [120, 20, 60])?);
    images.insert(1, gradient(200, 320, [30, 90, 200], [10, 200, 220])?);
    images.insert(2, gradient(256, 256, [40, 140, 60], [200, 220, 120])?);

    let panels = scene.resolve_panels(&TemplateRegistry::builtin());
    for p in &panels {
        println!(
            "{:>6}  x={:>6.1} y={:>6.1} w={:>6.1} h={:>6.1}",
            p.id.as_str(),
            p.x,
            p.y,
            p.width,
            p.height
        );
    }

    // Drag the hero image a little, then zoom it with a pinch.
    let mut state = PanelState {
        transforms: scene.transforms.clone(),
        captions: scene.captions.clone(),
        ..PanelState::default()
    };
    let mut ctl = InteractionController::new();
    let c = panels[0].center();
    state.apply(ctl.pointer_down(c, &panels));
    state.apply(ctl.pointer_move(Point::new(c.x + 30.0, c.y - 10.0), &state.transforms));
    ctl.pointer_up();
    let (a, b) = (Point::new(c.x - 40.0, c.y), Point::new(c.x + 40.0, c.y));
    state.apply(ctl.touch_start(&[a, b], &panels, &state.transforms));
    state.apply(ctl.touch_move(&[a, Point::new(c.x + 80.0, c.y)], &state.transforms));
    ctl.touch_end(&[], &state.transforms);
    scene.transforms = state.transforms;

    let mut fonts = FontBook::new();
    if let Some(font) = first_font_in(Path::new("assets")) {
        let families = fonts.load_file(&font)?;
        println!("caption font: {}", families.join(", "));
    } else {
        println!("no font under assets/; captions are laid out but not drawn");
    }

    let mut compositor = Compositor::with_fonts(CompositorSettings::default(), fonts);
    let input = scene.collage_input(&panels, &images);
    let frame = compositor.render(&input, RenderMode::Interactive)?;

    let out = Path::new("target/render_collage.png");
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image::save_buffer_with_format(
        out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    println!("wrote {}", out.display());
    Ok(())
}
