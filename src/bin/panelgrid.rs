use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "panelgrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene as a PNG.
    Render(RenderArgs),
    /// Print the resolved panel rectangles of a scene as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON. Image paths are relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render mode; interactive renders show caption placeholders.
    #[arg(long, value_enum, default_value_t = ModeChoice::Export)]
    mode: ModeChoice,

    /// Caption font files (TTF/OTF). The first registered family is the fallback.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Optional compositor settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Interactive,
    Export,
}

impl From<ModeChoice> for panelgrid::RenderMode {
    fn from(value: ModeChoice) -> Self {
        match value {
            ModeChoice::Interactive => panelgrid::RenderMode::Interactive,
            ModeChoice::Export => panelgrid::RenderMode::Export,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<panelgrid::Scene> {
    let scene = panelgrid::Scene::from_path(path)?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<panelgrid::CompositorSettings> {
    let Some(path) = path else {
        return Ok(panelgrid::CompositorSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse settings '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let settings = read_settings(args.settings.as_deref())?;

    let mut fonts = panelgrid::FontBook::new();
    for path in &args.fonts {
        let families = fonts.load_file(path)?;
        eprintln!("font {}: {}", path.display(), families.join(", "));
    }

    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let images = scene.load_images(assets_root);
    let panels = scene.resolve_panels(&panelgrid::TemplateRegistry::builtin());

    let mut compositor = panelgrid::Compositor::with_fonts(settings, fonts);
    let frame = compositor.render(&scene.collage_input(&panels, &images), args.mode.into())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let panels = scene.resolve_panels(&panelgrid::TemplateRegistry::builtin());
    let json = serde_json::to_string_pretty(&panels).context("serialize panels")?;
    println!("{json}");
    Ok(())
}
