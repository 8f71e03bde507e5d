use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "nodeweave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a scene layout as JSON.
    Layout(LayoutArgs),
    /// Render a scene as a PNG.
    Frame(FrameArgs),
    /// Render a home-to-detail click transition as a PNG sequence.
    Transition(TransitionArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input entity document JSON (`{ roots, featured, search, nodes }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Optional engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene to lay out.
    #[arg(long, value_enum, default_value_t = SceneChoice::Home)]
    scene: SceneChoice,

    /// Focus entity id for detail and title scenes.
    #[arg(long)]
    focus: Option<String>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    scene: SceneArgs,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TransitionArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Entity id of the home node to click.
    #[arg(long)]
    focus: String,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second of the sampled clock.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Upper bound on written frames.
    #[arg(long, default_value_t = 600)]
    max_frames: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneChoice {
    Home,
    Detail,
    Title,
}

impl From<SceneChoice> for nodeweave::SceneId {
    fn from(c: SceneChoice) -> Self {
        match c {
            SceneChoice::Home => Self::Home,
            SceneChoice::Detail => Self::NodeDetail,
            SceneChoice::Title => Self::TitleDetail,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Transition(args) => cmd_transition(args),
    }
}

fn read_catalog(path: &Path) -> anyhow::Result<nodeweave::layout::EntityCatalog> {
    let f = File::open(path).with_context(|| format!("open entity document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc = serde_json::from_reader(r).with_context(|| "parse entity document JSON")?;
    Ok(doc)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<nodeweave::NodeweaveConfig> {
    let cfg = match path {
        Some(p) => nodeweave::NodeweaveConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => nodeweave::NodeweaveConfig::default(),
    };
    Ok(cfg.with_env_overrides())
}

fn orchestrator(input: &InputArgs) -> anyhow::Result<nodeweave::SceneOrchestrator> {
    let cfg = read_config(input.config.as_deref())?;
    let o = nodeweave::SceneOrchestrator::new(input.width, input.height, cfg)
        .with_context(|| format!("create {}x{} surface", input.width, input.height))?;
    Ok(o)
}

fn scene_data(
    catalog: &nodeweave::layout::EntityCatalog,
    scene: &SceneArgs,
) -> anyhow::Result<nodeweave::SceneData> {
    let data = nodeweave::SceneData::from_catalog(catalog, scene.scene.into(), scene.focus.as_deref())
        .with_context(|| format!("build {:?} scene", scene.scene))?;
    Ok(data)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &mut nodeweave::FrameRGBA) -> anyhow::Result<()> {
    frame.unpremultiply();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let catalog = read_catalog(&args.input.in_path)?;
    let cfg = read_config(args.input.config.as_deref())?;
    cfg.validate()?;
    let canvas = nodeweave::Canvas::new(args.input.width, args.input.height)?;
    let engine = nodeweave::LayoutEngine::new(canvas, cfg.layout);
    let layout = scene_data(&catalog, &args.scene)?.layout_with(&engine);

    let json = serde_json::to_string_pretty(&layout).with_context(|| "encode layout JSON")?;
    match args.out {
        Some(path) => {
            ensure_parent(&path)?;
            std::fs::write(&path, json)
                .with_context(|| format!("write layout '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let catalog = read_catalog(&args.input.in_path)?;
    let mut o = orchestrator(&args.input)?;
    o.request_scene(scene_data(&catalog, &args.scene)?, None);

    let mut rendered = o.engine_mut().render()?;
    ensure_parent(&args.out)?;
    write_png(&args.out, &mut rendered.frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_transition(args: TransitionArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("fps must be > 0");
    }
    let catalog = read_catalog(&args.input.in_path)?;
    let detail = nodeweave::SceneData::from_catalog(
        &catalog,
        nodeweave::SceneId::NodeDetail,
        Some(args.focus.as_str()),
    )
    .with_context(|| format!("resolve focus '{}'", args.focus))?;

    let mut o = orchestrator(&args.input)?;
    let home = nodeweave::SceneData::from_catalog(&catalog, nodeweave::SceneId::Home, None)?;
    o.request_scene(home, None);

    let clicked = nodeweave::layout::ids::root(&args.focus);
    let kind = o.request_scene(detail, Some(clicked.as_str()));
    eprintln!("choreography: {kind:?}");

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let step_ms = 1000.0 / f64::from(args.fps);
    let mut written = 0u32;
    while written < args.max_frames {
        o.tick(f64::from(written) * step_ms);
        let mut rendered = o.engine_mut().render()?;
        let path = args.out_dir.join(format!("frame_{written:04}.png"));
        write_png(&path, &mut rendered.frame)?;
        written += 1;
        if !o.is_transitioning() {
            break;
        }
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}
