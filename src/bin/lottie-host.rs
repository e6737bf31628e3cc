use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lottie_host::{
    AssetConfig, AssetHost, AssetLifecycle, AssetSource, DualPool, HeaderEngine, LifecycleOpts,
    RenderEngine as _, ResourceClass, WidgetId,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lottie-host", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header of a Lottie JSON file.
    Probe(ProbeArgs),
    /// Drive one asset through launch, playback and unload with the header engine.
    Play(PlayArgs),
    /// Render a single frame as a PNG with the header engine.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input Lottie JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input Lottie JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// How long to keep the screen loaded, in milliseconds.
    #[arg(long, default_value_t = 3000)]
    ms: u64,

    /// Play once and stop on the last frame.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Load without starting playback.
    #[arg(long, default_value_t = false)]
    no_auto_start: bool,

    /// Lifecycle options JSON (defaults when omitted).
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input Lottie JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index.
    #[arg(long)]
    frame: i32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let header = lottie_host::probe_header(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&header)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let opts = match &args.opts {
        Some(path) => LifecycleOpts::from_json_path(path)?,
        None => LifecycleOpts::default(),
    };
    let config = AssetConfig::from_lottie_file(&args.in_path, !args.once, !args.no_auto_start)?;
    let host = AssetHost::new(HeaderEngine::new(), opts)?;
    let widget = WidgetId(1);

    let mut asset = AssetLifecycle::init(&host, widget, config)?;
    let deadline = Instant::now() + Duration::from_millis(args.ms);
    while Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(50));
        asset.poll();
    }

    let stats = host.engine().lock().stats(widget);
    let state = asset.state();
    let usage = host.pools().usage();
    asset.on_screen_unload_start();
    asset.on_screen_unloaded();

    let report = serde_json::json!({
        "state_before_unload": state,
        "parsed": asset.is_parsed(),
        "frames_rendered": stats.frames_rendered,
        "last_frame": stats.last_frame,
        "region_a_peak_bytes": usage.a.peak_bytes,
        "region_b_peak_bytes": usage.b.peak_bytes,
        "bytes_in_use_after_unload": host.pools().usage().total_in_use(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = AssetConfig::from_lottie_file(&args.in_path, true, true)?;
    let dims = config.dimensions;
    let widget = WidgetId(1);
    let mut engine = HeaderEngine::new();
    let opts = LifecycleOpts::default();
    let pools = DualPool::new(opts.region_a_bytes, opts.region_b_bytes);
    let mut block = pools
        .allocate(ResourceClass::PixelBuffer, dims.byte_len(4))
        .with_context(|| format!("{dims} frame does not fit the pixel region"))?;
    let pixels = block.as_mut_slice();

    engine.attach_buffer(widget, dims, pixels)?;
    engine.decode(widget, &AssetSource::file(&args.in_path))?;
    let params = engine
        .animation_params(widget)
        .with_context(|| format!("'{}' has no frame range", args.in_path.display()))?;
    engine.render_frame(widget, &params, args.frame, pixels)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        pixels,
        dims.width,
        dims.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
