use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "flipstrip", version)]
struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one or more previews to completion.
    Play(PlayArgs),
    /// Print the sprite sheets of a manifest in playback order.
    Order(OrderArgs),
    /// Write what the viewport shows at one frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Read sprite sheets from this directory (by file name) instead of over HTTP.
    #[arg(long)]
    sprites_dir: Option<PathBuf>,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Manifest path, or URL when no sprites dir is given. Repeat for several players.
    #[arg(long = "manifest", required = true)]
    manifests: Vec<String>,

    #[command(flatten)]
    source: SourceArgs,

    /// Write the final scene of every player as HTML.
    #[arg(long)]
    html: Option<PathBuf>,

    /// Drive playback with a simulated clock instead of waiting in real time.
    #[arg(long)]
    simulate: bool,

    /// Host refresh rate in Hz (overrides the config).
    #[arg(long)]
    tick_hz: Option<f64>,

    /// Give up on players that have not finished after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Parser, Debug)]
struct OrderArgs {
    /// Manifest JSON on disk.
    #[arg(long = "manifest")]
    manifest: PathBuf,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Manifest JSON on disk.
    #[arg(long = "manifest")]
    manifest: PathBuf,

    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Play(args) => runtime()?.block_on(cmd_play(args)),
        Command::Order(args) => cmd_order(args),
        Command::Frame(args) => runtime()?.block_on(cmd_frame(args)),
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")
}

fn load_config(path: Option<&Path>) -> anyhow::Result<flipstrip::PlayerConfig> {
    match path {
        Some(p) => Ok(flipstrip::PlayerConfig::from_path(p)?),
        None => Ok(flipstrip::PlayerConfig::default()),
    }
}

fn make_fetcher(sprites_dir: Option<&Path>) -> Arc<dyn flipstrip::SpriteFetcher> {
    match sprites_dir {
        Some(dir) => Arc::new(flipstrip::DirFetcher::new(dir)),
        None => Arc::new(flipstrip::HttpFetcher::new()),
    }
}

async fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.source.config.as_deref())?;
    if let Some(hz) = args.tick_hz {
        config.native_tick_hz = hz;
    }
    config.validate()?;

    let hz = config.native_tick_hz;
    let ticks: flipstrip::TickFactory = if args.simulate {
        Arc::new(move || {
            Box::new(flipstrip::FixedStepTicks::from_hz(hz)) as Box<dyn flipstrip::TickSource>
        })
    } else {
        let template = flipstrip::IntervalTicks::new(hz)?;
        Arc::new(move || Box::new(template.clone()) as Box<dyn flipstrip::TickSource>)
    };

    let manifests: Arc<dyn flipstrip::ManifestSource> = match &args.source.sprites_dir {
        Some(_) => Arc::new(flipstrip::DirManifestSource::new(".")),
        None => Arc::new(flipstrip::HttpFetcher::new()),
    };
    let loader = flipstrip::AssetLoader::new(
        make_fetcher(args.source.sprites_dir.as_deref()),
        config,
    );
    let bootstrap = flipstrip::Bootstrap::new(manifests, loader, ticks);

    let discovered = args.manifests.iter().map(|url| flipstrip::DiscoveredMount {
        manifest_url: url.clone(),
        mount: flipstrip::RetainedScene::new(url.clone()),
    });
    let mut registry = flipstrip::PlayerRegistry::new();
    let ids = bootstrap.start(&mut registry, discovered);
    tracing::info!(players = ids.len(), "players started");

    let mut html = Vec::new();
    let mut unfinished = 0usize;
    for id in ids {
        let url = registry
            .get(id)
            .map(|e| e.manifest_url().to_string())
            .unwrap_or_default();
        let joined = match args.timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), registry.join(id))
                .await
                .ok()
                .flatten(),
            None => registry.join(id).await,
        };
        let Some(outcome) = joined else {
            let status = registry.get(id).map(|e| e.status());
            eprintln!("{url}: did not finish (status {status:?})");
            unfinished += 1;
            continue;
        };
        match &outcome.result {
            Ok(last) => eprintln!("{url}: finished at frame {last}"),
            Err(e) => {
                eprintln!("{url}: failed: {e}");
                unfinished += 1;
            }
        }
        html.push(outcome.mount.to_html());
    }

    if let Some(out) = &args.html {
        write_with_parent(out, html.join("\n").as_bytes())?;
        eprintln!("wrote {}", out.display());
    }

    if unfinished > 0 {
        anyhow::bail!("{unfinished} player(s) did not finish");
    }
    Ok(())
}

fn cmd_order(args: OrderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let manifest = flipstrip::SpriteManifest::from_path(&args.manifest)?;
    let markers = flipstrip::SpriteMarkers {
        prefix: &config.sprite_prefix,
        suffix: &config.sprite_suffix,
    };
    for url in flipstrip::order_sprite_urls(&manifest.images, &config.url_scheme, markers) {
        let key = flipstrip::sprite_order_key(&url, markers);
        match key {
            flipstrip::SpriteOrderKey::Numbered(n) => println!("{n}\t{url}"),
            flipstrip::SpriteOrderKey::Unnumbered => println!("-\t{url}"),
        }
    }
    Ok(())
}

async fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(args.source.config.as_deref())?;
    let manifest = flipstrip::SpriteManifest::from_path(&args.manifest)?;

    let loader = flipstrip::AssetLoader::new(
        make_fetcher(args.source.sprites_dir.as_deref()),
        config,
    );
    let assets = loader.load(&manifest.images).await;
    let geometry = flipstrip::StripGeometry::new(&manifest, assets.len());
    let img = flipstrip::render_viewport(&assets, &geometry, flipstrip::FrameIndex(args.frame))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_with_parent(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
