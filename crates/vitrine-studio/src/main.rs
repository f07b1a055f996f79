mod app;
mod assets;
mod cards;
mod overlay;
mod scroll;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use vitrine_engine::coords::Viewport;
use vitrine_engine::device::GpuInit;
use vitrine_engine::logging::{LoggingConfig, init_logging};
use vitrine_engine::window::{Runtime, RuntimeConfig, WindowMode};
use vitrine_gallery::{AssetPool, Gallery, GalleryConfig};
use vitrine_grid::GridDocument;

use crate::app::StudioApp;
use crate::assets::DiskLoader;
use crate::cards::GpuCards;

const DEFAULT_GRID: &str = include_str!("../layouts/default.grid");
const TITLE: &str = "vitrine";
/// Longest texture edge uploaded per image. Every device meets wgpu's
/// downlevel limit of 2048.
const MAX_TEXTURE_EDGE: u32 = 2048;

#[derive(Parser, Debug)]
#[command(name = "vitrine", version, about = "Browse a directory of images as an interactive gallery")]
struct Cli {
    /// Image directory. Each subdirectory is a project with its own detail page.
    images: PathBuf,

    /// Frame grid descriptor; the built-in layout when omitted.
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Sections laid out before infinite scroll adds more.
    #[arg(long, default_value_t = 3)]
    sections: u32,

    /// Initial window width, logical px.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height, logical px.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Borderless fullscreen.
    #[arg(long, default_value_t = false)]
    fullscreen: bool,

    /// Present without waiting for vblank.
    #[arg(long, default_value_t = false)]
    no_vsync: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..LoggingConfig::default() });

    let grid = load_grid(cli.grid.as_deref())?;
    log::info!("grid: {} frames per section", grid.frames.len());

    let library = assets::scan_directory(&cli.images)?;
    let mut loader = DiskLoader::new(MAX_TEXTURE_EDGE);
    let pool = AssetPool::load(&library.records, &mut loader);
    if pool.is_empty() {
        log::warn!("no loadable images in {}", cli.images.display());
    }

    let mut config = GalleryConfig::default();
    config.layout.initial_sections = cli.sections.max(1);

    let (width, height) = (cli.width.max(1), cli.height.max(1));
    let gallery = Gallery::new(
        config,
        Viewport::new(width as f32, height as f32),
        &grid,
        pool,
        Box::new(library.catalog),
    );
    let app = StudioApp::new(gallery, GpuCards::new(loader.into_images(), MAX_TEXTURE_EDGE), TITLE);

    let runtime = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: LogicalSize::new(width as f64, height as f64),
        mode: if cli.fullscreen { WindowMode::Fullscreen } else { WindowMode::Windowed },
    };
    let gpu = GpuInit {
        present_mode: if cli.no_vsync { wgpu::PresentMode::AutoNoVsync } else { wgpu::PresentMode::Fifo },
        ..GpuInit::default()
    };

    Runtime::run(runtime, gpu, app)
}

fn load_grid(path: Option<&Path>) -> Result<GridDocument> {
    match path {
        Some(path) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("failed to read grid {}", path.display()))?;
            vitrine_grid::parse_str(&src).with_context(|| format!("invalid grid {}", path.display()))
        }
        None => vitrine_grid::parse_str(DEFAULT_GRID).context("invalid built-in grid"),
    }
}
