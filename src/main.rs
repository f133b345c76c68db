use clap::{Parser, Subcommand, ValueEnum};
use image_grid_viewer::assets::DiskAssetCache;
use image_grid_viewer::bridge::{self, JsonBridge};
use image_grid_viewer::{Preparer, Strategy, config, output, scan};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image-grid-viewer")]
#[command(about = "Prepare images for a paginated grid viewer")]
#[command(long_about = "\
Prepare images for a paginated grid viewer

Decodes each image, records its native size and file name, and emits the JSON
payload a grid viewer component consumes. Images are shown columns x rows per
page, in the order given.

Source layout:

  images/
  ├── config.toml      # Viewer config (optional)
  ├── 01-cat.jpg       # Picked up by extension, sorted by path
  └── 02-dog.png

Run 'image-grid-viewer gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Image source directory (also where config.toml is read from)
    #[arg(long, default_value = "images", global = true)]
    source: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the viewer payload for a set of images
    Prepare(PrepareArgs),
    /// List the images found in the source directory
    Scan,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct PrepareArgs {
    /// Image files in display order (default: everything found in --source)
    paths: Vec<PathBuf>,

    /// Images per grid row
    #[arg(long, allow_negative_numbers = true)]
    columns: Option<i64>,

    /// Grid rows per page
    #[arg(long, allow_negative_numbers = true)]
    rows: Option<i64>,

    /// Do not show file names in the viewer
    #[arg(long)]
    hide_names: bool,

    /// Instance key distinguishing several viewers on one page
    #[arg(long)]
    key: Option<String>,

    /// How images are embedded in the payload
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Asset directory for --strategy cached-url. The page must serve it at
    /// `images.url_prefix` (default /media), which asset URLs point into
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Write the payload here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Inline,
    CachedUrl,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Inline => Strategy::Inline,
            StrategyArg::CachedUrl => Strategy::CachedUrl,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Prepare(args) => run_prepare(&cli.source, args)?,
        Command::Scan => {
            let config = config::load_config(&cli.source)?;
            let paths = scan::scan(&cli.source, &config.scan)?;
            output::print_scan_output(&paths, &cli.source);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_prepare(source: &Path, args: PrepareArgs) -> Result<(), Box<dyn std::error::Error>> {
    // flags take precedence, so a bad value in the file they replace is not an error
    let mut config = config::load_config_unvalidated(source)?;
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if args.hide_names {
        config.show_names = false;
    }
    if args.key.is_some() {
        config.key = args.key;
    }
    config.validate()?;
    let options = config.options();

    let paths = if args.paths.is_empty() {
        scan::scan(source, &config.scan)?
    } else {
        args.paths
    };

    let strategy = args
        .strategy
        .map(Strategy::from)
        .unwrap_or(config.images.strategy);
    let preparer = Preparer::new().with_quality(config.quality());

    let (request, cache_stats) = match strategy {
        Strategy::Inline => (preparer.prepare(&paths, &options)?, None),
        Strategy::CachedUrl => {
            let dir = args
                .cache_dir
                .unwrap_or_else(|| PathBuf::from(&config.images.cache_dir));
            let mut cache = DiskAssetCache::with_url_prefix(dir, &config.images.url_prefix);
            let request = preparer.prepare_cached(&paths, &options, &mut cache)?;
            (request, Some(cache.stats().clone()))
        }
    };

    match &args.out {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            bridge::show(&mut JsonBridge::new(BufWriter::new(file)), &request)?;
        }
        None => {
            bridge::show(&mut JsonBridge::new(std::io::stdout().lock()), &request)?;
        }
    }
    output::print_prepare_output(&request, cache_stats.as_ref());
    Ok(())
}

/// Route `tracing` events to stderr, filtered by `RUST_LOG` or `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
