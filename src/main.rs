use clap::{Parser, Subcommand};
use galbox::catalog::Catalog;
use galbox::config::{Capabilities, EngineConfig};
use galbox::engine::{InputEvent, Lightbox, NavState};
use galbox::geometry::Viewport;
use galbox::output::{self, TraceHost};
use galbox::preload::FsLoader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "galbox")]
#[command(about = "Gesture-driven lightbox engine for photo portfolios")]
#[command(long_about = "\
Gesture-driven lightbox engine for photo portfolios

The engine is headless: it consumes a photo catalog plus a stream of
input events and emits rendering effects. This CLI is its development
harness.

Catalog format (photos.json):

  {
    \"sections\": [
      {
        \"id\": \"urban\",
        \"title\": \"Urban\",
        \"photos\": [
          {
            \"id\": \"urban-1\",
            \"url\": \"images/urban-1-2560.jpg\",
            \"mobileUrl\": \"images/urban-1-1280.jpg\",
            \"width\": 2560, \"height\": 1707,
            \"camera\": \"Leica Q2\", \"lens\": \"35mm f/2\",
            \"comment\": \"Shot from the overpass at dusk.\"
          }
        ]
      }
    ]
  }

Trace format (replay): a JSON array of input events, e.g.

  [
    { \"event\": \"nav_button\", \"direction\": \"next\" },
    { \"event\": \"animation_complete\" },
    { \"event\": \"wheel\", \"delta_x\": 60, \"delta_y\": 0, \"time_ms\": 100 },
    { \"event\": \"key\", \"key\": \"escape\" }
  ]")]
#[command(version)]
struct Cli {
    /// Photo catalog manifest
    #[arg(long, default_value = "photos.json", global = true)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the catalog as a content inventory
    Inspect {
        /// Build the catalog by scanning a directory of images instead of
        /// reading the manifest
        #[arg(long)]
        scan_dir: Option<PathBuf>,
    },
    /// Feed a recorded input trace through the engine and print every effect
    Replay(ReplayArgs),
}

#[derive(clap::Args)]
struct ReplayArgs {
    /// JSON file holding an array of input events
    trace: PathBuf,

    /// Collection to open
    #[arg(long)]
    collection: String,

    /// Photo index to open at
    #[arg(long, default_value_t = 0)]
    start_index: usize,

    /// Engine tuning file (TOML); built-in defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay as a touch-primary device
    #[arg(long)]
    touch: bool,

    /// Replay with reduced motion
    #[arg(long)]
    reduced_motion: bool,

    /// Viewport width in px
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Viewport height in px
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { scan_dir } => {
            let catalog = match scan_dir {
                Some(dir) => Catalog::from_dir(&dir)?,
                None => Catalog::load(&cli.catalog)?,
            };
            output::print_inspect_output(&catalog);
        }
        Command::Replay(args) => {
            let catalog = Catalog::load(&cli.catalog)?;
            let config = match &args.config {
                Some(path) => EngineConfig::load(path)?,
                None => EngineConfig::default(),
            };
            let events: Vec<InputEvent> =
                serde_json::from_str(&std::fs::read_to_string(&args.trace)?)?;

            let capabilities = Capabilities {
                is_touch_primary: args.touch,
                reduced_motion: args.reduced_motion,
            };
            let viewport = Viewport {
                width: args.width,
                height: args.height,
            };
            let mut lightbox =
                Lightbox::new(config, capabilities, viewport, TraceHost::new(), FsLoader);

            lightbox
                .host_mut()
                .mark(format!("open {} at {}", args.collection, args.start_index));
            if !lightbox.open(&catalog, &args.collection, args.start_index) {
                return Err(format!(
                    "cannot open collection '{}' (missing or empty)",
                    args.collection
                )
                .into());
            }
            for event in events {
                lightbox.host_mut().mark(output::format_event(&event));
                lightbox.handle(event);
            }

            let state = match lightbox.state() {
                NavState::Closed => "closed",
                NavState::Idle => "idle",
                NavState::Dragging => "dragging",
                NavState::Animating => "animating",
            };
            let index = lightbox.current_index();
            for line in lightbox.into_host().into_lines() {
                println!("{}", line);
            }
            println!();
            match index {
                Some(index) => println!("final: {} at photo {}", state, index + 1),
                None => println!("final: {}", state),
            }
        }
    }

    Ok(())
}
