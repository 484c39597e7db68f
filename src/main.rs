//! Rack Layout CLI
//!
//! Usage:
//!   rack-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -d, --debug              Outline port blocks and dump device geometry
//!   -e, --edit               Draw edit-mode decorations
//!       --lint               Print snapshot warnings and outline overlapping devices
//!       --stats              Print port statistics instead of SVG
//!       --search <QUERY>     Highlight assigned ports matching QUERY
//!       --compact            Close persisted gaps before rendering
//!       --drag <ID> --to <INDEX>  Replay a drag gesture before rendering
//!   -v, --verbose            Debug logging
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rack_layout::interaction::DropOutcome;
use rack_layout::layout::{self, stack_height, stack_offsets};
use rack_layout::model::DeviceId;
use rack_layout::{
    parse_snapshot, render_layout, render_snapshot, MemoryRack, RackSession, RackSnapshot,
    RackStats, RenderConfig, RenderError, SnapshotError, Stylesheet,
};

#[derive(Parser)]
#[command(name = "rack-layout")]
#[command(about = "Compact rack diagrams with port grids and callouts")]
struct Cli {
    /// Snapshot JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Debug mode: outline port blocks and dump device geometry
    #[arg(short, long)]
    debug: bool,

    /// Draw edit-mode decorations (drag handles, dashed frame)
    #[arg(short, long)]
    edit: bool,

    /// Print snapshot warnings to stderr and outline overlapping devices
    #[arg(long)]
    lint: bool,

    /// Print port statistics instead of SVG
    #[arg(long)]
    stats: bool,

    /// Highlight assigned ports matching this query
    #[arg(long)]
    search: Option<String>,

    /// Repack persisted rack units from 1 before rendering
    #[arg(long)]
    compact: bool,

    /// Device to drag
    #[arg(long, value_name = "ID", requires = "to")]
    drag: Option<u64>,

    /// Insertion slot for --drag, 0 = top
    #[arg(long, value_name = "INDEX", requires = "drag")]
    to: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rack_layout=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rack_layout=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path)?,
        None => Stylesheet::default(),
    };

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path).map_err(SnapshotError::from)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(SnapshotError::from)?;
            buffer
        }
    };
    let snapshot = parse_snapshot(&source)?;

    if cli.lint {
        for warning in layout::lint::check(&snapshot) {
            eprintln!("warning: {}", warning);
        }
    }

    if cli.stats {
        println!("{}", RackStats::from_devices(&snapshot.devices));
        return Ok(());
    }

    let config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug)
        .with_lint(cli.lint)
        .with_edit_mode(cli.edit);

    let interactive = cli.compact || cli.drag.is_some() || cli.search.is_some();
    let svg = if interactive {
        replay(cli, snapshot, &config)?
    } else {
        render_snapshot(&snapshot, &config)
    };
    println!("{}", svg);
    Ok(())
}

/// Run the requested edits through a session backed by an in-memory rack
fn replay(cli: &Cli, snapshot: RackSnapshot, config: &RenderConfig) -> Result<String, RenderError> {
    let mut session = RackSession::new(MemoryRack::new(snapshot), config.layout.clone())?;
    session.set_edit_mode(true);

    if let (Some(id), Some(to)) = (cli.drag, cli.to) {
        let devices = session.sorted_devices();
        let offsets = stack_offsets(&devices, session.config());
        let from = devices
            .iter()
            .position(|d| d.id == DeviceId(id))
            .ok_or(rack_layout::DragError::UnknownDevice { id: DeviceId(id) })?;

        // any Y between the previous device's midpoint and the target's
        // midpoint selects slot `to`; its top edge is such a point
        let target_y = offsets
            .get(to)
            .map(|o| o.0)
            .unwrap_or_else(|| stack_height(&devices, session.config()));

        session.pointer_down(DeviceId(id), offsets[from].0)?;
        session.pointer_move(target_y);
        match session.pointer_up() {
            DropOutcome::NoOp => tracing::info!("drag of device {id} to slot {to} is a no-op"),
            DropOutcome::Reorder(request) => {
                tracing::info!("reordered: {:?}", request.device_ids)
            }
        }
    }

    if cli.compact {
        session.compact();
    }

    if let Some(query) = &cli.search {
        session.set_search(query.as_str());
    }

    session.set_edit_mode(config.edit_mode);
    let mut result = session.layout();
    if config.lint {
        layout::mark_overlaps(&mut result);
    }
    Ok(render_layout(&result, config))
}

fn print_intro() {
    println!(
        r#"Rack Layout - compact rack diagrams with port grids and callouts

USAGE:
    rack-layout [OPTIONS] [FILE]
    cat rack.json | rack-layout

OPTIONS:
    -s, --stylesheet   Custom color palette (TOML file)
    -d, --debug        Outline port blocks and dump device geometry
    -e, --edit         Draw edit-mode decorations
    --lint             Print snapshot warnings, outline overlapping devices
    --stats            Print port statistics instead of SVG
    --search <QUERY>   Highlight assigned ports matching QUERY
    --compact          Close persisted gaps before rendering
    --drag <ID> --to <INDEX>
                       Move a device to slot INDEX (0 = top) before rendering
    -v, --verbose      Debug logging
    -h, --help         Print help

INPUT:
    {{"devices": [{{"id": 1, "name": "core", "device_type": "switch",
                  "rack_unit": 1, "unit_size": 1, "ports": []}}],
     "callouts": []}}"#
    );
}
