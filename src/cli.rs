use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use zonecut_designer::editor::{EditorEvent, EditorState, InteractionController};
use zonecut_designer::handoff::ZoneHandoff;
use zonecut_designer::projection::commit_zones;
use zonecut_designer::scene::{build_scene, to_svg};
use zonecut_designer::serialization::LayoutFile;
use zonecut_settings::Config;

#[derive(Debug, Parser)]
#[command(
    name = "zonecut",
    about = "Lay out zones on a container floor and project them into world bounds",
    version
)]
pub struct Cli {
    /// Config file (TOML or JSON). Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Project every zone of a layout and write the packer hand-off.
    Project(ProjectArgs),

    /// Render a layout to SVG.
    Render(RenderArgs),

    /// Apply a recorded event script to a layout.
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Layout file
    pub layout: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Layout file
    pub layout: PathBuf,

    /// SVG output file
    #[arg(long)]
    pub out: PathBuf,

    /// Draw as in edit mode, with handles on the first zone
    #[arg(long)]
    pub editing: bool,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Layout file to start from
    pub layout: PathBuf,

    /// JSON array of editor events
    pub events: PathBuf,

    /// Where to save the resulting layout; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref());
    match cli.command {
        Commands::Project(args) => run_project(&config, args),
        Commands::Render(args) => run_render(&config, args),
        Commands::Replay(args) => run_replay(&config, args),
    }
}

fn controller_for(config: &Config, layout: &LayoutFile) -> InteractionController {
    InteractionController::for_container(&layout.container, layout.canvas, config.editor)
}

fn load_state(layout: &LayoutFile, editing: bool) -> Result<EditorState> {
    let mut state = EditorState::new();
    state.set_editing(editing);
    layout.restore(&mut state)?;
    Ok(state)
}

fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn run_project(config: &Config, args: ProjectArgs) -> Result<()> {
    let layout = LayoutFile::load_from_file(&args.layout)?;
    let controller = controller_for(config, &layout);
    let container = layout.container;

    let report = commit_zones(
        &layout.zones,
        controller.mapper().scale(),
        &container,
        &container.world_aabb(),
    );
    for rejected in &report.rejected {
        tracing::warn!(
            "Zone {} ({}) not handed off: {}",
            rejected.label,
            rejected.id,
            rejected.message
        );
    }

    let handoff = ZoneHandoff::new(container, report);
    let json = handoff
        .to_json(config.export.pretty)
        .context("Failed to serialize hand-off")?;
    write_output(args.out.as_deref(), &json)
}

fn run_render(config: &Config, args: RenderArgs) -> Result<()> {
    let layout = LayoutFile::load_from_file(&args.layout)?;
    let controller = controller_for(config, &layout);
    let state = load_state(&layout, args.editing)?;

    let svg = to_svg(&build_scene(&state, &controller, &layout.container));
    write_output(Some(&args.out), &svg)
}

fn run_replay(config: &Config, args: ReplayArgs) -> Result<()> {
    let mut layout = LayoutFile::load_from_file(&args.layout)?;
    let content = fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read events file {}", args.events.display()))?;
    let events: Vec<EditorEvent> =
        serde_json::from_str(&content).context("Failed to parse events JSON")?;

    let mut controller = controller_for(config, &layout);
    let mut state = load_state(&layout, true)?;

    for (i, event) in events.iter().enumerate() {
        match controller.apply(&mut state, event) {
            Ok(Some(id)) => tracing::info!("Event {} created zone {}", i, id),
            Ok(None) => {}
            Err(e) => tracing::warn!("Event {} ({:?}) ignored: {}", i, event, e),
        }
    }

    layout.canvas = controller.mapper().canvas_size();
    layout.capture(&state);
    let json = layout.to_json(config.export.pretty)?;
    write_output(args.out.as_deref(), &json)
}
