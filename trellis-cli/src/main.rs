//! Trellis CLI
//!
//! Lays out a scene file and prints what layout decided: box geometry,
//! break values and scroll snap offsets.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=trellis=debug`. Build with `--features layout-trace` for
//! per-box trace events.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use trellis_layout::{BoxId, BoxReport, BuiltScene, Rect, Scene, Viewport};
use trellis_style::ScrollAxis;

/// Trellis: box-model layout for scene files
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the laid-out box tree
    trellis layout scenes/positioned.json

    # Same, as JSON
    trellis layout --json scenes/positioned.json

    # Quirks mode with a smaller viewport
    trellis layout --quirks --viewport 640x480 scenes/quirks.json

    # Snap offsets of the box named "gallery" along x
    trellis snap scenes/snap.json --box gallery --axis x

    # Break values on 500px pages
    trellis breaks --page-height 500 scenes/pages.json
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a scene and print the box tree with its geometry
    Layout {
        #[command(flatten)]
        scene: SceneArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the snap offsets of one scroll container
    Snap {
        #[command(flatten)]
        scene: SceneArgs,

        /// Name or numeric handle of the scroll container
        #[arg(long = "box", value_name = "BOX")]
        target: String,

        /// Scroll axis
        #[arg(long, value_enum, default_value = "y")]
        axis: Axis,
    },
    /// Print the break values and breakability of every box
    Breaks {
        #[command(flatten)]
        scene: SceneArgs,
    },
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Path to a scene JSON file
    #[arg(value_name = "SCENE")]
    path: PathBuf,

    /// Lay out in quirks mode
    #[arg(long)]
    quirks: bool,

    /// Lay out for print
    #[arg(long)]
    print: bool,

    /// Viewport size, e.g. 1280x720 (default: the scene's)
    #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
    viewport: Option<Viewport>,

    /// Paginate the view with pages this tall
    #[arg(long, value_name = "PX")]
    page_height: Option<f32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Axis {
    X,
    Y,
}

impl From<Axis> for ScrollAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Layout { scene, json } => {
            let built = load_scene(&scene)?;
            let report = built.report(BoxId::VIEW);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let viewport = built.tree.settings().viewport;
                println!(
                    "=== Layout Tree (viewport: {}x{}) ===\n",
                    viewport.width, viewport.height
                );
                print_box(&report, 0);
            }
        }
        Command::Snap {
            scene,
            target,
            axis,
        } => {
            let built = load_scene(&scene)?;
            let Some(id) = built.resolve(&target) else {
                bail!("no box named {target:?} in {}", scene.path.display());
            };
            if id != BoxId::VIEW && !built.tree.snap().is_snap_container(id) {
                println!("{}", format!("{target} is not a snap container").yellow());
            }
            let offsets = built.tree.snap_offsets(id, axis.into());
            let offsets: Vec<String> = offsets.iter().map(|o| format!("{o:.1}")).collect();
            println!("{}", offsets.join(" "));
        }
        Command::Breaks { scene } => {
            let built = load_scene(&scene)?;
            print_breaks(&built);
        }
    }
    Ok(())
}

fn parse_viewport(value: &str) -> Result<Viewport, String> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let parse = |s: &str| s.trim().parse::<f32>().map_err(|e| format!("{s:?}: {e}"));
    Ok(Viewport {
        width: parse(width)?,
        height: parse(height)?,
    })
}

/// Read a scene, apply the command-line settings, build and lay it out.
fn load_scene(args: &SceneArgs) -> Result<BuiltScene> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let mut scene =
        Scene::from_json(&text).with_context(|| format!("parsing {}", args.path.display()))?;

    let settings = &mut scene.settings;
    settings.quirks_mode |= args.quirks;
    settings.printing |= args.print;
    if let Some(viewport) = args.viewport {
        settings.viewport = viewport;
    }
    if args.page_height.is_some() {
        settings.page_logical_height = args.page_height;
    }

    let mut built = scene.build().context("building the box tree")?;
    debug!(path = %args.path.display(), boxes = built.tree.len(), "scene loaded");
    built.tree.layout();
    Ok(built)
}

fn label(report: &BoxReport) -> String {
    report.name.as_deref().map_or_else(
        || format!("#{}", report.id.0),
        |name| format!("{name} #{}", report.id.0),
    )
}

fn format_rect(rect: Rect) -> String {
    format!(
        "x={:.1} y={:.1} w={:.1} h={:.1}",
        rect.x, rect.y, rect.width, rect.height
    )
}

/// Recursively print a box report with its geometry
fn print_box(report: &BoxReport, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}[{}] {}", label(report).bold(), report.kind.cyan());
    println!("{indent}  frame: {}", format_rect(report.frame));
    if report.absolute != report.frame {
        println!("{indent}  absolute: {}", format_rect(report.absolute));
    }

    let m = &report.margin;
    if m.top != 0.0 || m.right != 0.0 || m.bottom != 0.0 || m.left != 0.0 {
        println!(
            "{indent}  margin: t={:.1} r={:.1} b={:.1} l={:.1}",
            m.top, m.right, m.bottom, m.left
        );
    }
    if report.in_flow_offset != (0.0, 0.0) {
        let (dx, dy) = report.in_flow_offset;
        println!("{indent}  offset: dx={dx:.1} dy={dy:.1}");
    }
    if report.pagination_strut != 0.0 {
        println!(
            "{indent}  {}",
            format!("strut: {:.1}", report.pagination_strut).yellow()
        );
    }
    let border_box = Rect::new(0.0, 0.0, report.frame.width, report.frame.height);
    if report.layout_overflow != border_box {
        println!(
            "{indent}  {}",
            format!("overflow: {}", format_rect(report.layout_overflow)).dimmed()
        );
    }

    for child in &report.children {
        print_box(child, depth + 1);
    }
}

fn print_breaks(built: &BuiltScene) {
    let tree = &built.tree;
    println!("=== Breaks ===\n");
    for id in tree.subtree(BoxId::VIEW).into_iter().skip(1) {
        let name = built
            .name_of(id)
            .map_or_else(|| format!("#{}", id.0), str::to_owned);
        println!(
            "{} before={:<12} after={:<12} inside={:<12} {}",
            format!("{name:<16}").bold(),
            tree.break_before(id).to_string(),
            tree.break_after(id).to_string(),
            tree.break_inside(id).to_string(),
            tree.pagination_breakability(id).cyan()
        );
    }
}
