#![deny(unsafe_code)]
//! CLI for the nodefield particle background.
//!
//! Subcommands:
//! - `render`: build a field, advance N frames, write the last one as PNG
//! - `size`: print backing size, node count, and connection threshold for a viewport
//! - `schema`: print the accepted `--params` keys

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use nodefield_core::{FieldConfig, ManualScheduler, ParticleField, Scene, Viewport};
use nodefield_raster::snapshot::write_png;
use nodefield_raster::RasterSurface;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nodefield", about = "Particle-field background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ViewportArgs {
    /// Viewport width in CSS pixels.
    #[arg(short = 'W', long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(short = 'H', long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Simulate a prefers-reduced-motion user.
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Full config as a JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scalar config overrides as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl ConfigArgs {
    fn load(&self) -> Result<FieldConfig, CliError> {
        load_config(self.config.as_deref(), &self.params)
    }
}

impl ViewportArgs {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.dpr).with_reduced_motion(self.reduced_motion)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Advance the field N frames and write the final frame as PNG.
    Render {
        #[command(flatten)]
        viewport: ViewportArgs,

        /// Number of frames to advance.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        config: ConfigArgs,

        /// Scene JSON file; replaces viewport, seed, frames, and config flags.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "nodefield.png")]
        output: PathBuf,
    },
    /// Print sizing for a viewport under the given config.
    Size {
        #[command(flatten)]
        viewport: ViewportArgs,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the schema of accepted --params keys.
    Schema,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))
}

/// Resolves the config from `--config` and `--params`.
///
/// `--config` replaces the defaults wholesale; `--params` is applied on top
/// of the defaults and may not be combined with `--config`.
fn load_config(config: Option<&Path>, params: &str) -> Result<FieldConfig, CliError> {
    let overrides: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let has_overrides = overrides.as_object().is_some_and(|o| !o.is_empty());
    match config {
        Some(_) if has_overrides => Err(CliError::Input(
            "--config and --params cannot be combined".into(),
        )),
        Some(path) => serde_json::from_str(&read_file(path)?)
            .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display()))),
        None => Ok(FieldConfig::from_json(&overrides)?),
    }
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    serde_json::from_str(&read_file(path)?)
        .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))
}

/// Drives a scene through `scene.frames` ticks and writes the last frame.
fn render_scene(scene: &Scene, output: &Path) -> Result<ParticleField, CliError> {
    let mut field = scene.build()?;
    let (w, h) = field.backing_size();
    let mut surface = RasterSurface::new(w, h)?;
    let mut scheduler = ManualScheduler::new();

    field.size_surface(&mut surface);
    field.start(&mut scheduler)?;
    for _ in 0..scene.frames {
        if scheduler.fire().is_none() {
            break;
        }
        field.tick(&mut surface, &mut scheduler)?;
    }
    field.stop(&mut scheduler);

    write_png(&surface, output)?;
    info!(output = %output.display(), frames = field.frames_drawn(), "snapshot written");
    Ok(field)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&FieldConfig::param_schema())?);
        }
        Command::Size { viewport, config } => {
            let vp = viewport.viewport();
            let field = ParticleField::new(config.load()?, vp, 0)?;
            let (w, h) = field.backing_size();
            if cli.json {
                let info = serde_json::json!({
                    "backing_width": w,
                    "backing_height": h,
                    "nodes": field.node_count(),
                    "threshold": field.threshold(),
                    "reduced_motion": vp.reduced_motion,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("backing:   {w}x{h}");
                println!("nodes:     {}", field.node_count());
                println!("threshold: {:.2}px", field.threshold());
            }
        }
        Command::Render {
            viewport,
            frames,
            seed,
            config,
            scene,
            output,
        } => {
            let scene = match scene {
                Some(path) => load_scene(&path)?,
                None => Scene {
                    width: viewport.width,
                    height: viewport.height,
                    device_pixel_ratio: viewport.dpr,
                    reduced_motion: viewport.reduced_motion,
                    seed,
                    frames,
                    config: config.load()?,
                },
            };
            debug!(seed = scene.seed, frames = scene.frames, "rendering scene");

            let field = render_scene(&scene, &output)?;
            let (w, h) = field.backing_size();

            if cli.json {
                let info = serde_json::json!({
                    "width": w,
                    "height": h,
                    "nodes": field.node_count(),
                    "frames": field.frames_drawn(),
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} nodes ({w}x{h}, {} frames, seed {}) -> {}",
                    field.node_count(),
                    field.frames_drawn(),
                    scene.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn load_config_applies_params() {
        let c = load_config(None, r#"{"base_count": 5}"#).unwrap();
        assert_eq!(c.base_count, 5);
    }

    #[test]
    fn load_config_rejects_bad_json() {
        let err = load_config(None, "{nope").unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn load_config_rejects_config_plus_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, "{}").unwrap();
        let err = load_config(Some(&path), r#"{"speed": 1}"#).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn load_config_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, r#"{"reduced_base_count": 10}"#).unwrap();
        let c = load_config(Some(&path), "{}").unwrap();
        assert_eq!(c.reduced_base_count, 10);
        assert_eq!(c.base_count, 70);
    }

    #[test]
    fn size_honours_params() {
        let cli = Cli::try_parse_from([
            "nodefield",
            "size",
            "-W",
            "1920",
            "-H",
            "1080",
            "--reduced-motion",
            "--params",
            r#"{"reduced_base_count": 10}"#,
        ])
        .unwrap();
        let Command::Size { viewport, config } = cli.command else {
            panic!("expected size");
        };
        let field = ParticleField::new(config.load().unwrap(), viewport.viewport(), 0).unwrap();
        assert_eq!(field.node_count(), 10);
    }

    #[test]
    fn oversized_base_count_exits_with_field_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::new(480.0, 270.0, 5);
        scene.config = load_config(None, r#"{"base_count": 18446744073709551615}"#).unwrap();
        let err = render_scene(&scene, &dir.path().join("out.png")).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn missing_scene_file_is_io_error() {
        let err = load_scene(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn render_scene_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let mut scene = Scene::new(480.0, 270.0, 5);
        scene.frames = 4;

        let field = render_scene(&scene, &output).unwrap();

        assert!(output.exists());
        assert_eq!(field.frames_drawn(), 4);
        assert!(!field.is_running());
    }

    #[test]
    fn render_scene_rejects_empty_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let scene = Scene::new(0.0, 270.0, 5);
        let err = render_scene(&scene, &dir.path().join("out.png")).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }
}
