#![deny(unsafe_code)]
//! CLI binary for particle-backdrop.
//!
//! Subcommands:
//! - `render`: run a scene for N frames, write the last frame as PNG
//! - `trace`: run a scene and print per-frame particle/link counts
//! - `config`: print the default config and its schema

mod error;

use backdrop_core::{BackdropConfig, DrawCommand, Recorder, Rgb, Rgba, Scene};
use backdrop_raster::render_scene;
use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(name = "backdrop", about = "Animated particle background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scene for N frames and write the final frame as a PNG.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Background as #rrggbb, or "transparent".
        #[arg(short, long, default_value = "#111827")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "backdrop.png")]
        output: PathBuf,
    },
    /// Run a scene and print particle and link counts for every frame.
    Trace {
        #[command(flatten)]
        scene: SceneArgs,

        /// Also print every draw command of the final frame.
        #[arg(long)]
        commands: bool,
    },
    /// Print the default configuration and its schema.
    Config,
}

#[derive(Args)]
struct SceneArgs {
    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 120)]
    frames: u64,

    /// RNG seed for particle placement.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Config overrides as a JSON object.
    #[arg(long, default_value = "{}")]
    config: String,

    /// Read the whole scene from a JSON file instead of the flags above.
    #[arg(long, conflicts_with_all = ["width", "height", "frames", "seed", "config"])]
    scene: Option<PathBuf>,
}

impl SceneArgs {
    fn into_scene(self) -> Result<Scene, CliError> {
        let scene = match self.scene {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                serde_json::from_str(&text).map_err(|e| {
                    CliError::Input(format!("invalid scene file {}: {e}", path.display()))
                })?
            }
            None => {
                let config: serde_json::Value = serde_json::from_str(&self.config)
                    .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
                Scene {
                    width: self.width,
                    height: self.height,
                    seed: self.seed,
                    frames: self.frames,
                    config,
                }
            }
        };
        scene.validate()?;
        Ok(scene)
    }
}

fn parse_background(raw: &str) -> Result<Rgba, CliError> {
    if raw.eq_ignore_ascii_case("transparent") {
        return Ok(Rgb::new(0, 0, 0).with_alpha(0.0));
    }
    Ok(Rgb::from_hex(raw)?.with_alpha(1.0))
}

/// One compact line in JSON mode so every stdout line parses on its own.
fn commands_output(commands: &[DrawCommand], json: bool) -> Result<String, CliError> {
    let text = if json {
        serde_json::to_string(commands)?
    } else {
        serde_json::to_string_pretty(commands)?
    };
    Ok(text)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Config => {
            let info = serde_json::json!({
                "defaults": BackdropConfig::default().params(),
                "schema": BackdropConfig::param_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Render {
            scene,
            background,
            output,
        } => {
            let scene = scene.into_scene()?;
            let background = parse_background(&background)?;
            let raster = render_scene(&scene, background)?;
            backdrop_raster::snapshot::write_png(&raster, &output)?;
            info!(
                width = scene.width,
                height = scene.height,
                frames = scene.frames,
                output = %output.display(),
                "wrote snapshot"
            );

            if cli.json {
                let info = serde_json::json!({
                    "width": scene.width,
                    "height": scene.height,
                    "frames": scene.frames,
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({} frames, seed {}) -> {}",
                    scene.width,
                    scene.height,
                    scene.frames,
                    scene.seed,
                    output.display()
                );
            }
        }
        Command::Trace { scene, commands } => {
            let scene = scene.into_scene()?;
            let mut animator = scene.animator()?;
            let mut recorder = Recorder::new();
            let mut last = Vec::new();
            for frame in 1..=scene.frames {
                animator.frame(&mut recorder);
                let (particles, links) = (recorder.circles(), recorder.lines());
                last = recorder.take();
                if cli.json {
                    let line = serde_json::json!({
                        "frame": frame,
                        "particles": particles,
                        "links": links,
                    });
                    println!("{}", serde_json::to_string(&line)?);
                } else {
                    println!("frame {frame}: {particles} particles, {links} links");
                }
            }
            if commands {
                println!("{}", commands_output(&last, cli.json)?);
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
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
