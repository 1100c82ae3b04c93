#![deny(unsafe_code)]
//! `duck-dodge`: headless host for the sketchpad and obstacle game.
//!
//! Subcommands:
//! - `simulate` — play the game on a synthetic clock with a key script
//! - `frame` — compose one sketch, rig, or portrait frame and print it
//! - `config` — print effective game parameters and their schema

mod error;
mod script;

use clap::{Parser, Subcommand};
use duck_dodge_core::{
    compose, Control, DrawMode, Frame, Game, GameConfig, Phase, Rgba, ShapeKind, Sketch, UiState,
    View,
};
use error::CliError;
use script::KeyScript;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "duck-dodge", about = "Headless duck-dodge sketchpad and game")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the game for N ticks at a fixed frame interval.
    Simulate {
        /// Maximum number of ticks; the run ends early on game over.
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,

        /// Milliseconds between ticks.
        #[arg(long, default_value_t = 16.0)]
        dt: f64,

        /// PRNG seed for obstacle spawning.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Game parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Key presses as "TICK:up|down" entries, comma separated.
        #[arg(short, long, default_value = "")]
        keys: String,

        /// Write the last drawn frame as JSON to this path.
        #[arg(long)]
        frame_out: Option<PathBuf>,
    },
    /// Compose one frame from UI settings and print its draw calls.
    Frame {
        /// Scene to compose (sketch, rig, portrait).
        #[arg(long, default_value = "sketch")]
        view: String,

        /// Shape painted at each --at position (point, triangle, circle).
        #[arg(long, default_value = "point")]
        shape: String,

        /// Brush color as #rrggbb or #rrggbbaa.
        #[arg(long, default_value = "#ffffff")]
        color: String,

        /// Brush size in slider units.
        #[arg(long, default_value_t = 5.0)]
        size: f32,

        /// Circle segment count.
        #[arg(long, default_value_t = 10)]
        segments: u32,

        /// NDC position "x,y" to paint; repeat for several shapes.
        #[arg(long = "at", value_parser = parse_point, allow_hyphen_values = true)]
        at: Vec<[f32; 2]>,

        /// Scene orbit angle in degrees.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        global_angle: f32,

        /// Upper-arm joint angle in degrees.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        yellow: f32,

        /// Forearm joint angle in degrees.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        magenta: f32,

        /// Swing the upper arm instead of holding --yellow.
        #[arg(long)]
        animate_yellow: bool,

        /// Swing the forearm instead of holding --magenta.
        #[arg(long)]
        animate_magenta: bool,

        /// Animation time in seconds.
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },
    /// Print effective game parameters and the parameter schema.
    Config {
        /// Overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_point(s: &str) -> Result<[f32; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
    };
    Ok([coord(x)?, coord(y)?])
}

fn parse_params(params: &str) -> Result<GameConfig, CliError> {
    let value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    Ok(GameConfig::from_json(&value))
}

struct Outcome {
    ticks_run: u64,
    game: Game,
    last_frame: Option<Frame>,
}

fn simulate(config: GameConfig, seed: u64, ticks: u64, dt: f64, script: &KeyScript) -> Outcome {
    let mut game = Game::new(config, seed);
    game.start(0.0);

    let mut last_frame = None;
    let mut ticks_run = 0;
    for tick in 1..=ticks {
        for key in script.keys_at(tick) {
            game.press(key);
        }
        match game.tick(tick as f64 * dt) {
            Some(frame) => last_frame = Some(frame),
            None => break,
        }
        ticks_run = tick;
        if game.phase() == Phase::GameOver {
            break;
        }
    }
    Outcome {
        ticks_run,
        game,
        last_frame,
    }
}

fn summarize(frame: &Frame) -> (usize, usize, usize) {
    let points = frame
        .commands
        .iter()
        .filter(|c| c.mode == DrawMode::Points)
        .count();
    let triangles = frame.commands.iter().map(|c| c.triangle_count()).sum();
    (frame.commands.len(), points, triangles)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Simulate {
            ticks,
            dt,
            seed,
            params,
            keys,
            frame_out,
        } => {
            let config = parse_params(&params)?;
            let script = KeyScript::parse(&keys).map_err(CliError::Input)?;
            log::debug!(
                "simulating up to {ticks} ticks of {dt} ms, seed {seed}, {} scripted key(s)",
                script.len()
            );
            let outcome = simulate(config, seed, ticks, dt, &script);

            if let (Some(path), Some(frame)) = (&frame_out, &outcome.last_frame) {
                let json = serde_json::to_string_pretty(frame)?;
                std::fs::write(path, json)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                log::info!("wrote last frame to {}", path.display());
            }

            let state = outcome.game.state();
            let game_over = state.phase == Phase::GameOver;
            if cli.json {
                let info = serde_json::json!({
                    "seed": seed,
                    "ticks": outcome.ticks_run,
                    "elapsed_ms": outcome.ticks_run as f64 * dt,
                    "phase": state.phase,
                    "score": state.display_score(),
                    "duck_y": state.duck.y,
                    "obstacles": state.obstacles.len(),
                    "game_over": game_over,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let overlay = outcome.last_frame.as_ref().map(|f| &f.overlay);
                let line = overlay
                    .and_then(|o| o.game_over.clone().or_else(|| o.score.clone()))
                    .unwrap_or_else(|| format!("Score: {}", state.display_score()));
                println!("{line}");
                eprintln!(
                    "{} ticks ({:.0} ms, seed {seed}), {} obstacle(s) on screen",
                    outcome.ticks_run,
                    outcome.ticks_run as f64 * dt,
                    state.obstacles.len()
                );
            }
        }
        Command::Frame {
            view,
            shape,
            color,
            size,
            segments,
            at,
            global_angle,
            yellow,
            magenta,
            animate_yellow,
            animate_magenta,
            time,
        } => {
            let view: View = view.parse()?;
            let kind: ShapeKind = shape.parse()?;
            let color = Rgba::from_hex(&color)?;

            let mut ui = UiState::default();
            let controls = [
                Control::SelectView(view),
                Control::SelectShape(kind),
                Control::Size(size),
                Control::Segments(segments),
                Control::GlobalAngle(global_angle),
                Control::YellowAngle(yellow),
                Control::MagentaAngle(magenta),
                Control::AnimateYellow(animate_yellow),
                Control::AnimateMagenta(animate_magenta),
            ];
            for control in controls {
                ui.apply(control);
            }
            // Sliders only carry RGB; the hex color may also set alpha.
            ui.brush.color = color;

            let mut sketch = Sketch::new();
            for position in at {
                sketch.paint(&ui.brush, position);
            }
            let frame = compose(&ui, &sketch, time);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                let (calls, points, triangles) = summarize(&frame);
                println!(
                    "{view:?} frame: {calls} draw call(s), {points} point call(s), \
                     {triangles} triangle(s), {} vertices",
                    frame.vertex_count()
                );
                for (i, call) in frame.commands.iter().enumerate() {
                    println!(
                        "  {i:>3}: {:?} {} vertices {}",
                        call.mode,
                        call.vertex_count(),
                        call.color.to_hex()
                    );
                }
            }
        }
        Command::Config { params } => {
            let config = parse_params(&params)?;
            if cli.json {
                let info = serde_json::json!({
                    "params": config.params(),
                    "schema": GameConfig::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&config.params())?);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

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
    fn parse_point_accepts_negative_coordinates() {
        assert_eq!(parse_point("-0.5, 0.25").unwrap(), [-0.5, 0.25]);
        assert!(parse_point("0.5").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn bad_params_json_is_an_input_error() {
        let err = parse_params("{nope").err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn simulate_is_deterministic_for_a_seed() {
        let script = KeyScript::parse("5:up,9:down").unwrap();
        let a = simulate(GameConfig::default(), 7, 400, 16.0, &script);
        let b = simulate(GameConfig::default(), 7, 400, 16.0, &script);
        assert_eq!(a.ticks_run, b.ticks_run);
        assert_eq!(a.game.state(), b.game.state());
    }

    #[test]
    fn simulate_applies_scripted_keys() {
        let script = KeyScript::parse("1:up,1:up,2:up").unwrap();
        let outcome = simulate(GameConfig::default(), 1, 3, 16.0, &script);
        assert!((outcome.game.state().duck.y - 0.09).abs() < 1e-6);
    }

    #[test]
    fn simulate_accrues_score_over_clean_run() {
        // 10 ticks of 100 ms, all before the first spawn at 2000 ms.
        let outcome = simulate(GameConfig::default(), 1, 10, 100.0, &KeyScript::parse("").unwrap());
        assert_eq!(outcome.ticks_run, 10);
        assert_eq!(outcome.game.state().display_score(), 10);
        assert!(outcome.last_frame.is_some());
    }

    #[test]
    fn simulate_stops_at_game_over() {
        // Obstacles spawn in the duck's lane and body, so the first spawn hits.
        let config = GameConfig::from_json(&serde_json::json!({
            "spawn_interval_ms": 0.0,
            "spawn_x": -0.25,
            "lane_range": [0.0, 0.0],
        }));
        let outcome = simulate(config, 3, 1000, 16.0, &KeyScript::parse("").unwrap());
        assert_eq!(outcome.ticks_run, 1);
        assert_eq!(outcome.game.phase(), Phase::GameOver);
        let overlay = &outcome.last_frame.unwrap().overlay;
        assert!(overlay.game_over.as_deref().unwrap_or("").starts_with("Game Over!"));
    }

    #[test]
    fn rig_frame_summary_counts_cube_faces() {
        let ui = UiState {
            view: View::Rig,
            ..UiState::default()
        };
        let frame = compose(&ui, &Sketch::new(), 0.0);
        assert_eq!(summarize(&frame), (18, 0, 36));
    }
}
