//! Message box simulator CLI
//!
//! Drives a headless message box manager frame by frame and prints what
//! would be on screen.
//!
//! Usage:
//!   msgbox-sim run "Saved." "You feel rested."      # tick until all expire
//!   msgbox-sim run --status "Loading" --frames 5    # status line never expires
//!   msgbox-sim dialog --text "Rest?" -b Yes -b No --input RIGHT,ENTER

mod script;

use clap::{Parser, Subcommand};
use msgbox_sim::{
    HeadlessGui, InteractiveOptions, MessageBoxConfig, MessageBoxManager, NO_BUTTON,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Frames to simulate when `--frames` is not given and boxes never run out.
const MAX_FRAMES: u32 = 10_000;

#[derive(Parser)]
#[command(name = "msgbox-sim")]
#[command(about = "Headless in-game message box simulator")]
struct Cli {
    /// Config file (defaults to ~/.local/share/msgbox-sim/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override seconds of display time per character
    #[arg(long, global = true)]
    time_per_char: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue static messages and tick frames until they expire
    Run {
        /// Messages to show, oldest first
        messages: Vec<String>,

        /// Status line that stays until the end
        #[arg(long)]
        status: Option<String>,

        /// Seconds per frame
        #[arg(long, default_value_t = 0.1)]
        dt: f64,

        /// Number of frames (default: until no timed message is left)
        #[arg(long)]
        frames: Option<u32>,
    },

    /// Open an interactive dialog and feed it scripted input
    Dialog {
        /// Dialog text
        #[arg(long)]
        text: String,

        /// Button labels, in order
        #[arg(short, long = "button", required = true)]
        buttons: Vec<String>,

        /// Button chosen by ESCAPE
        #[arg(long)]
        cancel: Option<usize>,

        /// Comma-separated inputs: key names (ENTER, ESCAPE, LEFT, ...) or click:N
        #[arg(long, default_value = "ENTER")]
        input: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => MessageBoxConfig::load_from(path)?,
        None => MessageBoxConfig::load(),
    };
    if let Some(t) = cli.time_per_char {
        config.time_per_char = t;
        config.validate(Path::new("--time-per-char"))?;
    }

    let gui = HeadlessGui::from_config(&config);
    let mut manager = MessageBoxManager::from_config(gui, &config);

    match cli.command {
        Commands::Run { messages, status, dt, frames } => {
            run_frames(&mut manager, &messages, status.as_deref(), dt, frames);
        }
        Commands::Dialog { text, buttons, cancel, input } => {
            let inputs = script::parse_inputs(&input)?;
            run_dialog(&mut manager, &text, buttons, cancel, &inputs);
        }
    }
    Ok(())
}

fn run_frames(
    manager: &mut MessageBoxManager<HeadlessGui>,
    messages: &[String],
    status: Option<&str>,
    dt: f64,
    frames: Option<u32>,
) {
    if let Some(text) = status {
        manager.create_message_box(text, true);
    }
    for text in messages {
        manager.create_message_box(text, false);
    }
    print_stack(manager, 0, 0.0);

    let timed_left = |m: &MessageBoxManager<HeadlessGui>| {
        m.static_message_count() > usize::from(m.status_message().is_some())
    };
    let limit = frames.unwrap_or(MAX_FRAMES);
    let mut elapsed = 0.0;
    for frame in 1..=limit {
        if frames.is_none() && !timed_left(&*manager) {
            break;
        }
        manager.on_frame(dt);
        elapsed += dt;
        print_stack(manager, frame, elapsed);
    }
}

fn print_stack(manager: &MessageBoxManager<HeadlessGui>, frame: u32, elapsed: f64) {
    println!("frame {frame} t={elapsed:.2}s");
    // Print top-down, the way the stack appears on screen.
    let boxes: Vec<_> = manager.static_messages().collect();
    for (id, mb) in boxes.iter().rev() {
        let tag = if manager.status_message().is_some_and(|s| s.handle() == mb.handle()) {
            "status".to_string()
        } else {
            format!("{:.2}/{:.2}s", mb.elapsed_time, mb.max_time)
        };
        println!("  {:?} y={:<4} [{}] {}", id, mb.offset(), tag, mb.text());
    }
}

fn run_dialog(
    manager: &mut MessageBoxManager<HeadlessGui>,
    text: &str,
    buttons: Vec<String>,
    cancel: Option<usize>,
    inputs: &[script::Input],
) {
    let options = InteractiveOptions {
        cancel_button: cancel,
        ..Default::default()
    };
    let labels = buttons.clone();
    if !manager.create_interactive_message_box_with(text, buttons, options) {
        eprintln!("Could not open dialog");
        return;
    }

    let answer = Rc::new(Cell::new(NO_BUTTON));
    let slot = answer.clone();
    manager.subscribe_button_pressed(move |button| slot.set(button));

    let Some(panel) = manager.interactive().map(|d| d.handle()) else {
        return;
    };
    for input in inputs {
        let chosen = manager.handle_toolkit_event(input.to_event(panel));
        let focus = manager.interactive().map(|d| d.focused_button());
        println!("{:?} -> focus {:?}{}", input, focus, if chosen { " (chosen)" } else { "" });
    }
    manager.on_frame(0.0);

    match usize::try_from(answer.get()).ok().and_then(|i| labels.get(i)) {
        Some(label) => println!("answer: {} ({})", answer.get(), label),
        None => println!("answer: none"),
    }
    println!("read_pressed_button: {}", manager.read_pressed_button());
}
