//! # Sketchcalc
//!
//! Line-oriented driver for the sketchpad: a thin event source feeding
//! the tool state machine and the recognition client. Commands arrive on
//! stdin, one per line:
//!
//! ```text
//! tool <pen|eraser|rectangle|circle|line>
//! color <r> <g> <b>
//! width <n>
//! down <x> <y> | move <x> <y> | up
//! stroke <x0> <y0> <x1> <y1>
//! drag <x> <y>
//! run
//! reset
//! quit
//! ```

use std::time::Duration;

use sketchcalc_core::{Point, PointerEvent, PointerPhase, Rgb, Tool};
use sketchcalc_session::{PadConfig, Sketchpad};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,sketchcalc_session=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sketchcalc_session=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// A parsed stdin command.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Tool(Tool),
    Color(Rgb),
    Width(u32),
    Pointer(PointerEvent),
    Stroke(Point, Point),
    Drag(Point),
    Run,
    Reset,
    Quit,
}

/// Parse one input line. Returns `None` on empty or malformed input.
fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let args: Vec<&str> = parts.collect();

    match (verb, args.as_slice()) {
        ("tool", [name]) => {
            let tool = match *name {
                "pen" => Tool::Pen,
                "eraser" => Tool::Eraser,
                "rectangle" => Tool::Rectangle,
                "circle" => Tool::Circle,
                "line" => Tool::Line,
                _ => return None,
            };
            Some(Command::Tool(tool))
        }
        ("color", [r, g, b]) => Some(Command::Color(Rgb::new(
            r.parse().ok()?,
            g.parse().ok()?,
            b.parse().ok()?,
        ))),
        ("width", [n]) => Some(Command::Width(n.parse().ok()?)),
        ("down", [x, y]) => Some(Command::Pointer(pointer_event(PointerPhase::Down, x, y)?)),
        ("move", [x, y]) => Some(Command::Pointer(pointer_event(PointerPhase::Move, x, y)?)),
        ("up", []) => Some(Command::Pointer(PointerEvent::new(
            PointerPhase::Up,
            0.0,
            0.0,
        ))),
        ("stroke", [x0, y0, x1, y1]) => {
            Some(Command::Stroke(parse_point(x0, y0)?, parse_point(x1, y1)?))
        }
        ("drag", [x, y]) => Some(Command::Drag(parse_point(x, y)?)),
        ("run", []) => Some(Command::Run),
        ("reset", []) => Some(Command::Reset),
        ("quit" | "exit", []) => Some(Command::Quit),
        _ => None,
    }
}

fn parse_point(x: &str, y: &str) -> Option<Point> {
    Some(Point::new(x.parse().ok()?, y.parse().ok()?))
}

fn pointer_event(phase: PointerPhase, x: &str, y: &str) -> Option<PointerEvent> {
    let point = parse_point(x, y)?;
    Some(PointerEvent::new(phase, point.x, point.y))
}

/// Run one recognition round and print what it revealed.
async fn run_round(pad: &mut Sketchpad, reveal_delay: Duration) -> anyhow::Result<()> {
    let outcome = pad.run().await?;
    println!("{} record(s) recognized", outcome.records.len());
    if outcome.bounds.is_empty() {
        println!("  (no ink on canvas)");
    }

    // Wait out the flat reveal delay, then apply the reveals.
    tokio::time::sleep(reveal_delay + Duration::from_millis(50)).await;
    pad.poll_reveals();
    for entry in pad.session().formulas() {
        println!("  {}", entry.markup);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PadConfig::from_env();
    tracing::info!(
        "sketchcalc starting: {}x{} canvas, recognition at {}",
        config.width,
        config.height,
        config.api_url
    );

    let mut pad = Sketchpad::new(&config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("sketchcalc ready; type commands (quit to exit)");
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                eprintln!("unrecognized command: {line}");
            }
            continue;
        };

        match command {
            Command::Tool(tool) => pad.select_tool(tool),
            Command::Color(color) => pad.set_color(color),
            Command::Width(width) => {
                if let Err(err) = pad.set_stroke_width(width) {
                    eprintln!("{err}");
                }
            }
            Command::Pointer(event) => {
                if let Err(err) = pad.handle_pointer(event) {
                    eprintln!("{err}");
                }
            }
            Command::Drag(point) => pad.set_overlay_anchor(point),
            Command::Stroke(from, to) => {
                if let Err(err) = pad.pointer_down(from) {
                    eprintln!("{err}");
                    continue;
                }
                pad.pointer_move(to);
                pad.pointer_up();
            }
            Command::Run => {
                if let Err(err) = run_round(&mut pad, config.reveal_delay).await {
                    eprintln!("run failed: {err}");
                }
            }
            Command::Reset => pad.reset(),
            Command::Quit => break,
        }
    }

    Ok(())
}
