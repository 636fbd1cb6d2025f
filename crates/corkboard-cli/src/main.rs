use corkboard::render::{
    TimelineOptions, layout_timeline, links_layer_svg, route_links, timeline_svg,
};
use corkboard::{Board, BoardEvent, FixedMeasure, RectData, Runtime, events_from_json};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Board(corkboard::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Board(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<corkboard::Error> for CliError {
    fn from(value: corkboard::Error) -> Self {
        Self::Board(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Links,
    Timeline,
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Json,
    Svg,
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    input: Option<String>,
    pretty: bool,
    format: OutputFormat,
    width: f64,
    height: f64,
    select: Option<String>,
    hover: Option<String>,
    out: Option<String>,
}

/// A board plus the measured geometry a live host would have supplied: the
/// scroll container's rect and one rect per mounted paragraph. Paragraphs
/// without a measurement are simply never mounted.
#[derive(Debug, Deserialize)]
struct LinksDocument {
    board: Board,
    container: RectData,
    #[serde(default)]
    measurements: HashMap<String, RectData>,
}

fn usage() -> &'static str {
    "corkboard-cli\n\
\n\
USAGE:\n\
  corkboard-cli links [--format json|svg] [--pretty] [--select <paragraph-id>] [--hover <paragraph-id>] [--out <path>] [<path>|-]\n\
  corkboard-cli timeline [--format json|svg] [--pretty] [--width <w>] [--height <h>] [--select <event-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - links expects { board, container, measurements } JSON; measurements map\n\
    paragraph ids to DOMRect-shaped { left, top, width, height } values.\n\
  - timeline expects a JSON array of events with startTime/endTime in ms.\n\
  - The default output is the layout as JSON; --format svg emits an SVG\n\
    document instead.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 960.0,
        height: 320.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "links" => args.command = Some(Command::Links),
            "timeline" => args.command = Some(Command::Timeline),
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = match fmt.trim().to_ascii_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "svg" => OutputFormat::Svg,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.width.is_finite() && args.width > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.height.is_finite() && args.height > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--select" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.select = Some(id.clone());
            }
            "--hover" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.hover = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other => {
                if other.starts_with("--") {
                    return Err(CliError::Usage(usage()));
                }
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_output(out: Option<&str>, text: &str) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            println!("{text}");
            Ok(())
        }
        Some(path) => Ok(std::fs::write(path, text)?),
    }
}

fn json_string<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn run_links(args: &Args, text: &str) -> Result<String, CliError> {
    let doc: LinksDocument = serde_json::from_str(text)?;
    doc.board.validate()?;

    // Mount in the board's declaration order so registry iteration (and the
    // routed output) stays deterministic regardless of JSON map order.
    let mounts: Vec<(String, String)> = doc
        .board
        .notes
        .iter()
        .flat_map(|note| {
            note.paragraphs
                .iter()
                .map(|p| (note.id.clone(), p.id.clone()))
        })
        .collect();

    let mut runtime = Runtime::new(doc.board);
    let container = Arc::new(FixedMeasure::new(doc.container.to_rect()));
    for (note_id, paragraph_id) in mounts {
        let Some(measured) = doc.measurements.get(&paragraph_id) else {
            continue;
        };
        runtime.apply(BoardEvent::ParagraphMounted {
            note_id,
            paragraph_id,
            handle: Arc::new(FixedMeasure::new(measured.to_rect())),
            container: Some(container.clone()),
        });
    }
    runtime.apply(BoardEvent::RecalculateRequested);
    runtime.run_frame();

    if let Some(id) = &args.select {
        // An id that matches no paragraph just selects nothing.
        let owner = runtime
            .board()
            .notes
            .iter()
            .find(|n| n.paragraphs.iter().any(|p| &p.id == id))
            .map(|n| n.id.clone());
        if let Some(note_id) = owner {
            runtime.apply(BoardEvent::ParagraphSelected {
                note_id,
                paragraph_id: id.clone(),
            });
        }
    }
    if let Some(id) = &args.hover {
        runtime.apply(BoardEvent::ParagraphHovered {
            paragraph_id: Some(id.clone()),
        });
    }

    let layout = route_links(&runtime);
    match args.format {
        OutputFormat::Json => json_string(&layout, args.pretty),
        OutputFormat::Svg => Ok(links_layer_svg(&layout)),
    }
}

fn run_timeline(args: &Args, text: &str) -> Result<String, CliError> {
    let events = events_from_json(text)?;
    let options = TimelineOptions {
        width: args.width,
        height: args.height,
        selected_event: args.select.clone(),
    };
    let layout = layout_timeline(&events, &options);
    match args.format {
        OutputFormat::Json => json_string(&layout, args.pretty),
        OutputFormat::Svg => Ok(timeline_svg(&layout)),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(command) = args.command else {
        return Err(CliError::Usage(usage()));
    };
    let text = read_input(args.input.as_deref())?;
    let output = match command {
        Command::Links => run_links(&args, &text)?,
        Command::Timeline => run_timeline(&args, &text)?,
    };
    write_output(args.out.as_deref(), &output)
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
