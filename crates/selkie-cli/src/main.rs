use selkie_layout::SankeyConfig;
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(selkie_core::Error),
    Layout(selkie_layout::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<selkie_core::Error> for CliError {
    fn from(value: selkie_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<selkie_layout::Error> for CliError {
    fn from(value: selkie_layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Graph,
    #[default]
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    width: f64,
    height: f64,
    node_width: f64,
    node_padding: f64,
    iterations: usize,
    curvature: f64,
    out: Option<String>,
}

fn usage() -> &'static str {
    "selkie-cli\n\
\n\
USAGE:\n\
  selkie-cli graph [--pretty] [--out <path>] [<csv-path>|-]\n\
  selkie-cli [layout] [--pretty] [--width <px>] [--height <px>] [--node-width <px>]\n\
             [--node-padding <px>] [--iterations <n>] [--curvature <0..1>] [--out <path>] [<csv-path>|-]\n\
\n\
NOTES:\n\
  - If <csv-path> is omitted or '-', input is read from stdin.\n\
  - The CSV must carry display,name,month,year,tag_1,tag_2,tag_3,url,img columns;\n\
    only rows with display=yes are loaded.\n\
  - graph prints the pruned, normalized relationship graph as JSON.\n\
  - layout prints final node/link geometry (including link path data) as JSON.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Layout,
        // Defaults mirror the 1600x1000 canvas (10px margins) the diagram
        // was designed for.
        width: 1580.0,
        height: 980.0,
        node_width: 150.0,
        node_padding: 20.0,
        iterations: 32,
        curvature: 0.6,
        ..Default::default()
    };

    fn parse_px(raw: Option<&String>) -> Result<f64, CliError> {
        let Some(raw) = raw else {
            return Err(CliError::Usage(usage()));
        };
        let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
        if !v.is_finite() {
            return Err(CliError::Usage(usage()));
        }
        Ok(v)
    }

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" => args.command = Command::Graph,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--width" => args.width = parse_px(it.next())?,
            "--height" => args.height = parse_px(it.next())?,
            "--node-width" => args.node_width = parse_px(it.next())?,
            "--node-padding" => args.node_padding = parse_px(it.next())?,
            "--iterations" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.iterations = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--curvature" => {
                let c = parse_px(it.next())?;
                if !(0.0..=1.0).contains(&c) {
                    return Err(CliError::Usage(usage()));
                }
                args.curvature = c;
            }
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            _ if a.starts_with("--") => return Err(CliError::Usage(usage())),
            _ => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(a.clone());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let csv = read_input(args.input.as_deref())?;
    let records = selkie_core::csv::load_records(&csv)?;
    let graph = selkie_core::build_graph(&records);

    match args.command {
        Command::Graph => write_json(&graph, args.pretty, args.out.as_deref()),
        Command::Layout => {
            let config = SankeyConfig {
                node_width: args.node_width,
                node_padding: args.node_padding,
                size: [args.width, args.height],
                iterations: args.iterations,
                curvature: args.curvature,
                ..Default::default()
            };
            let layout = selkie_layout::layout(&graph, &config)?;
            write_json(&layout, args.pretty, args.out.as_deref())
        }
    }
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
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
