use serde::Serialize;
use spanpath::{
    AdjacencyMap, Analysis, GraphKind, ParseOptions, ShortestPaths, SourceSelection, SpanningTree,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Predefined graphs addressable by index, resolved against the graphs directory.
const CATALOG: [(&str, &str); 7] = [
    ("1", "sample_graph.txt"),
    ("2", "test_graph_undirected_1.txt"),
    ("3", "test_graph_undirected_2.txt"),
    ("4", "test_graph_undirected_3.txt"),
    ("5", "test_graph_directed_1.txt"),
    ("6", "test_graph_directed_2.txt"),
    ("7", "test_graph_directed_3.txt"),
];

const DEFAULT_GRAPHS_DIR: &str = "fixtures/graphs";
const GRAPHS_DIR_ENV: &str = "SPANPATH_GRAPHS_DIR";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    UnknownGraph(String),
    Io(std::io::Error),
    Graph(spanpath::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::UnknownGraph(index) => write!(
                f,
                "no predefined graph with index {index} (choose 1 to {})",
                CATALOG.len()
            ),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) if err.is_malformed_input() => {
                write!(f, "malformed graph input: {err}")
            }
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<spanpath::Error> for CliError {
    fn from(value: spanpath::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Run,
    List,
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    source: Option<String>,
    format: OutputFormat,
    pretty: bool,
    strict: bool,
    verbose: bool,
    graphs_dir: Option<PathBuf>,
}

fn usage() -> &'static str {
    "spanpath-cli\n\
\n\
USAGE:\n\
  spanpath-cli [run] [--source <vertex>] [--format text|json] [--pretty] [--strict] [--graphs-dir <dir>] [--verbose] [<index>|<path>|-]\n\
  spanpath-cli list [--graphs-dir <dir>]\n\
\n\
NOTES:\n\
  - <index> selects a predefined graph (see `list`); anything else is read as a file path.\n\
  - If the input is omitted or '-', the graph is read from stdin.\n\
  - --source overrides the source vertex declared in the input.\n\
  - --strict rejects a header whose vertex count disagrees with the edge list.\n\
  - The graphs directory defaults to $SPANPATH_GRAPHS_DIR, then ./fixtures/graphs.\n\
  - Log filtering follows RUST_LOG (default: warnings only; --verbose enables debug).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "run" => args.command = Command::Run,
            "list" => args.command = Command::List,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--verbose" | "-v" => args.verbose = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--source" => {
                let Some(source) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.source = Some(source.clone());
            }
            "--graphs-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.graphs_dir = Some(PathBuf::from(dir));
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "spanpath=debug,spanpath_cli=debug"
    } else {
        "spanpath=warn,spanpath_cli=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn graphs_dir(args: &Args) -> PathBuf {
    args.graphs_dir
        .clone()
        .or_else(|| std::env::var_os(GRAPHS_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAPHS_DIR))
}

/// Where the graph text comes from, plus the name shown in reports.
#[derive(Debug)]
enum GraphSource {
    Stdin,
    File { path: PathBuf, name: String },
}

fn select_graph(input: Option<&str>, dir: &Path) -> Result<GraphSource, CliError> {
    let Some(input) = input.filter(|s| *s != "-") else {
        return Ok(GraphSource::Stdin);
    };

    if let Some((_, file)) = CATALOG.iter().find(|(index, _)| *index == input) {
        return Ok(GraphSource::File {
            path: dir.join(file),
            name: (*file).to_string(),
        });
    }
    // Single digits are always catalog lookups, never file names.
    if input.len() == 1 && input.chars().all(|c| c.is_ascii_digit()) {
        return Err(CliError::UnknownGraph(input.to_string()));
    }

    let path = PathBuf::from(input);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());
    Ok(GraphSource::File { path, name })
}

fn read_graph(source: &GraphSource) -> Result<(String, String), CliError> {
    match source {
        GraphSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(("<stdin>".to_string(), buf))
        }
        GraphSource::File { path, name } => {
            tracing::debug!(path = %path.display(), "reading graph");
            Ok((name.clone(), std::fs::read_to_string(path)?))
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    graph: &'a str,
    kind: GraphKind,
    source: &'a SourceSelection,
    adjacency: &'a AdjacencyMap,
    shortest_paths: &'a ShortestPaths,
    spanning_tree: &'a SpanningTree,
    total_weight: u64,
}

fn write_json(out: &mut impl Write, value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_text(out: &mut impl Write, name: &str, analysis: &Analysis) -> Result<(), CliError> {
    writeln!(out, "The chosen graph is: {name}")?;
    writeln!(out)?;

    writeln!(out, "Adjacency list representation of graph:")?;
    let mut vertices: Vec<_> = analysis.adjacency.iter().collect();
    vertices.sort_by(|a, b| a.0.cmp(b.0));
    for (v, neighbors) in vertices {
        let mut neighbors: Vec<_> = neighbors.iter().collect();
        neighbors.sort();
        let rendered: Vec<String> = neighbors
            .iter()
            .map(|(w, weight)| format!("{w}: {weight}"))
            .collect();
        writeln!(out, "{v} : {{{}}}", rendered.join(", "))?;
    }
    writeln!(out)?;

    writeln!(out, "Source: {}", analysis.source.vertex())?;
    writeln!(out)?;

    writeln!(out, "Shortest path:")?;
    for (v, entry) in analysis.shortest_paths.sorted() {
        writeln!(
            out,
            "{v} : distance {}, parent {}",
            entry.distance, entry.parent
        )?;
    }
    writeln!(out)?;

    writeln!(out, "MST:")?;
    for (v, children) in analysis.spanning_tree.sorted() {
        let rendered: Vec<String> = children
            .iter()
            .map(|e| format!("({}, {})", e.weight, e.child))
            .collect();
        writeln!(out, "{v} : {{{}}}", rendered.join(", "))?;
    }
    writeln!(out, "Total cost: {}", analysis.spanning_tree.total_weight())?;
    Ok(())
}

fn list_catalog(out: &mut impl Write, dir: &Path) -> Result<(), CliError> {
    for (index, file) in CATALOG {
        let marker = if dir.join(file).is_file() { "" } else { " (missing)" };
        writeln!(out, "{index}: {file}{marker}")?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let dir = graphs_dir(&args);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Command::List = args.command {
        return list_catalog(&mut out, &dir);
    }

    let graph_source = select_graph(args.input.as_deref(), &dir)?;
    let (name, text) = read_graph(&graph_source)?;

    let options = if args.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::lenient()
    };
    let analysis = spanpath::analyze(&text, options, args.source.as_deref())?;

    if analysis.source.is_fallback() {
        eprintln!(
            "warning: no source vertex provided; using `{}` as the source instead",
            analysis.source.vertex()
        );
    }

    match args.format {
        OutputFormat::Text => write_text(&mut out, &name, &analysis)?,
        OutputFormat::Json => {
            let report = Report {
                graph: &name,
                kind: analysis.descriptor.kind,
                source: &analysis.source,
                adjacency: &analysis.adjacency,
                shortest_paths: &analysis.shortest_paths,
                spanning_tree: &analysis.spanning_tree,
                total_weight: analysis.spanning_tree.total_weight(),
            };
            write_json(&mut out, &report, args.pretty)?;
        }
    }
    out.flush()?;
    Ok(())
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

    init_logging(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err @ (CliError::Usage(_) | CliError::UnknownGraph(_))) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
