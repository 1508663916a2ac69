use elkwidget::{WidgetConfig, WidgetError, WidgetRenderer};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Widget(WidgetError),
    Json(serde_json::Error),
    Config(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Widget(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<WidgetError> for CliError {
    fn from(value: WidgetError) -> Self {
        Self::Widget(value)
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
    Transform,
    Features,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    defs: Option<String>,
    id_prefix: Option<String>,
    config: Option<String>,
    verbose: bool,
}

fn usage() -> &'static str {
    "elkwidget-cli\n\
\n\
USAGE:\n\
  elkwidget-cli [transform] [--pretty] [--defs <path>] [--id-prefix <p>] [--config <path>] [--verbose] [<path>|-]\n\
  elkwidget-cli features [--pretty] [--config <path>]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the ELK JSON graph is read from stdin.\n\
  - transform prints the scene graph JSON; --defs supplies the definitions table.\n\
  - --id-prefix overrides the config's idPrefix for definition references.\n\
  - features prints the effective per-kind capability table.\n\
  - Logs go to stderr; RUST_LOG controls the filter (default: warn, --verbose: debug).\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "transform" => args.command = Command::Transform,
            "features" => args.command = Command::Features,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--defs" => args.defs = Some(next_value(&mut it)?.clone()),
            "--id-prefix" => args.id_prefix = Some(next_value(&mut it)?.clone()),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
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
            "-" if args.input.is_none() => args.input = Some("-".to_string()),
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

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
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

fn read_json_file(path: &str) -> Result<Value, CliError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_config(args: &Args) -> Result<WidgetConfig, CliError> {
    let mut config = WidgetConfig::default();
    if let Some(path) = args.config.as_deref() {
        let overrides = read_json_file(path)?;
        if !overrides.is_object() {
            return Err(CliError::Config(format!("{path}: expected a JSON object")));
        }
        config.deep_merge(&overrides);
    }
    if let Some(prefix) = args.id_prefix.as_deref() {
        config.set_value("idPrefix", Value::String(prefix.to_string()));
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let renderer = WidgetRenderer::new().with_config(config);

    match args.command {
        Command::Features => write_json(&renderer.features(), args.pretty),
        Command::Transform => {
            let text = read_input(args.input.as_deref())?;
            let graph: Value = serde_json::from_str(&text)?;
            let defs = match args.defs.as_deref() {
                Some(path) => read_json_file(path)?,
                None => Value::Null,
            };
            tracing::debug!(input = args.input.as_deref().unwrap_or("-"), "transforming");
            let scene = renderer.render_scene_json(&graph, &defs)?;
            write_json(&scene, args.pretty)
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
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
