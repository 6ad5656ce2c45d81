#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cinegraph_core::ErrorCode;
use cinegraph_core::config::{EffectiveConfig, resolve_config};
use cmd::GraphFile;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "cg",
    author,
    version,
    about = "cinegraph: movie graphs, connectivity and strongly connected components",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides `--json`, `FORMAT` and the user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Graph file to operate on. Defaults to `[graph] file` from
    /// `.cinegraph/config.toml`, then `grafo.txt`.
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Write an empty graph file",
        after_help = "EXAMPLES:\n    # Undirected graph in grafo.txt\n    cg init\n\n    # Directed graph in a custom file\n    cg --file sequels.txt init --directed"
    )]
    Init(cmd::init::InitArgs),

    #[command(about = "Print the graph file as stored")]
    Cat,

    #[command(
        about = "Show the adjacency listing",
        after_help = "EXAMPLES:\n    cg show\n    cg show --json"
    )]
    Show,

    #[command(
        about = "Analyze connectivity",
        long_about = "Undirected graphs: check whether every movie is reachable from the first one.\nDirected graphs: find strongly connected components and the reduced graph between them."
    )]
    Analyze,

    #[command(
        about = "Add or remove movies",
        after_help = "EXAMPLES:\n    cg vertex add 550 --label \"Fight Club\" --tags 18,53\n    cg vertex rm 550"
    )]
    Vertex {
        #[command(subcommand)]
        command: cmd::vertex::VertexCommand,
    },

    #[command(
        about = "Add or remove edges",
        after_help = "EXAMPLES:\n    cg edge add 550 680\n    cg edge rm 680 550"
    )]
    Edge {
        #[command(subcommand)]
        command: cmd::edge::EdgeCommand,
    },

    #[command(about = "Add an edge for every pair of movies sharing a genre tag")]
    Link,

    #[command(
        about = "Write the weighted edge list",
        after_help = "EXAMPLES:\n    cg export\n    cg export --out edges.txt"
    )]
    Export(cmd::export::ExportArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CINEGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "cinegraph=debug,cg=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("CINEGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Render `error` in the requested mode and return the failure exit code.
///
/// If stderr rejects the structured rendering, the plain text form is
/// attempted once more with `eprint!`.
fn fail(mode: OutputMode, error: &CliError) -> ExitCode {
    if let Err(render_err) = render_error(mode, error) {
        debug!(error = %render_err, "structured error rendering failed");
        eprint!("{}", error.to_plain_text());
    }
    ExitCode::FAILURE
}

fn dispatch(
    command: &Commands,
    file: &GraphFile,
    config: &EffectiveConfig,
    project_root: &Path,
    output: OutputMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => cmd::init::run_init(args, file, output),
        Commands::Cat => cmd::cat::run_cat(file, output),
        Commands::Show => cmd::show::run_show(file, output),
        Commands::Analyze => cmd::analyze::run_analyze(file, output),
        Commands::Vertex { command } => cmd::vertex::run_vertex(command, file, output),
        Commands::Edge { command } => cmd::edge::run_edge(command, file, output),
        Commands::Link => cmd::link::run_link(file, output),
        Commands::Export(args) => {
            let default_out = config.export_path(project_root);
            cmd::export::run_export(args, file, &default_out, output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fallback_mode = resolve_output_mode(cli.format, cli.json, "text");

    let project_root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            return fail(
                fallback_mode,
                &CliError::with_code(
                    format!("cannot determine working directory: {err}"),
                    ErrorCode::InternalUnexpected,
                ),
            );
        }
    };

    let config = match resolve_config(&project_root, cli.json) {
        Ok(config) => config,
        Err(err) => {
            return fail(
                fallback_mode,
                &CliError::with_code(format!("{err:#}"), ErrorCode::ConfigParseError),
            );
        }
    };

    let output = resolve_output_mode(cli.format, cli.json, &config.resolved_output);
    let file = GraphFile::new(
        cli.file
            .clone()
            .unwrap_or_else(|| config.graph_path(&project_root)),
    );
    debug!(file = %file.path().display(), ?output, "resolved invocation");

    match dispatch(&cli.command, &file, &config, &project_root, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            fail(output, &CliError::from(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_and_after_subcommand() {
        let cli = Cli::parse_from(["cg", "--json", "show"]);
        assert!(cli.json);
        let cli = Cli::parse_from(["cg", "show", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["cg", "analyze", "--format", "pretty"]);
        assert_eq!(cli.format, Some(OutputMode::Pretty));
    }

    #[test]
    fn file_flag_is_global() {
        let cli = Cli::parse_from(["cg", "cat", "--file", "movies.txt"]);
        assert_eq!(cli.file.as_deref(), Some(Path::new("movies.txt")));
    }

    #[test]
    fn init_directed_conflicts_with_type_code() {
        let result = Cli::try_parse_from(["cg", "init", "--directed", "--type-code", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn vertex_add_parses_label_and_tags() {
        let cli = Cli::parse_from([
            "cg", "vertex", "add", "550", "--label", "Fight Club", "--tags", "18,53",
        ]);
        let Commands::Vertex {
            command: cmd::vertex::VertexCommand::Add(args),
        } = cli.command
        else {
            panic!("expected vertex add");
        };
        assert_eq!(args.id, "550");
        assert_eq!(args.label, "Fight Club");
        assert_eq!(args.tags, "18,53");
    }

    #[test]
    fn vertex_add_requires_label() {
        assert!(Cli::try_parse_from(["cg", "vertex", "add", "550"]).is_err());
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["cg", "init"],
            vec!["cg", "init", "--type-code", "7", "--force"],
            vec!["cg", "cat"],
            vec!["cg", "show"],
            vec!["cg", "analyze"],
            vec!["cg", "vertex", "add", "1", "--label", "x"],
            vec!["cg", "vertex", "rm", "1"],
            vec!["cg", "edge", "add", "1", "2"],
            vec!["cg", "edge", "rm", "1", "2"],
            vec!["cg", "link"],
            vec!["cg", "export", "--out", "edges.txt"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "failed to parse {args:?}: {:?}", result.err());
        }
    }
}
