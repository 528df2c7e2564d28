pub mod args;
pub mod commands;

pub use args::{DiagramArgs, FormatsArgs, RouteArgs, TargetsArgs, TransformArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "mdtransform")]
#[command(version = crate::VERSION)]
#[command(about = "Route documents through a graph of format transformations")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: list formats, inspect a route, then transform a document along it."
)]
pub struct Args {
    /// Path to config file (default: ./mdtransform.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "List registered formats",
        after_help = "Example:\n    mdtransform formats --json"
    )]
    Formats(FormatsArgs),
    #[command(
        about = "List formats reachable in one hop",
        after_help = "Example:\n    mdtransform targets markdown"
    )]
    Targets(TargetsArgs),
    #[command(
        about = "Show the shortest route between two formats",
        after_help = "Example:\n    mdtransform route markdown bytes"
    )]
    Route(RouteArgs),
    #[command(
        about = "Render the format graph",
        long_about = "Diagram prints every format and transformation as Graphviz DOT or a Mermaid flowchart.",
        after_help = "Example:\n    mdtransform diagram --style mermaid"
    )]
    Diagram(DiagramArgs),
    #[command(
        about = "Transform a document between formats",
        long_about = "Transform reads a document, routes it through the shortest chain of transformations to each --via format and then to --to, and writes the result.",
        after_help = "Example:\n    mdtransform transform --from markdown --to paragraphs --input README.md"
    )]
    Transform(TransformArgs),
}
