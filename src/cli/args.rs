use crate::core::transform_graph::DiagramStyle;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FormatsArgs {
    /// Emit the format list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Format whose one-hop destinations are listed
    #[arg(value_name = "FORMAT")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Source format
    #[arg(value_name = "FROM")]
    pub from: String,

    /// Destination format
    #[arg(value_name = "TO")]
    pub to: String,
}

#[derive(Args, Debug)]
pub struct DiagramArgs {
    /// Diagram flavour: dot or mermaid (default: from config, else dot)
    #[arg(long, value_name = "STYLE")]
    pub style: Option<DiagramStyle>,
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Format of the input document
    #[arg(long, value_name = "FORMAT")]
    pub from: String,

    /// Final destination format
    #[arg(long, value_name = "FORMAT")]
    pub to: String,

    /// Intermediate formats to materialise, in order (repeatable)
    #[arg(long, value_name = "FORMAT", help_heading = "Routing")]
    pub via: Vec<String>,

    /// Input file (default: stdin)
    #[arg(long, short, value_name = "FILE", help_heading = "Input/Output")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long, short, value_name = "FILE", help_heading = "Input/Output")]
    pub output: Option<PathBuf>,

    /// Parameter handed to every edge; VALUE is parsed as JSON when possible (repeatable)
    #[arg(
        long = "param",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help_heading = "Routing"
    )]
    pub params: Vec<(String, Value)>,

    /// Log every hop with its intermediate result
    #[arg(long, help_heading = "Output Options")]
    pub verbose: bool,

    /// Transform the result back to the source format and emit that instead
    #[arg(long, help_heading = "Output Options")]
    pub roundtrip: bool,
}

impl TransformArgs {
    /// Destinations in execution order: every `--via`, then `--to`.
    pub fn destinations(&self) -> Vec<String> {
        let mut destinations = self.via.clone();
        destinations.push(self.to.clone());
        destinations
    }
}

/// Parse `key=value`, reading the value as JSON and falling back to a plain string.
pub fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
