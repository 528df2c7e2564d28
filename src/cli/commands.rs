use crate::cli::{Args, Command, DiagramArgs, FormatsArgs, RouteArgs, TargetsArgs, TransformArgs};
use crate::core::config::{ConfigLoader, TransformConfig};
use crate::core::payload::{Options, Parameters, Payload, VERBOSE_OPTION};
use crate::core::transform_graph::TransformEngine;
use anyhow::{Context, Result};
use mdtransform_types::FileFormat;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Dispatch a parsed command against the built-in engine.
pub async fn run(args: Args, config_path: &Path) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let engine = TransformEngine::with_builtins();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&engine, &config, args.command, &mut out).await
}

/// Run one command, writing its primary output to `out`.
pub async fn execute(
    engine: &TransformEngine,
    config: &TransformConfig,
    command: Command,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Formats(args) => formats(engine, args, out),
        Command::Targets(args) => targets(engine, args, out),
        Command::Route(args) => route(engine, args, out),
        Command::Diagram(args) => diagram(engine, config, args, out),
        Command::Transform(args) => transform(engine, config, args, out).await,
    }
}

pub fn formats(engine: &TransformEngine, args: FormatsArgs, out: &mut dyn Write) -> Result<()> {
    let summaries = engine.format_summaries();
    if args.json {
        let json = serde_json::to_string_pretty(&summaries).context("failed to encode formats")?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }
    for summary in summaries {
        writeln!(
            out,
            "{:<12} {:<7} {}",
            summary.name,
            summary.file_format.as_str(),
            summary.docs
        )?;
    }
    Ok(())
}

pub fn targets(engine: &TransformEngine, args: TargetsArgs, out: &mut dyn Write) -> Result<()> {
    for target in engine.all_target_formats(&args.format)? {
        writeln!(out, "{}", target)?;
    }
    Ok(())
}

pub fn route(engine: &TransformEngine, args: RouteArgs, out: &mut dyn Write) -> Result<()> {
    let route = engine.find_path(&args.from, &args.to)?;
    writeln!(out, "{}", route)?;
    Ok(())
}

pub fn diagram(
    engine: &TransformEngine,
    config: &TransformConfig,
    args: DiagramArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let style = args.style.unwrap_or(config.diagram_style);
    write!(out, "{}", engine.generate_diagram(style))?;
    Ok(())
}

pub async fn transform(
    engine: &TransformEngine,
    config: &TransformConfig,
    args: TransformArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let source_format = engine.format_descriptor(&args.from)?.file_format;
    let raw = read_input(args.input.as_deref())?;
    let input = decode_payload(raw, source_format)
        .with_context(|| format!("failed to read input as {}", args.from))?;

    let parameters: Parameters = args.params.iter().cloned().collect();
    let mut options = Options::new();
    if args.verbose || config.verbose {
        options.insert(VERBOSE_OPTION.to_string(), Value::Bool(true));
    }

    let destinations = args.destinations();
    let mut result = engine
        .transform(
            input.clone(),
            &args.from,
            destinations.as_slice(),
            Some(parameters.clone()),
            Some(options.clone()),
        )
        .await?;

    let mut result_format = args.to.as_str();
    if args.roundtrip {
        result = engine
            .transform(
                result,
                &args.to,
                std::slice::from_ref(&args.from),
                Some(parameters),
                Some(options),
            )
            .await?;
        result_format = args.from.as_str();
        if result == input {
            info!(format = %args.from, "roundtrip preserved the input");
        } else {
            warn!(format = %args.from, "roundtrip result differs from the input");
        }
    }

    let file_format = engine.format_descriptor(result_format)?.file_format;
    match &args.output {
        Some(path) => {
            let bytes = encode_payload(&result, file_format)?;
            fs::write(path, bytes)
                .with_context(|| format!("failed to write output {}", path.display()))?;
        }
        None => match result {
            Payload::Binary(_) => writeln!(out, "{}", result.render(FileFormat::Binary))?,
            _ => {
                let bytes = encode_payload(&result, file_format)?;
                out.write_all(&bytes)?;
                writeln!(out)?;
            }
        },
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read input {}", path.display()))
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Interpret raw input bytes according to the source format's file format.
pub fn decode_payload(raw: Vec<u8>, file_format: FileFormat) -> Result<Payload> {
    Ok(match file_format {
        FileFormat::Utf8 => Payload::Text(String::from_utf8(raw).context("input is not UTF-8")?),
        FileFormat::Json => {
            Payload::Json(serde_json::from_slice(&raw).context("input is not valid JSON")?)
        }
        FileFormat::Binary => Payload::Binary(raw),
    })
}

/// Serialize a payload for writing; JSON is pretty-printed.
pub fn encode_payload(payload: &Payload, file_format: FileFormat) -> Result<Vec<u8>> {
    Ok(match payload {
        Payload::Text(text) => text.clone().into_bytes(),
        Payload::Binary(bytes) => bytes.clone(),
        Payload::Json(Value::String(text)) if file_format == FileFormat::Utf8 => {
            text.clone().into_bytes()
        }
        Payload::Json(value) => {
            serde_json::to_vec_pretty(value).context("failed to encode JSON output")?
        }
    })
}
