use crate::cli::Command;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Listing and inspection commands whose stdout is human-readable text.
    Interactive,
    /// A transformation writing its document to stdout; logs must stay off stdout.
    Streaming,
}

impl ExecutionContext {
    /// Returns `true` when stdout is reserved for command output.
    pub fn reserves_stdout(self) -> bool {
        matches!(self, ExecutionContext::Streaming)
    }
}

/// Derive the active execution context from a parsed CLI command.
pub fn detect_context(command: &Command) -> ExecutionContext {
    match command {
        Command::Transform(args) if args.output.is_none() => ExecutionContext::Streaming,
        Command::Transform(_)
        | Command::Formats(_)
        | Command::Targets(_)
        | Command::Route(_)
        | Command::Diagram(_) => ExecutionContext::Interactive,
    }
}
