use crate::core::error::TransformError;
use crate::core::payload::{is_verbose, Options, Parameters, Payload, SOURCE_OPTION};
use crate::core::transform_graph::builtin;
use crate::core::transform_graph::descriptor::{FormatDescriptor, TransformationGraph};
use crate::core::transform_graph::diagram::{self, DiagramStyle};
use crate::core::transform_graph::edge::SharedTransformation;
use crate::core::transform_graph::extension::Extension;
use crate::core::transform_graph::pruned::PrunedGraph;
use crate::core::transform_graph::router::{self, Route};
use mdtransform_types::{FileFormat, FormatSummary};
use serde_json::Value;
use tracing::{debug, info, Instrument};

/// Format that gets its raw text copied into `options.source` by [`TransformEngine::transform`].
pub const MARKDOWN_FORMAT: &str = "markdown";

/// Target used for per-hop trace events.
pub const TRACE_TARGET: &str = "mdtransform::trace";

/// Owns a transformation graph and routes values through it.
///
/// Registration takes `&mut self` and rebuilds the pruned graph before
/// returning; transformations take `&self`. Sharing one engine between tasks
/// that register and transform at the same time is not supported.
#[derive(Clone, Debug)]
pub struct TransformEngine {
    graph: TransformationGraph,
    pruned: PrunedGraph,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(&TransformationGraph::new())
    }
}

impl TransformEngine {
    /// Build an engine from a copy of `base`; later registrations never touch `base`.
    pub fn new(base: &TransformationGraph) -> Self {
        let graph = base.clone();
        for (from, to) in graph.dangling_edges() {
            debug!(from = %from, to = %to, "edge targets an unregistered format");
        }
        let pruned = PrunedGraph::from_graph(&graph);
        Self { graph, pruned }
    }

    /// Engine seeded with [`builtin::base_graph`].
    pub fn with_builtins() -> Self {
        Self::new(&builtin::base_graph())
    }

    pub fn graph(&self) -> &TransformationGraph {
        &self.graph
    }

    pub fn pruned_graph(&self) -> &PrunedGraph {
        &self.pruned
    }

    /// All format names, built-ins first then in registration order.
    pub fn all_formats(&self) -> Vec<String> {
        self.graph.names().map(str::to_string).collect()
    }

    /// Formats reachable from `source` in one hop.
    pub fn all_target_formats(&self, source: &str) -> Result<Vec<String>, TransformError> {
        let descriptor = self.format_descriptor(source)?;
        Ok(descriptor.targets().map(str::to_string).collect())
    }

    pub fn format_descriptor(&self, name: &str) -> Result<&FormatDescriptor, TransformError> {
        self.graph
            .get(name)
            .ok_or_else(|| TransformError::unknown_format(name))
    }

    pub fn format_summaries(&self) -> Vec<FormatSummary> {
        self.graph
            .descriptors()
            .map(FormatDescriptor::summary)
            .collect()
    }

    /// Add a format with no outgoing edges.
    pub fn register_format<N: Into<String>, D: Into<String>>(
        &mut self,
        name: N,
        docs: D,
        file_format: FileFormat,
    ) -> Result<(), TransformError> {
        let name = name.into();
        if self.graph.contains(&name) {
            return Err(TransformError::duplicate_format(name));
        }
        debug!(format = %name, file_format = %file_format, "registering format");
        self.graph
            .insert(FormatDescriptor::new(name, docs, file_format));
        self.refresh();
        Ok(())
    }

    /// Add or replace the edge `source -> target`.
    ///
    /// Both endpoints must already be registered. An existing edge between the
    /// same pair is overwritten.
    pub fn register_transformation(
        &mut self,
        source: &str,
        target: &str,
        edge: SharedTransformation,
    ) -> Result<(), TransformError> {
        if !self.graph.contains(target) {
            return Err(TransformError::unknown_format(target));
        }
        let descriptor = self
            .graph
            .get_mut(source)
            .ok_or_else(|| TransformError::unknown_format(source))?;
        if descriptor.edges.insert(target.to_string(), edge).is_some() {
            debug!(from = %source, to = %target, "replaced transformation");
        } else {
            debug!(from = %source, to = %target, "registered transformation");
        }
        self.refresh();
        Ok(())
    }

    /// Apply an extension: its format first, then each of its edges.
    ///
    /// Stops at the first failure. Registrations already applied by this call
    /// stay in place.
    pub fn register_extension(&mut self, extension: Extension) -> Result<(), TransformError> {
        let Extension { format, transforms } = extension;
        if let Some(new_format) = format {
            self.register_format(new_format.name, new_format.docs, new_format.file_format)?;
        }
        for (source, targets) in transforms {
            for (target, edge) in targets {
                self.register_transformation(&source, &target, edge)?;
            }
        }
        Ok(())
    }

    fn refresh(&mut self) {
        self.pruned = PrunedGraph::from_graph(&self.graph);
    }

    /// Shortest route between two formats.
    pub fn find_path(&self, source: &str, destination: &str) -> Result<Route, TransformError> {
        let route = router::find_path(&self.pruned, source, destination)?;
        debug!(route = %route, "resolved transformation route");
        Ok(route)
    }

    /// Carry `source` from `source_format` to `destination_format` along the shortest route.
    pub async fn transform_to_destination(
        &self,
        source: Payload,
        source_format: &str,
        destination_format: &str,
        parameters: Option<Parameters>,
        options: Option<Options>,
    ) -> Result<Payload, TransformError> {
        let parameters = parameters.unwrap_or_default();
        let options = options.unwrap_or_default();
        self.run_stage(
            source,
            source_format,
            destination_format,
            &parameters,
            &options,
        )
        .await
    }

    /// Carry `source` through each destination in turn.
    ///
    /// Every stage is routed independently, starting from the previous stage's
    /// destination, so each listed format is materialised on the way. An empty
    /// destination list returns the input unchanged.
    pub async fn transform<S: AsRef<str>>(
        &self,
        source: Payload,
        source_format: &str,
        destination_formats: &[S],
        parameters: Option<Parameters>,
        options: Option<Options>,
    ) -> Result<Payload, TransformError> {
        let parameters = parameters.unwrap_or_default();
        let mut options = options.unwrap_or_default();

        if source_format == MARKDOWN_FORMAT {
            if let Some(text) = source.as_text() {
                options.insert(SOURCE_OPTION.to_string(), Value::String(text.to_string()));
            }
        }

        let mut current = source;
        let mut current_format = source_format;
        for destination in destination_formats {
            let destination = destination.as_ref();
            current = self
                .run_stage(current, current_format, destination, &parameters, &options)
                .await?;
            current_format = destination;
        }
        Ok(current)
    }

    async fn run_stage(
        &self,
        source: Payload,
        source_format: &str,
        destination_format: &str,
        parameters: &Parameters,
        options: &Options,
    ) -> Result<Payload, TransformError> {
        let route = self.find_path(source_format, destination_format)?;
        let span = tracing::debug_span!(
            "transform",
            from = %source_format,
            to = %destination_format,
            hops = route.hop_count()
        );
        self.run_route(source, &route, parameters, options)
            .instrument(span)
            .await
    }

    async fn run_route(
        &self,
        source: Payload,
        route: &Route,
        parameters: &Parameters,
        options: &Options,
    ) -> Result<Payload, TransformError> {
        let verbose = is_verbose(options);
        let mut current = source;
        for (from, to) in route.hops() {
            let edge = self
                .graph
                .get(from)
                .and_then(|descriptor| descriptor.edge(to))
                .ok_or_else(|| TransformError::no_path(from, to))?
                .clone();
            current = edge.apply(current, parameters, options).await?;

            if verbose {
                let file_format = self
                    .graph
                    .get(to)
                    .map(|descriptor| descriptor.file_format)
                    .unwrap_or_default();
                info!(
                    target: TRACE_TARGET,
                    source = %from,
                    destination = %to,
                    file_format = %file_format,
                    "{}",
                    current.render(file_format)
                );
            }
        }
        Ok(current)
    }

    /// Graphviz rendering of the registry.
    pub fn generate_transformation_diagram(&self) -> String {
        diagram::to_dot(&self.graph)
    }

    pub fn generate_diagram(&self, style: DiagramStyle) -> String {
        diagram::render(&self.graph, style)
    }
}
