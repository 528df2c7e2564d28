use crate::core::transform_graph::descriptor::TransformationGraph;
use mdtransform_types::FileFormat;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Output flavour for transformation diagrams.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagramStyle {
    #[default]
    Dot,
    Mermaid,
}

impl fmt::Display for DiagramStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramStyle::Dot => write!(f, "dot"),
            DiagramStyle::Mermaid => write!(f, "mermaid"),
        }
    }
}

impl FromStr for DiagramStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "dot" => Ok(DiagramStyle::Dot),
            "mermaid" => Ok(DiagramStyle::Mermaid),
            _ => Err(format!(
                "invalid diagram style '{}'; supported values are dot, mermaid",
                value
            )),
        }
    }
}

/// Node weight carrying format display information.
struct FormatNode {
    name: String,
    docs: String,
    file_format: FileFormat,
}

impl fmt::Display for FormatNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.file_format)?;
        if !self.docs.is_empty() {
            write!(f, "\n{}", self.docs)?;
        }
        Ok(())
    }
}

struct EdgeData;

impl fmt::Display for EdgeData {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

fn build_graph(source: &TransformationGraph) -> DiGraph<FormatNode, EdgeData> {
    let mut graph = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for descriptor in source.descriptors() {
        let idx = graph.add_node(FormatNode {
            name: descriptor.name.clone(),
            docs: descriptor.docs.clone(),
            file_format: descriptor.file_format,
        });
        node_map.insert(descriptor.name.as_str(), idx);
    }

    for descriptor in source.descriptors() {
        let from = node_map[descriptor.name.as_str()];
        for target in descriptor.targets() {
            if let Some(&to) = node_map.get(target) {
                graph.add_edge(from, to, EdgeData);
            }
        }
    }

    graph
}

/// Render the registry in the requested style.
pub fn render(source: &TransformationGraph, style: DiagramStyle) -> String {
    match style {
        DiagramStyle::Dot => to_dot(source),
        DiagramStyle::Mermaid => to_mermaid(source),
    }
}

/// Render the registry as a Graphviz DOT string using petgraph.
pub fn to_dot(source: &TransformationGraph) -> String {
    let graph = build_graph(source);
    format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}

/// Render the registry as a Mermaid flowchart, one line per node then per edge.
pub fn to_mermaid(source: &TransformationGraph) -> String {
    let mut out = String::from("graph LR\n");
    for descriptor in source.descriptors() {
        let mut label = format!("{} ({})", descriptor.name, descriptor.file_format);
        if !descriptor.docs.is_empty() {
            label.push_str(": ");
            label.push_str(&descriptor.docs);
        }
        out.push_str(&format!(
            "    {}[\"{}\"]\n",
            mermaid_id(&descriptor.name),
            escape_label(&label)
        ));
    }
    for descriptor in source.descriptors() {
        for target in descriptor.targets() {
            if source.contains(target) {
                out.push_str(&format!(
                    "    {} --> {}\n",
                    mermaid_id(&descriptor.name),
                    mermaid_id(target)
                ));
            }
        }
    }
    out
}

fn mermaid_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn escape_label(value: &str) -> String {
    value.replace('"', "#quot;")
}
