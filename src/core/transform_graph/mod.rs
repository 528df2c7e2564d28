//! Format graph: registry, routing and multi-hop execution.

pub mod builtin;
pub mod descriptor;
pub mod diagram;
pub mod edge;
pub mod engine;
pub mod extension;
pub mod pruned;
pub mod router;

pub use descriptor::{FormatDescriptor, TransformationGraph};
pub use diagram::DiagramStyle;
pub use edge::{async_edge_fn, edge_fn, SharedTransformation, Transformation};
pub use engine::{TransformEngine, MARKDOWN_FORMAT, TRACE_TARGET};
pub use extension::{Extension, FormatSpec};
pub use pruned::PrunedGraph;
pub use router::Route;
