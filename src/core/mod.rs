pub mod config;
pub mod error;
pub mod payload;
pub mod transform_graph;

pub use error::TransformError;
pub use payload::{Options, Parameters, Payload};
pub use transform_graph::{Extension, TransformEngine, TransformationGraph};
