use crate::core::transform_graph::edge::SharedTransformation;
use indexmap::IndexMap;
use mdtransform_types::FileFormat;

/// New format node contributed by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub name: String,
    pub docs: String,
    pub file_format: FileFormat,
}

/// A bundle of an optional new format and any number of new edges.
///
/// Applied with [`TransformEngine::register_extension`](super::TransformEngine::register_extension):
/// the format goes in first, then every edge in insertion order.
#[derive(Clone, Default)]
pub struct Extension {
    pub format: Option<FormatSpec>,
    pub transforms: IndexMap<String, IndexMap<String, SharedTransformation>>,
}

impl Extension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format<N: Into<String>, D: Into<String>>(
        mut self,
        name: N,
        docs: D,
        file_format: FileFormat,
    ) -> Self {
        self.format = Some(FormatSpec {
            name: name.into(),
            docs: docs.into(),
            file_format,
        });
        self
    }

    pub fn with_transform<S: Into<String>, T: Into<String>>(
        mut self,
        source: S,
        target: T,
        edge: SharedTransformation,
    ) -> Self {
        self.transforms
            .entry(source.into())
            .or_default()
            .insert(target.into(), edge);
        self
    }

    /// Total number of edges carried.
    pub fn transform_count(&self) -> usize {
        self.transforms.values().map(IndexMap::len).sum()
    }
}
