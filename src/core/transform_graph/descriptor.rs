use crate::core::transform_graph::edge::SharedTransformation;
use indexmap::IndexMap;
use mdtransform_types::{FileFormat, FormatSummary};
use std::fmt;

/// A format node together with its outgoing edges.
#[derive(Clone)]
pub struct FormatDescriptor {
    pub name: String,
    pub docs: String,
    pub file_format: FileFormat,
    pub edges: IndexMap<String, SharedTransformation>,
}

impl FormatDescriptor {
    pub fn new<N: Into<String>, D: Into<String>>(
        name: N,
        docs: D,
        file_format: FileFormat,
    ) -> Self {
        Self {
            name: name.into(),
            docs: docs.into(),
            file_format,
            edges: IndexMap::new(),
        }
    }

    /// Add an outgoing edge, replacing any previous edge to the same target.
    pub fn with_edge<T: Into<String>>(mut self, target: T, edge: SharedTransformation) -> Self {
        self.edges.insert(target.into(), edge);
        self
    }

    pub fn edge(&self, target: &str) -> Option<&SharedTransformation> {
        self.edges.get(target)
    }

    /// Names of formats reachable in one hop, in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn summary(&self) -> FormatSummary {
        FormatSummary {
            name: self.name.clone(),
            docs: self.docs.clone(),
            file_format: self.file_format,
            targets: self.targets().map(str::to_string).collect(),
        }
    }
}

impl fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("name", &self.name)
            .field("docs", &self.docs)
            .field("file_format", &self.file_format)
            .field("edges", &self.edges.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The full `name -> descriptor` mapping backing an engine.
///
/// Cloning copies every descriptor but shares edge functions.
#[derive(Clone, Debug, Default)]
pub struct TransformationGraph {
    formats: IndexMap<String, FormatDescriptor>,
}

impl TransformationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, replacing any previous one under the same name.
    pub fn with_format(mut self, descriptor: FormatDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    pub(crate) fn insert(&mut self, descriptor: FormatDescriptor) {
        self.formats.insert(descriptor.name.clone(), descriptor);
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FormatDescriptor> {
        self.formats.get_mut(name)
    }

    pub fn get(&self, name: &str) -> Option<&FormatDescriptor> {
        self.formats.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Format names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.formats.values()
    }

    /// Every `(source, target)` edge whose target is not a registered format.
    pub fn dangling_edges(&self) -> Vec<(String, String)> {
        self.formats
            .values()
            .flat_map(|descriptor| {
                descriptor
                    .targets()
                    .filter(|target| !self.formats.contains_key(*target))
                    .map(move |target| (descriptor.name.clone(), target.to_string()))
            })
            .collect()
    }
}
