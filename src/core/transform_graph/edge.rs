use crate::core::payload::{Options, Parameters, Payload};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A registered conversion from one format to another.
///
/// Every edge is driven through a single `.await` per hop, whether the
/// underlying work is synchronous or not. Edges must not touch the registry.
#[async_trait]
pub trait Transformation: Send + Sync + 'static {
    async fn apply(
        &self,
        input: Payload,
        parameters: &Parameters,
        options: &Options,
    ) -> anyhow::Result<Payload>;
}

/// Shared handle to an edge, cheap to clone between graphs.
pub type SharedTransformation = Arc<dyn Transformation>;

struct FnTransformation<F> {
    func: F,
}

#[async_trait]
impl<F> Transformation for FnTransformation<F>
where
    F: Fn(Payload, &Parameters, &Options) -> anyhow::Result<Payload> + Send + Sync + 'static,
{
    async fn apply(
        &self,
        input: Payload,
        parameters: &Parameters,
        options: &Options,
    ) -> anyhow::Result<Payload> {
        (self.func)(input, parameters, options)
    }
}

struct AsyncFnTransformation<F> {
    func: F,
}

#[async_trait]
impl<F, Fut> Transformation for AsyncFnTransformation<F>
where
    F: Fn(Payload, Parameters, Options) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Payload>> + Send + 'static,
{
    async fn apply(
        &self,
        input: Payload,
        parameters: &Parameters,
        options: &Options,
    ) -> anyhow::Result<Payload> {
        (self.func)(input, parameters.clone(), options.clone()).await
    }
}

/// Wrap a synchronous conversion function as an edge.
pub fn edge_fn<F>(func: F) -> SharedTransformation
where
    F: Fn(Payload, &Parameters, &Options) -> anyhow::Result<Payload> + Send + Sync + 'static,
{
    Arc::new(FnTransformation { func })
}

/// Wrap a conversion function returning a future as an edge.
///
/// The future receives owned copies of the parameters and options so it can
/// outlive the borrow held by the executor.
pub fn async_edge_fn<F, Fut>(func: F) -> SharedTransformation
where
    F: Fn(Payload, Parameters, Options) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Payload>> + Send + 'static,
{
    Arc::new(AsyncFnTransformation { func })
}
