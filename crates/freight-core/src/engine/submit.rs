//! Contrato del callback de envío del host.

use std::future::Future;

use async_trait::async_trait;

use crate::errors::SubmissionError;

/// Callback asíncrono que recibe el valor final. El engine espera su
/// resultado pero no interpreta el payload; la semántica HTTP, reintentos y
/// mensajes al usuario son responsabilidad del host.
#[async_trait]
pub trait SubmitHandler<T>: Send + Sync {
    async fn submit(&self, value: T) -> Result<(), SubmissionError>;
}

/// Adaptador para usar una closure `Fn(T) -> Future` como `SubmitHandler`.
#[derive(Debug, Clone)]
pub struct SubmitFn<F>(pub F);

/// Atajo: `submit_fn(|value| async move { ... })`.
pub fn submit_fn<F>(f: F) -> SubmitFn<F> {
    SubmitFn(f)
}

#[async_trait]
impl<T, F, Fut> SubmitHandler<T> for SubmitFn<F>
    where T: Send + 'static,
          F: Fn(T) -> Fut + Send + Sync,
          Fut: Future<Output = Result<(), SubmissionError>> + Send + 'static
{
    async fn submit(&self, value: T) -> Result<(), SubmissionError> {
        (self.0)(value).await
    }
}

/// Handler que acepta cualquier envío sin hacer nada.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSubmit;

#[async_trait]
impl<T: Send + 'static> SubmitHandler<T> for NoopSubmit {
    async fn submit(&self, _value: T) -> Result<(), SubmissionError> {
        Ok(())
    }
}
