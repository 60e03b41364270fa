//! Envío del formulario como `QuoteRequirement`.

use std::future::Future;

use async_trait::async_trait;
use freight_core::{SubmissionError, SubmitHandler};
use freight_domain::{QuoteFormData, QuoteRequirement};
use log::debug;

/// Handler que construye el requerimiento y se lo pasa a `F`.
///
/// Un formulario que no alcanza para construir el requerimiento falla con
/// `SubmissionError::Payload` sin invocar `F`.
#[derive(Debug, Clone)]
pub struct RequirementSubmit<F>(F);

/// `on_requirement(|req| async move { ... })`.
pub fn on_requirement<F>(f: F) -> RequirementSubmit<F> {
    RequirementSubmit(f)
}

#[async_trait]
impl<F, Fut> SubmitHandler<QuoteFormData> for RequirementSubmit<F>
    where F: Fn(QuoteRequirement) -> Fut + Send + Sync,
          Fut: Future<Output = Result<(), SubmissionError>> + Send + 'static
{
    async fn submit(&self, value: QuoteFormData) -> Result<(), SubmissionError> {
        let requirement =
            QuoteRequirement::try_from(&value).map_err(|e| SubmissionError::Payload(e.to_string()))?;
        debug!("quote requirement {} -> {} ({})",
               requirement.origin,
               requirement.destination,
               requirement.shipping_type);
        (self.0)(requirement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn incomplete_form_never_reaches_the_callback() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();
        let handler = on_requirement(move |_req: QuoteRequirement| {
            flag.store(true, Ordering::SeqCst);
            async { Ok::<(), SubmissionError>(()) }
        });
        let result = tokio_test::block_on(handler.submit(QuoteFormData::default()));
        assert!(matches!(result, Err(SubmissionError::Payload(_))));
        assert!(!called.load(Ordering::SeqCst));
    }
}
