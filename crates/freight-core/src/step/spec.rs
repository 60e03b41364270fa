use std::fmt;

use crate::field::FieldSink;

use super::{StepDefinition, StepProps, ValidationResult};

type RenderFn<T, V> = Box<dyn Fn(&StepProps<'_, T>, &mut FieldSink) -> V + Send + Sync>;
type ValidateFn<T> = Box<dyn Fn(&T) -> ValidationResult + Send + Sync>;
type SkipFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Step construido a partir de closures.
///
/// ```ignore
/// let step = StepSpec::new("cargo", "Cargo", |p, _| format!("{:?}", p.value))
///     .validator(|v: &Form| ValidationResult::valid())
///     .skip_when(|v: &Form| v.skip_cargo);
/// ```
pub struct StepSpec<T, V> {
    id: String,
    title: String,
    render: RenderFn<T, V>,
    validator: Option<ValidateFn<T>>,
    skip: Option<SkipFn<T>>,
}

impl<T, V> StepSpec<T, V> {
    pub fn new<F>(id: impl Into<String>, title: impl Into<String>, render: F) -> Self
        where F: Fn(&StepProps<'_, T>, &mut FieldSink) -> V + Send + Sync + 'static
    {
        Self { id: id.into(),
               title: title.into(),
               render: Box::new(render),
               validator: None,
               skip: None }
    }

    pub fn validator<F>(mut self, f: F) -> Self
        where F: Fn(&T) -> ValidationResult + Send + Sync + 'static
    {
        self.validator = Some(Box::new(f));
        self
    }

    pub fn skip_when<F>(mut self, f: F) -> Self
        where F: Fn(&T) -> bool + Send + Sync + 'static
    {
        self.skip = Some(Box::new(f));
        self
    }
}

impl<T, V> fmt::Debug for StepSpec<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSpec")
         .field("id", &self.id)
         .field("title", &self.title)
         .field("validator", &self.validator.is_some())
         .field("skip", &self.skip.is_some())
         .finish()
    }
}

impl<T, V> StepDefinition<T, V> for StepSpec<T, V> {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, props: &StepProps<'_, T>, sink: &mut FieldSink) -> V {
        (self.render)(props, sink)
    }

    fn validate(&self, value: &T) -> Option<ValidationResult> {
        self.validator.as_ref().map(|f| f(value))
    }

    fn should_skip(&self, value: &T) -> bool {
        self.skip.as_ref().is_some_and(|f| f(value))
    }
}
