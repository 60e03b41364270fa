use freight_core::{EngineBuilderInit, FlowEngine, InMemoryEventStore, NoopSubmit, StepSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Form {
    a: u32,
}

#[test]
fn builder_chains_steps_and_reports_config_errors() {
    let builder = EngineBuilderInit::new().first_step(StepSpec::<Form, String>::new("a", "A", |_, _| "a".into()))
                                          .add_step(StepSpec::<Form, String>::new("b", "B", |_, _| "b".into()));
    assert_eq!(builder.step_count(), 2);
    let engine: FlowEngine<Form, String, InMemoryEventStore> = builder.build(Form::default(), NoopSubmit).expect("build");
    assert_eq!(engine.active_step_ids(), vec!["a", "b"]);
    assert_eq!(engine.definition().len(), 2);

    let dup = EngineBuilderInit::new().first_step(StepSpec::<Form, String>::new("a", "A", |_, _| "a".into()))
                                      .add_step(StepSpec::<Form, String>::new("a", "again", |_, _| "a".into()))
                                      .build(Form::default(), NoopSubmit);
    assert!(dup.is_err());
}
