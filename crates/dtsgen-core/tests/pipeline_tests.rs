use std::sync::Mutex;
use std::sync::mpsc;

use dtsgen_common::{ApiSource, GeneratorConfig};
use dtsgen_core::{
    ClassDeclaration, DeclarationRenderer, EnumModel, NamespaceDeclaration, NoopObserver, Phase,
    Pipeline, PipelineError, PipelineEvent, RenderError,
};

#[derive(Default)]
struct CollectingRenderer {
    rendered: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl CollectingRenderer {
    fn record(&self, name: &str) -> Result<(), RenderError> {
        if self.fail_on == Some(name) {
            return Err(RenderError::Other(format!("refusing {name}")));
        }
        self.rendered.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

impl DeclarationRenderer for CollectingRenderer {
    fn render_enums(&self, library: &str, _enums: &[EnumModel]) -> Result<(), RenderError> {
        self.record(&format!("enums:{library}"))
    }

    fn render_interface(&self, declaration: &ClassDeclaration) -> Result<(), RenderError> {
        self.record(&declaration.qualified_name)
    }

    fn render_class(&self, declaration: &ClassDeclaration) -> Result<(), RenderError> {
        self.record(&declaration.qualified_name)
    }

    fn render_namespace(&self, declaration: &NamespaceDeclaration) -> Result<(), RenderError> {
        self.record(&declaration.qualified_name)
    }
}

fn sample_source() -> ApiSource {
    serde_json::from_str(
        r#"{
        "library": "sample",
        "symbols": [
            { "kind": "enum", "name": "sample.Color", "module": "sample/library",
              "properties": [{ "name": "Red" }, { "name": "Blue" }] },
            { "kind": "interface", "name": "sample.Shape",
              "methods": [{ "name": "area", "returnValue": { "type": "number" } }] },
            { "kind": "class", "name": "sample.Circle", "extends": "sample.Base",
              "ui5-metadata": { "properties": [{ "name": "radius", "type": "int" }] },
              "events": [{ "name": "resize" }],
              "methods": [
                { "name": "attachResize",
                  "parameters": [
                    { "name": "fn", "type": "function" },
                    { "name": "listener", "type": "object", "optional": true }
                  ],
                  "returnValue": { "type": "sample.Circle" } },
                { "name": "setColor",
                  "parameters": [{ "name": "oColor", "type": "sample.Color" }],
                  "returnValue": { "type": "sample.Circle" } }
              ] },
            { "kind": "class", "name": "sample.Base",
              "methods": [{ "name": "setColor",
                            "parameters": [{ "name": "sColor", "type": "string" }],
                            "returnValue": { "type": "this" } }] },
            { "kind": "namespace", "name": "sample.util",
              "methods": [{ "name": "clamp",
                            "parameters": [{ "name": "v", "type": "int" }],
                            "returnValue": { "type": "int" } }] },
            { "kind": "typedef", "name": "sample.Options" }
        ]
    }"#,
    )
    .unwrap()
}

fn config() -> GeneratorConfig {
    GeneratorConfig::from_json_str(r#"{ "substitutedTypes": { "int": "number" } }"#).unwrap()
}

#[test]
fn test_full_run_renders_every_model() {
    let config = config();
    let renderer = CollectingRenderer::default();
    let output = Pipeline::new(&config, &NoopObserver)
        .run(&[sample_source()], &renderer)
        .unwrap();

    let mut rendered = renderer.rendered.into_inner().unwrap();
    rendered.sort();
    assert_eq!(
        rendered,
        vec![
            "enums:sample",
            "sample.Base",
            "sample.Circle",
            "sample.Shape",
            "sample.util",
        ]
    );

    let report = &output.report;
    assert_eq!(report.enums, 1);
    assert_eq!(report.interfaces, 1);
    assert_eq!(report.classes, 2);
    assert_eq!(report.namespaces, 1);
    assert_eq!(report.skipped_symbols, 1);
    assert_eq!(report.linked_base_classes, 1);
    assert_eq!(report.rendered, 5);
    assert_eq!(report.failure_count(), 0);
}

#[test]
fn test_class_declaration_after_propagation() {
    let config = config();
    let output = Pipeline::new(&config, &NoopObserver)
        .run(&[sample_source()], &CollectingRenderer::default())
        .unwrap();

    let circle = output
        .classes
        .iter()
        .find(|class| class.name == "Circle")
        .unwrap();

    assert_eq!(circle.base_class.as_deref(), Some("Base"));
    let settings = circle.settings.as_ref().unwrap();
    assert_eq!(settings.extends.as_deref(), Some("IBaseSettings"));
    assert_eq!(settings.properties[0].ty, "number");

    let set_color: Vec<&str> = circle
        .method("setColor")
        .map(|method| method.signature.as_str())
        .collect();
    assert_eq!(
        set_color,
        vec!["setColor(oColor: Color): this", "setColor(sColor: string): this"]
    );

    let imports: Vec<&str> = circle.imports.iter().map(|i| i.name.as_str()).collect();
    assert!(imports.contains(&"Color"));
    assert!(imports.contains(&"Base"));
    assert!(!imports.contains(&"Circle"));

    let clamp = &output.namespaces[0].functions[0];
    assert_eq!(clamp.signature, "clamp(v: number): number");
    assert!(clamp.is_static);
}

#[test]
fn test_render_failure_is_counted_not_fatal() {
    let config = config();
    let renderer = CollectingRenderer {
        fail_on: Some("sample.Circle"),
        ..Default::default()
    };
    let output = Pipeline::new(&config, &NoopObserver)
        .run(&[sample_source()], &renderer)
        .unwrap();

    assert_eq!(output.report.failure_count(), 1);
    assert_eq!(output.report.render_failures[0].name, "sample.Circle");
    assert_eq!(output.report.rendered, 4);
}

#[test]
fn test_phases_are_reported_in_order() {
    let config = config();
    let (sender, receiver) = mpsc::channel::<PipelineEvent>();
    Pipeline::new(&config, &sender)
        .run(&[sample_source()], &CollectingRenderer::default())
        .unwrap();
    drop(sender);

    let started: Vec<Phase> = receiver
        .iter()
        .filter_map(|event| match event {
            PipelineEvent::PhaseStarted(phase) => Some(phase),
            _ => None,
        })
        .collect();
    assert_eq!(started, Phase::ALL.to_vec());
}

#[test]
fn test_enum_namespace_renders_as_enum() {
    let config = GeneratorConfig::from_json_str(r#"{ "enums": { "sample.util": true } }"#).unwrap();
    let output = Pipeline::new(&config, &NoopObserver)
        .run(&[sample_source()], &CollectingRenderer::default())
        .unwrap();

    assert!(output.namespaces.is_empty());
    assert_eq!(output.report.enums, 2);
}

#[test]
fn test_inheritance_cycle_is_fatal() {
    let source: ApiSource = serde_json::from_str(
        r#"{ "library": "loop", "symbols": [
            { "kind": "class", "name": "loop.A", "extends": "loop.B" },
            { "kind": "class", "name": "loop.B", "extends": "loop.A" }
        ] }"#,
    )
    .unwrap();
    let config = GeneratorConfig::default();
    let result = Pipeline::new(&config, &NoopObserver).run(&[source], &CollectingRenderer::default());

    assert!(matches!(result, Err(PipelineError::InheritanceCycle(_))));
}
