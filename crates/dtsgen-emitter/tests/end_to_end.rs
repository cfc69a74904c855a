use std::fs;

use dtsgen_common::{ApiSource, GeneratorConfig};
use dtsgen_core::{NoopObserver, Pipeline};
use dtsgen_emitter::{FileRenderer, OutputLayout, PostProcessor};

const SAMPLE_API: &str = r#"{
    "library": "sample",
    "symbols": [
        { "kind": "enum", "name": "sample.Color", "module": "sample/library",
          "properties": [{ "name": "Red" }, { "name": "Green" }] },
        { "kind": "interface", "name": "sample.Shape",
          "methods": [{ "name": "getArea", "returnValue": { "type": "float" } }] },
        { "kind": "class", "name": "sample.Circle", "extends": "sample.Shape",
          "description": "A circle.",
          "constructor": {
            "parameters": [
              { "name": "sId", "type": "string", "optional": true },
              { "name": "mSettings", "type": "object", "optional": true }
            ]
          },
          "ui5-metadata": { "properties": [{ "name": "radius", "type": "float" }] },
          "events": [{ "name": "resize", "parameters": [{ "name": "radius", "type": "float" }] }],
          "methods": [
            { "name": "attachResize",
              "parameters": [
                { "name": "fn", "type": "function" },
                { "name": "listener", "type": "object", "optional": true }
              ],
              "returnValue": { "type": "sample.Circle" } },
            { "name": "setColor",
              "parameters": [{ "name": "oColor", "type": "sample.Color" }],
              "returnValue": { "type": "sample.Circle" } },
            { "name": "moveTo",
              "parameters": [
                { "name": "x", "type": "int", "optional": true },
                { "name": "y", "type": "int" }
              ] }
          ] }
    ]
}"#;

fn config() -> GeneratorConfig {
    GeneratorConfig::from_json_str(
        r#"{
        "substitutedTypes": { "float": "number", "int": "number" },
        "postProcessing": {
            "classes/sample/*": [
                { "searchString": "moveTo(", "replacement": "moveBy(" }
            ]
        }
    }"#,
    )
    .unwrap()
}

#[test]
fn test_sample_library_renders_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config();
    let sources: Vec<ApiSource> = vec![serde_json::from_str(SAMPLE_API).unwrap()];
    let renderer = FileRenderer::new(
        OutputLayout::new(dir.path()),
        PostProcessor::from_config(&config.post_processing).unwrap(),
    );

    let output = Pipeline::new(&config, &NoopObserver)
        .run(&sources, &renderer)
        .unwrap();
    assert_eq!(output.report.failure_count(), 0, "{:?}", output.report.render_failures);
    assert_eq!(output.report.unresolved_base_classes.len(), 1);

    let enums = fs::read_to_string(dir.path().join("enums/sample.enums.d.ts")).unwrap();
    assert!(enums.contains("declare module \"sample\" {"), "{enums}");
    assert!(enums.contains("export enum Color {"), "{enums}");
    assert!(enums.contains("Green = \"Green\","), "{enums}");

    let shape =
        fs::read_to_string(dir.path().join("interfaces/sample/Shape.Shape.d.ts")).unwrap();
    assert!(shape.contains("export interface Shape {"), "{shape}");
    assert!(shape.contains("getArea(): number;"), "{shape}");

    let circle = fs::read_to_string(dir.path().join("classes/sample/Circle.d.ts")).unwrap();
    assert!(circle.contains("export class Circle extends Shape {"), "{circle}");
    assert!(
        circle.contains("export interface ICircleSettings {\n        radius?: number;\n    }"),
        "{circle}"
    );
    assert!(
        circle.contains("constructor(sId?: string, mSettings?: ICircleSettings);"),
        "{circle}"
    );
    assert!(
        circle.contains(
            "attachResize<Tcontext>(fn: (this: Tcontext, oEvent: ResizeEventArgs) => void, listener?: Tcontext): this;"
        ),
        "{circle}"
    );
    assert!(circle.contains("setColor(oColor: Color): Circle;"), "{circle}");
    assert!(circle.contains("getParameter(sName: \"radius\"): number;"), "{circle}");
    assert!(!circle.contains("import {"), "same-module types need no import:\n{circle}");

    // moveTo(x?, y) is split into two signatures, then renamed by the rule.
    assert!(circle.contains("moveBy(y: number): any;"), "{circle}");
    assert!(circle.contains("moveBy(x: number, y: number): any;"), "{circle}");
    assert!(!circle.contains("moveTo("), "{circle}");
}

#[test]
fn test_unwritable_output_is_counted_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the `classes` directory should go.
    fs::write(dir.path().join("classes"), "").unwrap();

    let config = config();
    let sources: Vec<ApiSource> = vec![serde_json::from_str(SAMPLE_API).unwrap()];
    let renderer = FileRenderer::new(OutputLayout::new(dir.path()), PostProcessor::empty());

    let output = Pipeline::new(&config, &NoopObserver)
        .run(&sources, &renderer)
        .unwrap();

    assert_eq!(output.report.failure_count(), 1);
    assert_eq!(output.report.render_failures[0].name, "sample.Circle");
    assert!(dir.path().join("enums/sample.enums.d.ts").exists());
}

#[test]
fn test_substituted_types_file_lists_values_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::from_json_str(
        r#"{
        "substitutedTypes": {
            "sap.ui.core.CSSSize": "type CSSSize = string;",
            "int": "number"
        },
        "postProcessing": {
            "substituted": [{ "searchString": "number", "replacement": "type Int = number;" }]
        }
    }"#,
    )
    .unwrap();
    let renderer = FileRenderer::new(
        OutputLayout::new(dir.path()),
        PostProcessor::from_config(&config.post_processing).unwrap(),
    );

    renderer
        .write_substituted_types(&config.substituted_types)
        .unwrap();

    let text = fs::read_to_string(dir.path().join("substituted.d.ts")).unwrap();
    assert_eq!(text, "type CSSSize = string;\ntype Int = number;");
}

#[test]
fn test_replacement_files_override_generated_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let replacements = dir.path().join("replacements");
    fs::create_dir_all(replacements.join("classes/sample")).unwrap();
    fs::write(
        replacements.join("classes/sample/Circle.d.ts"),
        "declare module \"sample\" { export class Circle { moveTo(): void; } }\n",
    )
    .unwrap();
    fs::write(replacements.join("README.txt"), "moveTo( stays").unwrap();

    let config = config();
    let sources: Vec<ApiSource> = vec![serde_json::from_str(SAMPLE_API).unwrap()];
    let renderer = FileRenderer::new(
        OutputLayout::new(&out),
        PostProcessor::from_config(&config.post_processing).unwrap(),
    );
    Pipeline::new(&config, &NoopObserver)
        .run(&sources, &renderer)
        .unwrap();

    let copied = renderer.copy_replacements(&replacements).unwrap();
    assert_eq!(copied, 2);

    let circle = fs::read_to_string(out.join("classes/sample/Circle.d.ts")).unwrap();
    assert_eq!(
        circle,
        "declare module \"sample\" { export class Circle { moveBy(): void; } }\n",
        "the replacement wins and still gets the class rules"
    );
    assert_eq!(
        fs::read_to_string(out.join("README.txt")).unwrap(),
        "moveTo( stays",
        "non-declaration files are copied verbatim"
    );
    assert!(out.join("enums/sample.enums.d.ts").exists());
}

#[test]
fn test_missing_replacement_directory_copies_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = FileRenderer::new(OutputLayout::new(dir.path()), PostProcessor::empty());
    assert_eq!(
        renderer
            .copy_replacements(&dir.path().join("replacements"))
            .unwrap(),
        0
    );
}
