use std::fs;
use std::path::Path;

use clap::Parser;
use dtsgen_cli::args::CliArgs;
use dtsgen_cli::driver;

const CORE_API: &str = r#"{
    "library": "sample.core",
    "symbols": [
        { "kind": "class", "name": "sample.core.Element",
          "methods": [
            { "name": "setText",
              "parameters": [{ "name": "sText", "type": "string" }],
              "returnValue": { "type": "sample.core.Element" } }
          ] }
    ]
}"#;

const WIDGETS_API: &str = r#"{
    "library": "sample.widgets",
    "symbols": [
        { "kind": "class", "name": "sample.widgets.Label", "extends": "sample.core.Element",
          "methods": [
            { "name": "setText",
              "parameters": [{ "name": "sText", "type": "string" }],
              "returnValue": { "type": "sample.widgets.Label" } }
          ] }
    ]
}"#;

fn write_project(root: &Path, cache_apis: bool) {
    fs::create_dir_all(root.join("api/sample/core")).unwrap();
    fs::create_dir_all(root.join("api/sample/widgets")).unwrap();
    fs::write(root.join("api/sample/core/api.json"), CORE_API).unwrap();
    fs::write(root.join("api/sample/widgets/api.json"), WIDGETS_API).unwrap();
    fs::write(
        root.join("dtsgen.json"),
        format!(
            r#"{{
            "connection": {{
                "root": "api",
                "endpoints": ["sample/core/api.json", "sample/widgets/api.json"]
            }},
            "cacheApis": "{cache_apis}",
            "outputDir": "types"
        }}"#
        ),
    )
    .unwrap();
}

fn run(root: &Path, extra: &[&str]) -> anyhow::Result<driver::RunSummary> {
    let mut argv = vec!["dtsgen"];
    argv.extend_from_slice(extra);
    let args = CliArgs::try_parse_from(argv).unwrap();
    let config = driver::load_config(&driver::config_path(&args, root))?;
    driver::run(&args, root, &config)
}

#[test]
fn test_run_writes_declarations_across_libraries() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), false);

    let summary = run(dir.path(), &[]).unwrap();

    assert_eq!(summary.output_dir, dir.path().join("types"));
    assert_eq!(summary.report.sources, 2);
    assert_eq!(summary.report.classes, 2);
    assert_eq!(summary.report.linked_base_classes, 1);
    assert_eq!(summary.report.failure_count(), 0);

    let label =
        fs::read_to_string(dir.path().join("types/classes/sample/widgets/Label.d.ts")).unwrap();
    assert!(label.contains("export class Label extends Element {"), "{label}");
    assert!(label.contains("export interface ILabelSettings extends IElementSettings {"), "{label}");
    assert!(label.contains("import { Element, IElementSettings } from \"sample/core\";"), "{label}");
    // The inherited setText returns Element, so both signatures are kept.
    assert!(label.contains("setText(sText: string): Label|Element;"), "{label}");
    assert!(label.contains("setText(sText: string): Element;"), "{label}");
    assert_eq!(summary.report.inherited_overloads, 1);
    assert!(
        !dir.path().join("apis").exists(),
        "cache stays untouched when cacheApis is off"
    );
}

#[test]
fn test_cache_is_filled_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), true);

    run(dir.path(), &[]).unwrap();
    assert!(dir.path().join("apis/sample.core.api.json").is_file());
    assert!(dir.path().join("apis/sample.widgets.api.json").is_file());

    // With the endpoint sources gone, the cache alone satisfies the run.
    fs::remove_dir_all(dir.path().join("api")).unwrap();
    let summary = run(dir.path(), &[]).unwrap();
    assert_eq!(summary.report.classes, 2);

    let err = run(dir.path(), &["--no-cache"]).unwrap_err();
    assert!(
        format!("{err:#}").contains("failed to acquire symbol sources"),
        "{err:#}"
    );
}

#[test]
fn test_out_and_emit_model_are_relative_to_cwd() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), false);

    let summary = run(dir.path(), &["--out", "dist", "--emit-model", "model/out.json"]).unwrap();

    assert_eq!(summary.output_dir, dir.path().join("dist"));
    assert!(dir.path().join("dist/classes/sample/core/Element.d.ts").is_file());

    let model: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("model/out.json")).unwrap())
            .unwrap();
    assert_eq!(model["report"]["classes"], 2);
    assert_eq!(model["classes"][1]["qualifiedName"], "sample.widgets.Label");
}

#[test]
fn test_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(dir.path(), &["--config", "nope.json"]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config"), "{err:#}");
}

#[test]
fn test_config_without_endpoints_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dtsgen.json"), "{}").unwrap();
    let err = run(dir.path(), &[]).unwrap_err();
    assert!(format!("{err:#}").contains("no endpoints configured"), "{err:#}");
}

#[test]
fn test_replacements_next_to_config_are_copied() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), false);
    fs::create_dir_all(dir.path().join("replacements/classes/sample/core")).unwrap();
    fs::write(
        dir.path().join("replacements/classes/sample/core/Element.d.ts"),
        "// hand-written\n",
    )
    .unwrap();

    let summary = run(dir.path(), &[]).unwrap();

    assert_eq!(summary.replaced_files, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("types/classes/sample/core/Element.d.ts")).unwrap(),
        "// hand-written\n"
    );
    assert!(
        dir.path().join("types/substituted.d.ts").is_file(),
        "the substitution file is always written"
    );
}
