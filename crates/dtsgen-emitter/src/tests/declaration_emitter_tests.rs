use dtsgen_common::Visibility;
use dtsgen_core::{
    ClassDeclaration, DeclarationKind, EnumMember, EnumModel, EnumValue, EventDeclaration,
    MethodDeclaration, NamespaceDeclaration, NamespaceProperty, ParameterModel, SettingsInterface,
    SettingsProperty, TypeImport,
};

use super::*;

fn member(signature: &str) -> MethodDeclaration {
    MethodDeclaration {
        name: signature.split('(').next().unwrap_or_default().to_string(),
        signature: signature.to_string(),
        is_static: false,
        visibility: Visibility::Public,
        doc: Vec::new(),
        overloads_base: false,
    }
}

fn import(name: &str, module: &str) -> TypeImport {
    TypeImport {
        name: name.to_string(),
        module: module.to_string(),
    }
}

fn button() -> ClassDeclaration {
    ClassDeclaration {
        kind: DeclarationKind::Class,
        name: "Button".to_string(),
        qualified_name: "sap.m.Button".to_string(),
        full_name: "sap/m/Button".to_string(),
        module: "sap/m".to_string(),
        library: "sap.m".to_string(),
        imports: vec![
            import("Control", "sap/ui/core"),
            import("ButtonType", "sap/m"),
            import("CSSSize", "sap/ui/core"),
        ],
        base_class: Some("Control".to_string()),
        description: "A button.".to_string(),
        constructors: vec![member("constructor(sId?: string, mSettings?: IButtonSettings)")],
        methods: vec![
            MethodDeclaration {
                doc: vec!["Sets the type.".to_string(), "@param {ButtonType} sType".to_string()],
                ..member("setType(sType: ButtonType): this")
            },
        ],
        events: vec![EventDeclaration {
            name: "press".to_string(),
            payload_type: "PressEventArgs".to_string(),
            description: String::new(),
            parameters: vec![ParameterModel {
                name: "count".to_string(),
                ty: "number".to_string(),
                optional: false,
                description: String::new(),
                default_value: None,
                raw_type: "int".to_string(),
            }],
        }],
        settings: Some(SettingsInterface {
            name: "IButtonSettings".to_string(),
            extends: Some("IControlSettings".to_string()),
            properties: vec![SettingsProperty {
                name: "width".to_string(),
                ty: "CSSSize".to_string(),
                description: String::new(),
                default_value: None,
            }],
        }),
    }
}

#[test]
fn test_emit_class_module() {
    let output = DeclarationEmitter::new().emit_class(&button());

    let expected = r#"declare module "sap/m" {
    import { CSSSize, Control } from "sap/ui/core";

    export interface PressEventArgs {
        getSource(): Button;
        getParameters(): {
            count: number;
        };
        getParameter(sName: "count"): number;
    }

    export interface IButtonSettings extends IControlSettings {
        width?: CSSSize;
    }

    /**
     * A button.
     */
    export class Button extends Control {
        constructor(sId?: string, mSettings?: IButtonSettings);
        /**
         * Sets the type.
         * @param {ButtonType} sType
         */
        setType(sType: ButtonType): this;
    }
}
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_same_module_imports_are_skipped() {
    let output = DeclarationEmitter::new().emit_class(&button());
    assert!(
        !output.contains("from \"sap/m\""),
        "types from the declaring module need no import:\n{output}"
    );
}

#[test]
fn test_emit_interface_has_no_settings() {
    let declaration = ClassDeclaration {
        kind: DeclarationKind::Interface,
        name: "IScrollable".to_string(),
        qualified_name: "sap.m.IScrollable".to_string(),
        full_name: "sap/m/IScrollable".to_string(),
        module: "sap/m".to_string(),
        library: "sap.m".to_string(),
        imports: Vec::new(),
        base_class: None,
        description: String::new(),
        constructors: Vec::new(),
        methods: vec![member("scrollTo(iTop: number): void")],
        events: Vec::new(),
        settings: None,
    };
    let output = DeclarationEmitter::new().emit_interface(&declaration);

    assert_eq!(
        output,
        "declare module \"sap/m\" {\n    export interface IScrollable {\n        scrollTo(iTop: number): void;\n    }\n}\n"
    );
}

#[test]
fn test_emit_enums_grouped_by_module() {
    let color = EnumModel {
        name: "Color".to_string(),
        qualified_name: "sample.Color".to_string(),
        module: "sample".to_string(),
        description: String::new(),
        library: "sample".to_string(),
        members: vec![
            EnumMember {
                name: "Red".to_string(),
                value: EnumValue::String("Red".to_string()),
                description: String::new(),
            },
            EnumMember {
                name: "Blue".to_string(),
                value: EnumValue::String("Blue".to_string()),
                description: String::new(),
            },
        ],
    };
    let size = EnumModel {
        name: "Size".to_string(),
        qualified_name: "sample.shapes.Size".to_string(),
        module: "sample/shapes".to_string(),
        members: vec![EnumMember {
            name: "Large".to_string(),
            value: EnumValue::Number("3".to_string()),
            description: String::new(),
        }],
        ..color.clone()
    };

    let output = DeclarationEmitter::new().emit_enums(&[color, size]);
    let expected = r#"declare module "sample" {
    export enum Color {
        Red = "Red",
        Blue = "Blue",
    }
}

declare module "sample/shapes" {
    export enum Size {
        Large = 3,
    }
}
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_emit_namespace() {
    let declaration = NamespaceDeclaration {
        name: "util".to_string(),
        qualified_name: "sample.util".to_string(),
        full_name: "sample/util".to_string(),
        module: "sample".to_string(),
        library: "sample".to_string(),
        imports: vec![import("Control", "sap/ui/core")],
        description: String::new(),
        functions: vec![member("clamp(v: number): number")],
        properties: vec![NamespaceProperty {
            name: "VERSION".to_string(),
            ty: "string".to_string(),
            description: String::new(),
        }],
    };
    let output = DeclarationEmitter::new().emit_namespace(&declaration);

    let expected = r#"declare module "sample" {
    import { Control } from "sap/ui/core";

    export namespace util {
        export const VERSION: string;
        export function clamp(v: number): number;
    }
}
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_doc_comment_terminator_is_escaped() {
    let declaration = ClassDeclaration {
        description: "Ends here */ or not".to_string(),
        events: Vec::new(),
        settings: None,
        ..button()
    };
    let output = DeclarationEmitter::new().emit_class(&declaration);
    assert!(output.contains(" * Ends here *\\/ or not"));
}
