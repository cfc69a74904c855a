use super::*;
use crate::test_support::*;

fn names(variant: &MethodModel) -> Vec<String> {
    variant
        .parameters
        .iter()
        .map(|p| {
            if p.optional {
                format!("{}?", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect()
}

fn synthesize(raw: &dtsgen_common::RawMethod, options: SynthesisOptions) -> Vec<MethodModel> {
    let fixture = ResolverFixture::new(&[]);
    let context = SynthesisContext {
        resolver: fixture.resolver(),
        events: &[],
    };
    synthesize_overloads(raw, &context, options)
}

#[test]
fn test_single_parameter_yields_single_variant() {
    let raw = method("f", vec![param("a", "string", true)], Some("void"));
    let variants = synthesize(&raw, SynthesisOptions::default());
    assert_eq!(variants.len(), 1);
    assert_eq!(names(&variants[0]), vec!["a?"]);
}

#[test]
fn test_trailing_optionals_need_no_overloads() {
    let raw = method(
        "f",
        vec![param("a", "string", false), param("b", "string", true), param("c", "string", true)],
        None,
    );
    let variants = synthesize(&raw, SynthesisOptions::default());
    assert_eq!(variants.len(), 1);
    assert_eq!(names(&variants[0]), vec!["a", "b?", "c?"]);
}

#[test]
fn test_optional_before_mandatory_is_split() {
    // f(a, b?, c, d?)
    let raw = method(
        "f",
        vec![
            param("a", "string", false),
            param("b", "number", true),
            param("c", "string", false),
            param("d", "boolean", true),
        ],
        Some("void"),
    );
    let variants = synthesize(&raw, SynthesisOptions::default());

    assert_eq!(variants.len(), 2);
    assert_eq!(names(&variants[0]), vec!["a", "c", "d?"]);
    assert_eq!(names(&variants[1]), vec!["a", "b", "c", "d?"]);
}

#[test]
fn test_leading_optionals_produce_one_variant_each() {
    // f(a?, b?, c)
    let raw = method(
        "f",
        vec![
            param("a", "string", true),
            param("b", "string", true),
            param("c", "string", false),
        ],
        None,
    );
    let variants = synthesize(&raw, SynthesisOptions::default());

    assert_eq!(variants.len(), 3);
    assert_eq!(names(&variants[0]), vec!["b", "c"]);
    assert_eq!(names(&variants[1]), vec!["a", "c"]);
    assert_eq!(names(&variants[2]), vec!["a", "b", "c"]);
}

#[test]
fn test_no_variant_has_optional_before_mandatory() {
    let flags = [
        [true, false, true, false, true],
        [true, true, true, true, false],
        [false, true, false, true, false],
    ];
    for pattern in flags {
        let parameters = pattern
            .iter()
            .enumerate()
            .map(|(i, &optional)| param(&format!("p{i}"), "string", optional))
            .collect();
        let raw = method("f", parameters, None);
        for variant in synthesize(&raw, SynthesisOptions::default()) {
            let first_optional = variant.parameters.iter().position(|p| p.optional);
            let last_mandatory = variant.parameters.iter().rposition(|p| !p.optional);
            if let (Some(first), Some(last)) = (first_optional, last_mandatory) {
                assert!(first > last, "pattern {pattern:?} variant {:?}", names(&variant));
            }
        }
    }
}

#[test]
fn test_force_static_applies_to_every_variant() {
    let raw = method(
        "f",
        vec![param("a", "string", true), param("b", "string", false)],
        None,
    );
    let variants = synthesize(&raw, SynthesisOptions::static_members());
    assert_eq!(variants.len(), 2);
    assert!(variants.iter().all(|variant| variant.is_static));
}

#[test]
fn test_constructor_variants_have_no_return_type() {
    let raw = method(
        "constructor",
        vec![param("sId", "string", true), param("mSettings", "object", false)],
        Some("void"),
    );
    let variants = synthesize(&raw, SynthesisOptions::constructor());
    assert!(variants.iter().all(|variant| variant.return_type.is_none()));
    assert_eq!(variants[0].signature(SignatureStyle::Member), "constructor(mSettings: object)");
}
