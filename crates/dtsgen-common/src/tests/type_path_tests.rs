use super::*;

#[test]
fn test_split_on_both_separators() {
    assert_eq!(split_type_path("sap.ui/core.Control"), vec!["sap", "ui", "core", "Control"]);
}

#[test]
fn test_last_segment_and_module() {
    assert_eq!(last_segment("sap.m.Button"), "Button");
    assert_eq!(last_segment("sap/m/Button"), "Button");
    assert_eq!(last_segment("Date"), "Date");
    assert_eq!(module_of("sap.m.Button"), "sap/m");
    assert_eq!(module_of("Date"), "");
}

#[test]
fn test_is_qualified() {
    assert!(is_qualified("sap.m.Button"));
    assert!(is_qualified("sap/m/Button"));
    assert!(!is_qualified("string"));
}

#[test]
fn test_capitalize() {
    assert_eq!(capitalize("resize"), "Resize");
    assert_eq!(capitalize(""), "");
}
