use contact_backend::sanitize::{coerce_to_string, sanitize_input};
use serde_json::json;

#[test]
fn trims_then_strips_angle_brackets() {
    assert_eq!(sanitize_input("  hello  "), "hello");
    assert_eq!(sanitize_input("<b>bold</b>"), "bbold/b");
    assert_eq!(sanitize_input("a < b > c"), "a  b  c");
}

#[test]
fn only_angle_brackets_are_removed() {
    let input = "Tom & Jerry's \"quote\" / {x} [y] \u{5e9}\u{5dc}\u{5d5}\u{5dd}";
    assert_eq!(sanitize_input(input), input);
}

#[test]
fn other_characters_keep_their_order() {
    let input = "<<1>2<3>>4";
    let output = sanitize_input(input);
    assert!(!output.contains('<') && !output.contains('>'));
    assert_eq!(output, "1234");
}

#[test]
fn truncates_to_first_thousand_characters() {
    let long = format!("  {}<>{}", "a".repeat(600), "b".repeat(600));
    let output = sanitize_input(&long);

    assert_eq!(output.chars().count(), 1000);
    assert_eq!(output, format!("{}{}", "a".repeat(600), "b".repeat(400)));
}

#[test]
fn truncation_counts_characters() {
    let hebrew = "ש".repeat(1500);
    let output = sanitize_input(&hebrew);

    assert_eq!(output.chars().count(), 1000);
    assert!(output.is_char_boundary(output.len()));
}

#[test]
fn short_strings_are_untouched_by_truncation() {
    let exact = "x".repeat(1000);
    assert_eq!(sanitize_input(&exact), exact);
}

#[test]
fn sanitizing_twice_is_stable() {
    let long = "z".repeat(2000);
    for input in [
        "plain text",
        "<i>italic</i> and more",
        "line one\nline two",
        long.as_str(),
    ] {
        let once = sanitize_input(input);
        assert_eq!(sanitize_input(&once), once);
    }
}

#[test]
fn whitespace_exposed_by_stripping_or_truncation_is_kept() {
    // Trimming happens first, so a second pass can still shorten these.
    assert_eq!(sanitize_input("< a"), " a");
    assert_eq!(sanitize_input(&sanitize_input("< a")), "a");

    let input = format!("{} b", "a".repeat(999));
    let once = sanitize_input(&input);
    assert_eq!(once.chars().count(), 1000);
    assert!(once.ends_with(' '));
    assert_eq!(sanitize_input(&once).chars().count(), 999);
}

#[test]
fn coercion_to_string() {
    assert_eq!(coerce_to_string(&json!("text")), "text");
    assert_eq!(coerce_to_string(&json!(42)), "42");
    assert_eq!(coerce_to_string(&json!(true)), "true");
    assert_eq!(coerce_to_string(&json!(null)), "null");
    assert_eq!(coerce_to_string(&json!(["a", 1])), r#"["a",1]"#);
}
