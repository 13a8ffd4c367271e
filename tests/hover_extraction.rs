use enumswitch_lsp::hover::{extract_type_name, isolate_signature};

// ─── Signature isolation ────────────────────────────────────────────────────

#[test]
fn test_isolate_fenced_block_drops_fence_and_language() {
    let hover = "```cpp\nColor c\n```";
    assert_eq!(isolate_signature(hover), "Color c");
}

#[test]
fn test_isolate_first_block_only() {
    let hover = "```cpp\nColor c\n```\n---\n```cpp\nint other\n```";
    assert_eq!(isolate_signature(hover), "Color c");
}

#[test]
fn test_isolate_drops_comments_and_joins_lines() {
    let hover = "```cpp\r\n// In main\r\nconst Color\r\n  c\r\n```";
    assert_eq!(isolate_signature(hover), "const Color c");
}

#[test]
fn test_isolate_inline_code() {
    assert_eq!(isolate_signature("`enum Color`"), "enum Color");
}

// ─── Type name extraction ───────────────────────────────────────────────────

#[test]
fn test_enum_declaration_hover_names_itself() {
    assert_eq!(
        extract_type_name("`enum Color`", "Color").as_deref(),
        Some("Color")
    );
}

#[test]
fn test_enum_class_declaration_hover() {
    let hover = "```cpp\nenum class Color : int {}\n```";
    assert_eq!(extract_type_name(hover, "Color").as_deref(), Some("Color"));
}

#[test]
fn test_namespace_qualifier_is_discarded() {
    assert_eq!(
        extract_type_name("MyNamespace::Color c", "c").as_deref(),
        Some("Color")
    );
}

#[test]
fn test_nested_qualifiers_keep_last_segment() {
    let hover = "```cpp\ngfx::Canvas::Color c = gfx::Canvas::Color::RED\n```";
    assert_eq!(extract_type_name(hover, "c").as_deref(), Some("Color"));
}

#[test]
fn test_plain_variable_hover() {
    assert_eq!(
        extract_type_name("```cpp\nColor c\n```", "c").as_deref(),
        Some("Color")
    );
}

#[test]
fn test_identifier_glued_to_pointer() {
    assert_eq!(
        extract_type_name("```cpp\nColor *c\n```", "c").as_deref(),
        Some("Color")
    );
}

#[test]
fn test_identifier_glued_to_scope() {
    let hover = "```cpp\n// In Canvas\npublic: Color Canvas::fill\n```";
    assert_eq!(extract_type_name(hover, "fill").as_deref(), Some("Color"));
}

#[test]
fn test_qualifiers_and_reference_are_discarded() {
    let hover = "```cpp\nstatic const Color &c\n```";
    assert_eq!(extract_type_name(hover, "c").as_deref(), Some("Color"));
}

#[test]
fn test_first_whole_word_occurrence_governs() {
    // `c` inside `cpp`, `const` and `Canvas` must not be taken for the
    // identifier; the first standalone `c` is.
    let hover = "```cpp\nconst Canvas::Color c\n```\nValue of c";
    assert_eq!(extract_type_name(hover, "c").as_deref(), Some("Color"));
}

#[test]
fn test_missing_identifier_is_unresolved() {
    assert_eq!(extract_type_name("```cpp\nColor color\n```", "c"), None);
}

#[test]
fn test_template_type_is_unresolved() {
    let hover = "```cpp\nstd::vector<int> v\n```";
    assert_eq!(extract_type_name(hover, "v"), None);
}

#[test]
fn test_identifier_alone_is_unresolved() {
    assert_eq!(extract_type_name("```cpp\nc\n```", "c"), None);
    assert_eq!(extract_type_name("Color c", ""), None);
}
