use super::helpers::{assert_first_span_is_space_indented, assert_line_text, render_markdown_for_test};

#[test]
fn unordered_list_items_get_dash_markers() {
    let tree = render_markdown_for_test("- one\n- two\n- three", true);
    assert_eq!(tree.line_texts(), vec!["- one", "- two", "- three"]);
}

#[test]
fn ordered_list_numbers_follow_start_value() {
    let tree = render_markdown_for_test("3. x\n4. y", true);
    assert_eq!(tree.line_texts(), vec!["3. x", "4. y"]);

    let tree = render_markdown_for_test("1. a\n1. b", true);
    assert_eq!(tree.line_texts(), vec!["1. a", "2. b"]);
}

#[test]
fn nested_list_is_indented_under_parent_marker() {
    let tree = render_markdown_for_test("- outer\n  - inner\n- next", true);
    let lines = tree.line_texts();
    assert_eq!(lines, vec!["- outer", "  - inner", "- next"]);
    assert_first_span_is_space_indented(&tree.lines[1], 2);
}

#[test]
fn list_is_separated_from_surrounding_paragraphs() {
    let tree = render_markdown_for_test("Intro\n\n- a\n- b\n\nOutro", true);
    let lines = tree.line_texts();
    assert_line_text(&lines, 0, "Intro");
    assert_line_text(&lines, 1, "");
    assert_line_text(&lines, 2, "- a");
    assert_line_text(&lines, 3, "- b");
    assert_line_text(&lines, 4, "");
    assert_line_text(&lines, 5, "Outro");
    assert_eq!(lines.len(), 6);
}

#[test]
fn code_block_inside_list_item_keeps_item_indent() {
    let tree = render_markdown_for_test("1. step\n\n   ```rust\n   let x = 1;\n   ```\n", true);
    let lines = tree.line_texts();
    assert_line_text(&lines, 0, "1. step");
    assert_line_text(&lines, 1, "");
    assert_first_span_is_space_indented(&tree.lines[2], 3);

    let blocks = tree.code_blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].start_line, 2);
    assert_eq!(tree.code_block_content(0).as_deref(), Some("let x = 1;"));
}

#[test]
fn list_markers_use_marker_style() {
    let theme = crate::ui::theme::Theme::dark_default();
    let tree = render_markdown_for_test("- item", true);
    assert_eq!(tree.lines[0].spans[0].content, "- ");
    assert_eq!(tree.lines[0].spans[0].style, theme.md_list_marker_style());
}
