use obmd_commonmark::{
  MarkdownOptions,
  MarkdownProcessor,
  Preprocessor,
  extensions::{CHECKBOX_GLYPH, CheckboxTransform},
};

fn run(lines: &[&str]) -> Vec<String> {
  CheckboxTransform.run(lines.iter().map(ToString::to_string).collect())
}

#[test]
fn test_checked_and_unchecked_share_glyph() {
  assert_eq!(run(&["- [ ] buy milk", "- [x] done"]), vec![
    "- ☑️ buy milk",
    "- ☑️ done"
  ]);
}

#[test]
fn test_leading_whitespace_is_dropped() {
  assert_eq!(run(&["  - [ ] nested"]), vec!["- ☑️ nested"]);
}

#[test]
fn test_non_matching_lines_unchanged() {
  let input = [
    "- plain item",
    "- [X] upper-case x",
    "* [ ] star bullet",
    "text - [ ] mid-line",
    "",
  ];
  assert_eq!(run(&input), input);
}

#[test]
fn test_output_length_matches_input() {
  let input = ["a", "- [ ] b", "c"];
  assert_eq!(run(&input).len(), input.len());
}

#[test]
fn test_rendered_task_list() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let html = processor.render("- [ ] one\n- [x] two").html;

  assert_eq!(html.matches(CHECKBOX_GLYPH).count(), 2);
  assert!(!html.contains("type=\"checkbox\""));
  assert!(!html.contains("[ ]"));
}
