use std::fs;

use obmd_commonmark::{
  ContentSelection,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  Preprocessor,
  ProcessError,
  ProcessorPreset,
  create_processor,
  process_markdown_file,
  process_markdown_string,
};

#[test]
fn test_plain_markdown_unaffected() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let result = processor.render("# Heading\n\nSome *text* and a [link](/x).");

  assert_eq!(result.title.as_deref(), Some("Heading"));
  assert!(result.html.contains("<em>text</em>"));
  assert!(result.html.contains("<a href=\"/x\">link</a>"));
  assert!(!result.html.contains("callout"));
}

#[test]
fn test_checkbox_stage_runs_before_callout_stage() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  assert_eq!(processor.preprocessors().names(), vec![
    "checkbox", "callout", "wikilink"
  ]);
}

#[test]
fn test_custom_stage_ordering() {
  struct Marker;

  impl Preprocessor for Marker {
    fn name(&self) -> &'static str {
      "marker"
    }

    fn run(&self, mut lines: Vec<String>) -> Vec<String> {
      lines.insert(0, "> [!Note] Injected".to_string());
      lines
    }
  }

  // Above the callout stage, so the injected header becomes a callout.
  let processor = MarkdownProcessor::new(MarkdownOptions::default())
    .with_preprocessor(Box::new(Marker), 190);
  let result = processor.render("body");
  assert!(result.html.contains("<p class=\"callout-title\">Injected</p>"));

  // Below it, the header reaches the renderer as a blockquote.
  let mut processor = MarkdownProcessor::new(MarkdownOptions::default());
  processor.register_preprocessor(Box::new(Marker), 10);
  assert_eq!(processor.preprocessors().priority_of("marker"), Some(10));
  let result = processor.render("body");
  assert!(result.html.contains("<blockquote>"));
}

#[test]
fn test_wiki_links() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let html = processor
    .render("See [[other-note|the other note]] and [[Plain]].")
    .html;

  assert!(html.contains("<a href=\"other-note\">the other note</a>"));
  assert!(html.contains("<a href=\"Plain\">Plain</a>"));
}

#[test]
fn test_wiki_links_inside_code_untouched() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let html = processor.render("```\n[[kept]]\n```").html;
  assert!(html.contains("[[kept]]"));
}

#[test]
fn test_frontmatter_is_reported_not_rendered() {
  let result = process_markdown_string(
    "---\nType: Blogger\nLabels: rust, notes\n---\n# Post\n\nBody",
    ProcessorPreset::Obsidian,
  );

  assert_eq!(
    result.frontmatter.get("Type").map(String::as_str),
    Some("Blogger")
  );
  assert_eq!(
    result.frontmatter.get("Labels").map(String::as_str),
    Some("rust, notes")
  );
  assert!(!result.html.contains("Blogger"));
  assert_eq!(result.title.as_deref(), Some("Post"));
}

#[test]
fn test_blog_preset_wraps_output() {
  let html = process_markdown_string("text", ProcessorPreset::Blog).html;
  assert!(html.starts_with("<div class=\"obsidian-content\">"));
  assert!(html.trim_end().ends_with("</div>"));
}

#[test]
fn test_youtube_embed() {
  let processor = create_processor(ProcessorPreset::Obsidian);
  let html = processor
    .render("![Demo](https://www.youtube.com/watch?v=abc123)")
    .html;
  assert!(html.contains("https://www.youtube.com/embed/abc123"));
  assert!(html.contains("title=\"Demo\""));

  let processor = create_processor(ProcessorPreset::Basic);
  let html = processor
    .render("![Demo](https://www.youtube.com/watch?v=abc123)")
    .html;
  assert!(html.contains("<img"));
}

#[test]
fn test_nested_markdown_lists_restructured() {
  let processor = MarkdownProcessor::new(
    MarkdownOptionsBuilder::new().restructure_lists(true).build(),
  );
  let html = processor.render("- a\n  - b\n- c").html;
  let compact: String = html.chars().filter(|c| *c != '\n').collect();
  assert!(compact.contains("<li>a</li><ul><li>b</li></ul>"));
}

#[test]
fn test_process_markdown_file_with_selection() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let path = dir.path().join("1 Release notes.md");
  fs::write(
    &path,
    "---\nPostUrl: https://example.com\n---\nprivate intro\n<!-- publish \
     -->\n> [!Note] Shipped\n> - [x] callouts\n<!-- end -->\nscratch",
  )
  .expect("Failed to write note");

  let selection = ContentSelection {
    start_marker: "<!-- publish -->".to_string(),
    end_marker: "<!-- end -->".to_string(),
    ..Default::default()
  };
  let processor = create_processor(ProcessorPreset::Obsidian);
  let result = process_markdown_file(&processor, &path, &selection)
    .expect("Failed to process note");

  assert!(result.html.contains("<p class=\"callout-title\">Shipped</p>"));
  assert!(result.html.contains("<li>☑️ callouts</li>"));
  assert!(!result.html.contains("private intro"));
  assert!(!result.html.contains("scratch"));
  assert_eq!(
    result.frontmatter.get("PostUrl").map(String::as_str),
    Some("https://example.com")
  );
  assert_eq!(
    obmd_commonmark::post_title_from_path(&path).as_deref(),
    Some("Release notes")
  );
}

#[test]
fn test_process_missing_file() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let path = dir.path().join("missing.md");
  let processor = create_processor(ProcessorPreset::Basic);

  let err = process_markdown_file(&processor, &path, &ContentSelection::default())
    .expect_err("Missing file should fail");
  assert!(matches!(err, ProcessError::Read { .. }));
  assert!(err.to_string().contains("missing.md"));
}

#[test]
fn test_processor_is_shareable_across_threads() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  std::thread::scope(|scope| {
    let handles: Vec<_> = (0..4)
      .map(|i| {
        let processor = &processor;
        scope.spawn(move || processor.render(&format!("> [!Note] N{i}\n> b")))
      })
      .collect();
    for (i, handle) in handles.into_iter().enumerate() {
      let result = handle.join().expect("Render thread panicked");
      assert!(result.html.contains(&format!(">N{i}</p>")));
    }
  });
}

#[test]
fn test_leading_style_block_survives_list_restructuring() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  assert!(processor.options().restructure_lists);

  let html = processor
    .render("<style>.callout{color:red}</style>\n\n> [!Note] Hi\n> x")
    .html;

  assert!(html.starts_with("<style>.callout{color:red}</style>"));
  assert!(html.contains("<div class=\"callout callout-note\">"));
}

#[test]
fn test_selected_body_starting_with_rule_is_not_frontmatter() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let path = dir.path().join("rules.md");
  fs::write(&path, "---\na: b\n---\n---\nintro paragraph\n\n---\nmore")
    .expect("Failed to write note");

  let processor = create_processor(ProcessorPreset::Obsidian);
  let result =
    process_markdown_file(&processor, &path, &ContentSelection::default())
      .expect("Failed to process note");

  assert!(result.html.contains("<p>intro paragraph</p>"));
  assert!(result.html.contains("<p>more</p>"));
  assert_eq!(result.html.matches("<hr").count(), 2);
  assert_eq!(result.frontmatter.get("a").map(String::as_str), Some("b"));
  assert_eq!(result.frontmatter.len(), 1);
}

#[test]
fn test_render_body_keeps_leading_rule() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let result = processor.render_body("---\nkey: value\n---\ntext");

  assert!(result.frontmatter.is_empty());
  assert!(result.html.contains("key: value"));
}
