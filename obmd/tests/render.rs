use std::fs;

use obmd::{config::Config, render::render_note};

#[test]
fn test_render_note_with_config_file() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let config_path = dir.path().join("obmd.toml");
  fs::write(
    &config_path,
    r#"
wrap_class = "post"

[selection]
start_marker = "<!-- publish -->"
"#,
  )
  .expect("Failed to write config");

  let note = dir.path().join("2 Weekly log.md");
  fs::write(
    &note,
    "---\nLabels: log\n---\ndraft notes\n<!-- publish -->\n# Week \
     12\n\n> [!Tip]\n> - [ ] write more\n>   - daily\n\nSee [[Archive]].",
  )
  .expect("Failed to write note");

  let config =
    Config::load(&[config_path], &[]).expect("Failed to load config");
  let post = render_note(&config, &note).expect("Failed to render note");

  assert_eq!(post.title.as_deref(), Some("Week 12"));
  assert_eq!(post.post_title.as_deref(), Some("Weekly log"));
  assert_eq!(post.frontmatter.get("Labels").map(String::as_str), Some("log"));
  assert!(post.html.starts_with("<div class=\"post\">"));
  assert!(!post.html.contains("draft notes"));
  assert!(post.html.contains("<p class=\"callout-title\">Tip</p>"));
  assert!(post.html.contains("<li>☑️ write more</li>"));
  assert!(post.html.contains("<a href=\"Archive\">Archive</a>"));
}

#[test]
fn test_json_output() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let note = dir.path().join("Note.md");
  fs::write(&note, "# Hello\n\ntext").expect("Failed to write note");

  let config = Config {
    wrap_class: String::new(),
    ..Default::default()
  };
  let post = render_note(&config, &note).expect("Failed to render note");
  let json = post.to_output("json").expect("Failed to serialize");
  let value: serde_json::Value =
    serde_json::from_str(&json).expect("Output should be valid JSON");

  assert_eq!(value["title"], "Hello");
  assert_eq!(value["post_title"], "Note");
  assert!(
    value["html"]
      .as_str()
      .is_some_and(|html| html.starts_with("<h1>"))
  );
  assert_eq!(post.to_output("html").expect("Failed to render"), post.html);
}

#[test]
fn test_multiple_config_files_merge_in_order() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let first = dir.path().join("base.toml");
  let second = dir.path().join("override.json");
  fs::write(&first, "embed_youtube = false\n[selection]\nend_marker = \"END\"")
    .expect("Failed to write config");
  fs::write(&second, r#"{"embed_youtube": true, "wiki_links": false}"#)
    .expect("Failed to write config");

  let config = Config::load(&[first, second], &["gfm=no".to_string()])
    .expect("Failed to load config");

  assert!(config.embed_youtube);
  assert!(!config.wiki_links);
  assert!(!config.gfm);
  assert_eq!(config.selection.end_marker, "END");
}

#[test]
fn test_partial_later_file_keeps_earlier_values() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let first = dir.path().join("a.toml");
  let second = dir.path().join("b.toml");
  fs::write(&first, "wrap_class = \"post\"\ngfm = false")
    .expect("Failed to write config");
  fs::write(&second, "[selection]\nstart_marker = \"X\"")
    .expect("Failed to write config");

  let config =
    Config::load(&[first, second], &[]).expect("Failed to load config");

  assert_eq!(config.wrap_class, "post");
  assert!(!config.gfm);
  assert!(config.wiki_links);
  assert_eq!(config.selection.start_marker, "X");
  assert_eq!(config.selection.end_marker, "");
}

#[test]
fn test_unsupported_config_extension() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  let path = dir.path().join("obmd.yaml");
  fs::write(&path, "gfm: true").expect("Failed to write config");

  let err = Config::from_file(&path).expect_err("YAML should be rejected");
  assert!(err.to_string().contains("Unsupported config file format"));
}

#[test]
fn test_default_config_round_trips() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  for format in ["toml", "json"] {
    let path = dir.path().join(format!("obmd.{format}"));
    Config::generate_default_config(format, &path)
      .expect("Failed to generate config");
    let loaded = Config::from_file(&path).expect("Failed to load config");
    assert_eq!(loaded, Config::default());
  }
}

#[test]
fn test_find_config_file_in() {
  let dir = tempfile::tempdir().expect("Failed to create temp dir");
  assert_eq!(Config::find_config_file_in(dir.path()), None);

  fs::create_dir(dir.path().join(".config")).expect("Failed to create dir");
  let nested = dir.path().join(".config/obmd.toml");
  fs::write(&nested, "").expect("Failed to write config");
  assert_eq!(Config::find_config_file_in(dir.path()), Some(nested));

  let top = dir.path().join("obmd.toml");
  fs::write(&top, "").expect("Failed to write config");
  assert_eq!(Config::find_config_file_in(dir.path()), Some(top));
}
