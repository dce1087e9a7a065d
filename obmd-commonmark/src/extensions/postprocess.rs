//! HTML rewrites applied to the rendered document.
use std::sync::LazyLock;

use kuchikikiki::NodeRef;
use markup5ever::{QualName, local_name, ns};
use regex::{Captures, Regex};

use crate::{processor::process::process_safe, utils};

static YOUTUBE_IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
  utils::compile_or_never(
    "YOUTUBE_IMG_RE",
    r#"<img\s+src="(https?://(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([\w-]+)(\S*))"\s+alt="([^"]*)"\s*/?>"#,
  )
});

/// Replace images pointing at YouTube videos with an embedded player.
///
/// `![Talk](https://youtu.be/abc123)` renders as an `<img>`; this turns it
/// into a wrapped `<iframe>` using the alt text as the frame title.
#[must_use]
pub fn embed_youtube_videos(html: &str) -> String {
  YOUTUBE_IMG_RE
    .replace_all(html, |caps: &Captures| {
      let video_id = &caps[2];
      let params = &caps[3];
      let alt = &caps[4];
      log::debug!("Embedding YouTube video {video_id}");
      format!(
        "<div class=\"youtube-embed-wrapper\"><iframe class=\"youtube-embed\" \
         src=\"https://www.youtube.com/embed/{video_id}{params}\" \
         title=\"{alt}\" frameborder=\"0\" allow=\"accelerometer; autoplay; \
         clipboard-write; encrypted-media; gyroscope; picture-in-picture\" \
         allowfullscreen></iframe></div>"
      )
    })
    .into_owned()
}

/// Move lists nested inside `<li>` elements out to follow their parent item.
///
/// `<li>a<ul><li>b</li></ul></li>` becomes `<li>a</li><ul><li>b</li></ul>`,
/// the flat shape callout bodies already use.
#[must_use]
pub fn restructure_nested_lists(html: &str) -> String {
  kuchiki_postprocess_html(html, |document| {
    let Ok(items) = document.select("li") else {
      return;
    };
    let items: Vec<NodeRef> =
      items.map(|item| item.as_node().clone()).collect();

    for item in items {
      let nested: Vec<NodeRef> =
        item.children().filter(is_list_element).collect();

      let mut anchor = item;
      for list in nested {
        list.detach();
        anchor.insert_after(list.clone());
        anchor = list;
      }
    }
  })
}

/// Wrap the document in a `<div>` with the given class.
#[must_use]
pub fn wrap_html(html: &str, class_name: &str) -> String {
  let class_name = html_escape::encode_double_quoted_attribute(class_name);
  format!("<div class=\"{class_name}\">\n{html}\n</div>")
}

fn is_list_element(node: &NodeRef) -> bool {
  node.as_element().is_some_and(|element| {
    element.name.local == local_name!("ul")
      || element.name.local == local_name!("ol")
  })
}

/// Parse `html` as a `<body>` fragment, apply `transform_fn` to the DOM and
/// serialize it back. The input is returned unchanged if any step fails.
///
/// Fragment parsing keeps `<style>`, `<link>` and comments where they appear;
/// a full document parse would hoist them into `<head>`.
fn kuchiki_postprocess_html<F>(html: &str, transform_fn: F) -> String
where
  F: FnOnce(&NodeRef),
{
  process_safe(
    html,
    |html| {
      use tendril::TendrilSink;

      let context = QualName::new(None, ns!(html), local_name!("body"));
      let document = kuchikikiki::parse_fragment(context, Vec::new()).one(html);
      transform_fn(&document);
      serialize_fragment(&document).unwrap_or_else(|| html.to_string())
    },
    html,
  )
}

/// Serialize a parsed fragment. html5ever places the fragment's nodes under a
/// synthetic `<html>` root, which is skipped.
fn serialize_fragment(document: &NodeRef) -> Option<String> {
  let mut out = Vec::new();
  for node in document.children() {
    let is_root = node
      .as_element()
      .is_some_and(|element| element.name.local == local_name!("html"));
    if is_root {
      for child in node.children() {
        child.serialize(&mut out).ok()?;
      }
    } else {
      node.serialize(&mut out).ok()?;
    }
  }
  String::from_utf8(out).ok()
}
