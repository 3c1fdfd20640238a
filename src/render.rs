//! HTML rendering of the front page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use std::time::Duration;

use crate::hn::Item;
use crate::stories::{RankedStory, Story, TopStories};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Quiet Hacker News</title>
  <style>
    body { padding: 20px; font-family: sans-serif; }
    body, a { color: #333; }
    li { padding: 4px 0; }
    .host, .meta { color: #888; font-size: 0.9em; }
    .time { color: #888; padding: 10px 0 0 40px; }
    .footer, .footer a { color: #888; }
  </style>
</head>
<body>
  <h1>Quiet Hacker News</h1>
  <ol>
"#;

const FOOT: &str = r#"  <p class="footer">Stories from <a href="https://news.ycombinator.com/">Hacker News</a>, links only.</p>
</body>
</html>
"#;

/// Render the full page for a set of top stories.
pub fn page(top: &TopStories) -> String {
  let mut html = String::with_capacity(HEAD.len() + FOOT.len() + top.stories.len() * 160);
  html.push_str(HEAD);

  for ranked in &top.stories {
    story_line(&mut html, ranked);
  }

  html.push_str("  </ol>\n");
  html.push_str(&timing_line(top.elapsed));
  html.push_str(FOOT);
  html
}

fn story_line(html: &mut String, ranked: &RankedStory) {
  let Story { item, host } = &ranked.story;
  let title = if item.title.is_empty() {
    ranked.story.url()
  } else {
    item.title.as_str()
  };

  // Writing to a String cannot fail
  let _ = write!(
    html,
    "    <li value=\"{}\"><a href=\"{}\">{}</a>",
    ranked.rank + 1,
    encode_double_quoted_attribute(ranked.story.url()),
    encode_text(title),
  );
  if !host.is_empty() {
    let _ = write!(html, " <span class=\"host\">({})</span>", encode_text(host));
  }
  if let Some(meta) = meta_line(item) {
    let _ = write!(html, "<br><span class=\"meta\">{}</span>", encode_text(&meta));
  }
  html.push_str("</li>\n");
}

/// "120 points by pg | 45 comments", leaving out whatever the item lacks.
fn meta_line(item: &Item) -> Option<String> {
  let mut parts = Vec::new();
  match (item.score, item.by.as_deref()) {
    (Some(score), Some(by)) => parts.push(format!("{} points by {}", score, by)),
    (Some(score), None) => parts.push(format!("{} points", score)),
    (None, Some(by)) => parts.push(format!("by {}", by)),
    (None, None) => {}
  }
  if let Some(n) = item.descendants {
    parts.push(format!("{} comments", n));
  }

  (!parts.is_empty()).then(|| parts.join(" | "))
}

fn timing_line(elapsed: Duration) -> String {
  format!(
    "  <p class=\"time\">This page was rendered in {:.2?}</p>\n",
    elapsed
  )
}

/// Minimal page for failures, shown instead of the story list.
pub fn error_page(message: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Quiet Hacker News</title></head>\n<body><p>{}</p></body>\n</html>\n",
    encode_text(message)
  )
}
