//! URL-driven transforms: video embeds and PDF download links.
//!
//! Neither parses the content; both only prepend markup chosen from the
//! entry URL.

use html_escape::encode_double_quoted_attribute;

use crate::patterns::YOUTUBE_VIDEO;
use crate::transforms::text::{replace_line_feeds, replace_text_links};

const PLAYER_WIDTH: u32 = 650;
const PLAYER_HEIGHT: u32 = 350;
const EMBED_BASE_URL: &str = "https://www.youtube-nocookie.com/embed/";

/// Prepend an embedded player when the entry URL is a YouTube watch page.
///
/// The original content (usually the plain-text video description) is
/// linkified, its line feeds converted, and wrapped in a paragraph below the
/// player.
#[must_use]
pub fn add_youtube_video(entry_url: &str, content: &str) -> String {
    let Some(video_id) = YOUTUBE_VIDEO
        .captures(entry_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return content.to_string();
    };

    format!(
        r#"<iframe width="{PLAYER_WIDTH}" height="{PLAYER_HEIGHT}" frameborder="0" src="{EMBED_BASE_URL}{}" allowfullscreen></iframe><p>{}</p>"#,
        encode_double_quoted_attribute(video_id),
        replace_line_feeds(&replace_text_links(content))
    )
}

/// Prepend a "PDF" link when the entry URL ends in `.pdf` (case-sensitive).
#[must_use]
pub fn add_pdf_download_link(entry_url: &str, content: &str) -> String {
    if !entry_url.ends_with(".pdf") {
        return content.to_string();
    }
    format!(
        r#"<a href="{}">PDF</a>{content}"#,
        encode_double_quoted_attribute(entry_url)
    )
}
