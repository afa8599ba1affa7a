use html2text::{from_read_with_decorator, render::text_renderer::TrivialDecorator};
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const DESCRIPTION_MAX_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("img pattern is valid")
});

/// Convert HTML to plain text and collapse whitespace
pub fn strip_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let plain_text = from_read_with_decorator(html.as_bytes(), usize::MAX, TrivialDecorator::new());
    // Table layouts are drawn with box characters
    let plain_text: String = plain_text
        .chars()
        .map(|c| if is_box_drawing(c) { ' ' } else { c })
        .collect();
    WHITESPACE.replace_all(&plain_text, " ").trim().to_string()
}

fn is_box_drawing(c: char) -> bool {
    matches!(c, '\u{2500}'..='\u{257F}')
}

/// Decode HTML entities (`&rsquo;`, `&nbsp;`, ...) in plain-text fields and
/// collapse whitespace
pub fn decode_entities(text: &str) -> String {
    let decoded = decode_html_entities(text);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Cut to `max_chars` characters, appending an ellipsis when anything was dropped
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(ELLIPSIS);
    truncated
}

/// First `<img src="...">` in an HTML fragment
pub fn extract_img_src(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Returns the URL in canonical form if it is an absolute http(s) URL.
/// Protocol-relative URLs are upgraded to https.
pub fn valid_http_url(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    let owned;
    let candidate = if candidate.starts_with("//") {
        owned = format!("https:{}", candidate);
        owned.as_str()
    } else {
        candidate
    };

    match Url::parse(candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Some(url.to_string())
        }
        _ => None,
    }
}
