use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:amp|lt|gt|quot|apos|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("entity pattern is valid")
});

static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("control pattern is valid")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("cdata pattern is valid"));

/// Repair near-valid feed XML before parsing.
///
/// Never fails. Text that is still broken afterwards is the parser's problem.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim_start();
    let escaped = escape_bare_ampersands(trimmed);
    let without_controls = CONTROL_CHARS.replace_all(&escaped, "");
    let without_comments = COMMENT.replace_all(&without_controls, "");
    let unwrapped = unwrap_cdata(&without_comments);
    strip_non_xml_chars(&unwrapped)
}

fn escape_bare_ampersands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if ENTITY.is_match(tail) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// CDATA bodies become escaped character data so the markup stays well-formed
fn unwrap_cdata(text: &str) -> Cow<'_, str> {
    CDATA.replace_all(text, |caps: &regex::Captures| {
        caps[1].replace('<', "&lt;").replace('>', "&gt;")
    })
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn strip_non_xml_chars(text: &str) -> String {
    text.chars().filter(|c| is_xml_char(*c)).collect()
}
