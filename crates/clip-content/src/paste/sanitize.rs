//! Clipboard HTML cleanup and filtering

use regex::Regex;
use std::sync::LazyLock;

/// Windows clipboard fragment markers
static FRAGMENT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!--\s*(Start|End)Fragment\s*-->").expect("Invalid fragment regex")
});

static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*charset\s*=[^>]*>"#).expect("Invalid charset meta regex")
});

static HEAD_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").expect("Invalid head regex"));

static BODY_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*?)(?:</body\s*>|\z)").expect("Invalid body regex")
});

static DOCUMENT_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!doctype[^>]*>|</?html\b[^>]*>").expect("Invalid wrapper regex")
});

/// Elements removed together with their content when filtering.
const UNSAFE_ELEMENTS: &[&str] = &["script", "style", "iframe", "object", "embed"];

static UNSAFE_ELEMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    UNSAFE_ELEMENTS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("Invalid unsafe element regex")
        })
        .collect()
});

/// Leftover opening or self-closing unsafe tags without a closing tag.
static UNSAFE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)</?(?:{})\b[^>]*>", UNSAFE_ELEMENTS.join("|")))
        .expect("Invalid unsafe tag regex")
});

/// An opening or self-closing tag with its attribute list.
///
/// Captures: 1 = tag name and attributes, 2 = closing `/` and whitespace.
static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"<([a-zA-Z][a-zA-Z0-9-]*"#,
        r#"(?:[\s/]+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)"#,
        r#"(\s*/?)>"#,
    ))
    .expect("Invalid start tag regex")
});

/// One attribute inside a start tag.
///
/// Captures: 1 = name, 2 = raw value including quotes.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s/]+([^\s"'>/=]+)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+))?"#)
        .expect("Invalid attribute regex")
});

/// Attributes whose value is loaded or navigated to
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

fn is_unsafe_attribute(name: &str, value: Option<&str>) -> bool {
    let name = name.to_ascii_lowercase();
    if name.starts_with("on") {
        return true;
    }
    if !URL_ATTRIBUTES.contains(&name.as_str()) {
        return false;
    }
    value.is_some_and(|value| {
        value
            .trim_matches(|c| c == '"' || c == '\'')
            .trim_start()
            .to_ascii_lowercase()
            .starts_with("javascript:")
    })
}

/// Drop event handler and `javascript:` URL attributes from one start tag.
fn strip_unsafe_attributes(caps: &regex::Captures<'_>) -> String {
    let whole = &caps[0];
    let head = &caps[1];
    let Some(first_attr) = head.find(|c: char| c.is_whitespace() || c == '/') else {
        return whole.to_string();
    };

    let mut rebuilt = head[..first_attr].to_string();
    let mut removed = false;
    for attr in ATTRIBUTE.captures_iter(&head[first_attr..]) {
        let value = attr.get(2).map(|m| m.as_str());
        if is_unsafe_attribute(&attr[1], value) {
            removed = true;
        } else {
            rebuilt.push_str(&attr[0]);
        }
    }

    if removed {
        format!("<{rebuilt}{}>", &caps[2])
    } else {
        whole.to_string()
    }
}

/// Normalize HTML read from a clipboard.
///
/// Removes Windows fragment markers, charset meta tags, the document head,
/// and `<html>`/`<body>` wrappers so only the pasted fragment remains.
pub fn clean_clipboard_html(html: &str) -> String {
    let html = FRAGMENT_MARKER.replace_all(html, "");
    let html = CHARSET_META.replace_all(&html, "");
    let html = HEAD_ELEMENT.replace_all(&html, "");
    let html = match BODY_CONTENT.captures(&html) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
        None => html.to_string(),
    };
    DOCUMENT_WRAPPER.replace_all(&html, "").into_owned()
}

/// Remove executable content from HTML.
///
/// Strips script-capable elements, inline event handlers, and
/// `javascript:` URLs. Used when the user may not paste unfiltered markup.
/// Passes repeat until nothing changes, so removing one tag cannot leave
/// a new one assembled from the text around it.
pub fn sanitize_html(html: &str) -> String {
    let mut cleaned = html.to_string();
    loop {
        let next = sanitize_pass(&cleaned);
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    if cleaned.len() != html.len() {
        tracing::debug!(removed = html.len() - cleaned.len(), "Filtered pasted HTML");
    }
    cleaned
}

fn sanitize_pass(html: &str) -> String {
    let mut cleaned = html.to_string();
    for pattern in UNSAFE_ELEMENT_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = UNSAFE_TAG.replace_all(&cleaned, "");
    START_TAG
        .replace_all(&cleaned, strip_unsafe_attributes)
        .into_owned()
}
