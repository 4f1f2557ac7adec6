use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};

// @module: Markdown document parsing and article splitting

/// Token that identifies an already-inserted image reference line
pub const IMAGE_REFERENCE_TOKEN: &str = "![";

/// Token that begins a new article section
pub const ARTICLE_MARKER: &str = "## 記事Vol";

/// Token that carries the article title inside a section
pub const TITLE_MARKER: &str = "### タイトル：";

// @const: Entry marker grammar
// Anchored at line start, tolerant of leading whitespace. Captures the
// native-script name and the parenthesized search-key name, terminated by a
// fullwidth ｜ or ASCII | separator.
static ENTRY_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\*\*■\s+(?P<native>.+?)\s*\((?P<search>.+?)\s*\)\s*[｜|]").unwrap()
});

// @const: Title marker grammar, searched anywhere in a section
static TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}(.+)", regex::escape(TITLE_MARKER))).unwrap()
});

// @struct: Parsed entry marker line
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMarker {
    // @field: Native-script name, shown in the image caption
    pub native_name: String,

    // @field: Search-key name, used verbatim as the external query
    pub search_name: String,
}

impl EntryMarker {
    /// Parse an entry marker line.
    ///
    /// Grammar: `**■ <native> (<search>) ｜ ...` — the match is anchored to
    /// the start of the line (leading whitespace allowed) and both the
    /// fullwidth `｜` and the ASCII `|` separator are accepted. Returns
    /// `None` for any line that does not match.
    pub fn parse(line: &str) -> Option<Self> {
        ENTRY_MARKER_REGEX.captures(line).map(|caps| EntryMarker {
            native_name: caps["native"].to_string(),
            search_name: caps["search"].to_string(),
        })
    }

    /// Build the image reference line inserted beneath the marker,
    /// including the trailing blank line.
    pub fn image_reference_line(&self, url: &str) -> String {
        format!("![{} ({})]({})\n\n", self.native_name, self.search_name, url)
    }
}

impl fmt::Display for EntryMarker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.native_name, self.search_name)
    }
}

/// Whether a line is an existing image reference.
///
/// Only the leading token is checked; the rest of the line is not parsed.
/// Its presence directly beneath an entry marker suppresses re-fetching.
pub fn is_image_reference(line: &str) -> bool {
    line.trim_start().starts_with(IMAGE_REFERENCE_TOKEN)
}

/// One article extracted from the document, ready for submission
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Post title
    pub title: String,

    /// Post body, rendered to HTML
    pub content: String,
}

/// Split a document into raw sections at every line that begins with the
/// article marker. The marker line stays attached to the section it opens.
/// Anything before the first marker (preamble) is returned as its own span
/// and filtered out by the caller.
fn split_sections(content: &str) -> Vec<&str> {
    let mut boundaries = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with(ARTICLE_MARKER) {
            boundaries.push(offset);
        }
        offset += line.len();
    }

    let mut sections = Vec::new();
    let mut start = 0;
    for boundary in boundaries {
        if boundary > start {
            sections.push(&content[start..boundary]);
        }
        start = boundary;
    }
    sections.push(&content[start..]);
    sections
}

/// Extract the title from a section and remove the title line from the body.
///
/// The title is the remainder of the `### タイトル：` line, trimmed. When no
/// title marker is present, falls back to the section's first non-empty line
/// with leading header hashes and whitespace stripped. The fallback is a
/// best-effort heuristic: the first line of a section is normally its
/// article marker, so the derived title degrades gracefully rather than
/// failing the section.
fn extract_title(section: &str) -> (String, String) {
    if let Some(caps) = TITLE_REGEX.captures(section) {
        let title = caps[1].trim().to_string();
        let full = caps.get(0).unwrap();

        // Drop the whole title line, including its terminator
        let mut line_start = full.start();
        while line_start > 0 && section.as_bytes()[line_start - 1] != b'\n' {
            line_start -= 1;
        }
        let mut line_end = full.end();
        if section[line_end..].starts_with('\n') {
            line_end += 1;
        }

        let mut body = String::with_capacity(section.len());
        body.push_str(&section[..line_start]);
        body.push_str(&section[line_end..]);
        return (title, body);
    }

    let fallback = fallback_title(section);
    (fallback, section.to_string())
}

/// First non-empty line of the section, with leading `#` markup stripped
fn fallback_title(section: &str) -> String {
    section
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .unwrap_or_default()
}

/// Split a document blob into publishable articles.
///
/// Sections are cut at every line beginning with [`ARTICLE_MARKER`]; blank
/// spans and spans that do not contain the marker (leading preamble) are
/// discarded. Each retained section gets its title extracted and its
/// remaining body rendered to HTML, in document order.
pub fn split_articles(content: &str) -> Vec<Article> {
    split_sections(content)
        .into_iter()
        .filter(|section| !section.trim().is_empty() && section.contains(ARTICLE_MARKER))
        .map(|section| {
            let (title, body) = extract_title(section);
            Article {
                title,
                content: render_html(&body),
            }
        })
        .collect()
}

/// Render a markdown body to HTML (CommonMark, no extensions)
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
