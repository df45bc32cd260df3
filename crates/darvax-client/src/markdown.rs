//! Minimal markdown-to-HTML transform for analysis reports
//!
//! Handles exactly the subset the chart analyzer emits: `##`/`###` headings,
//! `**strong**`, `*em*`, `---` rules and line breaks. Rules run once, in order,
//! over the whole text; output of one rule is visible to the next.

use regex::Regex;
use std::sync::LazyLock;

static H2: LazyLock<Regex> = LazyLock::new(|| compile(r"(?mR)^## (.*)$"));
static H3: LazyLock<Regex> = LazyLock::new(|| compile(r"(?mR)^### (.*)$"));
static STRONG: LazyLock<Regex> = LazyLock::new(|| compile(r"\*\*(.*?)\*\*"));
static EM: LazyLock<Regex> = LazyLock::new(|| compile(r"\*(.*?)\*"));
static RULE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?mR)^---$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static markdown pattern is valid")
}

/// Convert report text to HTML
///
/// No escaping is done here; see [`escape_html`].
pub fn markdown_to_html(text: &str) -> String {
    let html = H2.replace_all(text, "<h2>${1}</h2>");
    let html = H3.replace_all(&html, "<h3>${1}</h3>");
    let html = STRONG.replace_all(&html, "<strong>${1}</strong>");
    let html = EM.replace_all(&html, "<em>${1}</em>");
    let html = RULE.replace_all(&html, "<hr>");
    html.replace('\n', "<br>")
}

/// Escape characters that are significant in HTML text and attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render untrusted report text: escape first, then transform
pub fn render_report(text: &str) -> String {
    markdown_to_html(&escape_html(text))
}
