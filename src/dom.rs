use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

/// Selectors here are compile-time literals; a parse failure is a typo,
/// not a runtime condition.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// First match in the document, or a typed not-found error naming the
/// selector that came up empty.
pub fn select_one<'a>(doc: &'a Html, css: &'static str) -> Result<ElementRef<'a>> {
    doc.select(&selector(css))
        .next()
        .ok_or(ScrapeError::MissingElement(css))
}

/// Same, scoped to the descendants of one element.
pub fn select_one_within<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<ElementRef<'a>> {
    scope
        .select(&selector(css))
        .next()
        .ok_or(ScrapeError::MissingElement(css))
}

/// Concatenated text of all text nodes under the element.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// Line breaks inside extracted text become single spaces.
pub fn collapse_newlines(text: &str) -> String {
    text.replace('\n', " ")
}
