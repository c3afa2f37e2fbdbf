use std::fs;
use std::path::Path;

use log::info;
use regex::Regex;
use scraper::Html;
use url::Url;

use crate::cli::Mode;
use crate::constants::{
    ALL_VERSIONS_MARKER, DOWNLOADS_DIR, MAIN_DOC_URL, PDF_A4_PATTERN, VERSION_STATUS_PATTERN,
};
use crate::dom;
use crate::error::{Result, ScrapeError};
use crate::session::Session;

/// One line of a result table. The header row comes first, data rows
/// follow in document order.
pub type Row = (String, String, String);

const WHATS_NEW_HEADER: (&str, &str, &str) = ("Article link", "Title", "Editor, author");
const LATEST_VERSIONS_HEADER: (&str, &str, &str) = ("Documentation link", "Version", "Status");

/// Runs the routine for a validated mode. Returns `None` for download,
/// which writes its artifact to disk instead of producing a table.
pub fn run_mode(mode: Mode, session: &Session) -> Result<Option<Vec<Row>>> {
    match mode {
        Mode::WhatsNew => whats_new(session).map(Some),
        Mode::LatestVersions => latest_versions(session).map(Some),
        Mode::Download => download(session).map(|_| None),
    }
}

/// One row per "What's New in Python X.Y" article listed in the
/// release-notes table of contents. Fetches every linked article page.
pub fn whats_new(session: &Session) -> Result<Vec<Row>> {
    let whats_new_url = Url::parse(MAIN_DOC_URL)?.join("whatsnew/")?;
    let index_html = session.get_text(whats_new_url.as_str())?;
    let hrefs = parse_whats_new_index(&index_html)?;
    info!("Found {} release note entries", hrefs.len());

    let mut rows = Vec::new();
    for href in hrefs {
        let article_url = whats_new_url.join(&href)?;
        let article_html = session.get_text(article_url.as_str())?;
        let (title, editors) = parse_article(&article_html)?;
        rows.push((article_url.to_string(), title, editors));
    }
    Ok(with_header(WHATS_NEW_HEADER, rows))
}

/// One row per version anchor in the sidebar "All versions" list.
pub fn latest_versions(session: &Session) -> Result<Vec<Row>> {
    let html = session.get_text(MAIN_DOC_URL)?;
    Ok(with_header(LATEST_VERSIONS_HEADER, parse_latest_versions(&html)?))
}

/// Downloads the "PDF, A4" zip archive linked from download.html into the
/// downloads directory, overwriting any previous copy.
pub fn download(session: &Session) -> Result<()> {
    let downloads_url = Url::parse(MAIN_DOC_URL)?.join("download.html")?;
    let html = session.get_text(downloads_url.as_str())?;
    let href = find_archive_href(&html)?;
    let archive_url = downloads_url.join(&href)?;
    let filename = archive_filename(&archive_url);

    let downloads_dir = Path::new(DOWNLOADS_DIR);
    fs::create_dir_all(downloads_dir)?;
    let archive_path = downloads_dir.join(filename);

    let body = session.get_bytes(archive_url.as_str())?;
    fs::write(&archive_path, body)?;

    println!("{}", filename);
    info!("Archive downloaded and saved: {}", archive_path.display());
    Ok(())
}

/// Hrefs of the first anchor in every second-level toctree entry of the
/// what's-new index page.
pub fn parse_whats_new_index(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let section = dom::select_one(&doc, "section#what-s-new-in-python")?;
    let wrapper = dom::select_one_within(section, "div.toctree-wrapper.compound")?;

    let mut hrefs = Vec::new();
    for entry in wrapper.select(&dom::selector("li.toctree-l2")) {
        if let Some(anchor) = entry.select(&dom::selector("a")).next() {
            if let Some(href) = anchor.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }
    Ok(hrefs)
}

/// Heading and first definition-list text of one release-notes article.
/// Line breaks inside the `<dl>` become single spaces.
pub fn parse_article(html: &str) -> Result<(String, String)> {
    let doc = Html::parse_document(html);
    let h1 = dom::select_one(&doc, "h1")?;
    let dl = dom::select_one(&doc, "dl")?;
    Ok((dom::text_of(h1), dom::collapse_newlines(&dom::text_of(dl))))
}

/// Data rows for latest-versions: (href verbatim, version, status) per
/// anchor of the sidebar list marked "All versions".
pub fn parse_latest_versions(html: &str) -> Result<Vec<Row>> {
    let doc = Html::parse_document(html);
    let sidebar = dom::select_one(&doc, "div.sphinxsidebarwrapper")?;

    let mut anchors = None;
    for list in sidebar.select(&dom::selector("ul")) {
        if dom::text_of(list).contains(ALL_VERSIONS_MARKER) {
            anchors = Some(list.select(&dom::selector("a")).collect::<Vec<_>>());
            break;
        }
    }
    let anchors = anchors.ok_or(ScrapeError::VersionListNotFound)?;

    let pattern = Regex::new(VERSION_STATUS_PATTERN).unwrap();
    let mut rows = Vec::new();
    for anchor in anchors {
        let link = anchor.value().attr("href").unwrap_or("").to_string();
        let text = dom::text_of(anchor);
        let (version, status) = match pattern.captures(&text) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (text.clone(), String::new()),
        };
        rows.push((link, version, status));
    }
    Ok(rows)
}

/// Href of the "PDF, A4" zip archive anchor inside the docutils table on
/// download.html.
pub fn find_archive_href(html: &str) -> Result<String> {
    let doc = Html::parse_document(html);
    let table = dom::select_one(&doc, "table.docutils")?;

    let pattern = Regex::new(PDF_A4_PATTERN).unwrap();
    for anchor in table.select(&dom::selector("a")) {
        if let Some(href) = anchor.value().attr("href") {
            if pattern.is_match(href) {
                return Ok(href.to_string());
            }
        }
    }
    Err(ScrapeError::MissingElement("a[href$='pdf-a4.zip'] in table.docutils"))
}

fn archive_filename(url: &Url) -> &str {
    url.path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default()
}

/// Prepends the fixed header tuple for a mode. Pure; running it over the
/// same raw rows always yields identical output.
fn with_header(header: (&str, &str, &str), rows: Vec<Row>) -> Vec<Row> {
    let mut result = Vec::with_capacity(rows.len() + 1);
    result.push((
        header.0.to_string(),
        header.1.to_string(),
        header.2.to_string(),
    ));
    result.extend(rows);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDEBAR_HTML: &str = r#"
        <html><body>
          <div class="sphinxsidebarwrapper">
            <ul><li><a href="/about/">About</a></li></ul>
            <ul>
              <li><a href="/3.12/">Python 3.12 (in development)</a></li>
              <li><a href="/3.11/">Python 3.11 (stable)</a></li>
              <li><a href="/2.6/">Python 2.6 (EOL)</a></li>
              <li><a href="/versions/">All versions</a></li>
            </ul>
          </div>
        </body></html>"#;

    #[test]
    fn test_latest_versions_pattern_match_branch() {
        let rows = parse_latest_versions(SIDEBAR_HTML).unwrap();
        assert_eq!(
            rows[1],
            ("/3.11/".to_string(), "3.11".to_string(), "stable".to_string())
        );
        assert_eq!(
            rows[0],
            ("/3.12/".to_string(), "3.12".to_string(), "in development".to_string())
        );
    }

    #[test]
    fn test_latest_versions_fallback_branch() {
        // "All versions" itself doesn't match the pattern: raw text, empty status.
        let rows = parse_latest_versions(SIDEBAR_HTML).unwrap();
        let last = rows.last().unwrap();
        assert_eq!(
            last,
            &("/versions/".to_string(), "All versions".to_string(), String::new())
        );
    }

    #[test]
    fn test_latest_versions_preserves_document_order_and_duplicates() {
        let html = r#"
            <div class="sphinxsidebarwrapper"><ul>
              All versions
              <li><a href="/3.9/">Python 3.9 (security-fixes)</a></li>
              <li><a href="/3.9/">Python 3.9 (security-fixes)</a></li>
            </ul></div>"#;
        let rows = parse_latest_versions(html).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn test_latest_versions_marker_missing_raises() {
        let html = r#"<div class="sphinxsidebarwrapper"><ul><li><a href="/x/">x</a></li></ul></div>"#;
        assert!(matches!(
            parse_latest_versions(html),
            Err(ScrapeError::VersionListNotFound)
        ));
    }

    #[test]
    fn test_latest_versions_sidebar_missing_raises() {
        assert!(matches!(
            parse_latest_versions("<html><body></body></html>"),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn test_whats_new_index_collects_all_entries() {
        let html = r#"
            <section id="what-s-new-in-python">
              <div class="toctree-wrapper compound">
                <ul>
                  <li class="toctree-l1"><a href="ignored.html">top level</a>
                    <ul>
                      <li class="toctree-l2"><a href="3.12.html">What's New In Python 3.12</a></li>
                      <li class="toctree-l2"><a href="3.11.html">What's New In Python 3.11</a></li>
                      <li class="toctree-l2"><a href="3.10.html">What's New In Python 3.10</a></li>
                    </ul>
                  </li>
                </ul>
              </div>
            </section>"#;
        let hrefs = parse_whats_new_index(html).unwrap();
        assert_eq!(hrefs, vec!["3.12.html", "3.11.html", "3.10.html"]);
    }

    #[test]
    fn test_whats_new_index_section_missing_raises() {
        assert!(matches!(
            parse_whats_new_index("<section id='other'></section>"),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn test_whats_new_index_wrapper_missing_raises() {
        let html = r#"<section id="what-s-new-in-python"><p>no toctree</p></section>"#;
        assert!(matches!(
            parse_whats_new_index(html),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn test_article_collapses_line_breaks() {
        let html = "<html><body><h1>What's New</h1><dl><dt>a</dt>\n<dd>b</dd></dl></body></html>";
        let (title, editors) = parse_article(html).unwrap();
        assert_eq!(title, "What's New");
        assert_eq!(editors, "a b");
    }

    #[test]
    fn test_article_heading_missing_raises() {
        assert!(matches!(
            parse_article("<html><body><dl><dt>a</dt></dl></body></html>"),
            Err(ScrapeError::MissingElement("h1"))
        ));
    }

    #[test]
    fn test_archive_href_match() {
        let html = r#"
            <table class="docutils">
              <tr><td><a href="archives/python-3.11-docs-pdf-letter.zip">PDF, Letter</a></td></tr>
              <tr><td><a href="archives/python-3.11-docs-pdf-a4.zip">PDF, A4</a></td></tr>
            </table>"#;
        assert_eq!(
            find_archive_href(html).unwrap(),
            "archives/python-3.11-docs-pdf-a4.zip"
        );
    }

    #[test]
    fn test_archive_href_absent_raises() {
        let html = r#"<table class="docutils"><tr><td><a href="a.tar.bz2">HTML</a></td></tr></table>"#;
        assert!(matches!(
            find_archive_href(html),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn test_archive_table_absent_raises() {
        assert!(matches!(
            find_archive_href("<table class='plain'></table>"),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn test_archive_filename_is_last_path_segment() {
        let url = Url::parse("https://docs.python.org/3/archives/python-3.11-docs-pdf-a4.zip")
            .unwrap();
        assert_eq!(archive_filename(&url), "python-3.11-docs-pdf-a4.zip");
    }

    #[test]
    fn test_with_header_prepends_and_is_idempotent() {
        let rows = vec![("a".to_string(), "b".to_string(), "c".to_string())];
        let first = with_header(LATEST_VERSIONS_HEADER, rows.clone());
        let second = with_header(LATEST_VERSIONS_HEADER, rows);
        assert_eq!(first, second);
        assert_eq!(first[0].1, "Version");
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_header_present_even_with_no_data_rows() {
        let result = with_header(WHATS_NEW_HEADER, Vec::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0, "Article link");
    }
}
