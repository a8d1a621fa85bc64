//! Markdown rendering for previews and exports.

use folio_core::{Document, FieldName};
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Output format for [`export`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Markdown source
    #[strum(to_string = "markdown", serialize = "md")]
    Markdown,
    /// Standalone HTML page
    Html,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Render markdown to an HTML fragment.
///
/// # Examples
///
/// ```
/// use folio_editor::render_html;
///
/// assert_eq!(render_html("# Title"), "<h1>Title</h1>\n");
/// ```
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Escape plain text for HTML by pushing it through the renderer as a text
/// event.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    html::push_html(&mut out, std::iter::once(Event::Text(CowStr::from(text))));
    out
}

/// Markdown source of a document: title heading, table of contents, body.
///
/// Unloaded and empty fields are skipped.
pub fn to_markdown(document: &Document) -> String {
    let mut out = format!("# {}\n", document.title());

    let sections = [
        (FieldName::Summary, None),
        (FieldName::Toc, Some("Contents")),
        (FieldName::MdBody, None),
    ];
    for (name, heading) in sections {
        let Some(text) = document.text(name).map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        out.push('\n');
        if let Some(heading) = heading {
            out.push_str("## ");
            out.push_str(heading);
            out.push_str("\n\n");
        }
        out.push_str(text);
        out.push('\n');
    }
    out
}

/// Export a document in the given format.
///
/// # Examples
///
/// ```
/// use folio_core::{Document, Record};
/// use folio_editor::{ExportFormat, export};
///
/// let record = Record {
///     id: "b1".into(),
///     title: "Rust Field Notes".into(),
///     toc: Some("1. Intro".into()),
///     ..Default::default()
/// };
/// let doc = Document::from_record(&record);
///
/// let md = export(&doc, ExportFormat::Markdown);
/// assert!(md.starts_with("# Rust Field Notes\n"));
///
/// let page = export(&doc, ExportFormat::Html);
/// assert!(page.contains("<title>Rust Field Notes</title>"));
/// ```
pub fn export(document: &Document, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => to_markdown(document),
        ExportFormat::Html => to_html_page(document),
    }
}

fn to_html_page(document: &Document) -> String {
    let title = escape_text(document.title());
    let markdown = to_markdown(document);

    // The title heading is rendered from events so markdown syntax in the
    // title stays literal.
    let body_source = markdown
        .split_once('\n')
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let heading = [
        Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        }),
        Event::Text(CowStr::from(document.title())),
        Event::End(TagEnd::Heading(HeadingLevel::H1)),
    ];
    let mut body = String::new();
    html::push_html(
        &mut body,
        heading
            .into_iter()
            .chain(Parser::new_ext(body_source, options())),
    );

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        title, body
    )
}
