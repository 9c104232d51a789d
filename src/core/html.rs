// src/core/html.rs
//
// Markup → flat token list. Parsing goes through `scraper` once; everything
// downstream walks `Token`s in document order and never touches the tree.

use scraper::{ElementRef, Html, Node, Selector};

use crate::core::sanitize::normalize_ws;
use crate::error::TableError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    attrs: Vec<(String, String)>,
}

impl Tag {
    pub fn new(name: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            name: s!(name),
            attrs: attrs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect(),
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Lazy-loaded images keep the real URL in `data-src`; `src` is a placeholder gif.
    pub fn image_source(&self) -> Option<&str> {
        self.attr("data-src")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.attr("src").filter(|v| !v.trim().is_empty()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Open(Tag),
    Close(String),
    Text(String),
}

impl Token {
    pub fn open_tag(&self) -> Option<&Tag> {
        match self { Token::Open(t) => Some(t), _ => None }
    }
    pub fn is_open(&self, name: &str) -> bool {
        self.open_tag().is_some_and(|t| t.is(name))
    }
    pub fn text(&self) -> Option<&str> {
        match self { Token::Text(t) => Some(t), _ => None }
    }
}

/// Tags that end a line of text. Everything else is inline.
const BREAK_TAGS: &[&str] = &["br", "hr", "div", "p", "li", "tr", "td", "table"];

pub fn is_break(tok: &Token) -> bool {
    let name = match tok {
        Token::Open(t) => t.name.as_str(),
        Token::Close(n) => n.as_str(),
        Token::Text(_) => return false,
    };
    BREAK_TAGS.iter().any(|b| b.eq_ignore_ascii_case(name))
}

/* ---------------- Tokenizing ---------------- */

fn push_tokens(el: ElementRef<'_>, out: &mut Vec<Token>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push(Token::Text((**t).to_string())),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    out.push(Token::Open(tag_of(child_el)));
                    push_tokens(child_el, out);
                    out.push(Token::Close(s!(child_el.value().name())));
                }
            }
            _ => {}
        }
    }
}

fn tag_of(el: ElementRef<'_>) -> Tag {
    let v = el.value();
    Tag {
        name: s!(v.name()),
        attrs: v.attrs().map(|(k, val)| (s!(k), s!(val))).collect(),
    }
}

/// Tokens of everything *inside* `el` (the element's own tags are not included).
pub fn tokenize_children(el: ElementRef<'_>) -> Vec<Token> {
    let mut out = Vec::new();
    push_tokens(el, &mut out);
    out
}

/// Tokenize a loose markup fragment, e.g. the inside of one `<td>`.
pub fn tokenize_fragment(html: &str) -> Vec<Token> {
    let doc = Html::parse_fragment(html);
    tokenize_children(doc.root_element())
}

/* ---------------- Rows & tables ---------------- */

/// A table row as owned per-cell token lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<Vec<Token>>,
}

impl RawRow {
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}

fn row_from(tr: ElementRef<'_>) -> RawRow {
    let cells = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name().eq_ignore_ascii_case("td"))
        .map(tokenize_children)
        .collect();
    RawRow { cells }
}

fn selector(s: &str) -> Result<Selector, TableError> {
    Selector::parse(s).map_err(|e| TableError::BadSelector {
        selector: s!(s),
        reason: e.to_string(),
    })
}

/// Parse a single `<tr>…</tr>`. The HTML5 tree builder drops table parts that
/// appear outside a table, so bare rows get wrapped first.
pub fn parse_row(html: &str) -> Option<RawRow> {
    let head = html.trim_start().get(..6).unwrap_or("");
    let wrapped = if head.eq_ignore_ascii_case("<table") {
        s!(html)
    } else {
        join!("<table><tbody>", html, "</tbody></table>")
    };
    let doc = Html::parse_fragment(&wrapped);
    let tr = Selector::parse("tr").ok()?;
    doc.select(&tr).next().map(row_from)
}

/// Every data row (rows with at least one `<td>`) of the first table matching `table_selector`.
pub fn parse_table(html: &str, table_selector: &str) -> Result<Vec<RawRow>, TableError> {
    let table_sel = selector(table_selector)?;
    let tr_sel = selector("tr")?;

    let doc = Html::parse_document(html);
    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| TableError::NotFound { selector: s!(table_selector) })?;

    let rows: Vec<RawRow> = table
        .select(&tr_sel)
        .map(row_from)
        .filter(|r| !r.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(TableError::NoRows { selector: s!(table_selector) });
    }
    Ok(rows)
}

/* ---------------- Token helpers ---------------- */

/// Index of the `Close` matching the `Open` at `open_ix`.
/// Token lists come from a tree, so opens and closes always pair up.
pub fn matching_close(tokens: &[Token], open_ix: usize) -> usize {
    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(open_ix) {
        match tok {
            Token::Open(_) => depth += 1,
            Token::Close(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 { return i; }
            }
            Token::Text(_) => {}
        }
    }
    tokens.len().saturating_sub(1)
}

/// Concatenated text, like the DOM's `textContent`.
pub fn inner_text(tokens: &[Token]) -> String {
    tokens.iter().filter_map(Token::text).collect()
}

/// Text inside the element opened at `open_ix`.
pub fn element_text(tokens: &[Token], open_ix: usize) -> String {
    let close = matching_close(tokens, open_ix);
    inner_text(&tokens[open_ix..=close])
}

/// First element with this tag name.
pub fn first_tag<'a>(tokens: &'a [Token], name: &str) -> Option<(usize, &'a Tag)> {
    tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| t.open_tag().filter(|tag| tag.is(name)).map(|tag| (i, tag)))
}

/// Lines of text: runs split at break tags, whitespace-normalized, empties dropped.
pub fn text_runs(tokens: &[Token]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut cur = s!();
    for tok in tokens {
        match tok {
            Token::Text(t) => cur.push_str(t),
            _ if is_break(tok) => {
                let run = normalize_ws(&cur);
                if !run.is_empty() { runs.push(run); }
                cur.clear();
            }
            _ => {}
        }
    }
    let run = normalize_ws(&cur);
    if !run.is_empty() { runs.push(run); }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_tokens_in_document_order() {
        let toks = tokenize_fragment(r#"<b class="a-bold">Stage</b>: Basic <br>"#);
        assert!(toks[0].is_open("b"));
        assert_eq!(toks[1], Token::Text(s!("Stage")));
        assert_eq!(toks[2], Token::Close(s!("b")));
        assert_eq!(toks[3], Token::Text(s!(": Basic ")));
        assert!(toks[4].is_open("br"));
    }

    #[test]
    fn img_prefers_data_src() {
        let toks = tokenize_fragment(r#"<img src="data:image/gif;base64,AAAA" data-src="https://img.game8.co/1/x.png/show" alt="Grass">"#);
        let (_, img) = first_tag(&toks, "img").unwrap();
        assert_eq!(img.image_source(), Some("https://img.game8.co/1/x.png/show"));
        assert_eq!(img.attr("alt"), Some("Grass"));
    }

    #[test]
    fn bare_row_keeps_its_cells() {
        let row = parse_row("<tr><td>a</td><td><b>b</b></td><td></td></tr>").unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(inner_text(&row.cells[1]), "b");
        assert!(row.cells[2].is_empty());
    }

    #[test]
    fn bare_row_with_nested_table() {
        let html = "<tr><td>A1 001</td><td><table><tr><td>inner</td></tr></table></td><td>c</td></tr>";
        let row = parse_row(html).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(inner_text(&row.cells[0]), "A1 001");
        assert_eq!(inner_text(&row.cells[1]), "inner");

        let row = parse_row("  <TABLE><tr><td>x</td><td>y</td></tr></TABLE>").unwrap();
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn table_not_found() {
        let err = parse_table("<p>nothing</p>", "table.cards").unwrap_err();
        assert_eq!(err, TableError::NotFound { selector: s!("table.cards") });
    }

    #[test]
    fn table_rows_skip_header() {
        let html = r#"<table class="cards"><tr><th>No.</th></tr><tr><td>1</td></tr><tr><td>2</td></tr></table>"#;
        let rows = parse_table(html, "table.cards").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn runs_split_on_breaks_only() {
        let toks = tokenize_fragment("Flip a coin. If <b>heads</b>, 30 more.<br> next line <hr>");
        assert_eq!(text_runs(&toks), vec!["Flip a coin. If heads, 30 more.", "next line"]);
    }

    #[test]
    fn matching_close_skips_nested() {
        let toks = tokenize_fragment("<div><b>x</b><a><img></a></div>tail");
        let close = matching_close(&toks, 0);
        assert_eq!(toks[close], Token::Close(s!("div")));
        assert_eq!(toks[close + 1], Token::Text(s!("tail")));
    }
}
