//! Table and block rendering into a small virtual node tree.
//!
//! Rendering is pure: the browser layer turns a [`Node`] into real DOM
//! elements, and tests inspect the tree directly.
//!
//! Block layout for table `n` (1-based):
//!
//! ```text
//! div.table-block[data-index=n]
//!   h3                "Table n: <title>"
//!   table.readonly-table
//!     thead > tr > th*
//!     tbody > tr* > td*
//!   textarea#table-json-n[readonly]   pretty JSON (2-space indent)
//!   button#table-copy-n.copy-json-btn[data-index=n]
//! ```

use serde_json::Value;

use crate::error::ApiError;
use crate::types::Table;

pub const NO_TABLES_MESSAGE: &str = "No tables found";
pub const UNTITLED: &str = "(untitled)";
pub const COPY_JSON_LABEL: &str = "Copy JSON";

/// Element id of the JSON textarea in block `index`.
pub fn json_textarea_id(index: usize) -> String {
    format!("table-json-{index}")
}

/// Element id of the copy button in block `index`.
pub fn copy_button_id(index: usize) -> String {
    format!("table-copy-{index}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) => s.clone(),
            Node::Element(el) => el.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An HTML element with attributes in insertion order.
///
/// `value` is the live value of form controls (textarea), which is not the
/// same thing as a child text node once the user edits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(Node::Text(s.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Depth-first search for a descendant (or self) with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| child.find_by_id(id))
    }

    /// All descendants (and self) with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_tag(tag, &mut out);
        out
    }

    fn collect_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        if self.tag == tag {
            out.push(self);
        }
        for child in self.children.iter().filter_map(Node::as_element) {
            child.collect_tag(tag, out);
        }
    }
}

/// Contents of the tables output area for a parse response.
pub fn tables_output(tables: &[Value]) -> Vec<Node> {
    if tables.is_empty() {
        return vec![empty_message()];
    }
    tables
        .iter()
        .enumerate()
        .map(|(i, raw)| table_block(i + 1, raw))
        .collect()
}

/// Pretty JSON with 2-space indentation, key order as received.
pub fn table_json(raw: &Value) -> String {
    serde_json::to_string_pretty(&integral_floats_as_ints(raw)).unwrap_or_else(|e| {
        log::error!("[render] failed to serialize table JSON: {e}");
        "{}".to_string()
    })
}

/// Whole floats print without a fractional part (`1.0` as `1`), the way
/// browsers stringify numbers. Only values exactly representable as
/// integers are touched.
fn integral_floats_as_ints(value: &Value) -> Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(integral_floats_as_ints).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), integral_floats_as_ints(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// One block: heading, read-only table, JSON textarea and copy button.
pub fn table_block(index: usize, raw: &Value) -> Node {
    let table = Table::from_value(raw);
    let title = if table.title.is_empty() {
        UNTITLED
    } else {
        table.title.as_str()
    };

    Element::new("div")
        .class("table-block")
        .attr("data-index", index.to_string())
        .child(Element::new("h3").text(format!("Table {index}: {title}")))
        .child(table_element(&table))
        .child(
            Element::new("textarea")
                .attr("id", json_textarea_id(index))
                .class("table-json")
                .attr("readonly", "")
                .attr("spellcheck", "false")
                .value(table_json(raw)),
        )
        .child(
            Element::new("button")
                .attr("id", copy_button_id(index))
                .class("copy-json-btn")
                .attr("type", "button")
                .attr("data-index", index.to_string())
                .text(COPY_JSON_LABEL),
        )
        .into()
}

/// Read-only HTML table. Short rows are padded to the header width; long
/// rows are kept whole.
pub fn table_element(table: &Table) -> Node {
    let mut el = Element::new("table").class("readonly-table");

    if !table.headers.is_empty() {
        let header_row = table
            .headers
            .iter()
            .fold(Element::new("tr"), |tr, h| tr.child(Element::new("th").text(h)));
        el = el.child(Element::new("thead").child(header_row));
    }

    let width = table.headers.len();
    let body = table.rows.iter().fold(Element::new("tbody"), |tbody, row| {
        let mut tr = row
            .iter()
            .fold(Element::new("tr"), |tr, cell| tr.child(Element::new("td").text(cell)));
        for _ in row.len()..width {
            tr = tr.child(Element::new("td"));
        }
        tbody.child(tr)
    });

    el.child(body).into()
}

pub fn empty_message() -> Node {
    Element::new("p")
        .class("empty-message")
        .text(NO_TABLES_MESSAGE)
        .into()
}

/// User-facing text for a failed request.
pub fn error_text(err: &ApiError) -> String {
    format!("Error: {err}")
}

pub fn error_message(err: &ApiError) -> Node {
    Element::new("p")
        .class("error-message")
        .text(error_text(err))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cells(row: &Element, tag: &str) -> Vec<String> {
        row.find_all(tag).iter().map(|c| c.text_content()).collect()
    }

    #[test]
    fn test_empty_response_renders_only_message() {
        let out = tables_output(&[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text_content(), NO_TABLES_MESSAGE);
    }

    #[test]
    fn test_single_table_block() {
        let raw = json!({"title": "T", "headers": ["a", "b"], "rows": [["1", "2"]]});
        let out = tables_output(std::slice::from_ref(&raw));
        assert_eq!(out.len(), 1);

        let block = out[0].as_element().unwrap();
        assert_eq!(block.find_all("h3")[0].text_content(), "Table 1: T");

        let textarea = block.find_by_id(&json_textarea_id(1)).unwrap();
        assert_eq!(
            textarea.value.as_deref(),
            Some("{\n  \"title\": \"T\",\n  \"headers\": [\n    \"a\",\n    \"b\"\n  ],\n  \"rows\": [\n    [\n      \"1\",\n      \"2\"\n    ]\n  ]\n}")
        );
        assert_eq!(textarea.get_attr("readonly"), Some(""));

        let table = block.find_all("table")[0];
        let thead_rows = table.find_all("thead")[0].find_all("tr");
        assert_eq!(thead_rows.len(), 1);
        assert_eq!(cells(thead_rows[0], "th"), vec!["a", "b"]);

        let body_rows = table.find_all("tbody")[0].find_all("tr");
        assert_eq!(body_rows.len(), 1);
        assert_eq!(cells(body_rows[0], "td"), vec!["1", "2"]);

        let button = block.find_by_id(&copy_button_id(1)).unwrap();
        assert_eq!(button.get_attr("data-index"), Some("1"));
        assert_eq!(button.text_content(), COPY_JSON_LABEL);
    }

    #[test]
    fn test_json_keeps_backend_key_order_and_extra_fields() {
        let raw = json!({"rows": [], "title": "X", "source": "gpt"});
        assert_eq!(
            table_json(&raw),
            "{\n  \"rows\": [],\n  \"title\": \"X\",\n  \"source\": \"gpt\"\n}"
        );
    }

    #[test]
    fn test_whole_float_fields_print_as_integers() {
        let raw: Value =
            serde_json::from_str(r#"{"title":"T","score":1.0,"ratio":0.5,"nested":[2.0,{"n":-3.0}]}"#)
                .unwrap();
        assert_eq!(
            table_json(&raw),
            "{\n  \"title\": \"T\",\n  \"score\": 1,\n  \"ratio\": 0.5,\n  \"nested\": [\n    2,\n    {\n      \"n\": -3\n    }\n  ]\n}"
        );
    }

    #[test]
    fn test_untitled_and_numbering() {
        let out = tables_output(&[json!({"title": "A"}), json!({})]);
        let headings: Vec<String> = out
            .iter()
            .map(|n| n.as_element().unwrap().find_all("h3")[0].text_content())
            .collect();
        assert_eq!(headings, vec!["Table 1: A", "Table 2: (untitled)"]);
    }

    #[test]
    fn test_short_rows_padded_long_rows_kept() {
        let table = Table {
            title: String::new(),
            headers: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into(), "4".into()]],
        };
        let node = table_element(&table);
        let rows = node.as_element().unwrap().find_all("tbody")[0].find_all("tr");
        assert_eq!(cells(rows[0], "td"), vec!["1", "", ""]);
        assert_eq!(cells(rows[1], "td").len(), 4);
    }

    #[test]
    fn test_headerless_table_has_no_thead() {
        let node = table_element(&Table {
            rows: vec![vec!["x".into()]],
            ..Table::default()
        });
        let el = node.as_element().unwrap();
        assert!(el.find_all("thead").is_empty());
        assert_eq!(el.find_all("td").len(), 1);
    }

    #[test]
    fn test_error_message_text() {
        let node = error_message(&ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_eq!(node.text_content(), "Error: HTTP 502: bad gateway");
    }
}
