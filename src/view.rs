//! DOM access by element id.
//!
//! The controller only ever touches the page through this trait, which keeps
//! every handler testable off-browser.

use crate::render::Node;

/// Element ids the page must provide.
pub mod ids {
    pub const ARTICLE_INPUT: &str = "article-input";
    pub const PROCESS_ARTICLE_BTN: &str = "process-article-btn";
    pub const ARTICLE_OUTPUT: &str = "article-output";
    pub const COPY_ARTICLE_BTN: &str = "copy-article-btn";
    pub const GPT_INPUT: &str = "gpt-input";
    pub const PARSE_TABLES_BTN: &str = "parse-tables-btn";
    pub const TABLES_OUTPUT: &str = "tables-output";

    // Optional; wired only when present.
    pub const CLEAR_ARTICLE_BTN: &str = "clear-article-btn";
    pub const CLEAR_TABLES_BTN: &str = "clear-tables-btn";

    /// Ids without which the page cannot work.
    pub const REQUIRED: [&str; 7] = [
        ARTICLE_INPUT,
        PROCESS_ARTICLE_BTN,
        ARTICLE_OUTPUT,
        COPY_ARTICLE_BTN,
        GPT_INPUT,
        PARSE_TABLES_BTN,
        TABLES_OUTPUT,
    ];
}

/// Operations on page elements addressed by id. Missing elements are a
/// no-op on write and read as empty.
pub trait View {
    /// Current value of an input or textarea.
    fn value(&self, id: &str) -> String;
    fn set_value(&self, id: &str, value: &str);

    /// Text content, e.g. a button label.
    fn text(&self, id: &str) -> String;
    fn set_text(&self, id: &str, text: &str);

    fn set_disabled(&self, id: &str, disabled: bool);

    /// Replace every child of `id` with the given nodes.
    fn replace_children(&self, id: &str, nodes: &[Node]);
}
