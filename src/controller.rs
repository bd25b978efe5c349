//! UI controller: the click handlers behind every button on the page.
//!
//! Handlers never return errors. Request failures end up as text in the
//! relevant output element and clipboard failures as "Copy failed" feedback
//! on the button that was clicked.
//!
//! Each request disables only its own button. Nothing is queued or
//! cancelled, so a condense and a parse may be in flight together.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use crate::api::Backend;
use crate::debug::{self, cat};
use crate::platform::{Clipboard, Timer};
use crate::render;
use crate::view::{ids, View};

pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FAILED_LABEL: &str = "Copy failed";
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(1200);

/// Label a button had before feedback replaced it. `generation` lets a
/// stale timer notice a newer click took over.
#[derive(Debug, Clone)]
struct Feedback {
    original: String,
    generation: u64,
}

pub struct Controller {
    backend: Box<dyn Backend>,
    view: Box<dyn View>,
    clipboard: Box<dyn Clipboard>,
    timer: Box<dyn Timer>,
    copy_feedback: Duration,
    feedback: RefCell<HashMap<String, Feedback>>,
    next_generation: Cell<u64>,
}

impl Controller {
    pub fn new(
        backend: Box<dyn Backend>,
        view: Box<dyn View>,
        clipboard: Box<dyn Clipboard>,
        timer: Box<dyn Timer>,
    ) -> Self {
        Self {
            backend,
            view,
            clipboard,
            timer,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            feedback: RefCell::new(HashMap::new()),
            next_generation: Cell::new(0),
        }
    }

    pub fn with_copy_feedback(mut self, duration: Duration) -> Self {
        self.copy_feedback = duration;
        self
    }

    pub fn copy_feedback(&self) -> Duration {
        self.copy_feedback
    }

    /// Send the article text to the condense endpoint and show the result.
    pub async fn condense(&self) {
        let text = self.view.value(ids::ARTICLE_INPUT);
        self.view.set_disabled(ids::PROCESS_ARTICLE_BTN, true);
        debug::log(cat::UI, format!("condense: {} chars", text.len()));

        match self.backend.condense(&text).await {
            Ok(result) => {
                self.view.set_value(ids::ARTICLE_OUTPUT, &result.condensed);
            }
            Err(e) => {
                log::warn!("[controller] condense failed: {e}");
                self.view
                    .set_value(ids::ARTICLE_OUTPUT, &render::error_text(&e));
            }
        }

        self.view.set_disabled(ids::PROCESS_ARTICLE_BTN, false);
    }

    /// Copy whatever the condensed output currently holds.
    pub async fn copy_condensed(&self) {
        let text = self.view.value(ids::ARTICLE_OUTPUT);
        self.copy_with_feedback(ids::COPY_ARTICLE_BTN, &text).await;
    }

    /// Send the markdown to the parse endpoint and rebuild the tables area.
    pub async fn parse_tables(&self) {
        let markdown = self.view.value(ids::GPT_INPUT);
        self.view.set_disabled(ids::PARSE_TABLES_BTN, true);
        debug::log(cat::UI, format!("parse tables: {} chars", markdown.len()));

        let nodes = match self.backend.parse_tables(&markdown).await {
            Ok(result) => {
                debug::log(cat::RENDER, format!("{} table(s)", result.tables.len()));
                render::tables_output(&result.tables)
            }
            Err(e) => {
                log::warn!("[controller] parse tables failed: {e}");
                vec![render::error_message(&e)]
            }
        };
        self.view.replace_children(ids::TABLES_OUTPUT, &nodes);

        self.view.set_disabled(ids::PARSE_TABLES_BTN, false);
    }

    /// Copy the JSON textarea of block `index` (1-based).
    pub async fn copy_table_json(&self, index: usize) {
        let text = self.view.value(&render::json_textarea_id(index));
        self.copy_with_feedback(&render::copy_button_id(index), &text)
            .await;
    }

    pub fn clear_article(&self) {
        self.view.set_value(ids::ARTICLE_INPUT, "");
        self.view.set_value(ids::ARTICLE_OUTPUT, "");
    }

    pub fn clear_tables(&self) {
        self.view.set_value(ids::GPT_INPUT, "");
        self.view.replace_children(ids::TABLES_OUTPUT, &[]);
    }

    async fn copy_with_feedback(&self, button_id: &str, text: &str) {
        let label = match self.clipboard.write_text(text).await {
            Ok(()) => {
                debug::log(cat::COPY, format!("{} chars from #{button_id}", text.len()));
                COPIED_LABEL
            }
            Err(e) => {
                log::warn!("[controller] copy from #{button_id} failed: {e}");
                COPY_FAILED_LABEL
            }
        };

        let generation = self.begin_feedback(button_id);
        self.view.set_text(button_id, label);

        self.timer.sleep(self.copy_feedback).await;

        self.end_feedback(button_id, generation);
    }

    /// Record the button's resting label (unless feedback is already
    /// showing) and claim a new generation.
    fn begin_feedback(&self, button_id: &str) -> u64 {
        let generation = self.next_generation.get() + 1;
        self.next_generation.set(generation);

        let mut feedback = self.feedback.borrow_mut();
        match feedback.get_mut(button_id) {
            Some(entry) => entry.generation = generation,
            None => {
                feedback.insert(
                    button_id.to_string(),
                    Feedback {
                        original: self.view.text(button_id),
                        generation,
                    },
                );
            }
        }
        generation
    }

    /// Restore the resting label if no newer click took over.
    fn end_feedback(&self, button_id: &str, generation: u64) {
        let mut feedback = self.feedback.borrow_mut();
        let current = feedback
            .get(button_id)
            .is_some_and(|entry| entry.generation == generation);
        if current {
            if let Some(entry) = feedback.remove(button_id) {
                self.view.set_text(button_id, &entry.original);
            }
        }
    }
}
