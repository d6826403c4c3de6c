use std::sync::Mutex;
use log::{debug, info};

pub const BOOKMARK_SAVED_NOTICE: &str = "Bookmark saved!";

/// The page window as seen by the resident agent.
#[cfg_attr(test, mockall::automock)]
pub trait Viewport: Send + Sync {
    fn scroll_y(&self) -> f64;

    fn smooth_scroll_to(&self, top: f64);

    fn show_notice(&self, message: &str);
}

/// Script resident in a page. Keeps the last observed offset in memory so position queries
/// are answered without touching the page.
pub struct PageAgent {
    viewport: Box<dyn Viewport>,
    current_position: Mutex<f64>,
}

impl PageAgent {
    pub fn attach(viewport: Box<dyn Viewport>) -> Self {
        let initial_position = sanitize(viewport.scroll_y());
        debug!("page agent attached at scroll position [{}]", initial_position);
        PageAgent { viewport, current_position: Mutex::new(initial_position) }
    }

    /// Called from the page's scroll listener.
    pub fn on_scroll(&self, scroll_y: f64) {
        *self.lock_position() = sanitize(scroll_y);
    }

    pub fn current_position(&self) -> f64 {
        *self.lock_position()
    }

    pub fn scroll_to_position(&self, position: f64) {
        info!("page agent scrolling to [{}]", position);
        self.viewport.smooth_scroll_to(position);
    }

    pub fn bookmark_saved(&self) {
        self.viewport.show_notice(BOOKMARK_SAVED_NOTICE);
    }

    fn lock_position(&self) -> std::sync::MutexGuard<'_, f64> {
        // a poisoned lock still holds a valid f64
        self.current_position.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn sanitize(scroll_y: f64) -> f64 {
    if scroll_y.is_finite() { scroll_y.max(0.0) } else { 0.0 }
}
