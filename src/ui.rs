//! UI requests and reload wiring
//!
//! The play-again / replay buttons reach the simulation through a
//! `ReloadHandle` handed to the UI once, when the simulation is built.

use std::cell::Cell;
use std::rc::Rc;

/// End-of-game panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Win,
    Lose,
}

/// Shared "reload requested" flag
///
/// Clicks may arrive at any point between frames; the simulation services the
/// request at the start of its next frame.
#[derive(Debug, Clone, Default)]
pub struct ReloadHandle(Rc<Cell<bool>>);

impl ReloadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a reload (button callback)
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.0.get()
    }

    /// Consume a pending request
    pub(crate) fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Fire-and-forget UI output
pub trait UiSink {
    fn show(&mut self, panel: Panel);
    fn hide(&mut self, panel: Panel);
    /// Toggle the life icon at `index` (0-based)
    fn set_life_indicator(&mut self, index: usize, visible: bool);
    /// Wire play-again / replay controls to `handle`; called once
    fn subscribe_reload(&mut self, handle: ReloadHandle);
}
