//! Multi-select list state for the script picker
//!
//! `ListState` tracks a cursor, a scrolling window and a set of selected
//! indices. Every change goes through `ListState::reduce`, a plain
//! `(state, event) -> state` function, so the whole interaction can be driven
//! and inspected without a terminal.
//!
//! Invariants, for a non-empty list:
//! - `cursor < items.len()`
//! - `window_start <= cursor < window_start + window_size` after any
//!   navigation step. `resize` alone does not restore it.
//! - every selected index is `< items.len()`

use std::collections::BTreeSet;
use std::ops::Range;

use crate::errors::SelectionError;
use crate::script::Item;

pub const DEFAULT_WINDOW_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Move(Direction),
    Toggle,
    Confirm,
    Cancel,
    Resize { visible_rows: usize, reserved_rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Browsing,
    Confirmed,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        *self != Phase::Browsing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    items: Vec<Item>,
    cursor: usize,
    selected: BTreeSet<usize>,
    window_start: usize,
    window_size: usize,
    phase: Phase,
}

/// One visible row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub index: usize,
    pub name: &'a str,
    pub is_cursor: bool,
    pub is_selected: bool,
}

/// Render-ready snapshot of a `ListState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    pub rows: Vec<RowView<'a>>,
    pub cursor: usize,
    pub window: Range<usize>,
    pub selected: Vec<usize>,
    pub total: usize,
    pub phase: Phase,
}

impl ListState {
    pub fn new(items: Vec<Item>, window_size: usize) -> Self {
        let window_size = window_size.min(items.len());
        Self {
            items,
            cursor: 0,
            selected: BTreeSet::new(),
            window_start: 0,
            window_size,
            phase: Phase::Browsing,
        }
    }

    /// Like `new`, for callers that cannot confirm anything from an empty list.
    pub fn try_new(items: Vec<Item>, window_size: usize) -> Result<Self, SelectionError> {
        if items.is_empty() {
            return Err(SelectionError::EmptyInput);
        }
        Ok(Self::new(items, window_size))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Applies one event. A confirm with nothing selected leaves the state as
    /// it was; once confirmed or cancelled the state no longer changes.
    pub fn reduce(mut self, event: SelectorEvent) -> Self {
        match event {
            SelectorEvent::Move(direction) => self.move_cursor(direction),
            SelectorEvent::Toggle => self.toggle_selection(),
            SelectorEvent::Confirm => {
                if let Err(err) = self.confirm() {
                    log::debug!("confirm ignored: {err}");
                }
            }
            SelectorEvent::Cancel => self.cancel(),
            SelectorEvent::Resize {
                visible_rows,
                reserved_rows,
            } => self.resize(visible_rows, reserved_rows),
        }
        self
    }

    /// Recomputes the window size. The window start is left alone even if
    /// the cursor now falls outside the window; the next move corrects it.
    pub fn resize(&mut self, visible_rows: usize, reserved_rows: usize) {
        if self.phase.is_terminal() {
            return;
        }
        self.window_size = visible_rows
            .saturating_sub(reserved_rows)
            .min(self.items.len());
    }

    /// Moves one row without wrapping, scrolling the window by at most one row.
    pub fn move_cursor(&mut self, direction: Direction) {
        if self.phase.is_terminal() {
            return;
        }

        match direction {
            Direction::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    if self.cursor < self.window_start {
                        self.window_start -= 1;
                    }
                }
            }
            Direction::Down => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                    if self.cursor >= self.window_start + self.window_size {
                        self.window_start += 1;
                    }
                }
            }
        }
    }

    pub fn toggle_selection(&mut self) {
        if self.phase.is_terminal() || self.items.is_empty() {
            return;
        }

        if !self.selected.remove(&self.cursor) {
            self.selected.insert(self.cursor);
        }
    }

    /// Ends the session with the selected items in list order.
    pub fn confirm(&mut self) -> Result<Vec<Item>, SelectionError> {
        match self.phase {
            Phase::Cancelled => return Err(SelectionError::SessionClosed),
            Phase::Confirmed => return Ok(self.selected_items()),
            Phase::Browsing => {}
        }

        if self.selected.is_empty() {
            return Err(SelectionError::NoSelection);
        }

        self.phase = Phase::Confirmed;
        Ok(self.selected_items())
    }

    pub fn cancel(&mut self) {
        if self.phase == Phase::Browsing {
            self.phase = Phase::Cancelled;
            self.selected.clear();
        }
    }

    pub fn selected_items(&self) -> Vec<Item> {
        self.selected
            .iter()
            .filter_map(|index| self.items.get(*index))
            .cloned()
            .collect()
    }

    pub fn view(&self) -> ListView<'_> {
        let end = (self.window_start + self.window_size).min(self.items.len());
        let start = self.window_start.min(end);

        let rows = (start..end)
            .map(|index| RowView {
                index,
                name: &self.items[index].name,
                is_cursor: index == self.cursor,
                is_selected: self.selected.contains(&index),
            })
            .collect();

        ListView {
            rows,
            cursor: self.cursor,
            window: start..end,
            selected: self.selected.iter().copied().collect(),
            total: self.items.len(),
            phase: self.phase,
        }
    }
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
