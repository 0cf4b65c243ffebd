use anyhow::Context;
use anyhow::Result;
use omafed_core::Direction;
use omafed_core::Item;
use omafed_core::ListState;
use omafed_core::Phase;
use omafed_core::SelectorEvent;

use crate::domain::models::ConvertScope;
use crate::domain::models::Event;
use crate::domain::models::Screen;
use crate::domain::models::SessionOutcome;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

/// Rows around the list taken by the title, footer and container chrome.
pub const RESERVED_ROWS: u16 = 9;

pub struct AppStateProps {
    pub items: Vec<Item>,
    pub window_size: usize,
    pub repo_dir: String,
    pub scope: ConvertScope,
    pub show_welcome: bool,
}

pub struct AppState {
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub list: ListState,
    pub max_window_size: usize,
    pub notice: Option<String>,
    pub repo_dir: String,
    pub scope: ConvertScope,
    pub screen: Screen,
}

impl AppState {
    pub fn new(props: AppStateProps) -> Result<AppState> {
        let list = ListState::try_new(props.items, props.window_size)
            .with_context(|| format!("no scripts were found in {}", props.repo_dir))?;

        let mut screen = Screen::Selecting;
        if props.show_welcome {
            screen = Screen::Welcome;
        }

        return Ok(AppState {
            last_known_height: 0,
            last_known_width: 0,
            list,
            max_window_size: props.window_size,
            notice: None,
            repo_dir: props.repo_dir,
            scope: props.scope,
            screen,
        });
    }

    /// Feeds one input event through the selector. Returns the outcome once the
    /// session has ended.
    pub fn handle_event(&mut self, event: Event) -> Option<SessionOutcome> {
        if let Event::UIResize(width, height) = event {
            self.set_size(width, height);
            return None;
        }

        if self.screen == Screen::Welcome {
            if let Event::KeyboardCTRLC | Event::KeyboardCharInput('q') = event {
                self.dispatch(SelectorEvent::Cancel);
                return self.outcome();
            }
            self.screen = Screen::Selecting;
            return None;
        }

        let selector_event = match event {
            Event::KeyboardCTRLC | Event::KeyboardCharInput('q') => SelectorEvent::Cancel,
            Event::KeyboardUp | Event::KeyboardCharInput('k') => SelectorEvent::Move(Direction::Up),
            Event::KeyboardDown | Event::KeyboardCharInput('j') => {
                SelectorEvent::Move(Direction::Down)
            }
            Event::KeyboardSpace => SelectorEvent::Toggle,
            Event::KeyboardEnter => SelectorEvent::Confirm,
            _ => return None,
        };

        self.notice = None;
        self.dispatch(selector_event);

        if selector_event == SelectorEvent::Confirm && self.list.phase() == Phase::Browsing {
            self.notice = Some("Select at least one application before confirming.".to_string());
        }

        return self.outcome();
    }

    /// Fits the list window to the terminal, never past the configured size.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.last_known_width = width.into();
        self.last_known_height = height.into();

        let reserved_rows = usize::from(RESERVED_ROWS);
        let visible_rows = self
            .last_known_height
            .min(self.max_window_size.saturating_add(reserved_rows));
        self.dispatch(SelectorEvent::Resize {
            visible_rows,
            reserved_rows,
        });
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.list.phase() {
            Phase::Browsing => return None,
            Phase::Confirmed => return Some(SessionOutcome::Confirmed(self.list.selected_items())),
            Phase::Cancelled => return Some(SessionOutcome::Cancelled),
        }
    }

    fn dispatch(&mut self, event: SelectorEvent) {
        tracing::debug!(?event, "selector event");
        let list = std::mem::take(&mut self.list);
        self.list = list.reduce(event);
    }
}
