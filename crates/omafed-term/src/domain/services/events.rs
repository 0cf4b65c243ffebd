use anyhow::bail;
use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use futures::StreamExt;

use crate::domain::models::Event;

pub struct EventsService {
    crossterm_events: EventStream,
}

impl Default for EventsService {
    fn default() -> EventsService {
        return EventsService::new();
    }
}

impl EventsService {
    pub fn new() -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = match self.crossterm_events.next().await {
                Some(Ok(input)) => handle_crossterm(input),
                Some(Err(err)) => return Err(err.into()),
                None => bail!("terminal event stream closed"),
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}

pub fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Resize(width, height) => {
            return Some(Event::UIResize(width, height));
        }
        CrosstermEvent::Key(keyevent) => {
            if keyevent.kind == KeyEventKind::Release {
                return None;
            }

            let ctrl = keyevent.modifiers.contains(KeyModifiers::CONTROL);
            match keyevent.code {
                KeyCode::Char('c') if ctrl => {
                    return Some(Event::KeyboardCTRLC);
                }
                KeyCode::Up => {
                    return Some(Event::KeyboardUp);
                }
                KeyCode::Down => {
                    return Some(Event::KeyboardDown);
                }
                KeyCode::Enter => {
                    return Some(Event::KeyboardEnter);
                }
                KeyCode::Char(' ') => {
                    return Some(Event::KeyboardSpace);
                }
                KeyCode::Char(c) => {
                    return Some(Event::KeyboardCharInput(c));
                }
                _ => {
                    return Some(Event::KeyboardOther);
                }
            }
        }
        _ => return None,
    }
}
