use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;

use crate::domain::models::ConvertScope;
use crate::domain::models::Screen;
use crate::domain::models::SessionOutcome;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

const ACCENT: Color = Color::Rgb(0xFF, 0x75, 0xB5);
const MUTED: Color = Color::Rgb(0x62, 0x62, 0x62);

const BANNER: &str = r#"
  ___  _ __ ___   __ _ / _| ___  __| |
 / _ \| '_ ` _ \ / _` | |_ / _ \/ _` |
| (_) | | | | | | (_| |  _|  __/ (_| |
 \___/|_| |_| |_|\__,_|_|  \___|\__,_|
"#;

const HELP: &str = "↑/↓: navigate • space: select/unselect • enter: confirm • q: quit";

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Takes over the terminal for one picker session and restores it afterwards.
pub async fn run(props: AppStateProps) -> Result<SessionOutcome> {
    let app_state = AppState::new(props)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let result = start_loop(&mut terminal, app_state).await;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let _ = crossterm::execute!(io::stdout(), cursor::Show);

    return result;
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState,
) -> Result<SessionOutcome> {
    let size = terminal.size()?;
    app_state.set_size(size.width, size.height);

    let mut events = EventsService::new();
    loop {
        terminal.draw(|frame| render(frame, &app_state))?;

        let event = events.next().await?;
        if let Some(outcome) = app_state.handle_event(event) {
            tracing::info!(?outcome, "session ended");
            return Ok(outcome);
        }
    }
}

pub fn render(frame: &mut Frame, app_state: &AppState) {
    let area = frame.area();
    match app_state.screen {
        Screen::Welcome => render_welcome(frame, area),
        Screen::Selecting => render_selector(frame, area, app_state),
    }
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = BANNER
        .lines()
        .map(|line| return Line::styled(line.to_string(), Style::new().fg(ACCENT)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Welcome to the Ubuntu to Fedora Converter!"));
    lines.push(Line::styled(
        "Press any key to continue...",
        Style::new().fg(MUTED),
    ));

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::new().padding(Padding::new(2, 2, 1, 1)));

    frame.render_widget(paragraph, area);
}

fn render_selector(frame: &mut Frame, area: Rect, app_state: &AppState) {
    let container = Block::bordered().padding(Padding::new(2, 2, 1, 1));
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(inner);

    let view = app_state.list.view();

    let title = format!(
        "Select which apps you want to keep from {} ({} of {} selected)",
        app_state.repo_dir,
        view.selected.len(),
        view.total
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            title,
            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        header,
    );

    let rows: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| {
            let cursor = if row.is_cursor { ">" } else { " " };
            let checked = if row.is_selected { "x" } else { " " };
            let text = format!("{cursor} [{checked}] {}", row.name);

            let mut style = Style::new().fg(Color::White);
            if row.is_cursor {
                style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);
            }

            return ListItem::new(Line::styled(text, style));
        })
        .collect();
    frame.render_widget(List::new(rows), body);

    let notice = match &app_state.notice {
        Some(notice) => Line::styled(notice.to_string(), Style::new().fg(Color::Red)),
        None => Line::from(""),
    };
    let footer_text = Text::from(vec![
        notice,
        Line::styled(scope_hint(app_state.scope), Style::new().fg(MUTED)),
        Line::styled(HELP, Style::new().fg(MUTED)),
    ]);
    frame.render_widget(
        Paragraph::new(footer_text).wrap(Wrap { trim: true }),
        footer,
    );
}

fn scope_hint(scope: ConvertScope) -> &'static str {
    match scope {
        ConvertScope::All => {
            return "Confirming converts every script in the repository to Fedora equivalents."
        }
        ConvertScope::Unselected => {
            return "Unselected applications will be converted to Fedora equivalents."
        }
    }
}
