//! Rendering of the wizard screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use triage_wizard::{QuestionKind, QuestionView};

use crate::frontend::Theme;
use crate::stage::shifted;

/// Everything on screen that is not owned by the session.
#[derive(Debug, Clone)]
pub(crate) struct Screen {
    pub title: String,
    pub theme: Theme,
    /// Highlighted row of a choice question.
    pub highlighted: usize,
    /// Shown in the reply panel instead of the reply, e.g. while sending.
    pub status: Option<String>,
    /// Shown below a reply once one has arrived.
    pub epilogue: Option<String>,
    pub replied: bool,
}

impl Screen {
    pub fn new(title: String, theme: Theme) -> Self {
        Self {
            title,
            theme,
            highlighted: 0,
            status: None,
            epilogue: None,
            replied: false,
        }
    }

    /// Put the highlight where it belongs for a freshly shown question.
    pub fn focus(&mut self, view: &QuestionView) {
        self.highlighted = initial_highlight(view);
    }

    pub fn highlight_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn highlight_down(&mut self, view: &QuestionView) {
        let last = view.question.options().len().saturating_sub(1);
        self.highlighted = (self.highlighted + 1).min(last);
    }
}

/// The chosen option of a single-select question, else the first row.
pub(crate) fn initial_highlight(view: &QuestionView) -> usize {
    match view.question.kind() {
        QuestionKind::SingleSelect(choice) => view
            .draft
            .as_text()
            .and_then(|text| choice.options.iter().position(|option| option == text))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Draw the full screen, with the question panel shifted `offset` columns.
pub(crate) fn draw_ui(
    frame: &mut Frame,
    screen: &Screen,
    view: &QuestionView,
    reply: &str,
    offset: i32,
) {
    let area = frame.area();
    let theme = &screen.theme;

    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Progress bar
            Constraint::Min(8),    // Question
            Constraint::Length(8), // Reply
            Constraint::Length(3), // Help
        ])
        .split(area);

    // Header
    let header = Paragraph::new(screen.title.clone())
        .style(Style::default().fg(theme.primary).bold())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(header, chunks[0]);

    draw_progress(frame, screen, view, chunks[1]);

    let panel = shifted(chunks[2], offset);
    if panel.width > 2 {
        draw_question(frame, screen, view, panel, offset == 0);
    }

    draw_reply(frame, screen, reply, chunks[3]);

    // Help bar
    let help_text = match view.question.kind() {
        QuestionKind::SingleSelect(_) => {
            "↑/↓: Select  Enter: Choose  ←/→: Back/Next  Ctrl+S: Submit  Ctrl+R: Start over  Esc: Quit"
        }
        QuestionKind::MultiSelect(_) => {
            "↑/↓: Navigate  Space: Toggle  Enter: Next  ←: Back  Ctrl+S: Submit  Ctrl+R: Start over  Esc: Quit"
        }
        QuestionKind::FreeText(_) => {
            "Type to answer  Enter: Next  Backspace (empty): Back  Ctrl+S: Submit  Ctrl+R: Start over  Esc: Quit"
        }
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(theme.border))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(help, chunks[4]);
}

/// Thin bar with a "current / total" label below it.
fn draw_progress(frame: &mut Frame, screen: &Screen, view: &QuestionView, area: Rect) {
    let current = view.index + 1;
    let progress_text = format!(" {} / {} ", current, view.total);

    let bar_width = area.width.saturating_sub(2);
    let text_width = (progress_text.chars().count() as u16).min(bar_width);
    let ratio = current as f32 / view.total.max(1) as f32;
    let filled_width = (ratio * bar_width as f32) as u16;
    let bar_x = area.x + 1;

    let track = "─".repeat(bar_width as usize);
    let track_widget = Paragraph::new(track).style(Style::default().fg(screen.theme.border));
    frame.render_widget(track_widget, Rect::new(bar_x, area.y, bar_width, 1));

    if filled_width > 0 {
        let filled = "━".repeat(filled_width as usize);
        let filled_widget = Paragraph::new(filled).style(Style::default().fg(screen.theme.primary));
        frame.render_widget(filled_widget, Rect::new(bar_x, area.y, filled_width, 1));
    }

    if area.height > 1 {
        let text_x = bar_x + (bar_width.saturating_sub(text_width)) / 2;
        let text_widget =
            Paragraph::new(progress_text).style(Style::default().fg(screen.theme.secondary));
        frame.render_widget(text_widget, Rect::new(text_x, area.y + 1, text_width, 1));
    }
}

fn draw_question(
    frame: &mut Frame,
    screen: &Screen,
    view: &QuestionView,
    area: Rect,
    settled: bool,
) {
    let theme = &screen.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Question prompt
            Constraint::Min(4),    // Answer
        ])
        .split(area);

    let prompt = Paragraph::new(view.question.text().to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(" Question ")
                .title_style(Style::default().fg(theme.highlight)),
        );
    frame.render_widget(prompt, chunks[0]);

    match view.question.kind() {
        QuestionKind::SingleSelect(choice) => {
            let chosen = view.draft.as_text();
            let items: Vec<ListItem> = choice
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let is_chosen = chosen == Some(option.as_str());
                    let marker = if is_chosen { "(•)" } else { "( )" };
                    let style = if i == screen.highlighted {
                        Style::default().fg(theme.highlight).bold()
                    } else if is_chosen {
                        Style::default().fg(theme.secondary)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(format!("  {marker} {option}")).style(style)
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.border))
                        .title(" Select Option ")
                        .title_style(Style::default().fg(theme.secondary)),
                )
                .highlight_symbol("► ");

            let mut list_state = ListState::default();
            list_state.select(Some(screen.highlighted));
            frame.render_stateful_widget(list, chunks[1], &mut list_state);
        }
        QuestionKind::MultiSelect(choice) => {
            let selection = view.draft.as_selection();
            let items: Vec<ListItem> = choice
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let is_selected = selection.is_some_and(|s| s.contains(option));
                    let checkbox = if is_selected { "[✓]" } else { "[ ]" };
                    let style = if i == screen.highlighted {
                        Style::default().fg(theme.highlight).bold()
                    } else if is_selected {
                        Style::default().fg(theme.secondary)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(format!("  {checkbox} {option}")).style(style)
                })
                .collect();

            let selected_count = selection.map_or(0, |s| s.len());
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.border))
                        .title(format!(" Multi-Select ({selected_count} selected) "))
                        .title_style(Style::default().fg(theme.secondary)),
                )
                .highlight_symbol("► ");

            let mut list_state = ListState::default();
            list_state.select(Some(screen.highlighted));
            frame.render_stateful_widget(list, chunks[1], &mut list_state);
        }
        QuestionKind::FreeText(free_text) => {
            let text = view.draft.as_text().unwrap_or_default();
            let input_block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Answer ")
                .title_style(Style::default().fg(theme.secondary));

            let input_widget = match (&free_text.placeholder, text.is_empty()) {
                (Some(placeholder), true) => {
                    Paragraph::new(placeholder.clone()).style(Style::default().fg(theme.border))
                }
                _ => Paragraph::new(text.to_string()).style(Style::default().fg(theme.text)),
            }
            .wrap(Wrap { trim: false })
            .block(input_block);
            frame.render_widget(input_widget, chunks[1]);

            // Show cursor once the panel has stopped moving
            if settled {
                let inner_width = chunks[1].width.saturating_sub(2).max(1);
                let typed = text.chars().count() as u16;
                let cursor_x = chunks[1].x + 1 + typed % inner_width;
                let cursor_y = chunks[1].y + 1 + typed / inner_width;
                if cursor_y < chunks[1].bottom().saturating_sub(1) {
                    frame.set_cursor_position((cursor_x, cursor_y));
                }
            }
        }
    }
}

fn draw_reply(frame: &mut Frame, screen: &Screen, reply: &str, area: Rect) {
    let theme = &screen.theme;
    let (text, style) = match &screen.status {
        Some(status) => (status.clone(), Style::default().fg(theme.highlight)),
        None if reply.is_empty() => (
            "Answer every question, then press Ctrl+S to submit.".to_string(),
            Style::default().fg(theme.border),
        ),
        None => {
            let mut text = reply.to_string();
            if screen.replied {
                if let Some(epilogue) = &screen.epilogue {
                    text.push_str("\n\n");
                    text.push_str(epilogue);
                }
            }
            (text, Style::default().fg(theme.text))
        }
    };

    // Keep the newest lines of a long reply in view.
    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let lines: u16 = text
        .lines()
        .map(|line| line.chars().count().div_ceil(inner_width).max(1) as u16)
        .sum();
    let scroll = lines.saturating_sub(inner_height);

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Reply ")
                .title_style(Style::default().fg(theme.success)),
        );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use triage_wizard::{NONE_OF_THESE, Question, QuestionSet, Wizard};

    use super::*;

    fn wizard() -> Wizard {
        Wizard::new(
            QuestionSet::new(vec![
                Question::single_select("q1", "Has this happened before?", ["Yes", "No"]),
                Question::multi_select("q2", "Which apply?", ["Threats", NONE_OF_THESE]),
            ])
            .unwrap(),
        )
    }

    fn render(screen: &Screen, view: &QuestionView, reply: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| draw_ui(frame, screen, view, reply, 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_question_and_progress() {
        let screen = Screen::new("Triage".into(), Theme::default());
        let rendered = render(&screen, &wizard().view(), "");
        assert!(rendered.contains("Triage"));
        assert!(rendered.contains("Has this happened before?"));
        assert!(rendered.contains("( ) Yes"));
        assert!(rendered.contains("1 / 2"));
    }

    #[test]
    fn renders_reply_and_status() {
        let mut screen = Screen::new("Triage".into(), Theme::default());
        let rendered = render(&screen, &wizard().view(), "Error: bad input");
        assert!(rendered.contains("Error: bad input"));

        screen.status = Some("Sending…".into());
        let rendered = render(&screen, &wizard().view(), "Error: bad input");
        assert!(rendered.contains("Sending…"));
        assert!(!rendered.contains("bad input"));
    }

    #[test]
    fn highlight_follows_chosen_option() {
        let mut wizard = wizard();
        wizard.choose("No");
        assert_eq!(initial_highlight(&wizard.view()), 1);

        let mut screen = Screen::new(String::new(), Theme::default());
        screen.focus(&wizard.view());
        screen.highlight_down(&wizard.view());
        assert_eq!(screen.highlighted, 1);
        screen.highlight_up();
        screen.highlight_up();
        assert_eq!(screen.highlighted, 0);
    }

    #[test]
    fn multi_select_shows_checkboxes() {
        let mut wizard = wizard();
        wizard.move_next();
        wizard.toggle(NONE_OF_THESE);
        let screen = Screen::new(String::new(), Theme::default());
        let rendered = render(&screen, &wizard.view(), "");
        assert!(rendered.contains("[ ] Threats"));
        assert!(rendered.contains("[✓] None of these"));
        assert!(rendered.contains("(1 selected)"));
    }
}
