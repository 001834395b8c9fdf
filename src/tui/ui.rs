use crate::core::rows::{RowView, ROW_HEIGHT, VISIBLE_LINKS};
use crate::core::{LinkOpener, SearchProvider};
use crate::tui::app::App;
use crate::tui::search::PLACEHOLDER;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const ACCENT: Color = Color::Rgb(77, 169, 112);

pub fn draw<P: SearchProvider + 'static, O: LinkOpener>(frame: &mut Frame, app: &mut App<P, O>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(ROW_HEIGHT + 2),
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_results(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    if app.controller.is_loading() {
        draw_spinner(frame, app.spinner(), chunks[1]);
    }

    if let Some(dialog) = app.controller.dialog() {
        draw_error_dialog(frame, dialog.title, &dialog.message, dialog.action, area);
    } else if app.controller.input_focused() {
        // Border (1) + search icon "> " (2)
        let cursor_x = chunks[0].x + 1 + 2 + app.input.cursor_column();
        let cursor_y = chunks[0].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_search_bar<P: SearchProvider + 'static, O: LinkOpener>(
    frame: &mut Frame,
    app: &App<P, O>,
    area: Rect,
) {
    let border_style = if app.controller.input_focused() {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let text = if app.input.is_empty() {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![Span::raw("> "), Span::raw(app.input.query.as_str())])
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_results<P: SearchProvider + 'static, O: LinkOpener>(
    frame: &mut Frame,
    app: &mut App<P, O>,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Universities ({}) ", app.controller.rows().len()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.visible_rows = ((inner.height / ROW_HEIGHT) as usize).max(1);

    let focused = app.focused_link();
    let rows = app.controller.rows();
    for (slot, (row_idx, row)) in rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(app.visible_rows)
        .enumerate()
    {
        let y = inner.y + slot as u16 * ROW_HEIGHT;
        if y + ROW_HEIGHT > inner.y + inner.height {
            break;
        }
        let row_area = Rect::new(inner.x, y, inner.width, ROW_HEIGHT);
        let focused_link = focused.filter(|f| f.row == row_idx).map(|f| f.link);
        draw_row(frame, row, focused_link, row_area);
    }
}

/// One fixed-height row: name across the top, country and code on the left,
/// web pages on the right, separator at the bottom.
pub fn draw_row(frame: &mut Frame, row: &RowView, focused_link: Option<usize>, area: Rect) {
    let name_area = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), 1);
    frame.render_widget(
        Paragraph::new(row.name.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
        name_area,
    );

    let body_area = Rect::new(area.x, area.y + 1, area.width, ROW_HEIGHT - 2);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body_area);

    let left = Rect::new(
        columns[0].x + 1,
        columns[0].y,
        columns[0].width.saturating_sub(2),
        columns[0].height,
    );
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(row.country.as_str()),
            Line::styled(row.code.as_str(), Style::default().fg(Color::Gray)),
        ]),
        left,
    );

    if let Some(links_area) = &row.links {
        let mut lines = vec![Line::from(links_area.label)];
        for (idx, link) in links_area.links.iter().take(VISIBLE_LINKS).enumerate() {
            let style = if !link.is_activatable() {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if focused_link == Some(idx) {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED)
            };
            lines.push(Line::from(Span::styled(link.text.as_str(), style)));
        }
        let right = Rect::new(
            columns[1].x + 1,
            columns[1].y,
            columns[1].width.saturating_sub(2),
            columns[1].height,
        );
        frame.render_widget(Paragraph::new(lines), right);
    }

    let separator_area = Rect::new(area.x, area.y + ROW_HEIGHT - 1, area.width, 1);
    frame.render_widget(
        Paragraph::new("─".repeat(area.width as usize))
            .style(Style::default().fg(Color::Rgb(60, 60, 60))),
        separator_area,
    );
}

fn draw_status_bar<P: SearchProvider + 'static, O: LinkOpener>(
    frame: &mut Frame,
    app: &App<P, O>,
    area: Rect,
) {
    let hints = if app.controller.input_focused() {
        " Type to search | Tab: links | Esc: clear | Ctrl+C: quit "
    } else {
        " ↑/↓: links | Enter: open | /: search | q: quit "
    };

    let line = Line::from(vec![
        Span::styled(hints, Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(" "),
        Span::raw(app.status_message.as_str()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_spinner(frame: &mut Frame, spinner: &str, area: Rect) {
    let text = format!(" {} Loading… ", spinner);
    let width = (text.chars().count() as u16 + 2).min(area.width);
    let popup_area = centered_rect(width, 3, area);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(ACCENT))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT))),
        popup_area,
    );
}

fn draw_error_dialog(frame: &mut Frame, title: &str, message: &str, action: &str, area: Rect) {
    let width = ((message.chars().count() + 4) as u16)
        .clamp(30, 60)
        .min(area.width.saturating_sub(4));
    let text_width = width.saturating_sub(4).max(1) as usize;
    let message_lines = message.chars().count().div_ceil(text_width).max(1) as u16;
    let height = (message_lines + 4).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let message_area = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(1),
    );
    frame.render_widget(
        Paragraph::new(message).wrap(Wrap { trim: true }),
        message_area,
    );

    let button = format!("[ {} ]", action);
    let button_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(1),
        inner.width,
        1,
    );
    frame.render_widget(
        Paragraph::new(button)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::White)),
        button_area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::SearchController;
    use crate::core::rows::RowView;
    use crate::core::{OrderingPolicy, University};
    use crate::utils::error::{Result, SearchError};
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use url::Url;

    struct NoProvider;

    #[async_trait]
    impl SearchProvider for NoProvider {
        async fn search(&self, _query: &str) -> Result<Vec<University>> {
            Err(SearchError::NetworkError {
                message: "The request timed out.".to_string(),
            })
        }
    }

    struct NoOpener;

    impl LinkOpener for NoOpener {
        fn open(&self, _url: &Url) -> Result<()> {
            Ok(())
        }
    }

    fn university(web_pages: &[&str]) -> University {
        University {
            name: "Test Univ".to_string(),
            country: "Testland".to_string(),
            state_province: Some("North".to_string()),
            alpha_two_code: "TL".to_string(),
            domains: vec![],
            web_pages: web_pages.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn render_single_row(row: &RowView) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(70, ROW_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_row(frame, row, None, area)
            })
            .unwrap();
        buffer_lines(&terminal)
    }

    #[test]
    fn test_row_draws_all_lines_and_links() {
        let row = RowView::from_university(&university(&["http://test.edu"]));
        let lines = render_single_row(&row);

        assert!(lines[0].contains("Test Univ"));
        assert!(lines[1].contains("Testland, North"));
        assert!(lines[1].contains("Web pages:"));
        assert!(lines[2].contains("Alpha Two Code: TL"));
        assert!(lines[2].contains("http://test.edu"));
        assert!(lines[5].starts_with("───"));
    }

    #[test]
    fn test_row_without_web_pages_leaves_links_column_empty() {
        let row = RowView::from_university(&university(&[]));
        let lines = render_single_row(&row);

        assert!(!lines.iter().any(|l| l.contains("Web pages:")));
        assert!(lines[2][36..].trim().is_empty());
    }

    #[tokio::test]
    async fn test_screen_shows_error_dialog() {
        let controller = SearchController::new(NoProvider, OrderingPolicy::LatestIssued);
        let mut app = App::new(controller, NoOpener);
        app.controller.activate();
        let message = app.controller.next_message().await.unwrap();
        app.apply_message(message);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let screen = buffer_lines(&terminal).join("\n");

        assert!(screen.contains(" Error "));
        assert!(screen.contains("The request timed out."));
        assert!(screen.contains("[ Ok ]"));
        assert!(screen.contains("Search"));
        assert!(!screen.contains("Loading"));
    }
}
