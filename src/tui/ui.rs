use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::state::{ensure_selection_visible, AppScreen, AppState};
use crate::{FetchState, Picture};

const APP_TITLE: &str = "Our Universe";

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen {
        AppScreen::PictureList => match state.view_model.api_state() {
            FetchState::Loading => render_loading(f, state, "Fetching pictures"),
            FetchState::Error { title, message } => render_error(f, state, title, message),
            FetchState::Success(_) => render_picture_list(f, state),
        },
        AppScreen::PictureDetail => match state.view_model.selected_picture() {
            Some(picture) => render_picture_detail(f, state, picture),
            None => render_picture_list(f, state),
        },
    }
}

/// Split the screen into title, body, help and status rows.
fn screen_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(area)
}

fn render_title(f: &mut Frame, area: Rect, text: &str) {
    let title = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_help(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}

/// Render the loading screen.
fn render_loading(f: &mut Frame, state: &AppState, message: &str) {
    let chunks = screen_chunks(f.area());

    render_title(f, chunks[0], APP_TITLE);

    let loading = Paragraph::new(format!("{}...", message))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, chunks[1]);

    render_help(f, chunks[2], "r: Restart | q: Quit");
    render_status_bar(f, chunks[3], state);
}

/// Render the error screen with its retry hint.
fn render_error(f: &mut Frame, state: &AppState, title: &str, message: &str) {
    let chunks = screen_chunks(f.area());

    render_title(f, chunks[0], APP_TITLE);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    render_help(f, chunks[2], "r: Retry | q: Quit");
    render_status_bar(f, chunks[3], state);
}

/// Render the list of image entries.
fn render_picture_list(f: &mut Frame, state: &AppState) {
    let chunks = screen_chunks(f.area());
    let pictures = state.view_model.recent_pictures();

    render_title(f, chunks[0], APP_TITLE);

    let visible_rows = calculate_visible_rows(chunks[1].height);
    let mut scroll = state.list_scroll;
    ensure_selection_visible(state.cursor, &mut scroll, visible_rows, pictures.len());

    let rows: Vec<Row> = pictures
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_rows)
        .map(|(i, p)| {
            let style = if i == state.cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(p.display_date()), Cell::from(p.title.clone())]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(20)])
        .header(
            Row::new(vec!["Date", "Title"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Latest ({}) ", pictures.len())),
        );
    f.render_widget(table, chunks[1]);

    render_help(
        f,
        chunks[2],
        "Enter: Open | t: Sort by title | d: Sort by date | r: Refresh | q: Quit",
    );
    render_status_bar(f, chunks[3], state);
}

/// Render the detail screen for one picture.
fn render_picture_detail(f: &mut Frame, state: &AppState, picture: &Picture) {
    let chunks = screen_chunks(f.area());

    render_title(f, chunks[0], &picture.title);

    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut text = vec![
        Line::from(vec![
            Span::styled("Date: ", label),
            Span::raw(picture.display_date()),
        ]),
        Line::from(vec![
            Span::styled("Image: ", label),
            Span::styled(picture.url.clone(), Style::default().fg(Color::Blue)),
        ]),
    ];
    if let Some(ref copyright) = picture.copyright {
        text.push(Line::from(vec![
            Span::styled("Copyright: ", label),
            Span::raw(copyright.trim().to_string()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(picture.explanation.clone()));

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(body, chunks[1]);

    render_help(f, chunks[2], "Esc: Back | ↑/↓: Scroll | f: Favourite | q: Quit");
    render_status_bar(f, chunks[3], state);
}

/// Table body rows left after borders, header and header margin.
fn calculate_visible_rows(table_height: u16) -> usize {
    table_height.saturating_sub(4) as usize
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let is_error = matches!(state.view_model.api_state(), FetchState::Error { .. });

    let status_text = if let Some(ref message) = state.status_message {
        format!(" {}", message)
    } else if is_error {
        format!(" Could not load pictures from: {}", state.api_url)
    } else {
        format!(" Connected to: {}", state.api_url)
    };

    let style = if is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
