//! TUI rendering logic for the search/list view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::state::{HomeState, InputMode};
use crate::detail::format::{format_vote, release_year};

/// Draws the search/list view.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut HomeState) {
    let trending_height = if state.trending.is_empty() { 0 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // search box
            Constraint::Length(trending_height), // trending strip
            Constraint::Min(5),                  // result list
            Constraint::Length(3),               // footer
        ])
        .split(frame.area());

    draw_search_box(frame, chunks[0], state);
    if !state.trending.is_empty() {
        draw_trending(frame, chunks[1], state);
    }
    draw_movies(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);
}

/// Draws the search box.
fn draw_search_box(frame: &mut Frame, area: Rect, state: &HomeState) {
    let style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if state.search_term.is_empty() && state.input_mode == InputMode::Search {
        Line::from(Span::styled(
            "Search through thousands of movies",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(state.search_term.as_str())
    };

    let search = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, area);
}

/// Draws the ranked trending strip.
fn draw_trending(frame: &mut Frame, area: Rect, state: &HomeState) {
    let mut spans = Vec::with_capacity(state.trending.len().saturating_mul(2));
    for entry in &state.trending {
        spans.push(Span::styled(
            format!("{}. ", entry.rank),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!("{}   ", entry.title)));
    }

    let trending = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Trending Movies "));
    frame.render_widget(trending, area);
}

/// Draws the result list, the spinner, or the error message.
///
/// An error and a list may be shown together.
#[allow(clippy::indexing_slicing)]
fn draw_movies(frame: &mut Frame, area: Rect, state: &mut HomeState) {
    let block = Block::default().borders(Borders::ALL).title(" All Movies ");

    if state.is_loading {
        let spinner = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Cyan))
            .block(block);
        frame.render_widget(spinner, area);
        return;
    }

    let (error_area, list_area) = match (&state.error_message, state.movies.is_empty()) {
        (Some(_), true) => (Some(area), None),
        (Some(_), false) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)])
                .split(area);
            (Some(parts[0]), Some(parts[1]))
        }
        (None, _) => (None, Some(area)),
    };

    if let (Some(rect), Some(message)) = (error_area, &state.error_message) {
        let error = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Error "));
        frame.render_widget(error, rect);
    }

    let Some(rect) = list_area else {
        return;
    };

    let header = Row::new(vec!["ID", "Title", "Rating", "Lang", "Year"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .movies
        .iter()
        .map(|m| {
            Row::new(vec![
                m.id.to_string(),
                m.title.clone(),
                format!("\u{2605} {}", format_vote(m.vote_average)),
                m.original_language
                    .clone()
                    .unwrap_or_else(|| String::from("N/A")),
                m.release_date
                    .as_deref()
                    .map(release_year)
                    .filter(|y| !y.is_empty())
                    .unwrap_or("N/A")
                    .to_owned(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, rect, &mut state.table_state);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &HomeState) {
    let help_text = match state.input_mode {
        InputMode::Search => {
            Line::from("Type to search | \u{2191}\u{2193}: move | Enter: open | Esc: list mode")
        }
        InputMode::Normal => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: move  Enter: open  1-9: trending  /: search  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
