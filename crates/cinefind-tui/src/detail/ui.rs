//! TUI rendering logic for the detail view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::format::{format_money, format_rating, format_runtime, join_names, release_year};
use super::pipeline::MovieDetail;
use super::state::{DetailPhase, DetailState};

/// Placeholder shown when a movie has no trailer.
pub const NO_TRAILER_PLACEHOLDER: &str = "No trailer available";

/// Draws the detail view.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &DetailState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" /movie/{} ", state.movie_id));

    match &state.phase {
        DetailPhase::Loading => {
            let loading = Paragraph::new("Loading...").block(block);
            frame.render_widget(loading, chunks[0]);
        }
        DetailPhase::Failed(message) => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(error, chunks[0]);
        }
        DetailPhase::Loaded(detail) => {
            let body = Paragraph::new(detail_lines(detail))
                .wrap(Wrap { trim: false })
                .scroll((state.scroll, 0))
                .block(block);
            frame.render_widget(body, chunks[0]);
        }
    }

    draw_footer(frame, chunks[1], state);
}

/// Builds the body lines of a loaded detail.
#[must_use]
pub fn detail_lines(detail: &MovieDetail) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
    };
    let release_date = detail.release_date.clone().unwrap_or_default();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                detail.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("\u{2b50} {}", format_rating(detail.vote_average)),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "{} \u{2022} {}",
                release_year(&release_date),
                format_runtime(detail.runtime)
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
    ];

    match detail.embed_url() {
        Some(embed) => {
            lines.push(field("Trailer", embed));
        }
        None => lines.push(Line::from(Span::styled(
            NO_TRAILER_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))),
    }
    if let Some(poster) = &detail.poster_url {
        lines.push(field("Poster", poster.clone()));
    }
    if let Some(backdrop) = &detail.backdrop_url {
        lines.push(field("Backdrop", backdrop.clone()));
    }
    lines.push(Line::default());

    lines.push(Line::from(
        detail
            .genres
            .iter()
            .map(|g| {
                Span::styled(
                    format!(" {g} "),
                    Style::default().fg(Color::White).bg(Color::Magenta),
                )
            })
            .flat_map(|span| [span, Span::raw(" ")])
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::default());
    lines.push(Line::from(detail.overview.clone()));
    lines.push(Line::default());

    lines.push(field("Release Date", release_date));
    lines.push(field("Countries", join_names(&detail.countries)));
    lines.push(field("Status", detail.status.clone().unwrap_or_default()));
    lines.push(field("Languages", join_names(&detail.languages)));
    lines.push(field("Budget", format_money(detail.budget)));
    lines.push(field("Revenue", format_money(detail.revenue)));
    lines.push(field("Tagline", detail.tagline.clone()));
    lines.push(field("Production", join_names(&detail.production_companies)));

    if let Some(homepage) = &detail.homepage {
        lines.push(Line::default());
        lines.push(field("Homepage", homepage.clone()));
    }

    lines
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &DetailState) {
    let mut hints = String::from("Esc/b: back  \u{2191}\u{2193}/j/k: scroll");
    if let Some(detail) = state.detail() {
        if detail.trailer_url.is_some() {
            hints.push_str("  o: trailer");
        }
        if detail.homepage.is_some() {
            hints.push_str("  h: homepage");
        }
    }
    hints.push_str("  q: quit");

    let footer = Paragraph::new(hints).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
