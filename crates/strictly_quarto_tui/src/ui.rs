//! Stateless UI rendering for Quarto.
//!
//! Board cells and picker slots are drawn at the regions of the app's
//! [`InputLayout`], the same regions clicks are translated against.

use crate::app::{App, format_duration};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_quarto::{Channel, Coord, Phase, Piece, Player, Region};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let title = Paragraph::new("Strictly Quarto")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(title, Rect::new(area.x, area.y, area.width, 1).intersection(area));

    draw_board(frame, app);
    draw_picker(frame, app);
    draw_side_panel(frame, app);
}

fn draw_board(frame: &mut Frame, app: &App) {
    let controller = app.controller();
    let placing = controller.human_phase() == Some(Phase::PlacePiece);
    let winning = app
        .winning_group()
        .map(|group| group.kind.cells().to_vec())
        .unwrap_or_default();

    for coord in Coord::all() {
        let Some(rect) = to_rect(app.layout().cell_region(coord), frame.area()) else {
            continue;
        };
        let piece = controller.board().get(coord);
        let border = if winning.contains(&coord) {
            Color::Green
        } else if placing && piece.is_none() {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        draw_slot(frame, rect, piece, border);
    }
}

fn draw_picker(frame: &mut Frame, app: &App) {
    let controller = app.controller();
    let selecting = controller.human_phase() == Some(Phase::SelectPiece);
    let border = if selecting { Color::Yellow } else { Color::DarkGray };

    for (position, piece) in controller.available().iter().enumerate() {
        let Some(rect) = to_rect(app.layout().picker_slot_region(position), frame.area()) else {
            continue;
        };
        draw_slot(frame, rect, Some(piece), border);
    }
}

fn draw_slot(frame: &mut Frame, area: Rect, piece: Option<Piece>, border: Color) {
    let text = piece.map(|p| p.label()).unwrap_or_default();
    let style = piece.map(piece_style).unwrap_or_default();
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(paragraph, area);
}

/// Colour follows the first attribute, weight the second.
fn piece_style(piece: Piece) -> Style {
    let color = if piece.attribute(Channel::Energy) == 0 {
        Color::Blue
    } else {
        Color::Red
    };
    let style = Style::default().fg(color);
    if piece.attribute(Channel::Perception) == 0 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn draw_side_panel(frame: &mut Frame, app: &App) {
    let controller = app.controller();
    let board = app.layout().board;
    let x = board.x.saturating_add(board.width).saturating_add(2);
    let height = app.layout().picker.y + app.layout().picker.height - board.y;
    let width = u32::from(frame.area().width).saturating_sub(x);
    let Some(area) = to_rect(Region::new(x, board.y, width, height), frame.area()) else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            controller.status_line(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let selected = match controller.selected_piece() {
        Some(piece) => Span::styled(piece.label(), piece_style(piece)),
        None => Span::raw("-"),
    };
    lines.push(Line::from(vec![Span::raw("Selected: "), selected]));
    lines.push(Line::from(""));

    for player in [Player::One, Player::Two] {
        lines.push(Line::from(format!(
            "{} ({}): {}",
            player,
            controller.seat(player).name(),
            format_duration(controller.elapsed(player)),
        )));
    }

    if let Some(group) = app.winning_group() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Won on {}", group),
            Style::default().fg(Color::Green),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Click a piece or cell to play",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "r: restart  q: quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Clips a layout region to the frame, `None` if nothing is visible.
fn to_rect(region: Region, area: Rect) -> Option<Rect> {
    let clamp = |value: u32| u16::try_from(value).unwrap_or(u16::MAX);
    let rect = Rect::new(
        clamp(region.x),
        clamp(region.y),
        clamp(region.width),
        clamp(region.height),
    )
    .intersection(area);
    (!rect.is_empty()).then_some(rect)
}
