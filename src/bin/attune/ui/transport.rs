//! Transport bar widget - item, play state, spatial flag, and timer.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use attune::player::PlayerSnapshot;

use super::format_duration;

pub fn render_transport(frame: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let block = Block::default().title(" attune ").borders(Borders::ALL);

    let (symbol, state, color) = if snapshot.playing {
        ("▶", "Playing", Color::Green)
    } else if snapshot.paused {
        ("⏸", "Paused", Color::Yellow)
    } else {
        ("■", "Stopped", Color::DarkGray)
    };

    let item = snapshot.item_name.as_deref().unwrap_or("nothing loaded");

    let mut spans = vec![
        Span::styled(format!(" {symbol} {state}  "), Style::default().fg(color)),
        Span::styled(item.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
    ];

    if snapshot.spatial_enabled {
        spans.push(Span::styled("8D ", Style::default().fg(Color::Magenta)));
    }
    if let Some(remaining) = snapshot.timer_remaining_secs {
        spans.push(Span::styled(
            format!("timer {}", format_duration(remaining)),
            Style::default().fg(Color::White),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
