//! TUI rendering: transport bar, mandala visualizer, waveform strip, and
//! the session/breathing side panel.

pub mod mandala;
mod transport;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use attune::catalog::Catalog;
use attune::player::PlayerSnapshot;

use mandala::MandalaState;
use transport::render_transport;
use waveform::render_waveform;

pub fn render(
    frame: &mut Frame,
    catalog: &Catalog,
    snapshot: &PlayerSnapshot,
    audio_buffer: &[f32],
    mandala: &MandalaState,
) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Min(12),   // Visualizer + side panel
            Constraint::Length(8), // Waveform
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, rows[0], snapshot);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    mandala::render_mandala(frame, middle[0], mandala);
    render_side_panel(frame, middle[1], catalog, snapshot);

    render_waveform(frame, rows[2], audio_buffer, snapshot);

    let help = Paragraph::new(
        " [Space] Play/Pause  [S] Stop  [1-9] Frequency  [G] Session  [B] Breathe  [8] Spatial  [T] Timer  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[3]);
}

fn render_side_panel(frame: &mut Frame, area: Rect, catalog: &Catalog, snapshot: &PlayerSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Layers
            Constraint::Length(5), // Session
            Constraint::Length(4), // Breathing
            Constraint::Min(4),    // Library
        ])
        .split(area);

    render_layers(frame, rows[0], snapshot);
    render_session(frame, rows[1], snapshot);
    render_breathing(frame, rows[2], snapshot);
    render_library(frame, rows[3], catalog, snapshot);
}

fn render_library(frame: &mut Frame, area: Rect, catalog: &Catalog, snapshot: &PlayerSnapshot) {
    let block = Block::default().title(" Library ").borders(Borders::ALL);

    let current = snapshot.item_id.as_deref();
    let mut lines: Vec<Line> = catalog
        .frequencies_sorted()
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, frequency)| {
            let selected = current == Some(frequency.id.as_str());
            let color = if selected { Color::Green } else { Color::White };
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(frequency.name.clone(), Style::default().fg(color)),
                Span::styled(
                    format!("  ({})", frequency.default_mode.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    for session in catalog.sessions_sorted() {
        let selected = current == Some(session.id.as_str());
        let color = if selected { Color::Green } else { Color::Cyan };
        lines.push(Line::from(vec![
            Span::styled(" [G] ", Style::default().fg(Color::DarkGray)),
            Span::styled(session.name.clone(), Style::default().fg(color)),
            Span::styled(
                format!("  ({})", format_duration(session.total_duration_secs())),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_layers(frame: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let block = Block::default().title(" Layers ").borders(Borders::ALL);

    let names = ["main", "layer2", "layer3"];
    let lines: Vec<Line> = snapshot
        .layers
        .iter()
        .zip(names)
        .map(|(layer, name)| {
            let (marker, color) = if layer.active {
                ("●", Color::Green)
            } else {
                ("○", Color::DarkGray)
            };
            let label = layer.frequency_id.as_deref().unwrap_or("-");
            let mode = layer
                .mode
                .map(|m| m.label().to_string())
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(color)),
                Span::styled(format!("{name:<7}"), Style::default().fg(Color::White)),
                Span::styled(format!("{label:<8}"), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{mode:<11}"), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("vol {:>3}", layer.volume), Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_session(frame: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let block = Block::default().title(" Session ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(session) = &snapshot.session else {
        let idle = Paragraph::new(" no session running")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(idle, inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", session.name),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "step {}/{}: {}",
                session.step_index + 1,
                session.step_count,
                session.step_title
            ),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let ratio = if session.total_duration_secs > 0.0 {
        (session.total_elapsed_secs / session.total_duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let remaining = (session.total_duration_secs - session.total_elapsed_secs).max(0.0);
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(format!("{} left", format_duration(remaining)))
        .gauge_style(Style::default().fg(Color::Green));
    frame.render_widget(gauge, rows[1]);
}

fn render_breathing(frame: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let block = Block::default().title(" Breathe ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(breath) = &snapshot.breath else {
        let idle = Paragraph::new(" guide off")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(idle, inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let header = Line::from(vec![
        Span::styled(
            format!(" {}  ", breath.pattern_name),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            breath.phase_name.to_uppercase(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  {}s", breath.countdown_secs),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let gauge = Gauge::default()
        .ratio(breath.progress.clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(Color::Blue));
    frame.render_widget(gauge, rows[1]);
}

pub(crate) fn format_duration(secs: f64) -> String {
    let total = secs.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
