//! Waveform strip under the mandala.
//!
//! One trace of the most recent mono output. The trace takes the color of
//! the analyser band carrying the most energy, so a low entrainment
//! carrier, a mid-heavy step, and ambience hiss each read differently at a
//! glance. It dims to gray while the engine is silent, and the title
//! carries a peak meter in dBFS.

use attune::player::PlayerSnapshot;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Peaks below this floor render as the idle gray trace.
const SILENCE_FLOOR: f32 = 1e-4;

/// Trace color per analyser band: bass, mid, treble.
const BAND_COLORS: [Color; 3] = [Color::Magenta, Color::Cyan, Color::White];

pub fn render_waveform(
    frame: &mut Frame,
    area: Rect,
    audio_buffer: &[f32],
    snapshot: &PlayerSnapshot,
) {
    let peak = audio_buffer.iter().fold(0.0f32, |m, s| m.max(s.abs()));

    let block = Block::default()
        .title(format!(" Waveform  peak {} ", format_peak(peak)))
        .borders(Borders::ALL);

    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let x = i as f64 / audio_buffer.len().max(1) as f64;
            (x, sample as f64)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(trace_color(snapshot, peak)))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

/// Dominant-band color while sound is playing, gray when silent or stopped.
fn trace_color(snapshot: &PlayerSnapshot, peak: f32) -> Color {
    if !snapshot.playing || peak < SILENCE_FLOOR {
        return Color::DarkGray;
    }
    let dominant = snapshot
        .band_levels
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    BAND_COLORS[dominant]
}

fn format_peak(peak: f32) -> String {
    if peak < SILENCE_FLOOR {
        return "-inf dB".to_string();
    }
    format!("{:+.1} dB", 20.0 * peak.log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_snapshot(bands: [f32; 3]) -> PlayerSnapshot {
        PlayerSnapshot {
            playing: true,
            band_levels: bands,
            ..Default::default()
        }
    }

    #[test]
    fn stopped_or_silent_trace_is_gray() {
        let stopped = PlayerSnapshot::default();
        assert_eq!(trace_color(&stopped, 0.5), Color::DarkGray);

        // Playing but the buffer is silent (e.g. right after a pause fade).
        let playing = playing_snapshot([0.4, 0.1, 0.0]);
        assert_eq!(trace_color(&playing, 0.0), Color::DarkGray);
    }

    #[test]
    fn trace_takes_the_dominant_band_color() {
        let bass = playing_snapshot([0.8, 0.1, 0.1]);
        assert_eq!(trace_color(&bass, 0.5), BAND_COLORS[0]);

        let mid = playing_snapshot([0.1, 0.9, 0.2]);
        assert_eq!(trace_color(&mid, 0.5), BAND_COLORS[1]);

        let treble = playing_snapshot([0.1, 0.2, 0.7]);
        assert_eq!(trace_color(&treble, 0.5), BAND_COLORS[2]);
    }

    #[test]
    fn peak_meter_formats_dbfs() {
        assert_eq!(format_peak(1.0), "+0.0 dB");
        assert_eq!(format_peak(0.5), "-6.0 dB");
        assert_eq!(format_peak(0.0), "-inf dB");
    }
}
