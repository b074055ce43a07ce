//! Mandala visualizer widget.
//!
//! Four concentric ornamental rings, each rotating at its own fixed rate
//! (two clockwise, two counter-clockwise, so they never look locked) and
//! each breathing with one of the bass/mid/treble band intensities. The
//! band data already fades out through the analyser's idle decay, so the
//! rings settle gracefully after a stop instead of cutting to nothing.

use std::f64::consts::TAU;

use ratatui::{
    layout::Rect,
    style::Color,
    symbols,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

/// Per-frame rotation rate of each ring, radians. Negative is
/// counter-clockwise.
const RING_RATES: [f64; 4] = [0.010, -0.016, 0.023, -0.007];
/// Spoke counts give each ring a distinct geometry.
const RING_SPOKES: [usize; 4] = [6, 8, 12, 5];
/// Base radius of each ring before band modulation.
const RING_RADII: [f64; 4] = [0.30, 0.50, 0.70, 0.90];
/// Band index (bass/mid/treble) driving each ring.
const RING_BANDS: [usize; 4] = [0, 1, 2, 1];

const RING_COLORS: [Color; 4] = [Color::Magenta, Color::Cyan, Color::Blue, Color::Green];

/// Accumulated rotation angles, one per ring.
pub struct MandalaState {
    angles: [f64; 4],
    levels: [f32; 3],
}

impl MandalaState {
    pub fn new() -> Self {
        Self {
            angles: [0.0; 4],
            levels: [0.0; 3],
        }
    }

    /// Advance one animation frame with fresh band intensities.
    pub fn advance(&mut self, band_levels: &[f32; 3]) {
        self.levels = *band_levels;
        for (angle, rate) in self.angles.iter_mut().zip(RING_RATES) {
            *angle = (*angle + rate).rem_euclid(TAU);
        }
    }
}

impl Default for MandalaState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_mandala(frame: &mut Frame, area: Rect, state: &MandalaState) {
    let canvas = Canvas::default()
        .block(Block::default().title(" Mandala ").borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(|ctx| paint_rings(ctx, state));

    frame.render_widget(canvas, area);
}

fn paint_rings(ctx: &mut Context<'_>, state: &MandalaState) {
    for ring in 0..4 {
        let level = state.levels[RING_BANDS[ring]] as f64;
        // A silent band leaves a faint resting ring.
        let radius = RING_RADII[ring] * (0.55 + 0.45 * level);
        let angle = state.angles[ring];
        let spokes = RING_SPOKES[ring];
        let color = if level > 0.02 {
            RING_COLORS[ring]
        } else {
            Color::DarkGray
        };

        // Petals: chords between successive spoke points, plus a radial
        // spoke whose length follows the band.
        let mut previous: Option<(f64, f64)> = None;
        for i in 0..=spokes {
            let theta = angle + TAU * i as f64 / spokes as f64;
            let point = (radius * theta.cos(), radius * theta.sin());
            if let Some((px, py)) = previous {
                ctx.draw(&CanvasLine {
                    x1: px,
                    y1: py,
                    x2: point.0,
                    y2: point.1,
                    color,
                });
            }
            previous = Some(point);

            if i < spokes {
                let inner = radius * (1.0 - 0.35 * level);
                ctx.draw(&CanvasLine {
                    x1: inner * theta.cos(),
                    y1: inner * theta.sin(),
                    x2: point.0,
                    y2: point.1,
                    color,
                });
            }
        }
    }
}
