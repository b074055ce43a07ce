//! Application wiring: audio device, shared player state, event loop.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::{Consumer, RingBuffer};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use attune::catalog::Catalog;
use attune::player::{Player, PlayerSnapshot};
use attune::prefs::Preferences;
use attune::MAX_BLOCK_SIZE;

use crate::ui;

/// Samples shown in the waveform strip.
const VIS_BUFFER_SIZE: usize = 1024;
/// Ring capacity between the audio callback and the UI.
const AUDIO_RING_CAPACITY: usize = 8192;

pub struct App {
    player: Arc<Mutex<Player>>,
    catalog: Arc<Catalog>,
    prefs: Preferences,
    audio_rx: Consumer<f32>,
    /// Latest mono samples for the oscilloscope strip.
    audio_buffer: Vec<f32>,
    /// Rotation angles of the four mandala rings.
    pub mandala: ui::mandala::MandalaState,
    last_tick: Instant,
    should_quit: bool,
    // Keep the stream alive for the app's lifetime.
    _stream: cpal::Stream,
}

impl App {
    pub fn new() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let catalog = Arc::new(Catalog::builtin());
        let player = Arc::new(Mutex::new(Player::new(Arc::clone(&catalog), sample_rate)));
        let prefs = Preferences::load(prefs_path());

        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(AUDIO_RING_CAPACITY);

        let player_clone = Arc::clone(&player);
        let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut right = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let mut player = match player_clone.lock() {
                    Ok(player) => player,
                    Err(_) => {
                        data.fill(0.0);
                        return;
                    }
                };

                let total_frames = data.len() / channels.max(1);
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let (l, r) = (&mut left[..frames], &mut right[..frames]);
                    player.render(l, r);

                    let out_off = frames_written * channels;
                    for i in 0..frames {
                        let frame = &mut data[out_off + i * channels..out_off + (i + 1) * channels];
                        match channels {
                            1 => frame[0] = (l[i] + r[i]) * 0.5,
                            _ => {
                                frame[0] = l[i];
                                frame[1] = r[i];
                                for extra in frame.iter_mut().skip(2) {
                                    *extra = 0.0;
                                }
                            }
                        }
                        // Drop samples when the UI falls behind.
                        let _ = audio_tx.push((l[i] + r[i]) * 0.5);
                    }
                    frames_written += frames;
                }
            },
            |err| eprintln!("audio error: {err}"),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            player,
            catalog,
            prefs,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            mandala: ui::mandala::MandalaState::new(),
            last_tick: Instant::now(),
            should_quit: false,
            _stream: stream,
        })
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            let snapshot = self.advance_clocks();
            self.mandala.advance(&snapshot.band_levels);

            terminal.draw(|frame| {
                ui::render(frame, &self.catalog, &snapshot, &self.audio_buffer, &self.mandala)
            })?;

            // Non-blocking input at ~60 fps.
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Drive every wall-clock component by the real elapsed time and grab
    /// one coherent snapshot for the frame.
    fn advance_clocks(&mut self) -> PlayerSnapshot {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        let mut player = self.player.lock().expect("player lock");
        player.tick(dt);
        player.snapshot()
    }

    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }
        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let mut player = self.player.lock().expect("player lock");
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if player.snapshot().paused {
                    player.resume();
                } else if player.is_playing() {
                    player.pause();
                } else if let Some(frequency) = self.catalog.frequencies_sorted().first() {
                    let id = frequency.id.clone();
                    player.play_frequency(&id, None);
                }
            }
            KeyCode::Char('s') => player.stop(),
            // Number keys select from the sorted frequency list.
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(frequency) = self.catalog.frequencies_sorted().get(index) {
                    let id = frequency.id.clone();
                    player.play_frequency(&id, None);
                }
            }
            KeyCode::Char('g') => {
                if let Some(session) = self.catalog.sessions_sorted().first() {
                    let id = session.id.clone();
                    player.play_session(&id);
                }
            }
            KeyCode::Char('b') => {
                if player.snapshot().breath.is_some() {
                    player.stop_breathing();
                } else {
                    let pattern = self.prefs.breathing_pattern().to_string();
                    player.start_breathing(&pattern);
                }
            }
            KeyCode::Char('8') => {
                let enabled = player.snapshot().spatial_enabled;
                player.set_8d_enabled(!enabled);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let volume = player.snapshot().layers[0].volume as i32;
                player.set_main_volume(volume + 5);
            }
            KeyCode::Char('-') => {
                let volume = player.snapshot().layers[0].volume as i32;
                player.set_main_volume(volume - 5);
            }
            KeyCode::Char('t') => {
                // 15-minute sleep timer; press again to clear.
                if player.snapshot().timer_remaining_secs.is_some() {
                    player.set_timer(0.0);
                } else {
                    player.set_timer(15.0 * 60.0);
                }
            }
            _ => {}
        }
    }
}

fn prefs_path() -> std::path::PathBuf {
    std::env::var_os("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".config/attune/prefs.json")
}
