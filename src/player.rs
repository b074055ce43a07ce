//! Player controller.
//!
//! The single entry point the UI talks to. It resolves catalog ids, drives
//! the [`MixEngine`], walks guided sessions through the [`SessionSequencer`],
//! and runs the [`BreathingPacer`]. All operations follow the same policy as
//! the engine: an unresolvable id or an operation out of context is a quiet
//! no-op, never a panic.

use std::sync::Arc;

use crate::breath::BreathingPacer;
use crate::catalog::{Catalog, Frequency, PlayableItem, SoundGenerationMode, Step};
use crate::engine::{LayerSnapshot, MixEngine, Slot};
use crate::session::{SequencerEvent, SessionSequencer};

/// Read-only view of the whole player for one UI frame.
#[derive(Debug, Clone, Default)]
pub struct PlayerSnapshot {
    pub playing: bool,
    pub paused: bool,
    pub item_id: Option<String>,
    pub item_name: Option<String>,
    pub layers: [LayerSnapshot; 3],
    pub spatial_enabled: bool,
    pub timer_remaining_secs: Option<f64>,
    pub band_levels: [f32; 3],
    pub session: Option<SessionView>,
    pub breath: Option<BreathView>,
}

#[derive(Debug, Clone)]
pub struct SessionView {
    pub name: String,
    pub step_index: usize,
    pub step_count: usize,
    pub step_title: String,
    pub step_elapsed_secs: f64,
    pub step_duration_secs: f64,
    pub total_elapsed_secs: f64,
    pub total_duration_secs: f64,
}

#[derive(Debug, Clone)]
pub struct BreathView {
    pub pattern_name: String,
    pub phase_name: String,
    pub progress: f64,
    pub countdown_secs: u64,
}

pub struct Player {
    catalog: Arc<Catalog>,
    engine: MixEngine,
    sequencer: Option<SessionSequencer>,
    pacer: Option<BreathingPacer>,
}

impl Player {
    pub fn new(catalog: Arc<Catalog>, sample_rate: f32) -> Self {
        Self {
            catalog,
            engine: MixEngine::new(sample_rate),
            sequencer: None,
            pacer: None,
        }
    }

    // --- Item playback --------------------------------------------------

    /// Play a single frequency. `mode` of `None` means the catalog default;
    /// a mode the entry does not support is rejected as a no-op.
    pub fn play_frequency(&mut self, id: &str, mode: Option<SoundGenerationMode>) {
        let catalog = Arc::clone(&self.catalog);
        let Some(frequency) = catalog.frequency(id) else {
            return;
        };
        let mode = mode.unwrap_or(frequency.default_mode);
        if !frequency.supports_mode(mode) {
            return;
        }

        self.prepare_item_switch(id);
        self.sequencer = None;
        self.engine.start_playback(
            PlayableItem::Frequency { id: id.to_string() },
            (frequency, mode),
            None,
            None,
        );
    }

    /// Play a guided session from its first step. Modes come from each
    /// frequency's catalog default; the session data never chooses a mode.
    pub fn play_session(&mut self, id: &str) {
        let catalog = Arc::clone(&self.catalog);
        let Some(session) = catalog.session(id) else {
            return;
        };
        let Some(first_step) = session.steps.first() else {
            return;
        };
        let Some((main, layer2, layer3)) = Self::resolve_step(&catalog, first_step) else {
            return;
        };

        self.prepare_item_switch(id);
        self.engine.start_playback(
            PlayableItem::Session { id: id.to_string() },
            main,
            layer2,
            layer3,
        );
        if self.engine.currently_playing_item().is_some() {
            self.sequencer = Some(SessionSequencer::start(session.clone()));
        }
    }

    /// Switching to a different item fully stops the previous one,
    /// including its sequencer, and clears transient guide state.
    fn prepare_item_switch(&mut self, new_id: &str) {
        let changed = self
            .engine
            .currently_playing_item()
            .is_some_and(|item| item.id() != new_id);
        self.engine.stop();
        self.sequencer = None;
        if changed {
            self.pacer = None;
        }
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn resume(&mut self) {
        self.engine.resume();
    }

    /// Stops playback and the session walk. The breathing pacer keeps
    /// running; it has its own stop.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.sequencer = None;
    }

    // --- Layers and mix -------------------------------------------------

    pub fn toggle_layer2(&mut self, frequency_id: Option<&str>) {
        let catalog = Arc::clone(&self.catalog);
        match frequency_id {
            None => self.engine.toggle_layer2(None),
            Some(id) => {
                if let Some(frequency) = catalog.frequency(id) {
                    self.engine
                        .toggle_layer2(Some((frequency, frequency.default_mode)));
                }
            }
        }
    }

    pub fn toggle_layer3(&mut self, frequency_id: Option<&str>) {
        let catalog = Arc::clone(&self.catalog);
        match frequency_id {
            None => self.engine.toggle_layer3(None),
            Some(id) => {
                if let Some(frequency) = catalog.frequency(id) {
                    self.engine
                        .toggle_layer3(Some((frequency, frequency.default_mode)));
                }
            }
        }
    }

    pub fn set_main_volume(&mut self, volume: i32) {
        self.engine.set_main_volume(volume);
    }

    pub fn set_layer2_volume(&mut self, volume: i32) {
        self.engine.set_layer2_volume(volume);
    }

    pub fn set_layer3_volume(&mut self, volume: i32) {
        self.engine.set_layer3_volume(volume);
    }

    pub fn set_timer(&mut self, duration_secs: f64) {
        self.engine.set_timer(duration_secs);
    }

    pub fn set_8d_enabled(&mut self, enabled: bool) {
        self.engine.set_8d_enabled(enabled);
    }

    pub fn set_panning_speed(&mut self, speed: i32) {
        self.engine.set_panning_speed(speed);
    }

    pub fn set_panning_depth(&mut self, depth: i32) {
        self.engine.set_panning_depth(depth);
    }

    // --- Breathing ------------------------------------------------------

    /// Start the breathing guide on a catalog pattern. Replaces any running
    /// pattern. Unknown id is a no-op.
    pub fn start_breathing(&mut self, pattern_id: &str) {
        let Some(pattern) = self.catalog.pattern(pattern_id) else {
            return;
        };
        let mut pacer = BreathingPacer::new(pattern.clone());
        pacer.start();
        self.pacer = Some(pacer);
    }

    pub fn stop_breathing(&mut self) {
        self.pacer = None;
    }

    // --- Clocks ---------------------------------------------------------

    /// Advance all wall-clock state: the engine clock (playback timer), the
    /// session sequencer, and the breathing pacer. Called on the UI tick
    /// regardless of pause state; pause stops sound, not time.
    pub fn tick(&mut self, dt_secs: f64) {
        self.engine.tick(dt_secs);

        // The timer may have auto-stopped the engine mid-session.
        if self.engine.currently_playing_item().is_none() {
            self.sequencer = None;
        }

        let catalog = Arc::clone(&self.catalog);
        if let Some(sequencer) = self.sequencer.as_mut() {
            for event in sequencer.tick(dt_secs) {
                match event {
                    SequencerEvent::StepChanged(index) => {
                        let step = &sequencer.session().steps[index];
                        if let Some((main, layer2, layer3)) = Self::resolve_step(&catalog, step) {
                            self.engine.apply_step(main, layer2, layer3);
                        }
                    }
                    SequencerEvent::Finished => {
                        self.engine.stop();
                    }
                }
            }
            if !sequencer.is_running() {
                self.sequencer = None;
            }
        }

        if let Some(pacer) = self.pacer.as_mut() {
            pacer.tick(dt_secs);
        }
    }

    /// Render one stereo block. Thin passthrough for the audio callback.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.engine.render(left, right);
    }

    // --- Observation ----------------------------------------------------

    pub fn engine(&self) -> &MixEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut MixEngine {
        &mut self.engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let item = self.engine.currently_playing_item();
        let item_name = item.and_then(|item| match item {
            PlayableItem::Frequency { id } => {
                self.catalog.frequency(id).map(|f| f.name.clone())
            }
            PlayableItem::Session { id } => self.catalog.session(id).map(|s| s.name.clone()),
        });

        PlayerSnapshot {
            playing: self.engine.is_playing(),
            paused: self.engine.is_paused(),
            item_id: item.map(|item| item.id().to_string()),
            item_name,
            layers: [
                self.engine.layer_snapshot(Slot::Main),
                self.engine.layer_snapshot(Slot::Layer2),
                self.engine.layer_snapshot(Slot::Layer3),
            ],
            spatial_enabled: self.engine.is_8d_enabled(),
            timer_remaining_secs: self.engine.timer_remaining_secs(),
            band_levels: self.engine.band_levels(),
            session: self.session_view(),
            breath: self.breath_view(),
        }
    }

    fn session_view(&self) -> Option<SessionView> {
        let sequencer = self.sequencer.as_ref()?;
        let index = sequencer.current_step_index()?;
        let session = sequencer.session();
        let step = &session.steps[index];
        Some(SessionView {
            name: session.name.clone(),
            step_index: index,
            step_count: session.steps.len(),
            step_title: step.title.clone(),
            step_elapsed_secs: sequencer.step_elapsed_secs().unwrap_or(0.0),
            step_duration_secs: step.duration_secs,
            total_elapsed_secs: sequencer.total_elapsed_secs(),
            total_duration_secs: session.total_duration_secs(),
        })
    }

    fn breath_view(&self) -> Option<BreathView> {
        let pacer = self.pacer.as_ref()?;
        let phase = pacer.current_phase()?;
        Some(BreathView {
            pattern_name: pacer.pattern().name.clone(),
            phase_name: phase.name.clone(),
            progress: pacer.phase_progress().unwrap_or(0.0),
            countdown_secs: pacer.phase_countdown_secs().unwrap_or(0),
        })
    }

    /// Resolve a session step's frequency ids against the catalog. The main
    /// id must resolve; missing secondary ids simply leave that layer out.
    fn resolve_step<'a>(
        catalog: &'a Catalog,
        step: &Step,
    ) -> Option<(
        (&'a Frequency, SoundGenerationMode),
        Option<(&'a Frequency, SoundGenerationMode)>,
        Option<(&'a Frequency, SoundGenerationMode)>,
    )> {
        let main = catalog.frequency(&step.main)?;
        let layer2 = step
            .layer2
            .as_deref()
            .and_then(|id| catalog.frequency(id))
            .map(|f| (f, f.default_mode));
        let layer3 = step
            .layer3
            .as_deref()
            .and_then(|id| catalog.frequency(id))
            .map(|f| (f, f.default_mode));
        Some(((main, main.default_mode), layer2, layer3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn player() -> Player {
        Player::new(Arc::new(Catalog::builtin()), SAMPLE_RATE)
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut player = player();
        player.play_frequency("nope", None);
        player.play_session("nope");
        player.toggle_layer2(Some("nope"));
        player.start_breathing("nope");
        assert!(!player.is_playing());
        assert!(player.snapshot().breath.is_none());
    }

    #[test]
    fn unsupported_mode_is_rejected() {
        let mut player = player();
        // Pure tones carry no beat; binaural is not in their mode list.
        player.play_frequency("432hz", Some(SoundGenerationMode::Binaural));
        assert!(!player.is_playing());

        player.play_frequency("432hz", None);
        assert!(player.is_playing());
    }

    #[test]
    fn session_advances_and_reconfigures_layers() {
        let mut player = player();
        player.play_session("deep-focus");
        assert!(player.is_playing());

        let view = player.snapshot().session.unwrap();
        assert_eq!(view.step_index, 0);
        assert_eq!(view.total_duration_secs, 1800.0);

        // Into step 1 (300 s boundary) with 10 s of overshoot.
        player.tick(310.0);
        let view = player.snapshot().session.unwrap();
        assert_eq!(view.step_index, 1);
        assert!((view.step_elapsed_secs - 10.0).abs() < 1e-9);
        assert!((view.total_elapsed_secs - 310.0).abs() < 1e-9);
        assert!(player.is_playing());
    }

    #[test]
    fn session_completion_stops_the_engine() {
        let mut player = player();
        player.play_session("wind-down"); // 600 + 900
        player.tick(1_501.0);
        assert!(!player.is_playing());
        assert!(player.snapshot().session.is_none());
        assert_eq!(player.engine().active_source_count(), 0);
    }

    #[test]
    fn item_change_stops_the_pacer_but_stop_does_not() {
        let mut player = player();
        player.play_frequency("alpha", None);
        player.start_breathing("box");
        assert!(player.snapshot().breath.is_some());

        // Engine stop leaves the guide alone.
        player.stop();
        assert!(player.snapshot().breath.is_some());

        // A different item clears transient guide state.
        player.play_frequency("alpha", None);
        player.start_breathing("box");
        player.play_frequency("theta", None);
        assert!(player.snapshot().breath.is_none());
    }

    #[test]
    fn pacer_runs_while_nothing_plays() {
        let mut player = player();
        player.start_breathing("box");
        player.tick(5.0);
        let breath = player.snapshot().breath.unwrap();
        assert_eq!(breath.phase_name, "hold");
    }

    #[test]
    fn timer_expiry_mid_session_clears_the_sequencer() {
        let mut player = player();
        player.play_session("deep-focus");
        player.set_timer(30.0);
        player.tick(31.0);
        assert!(!player.is_playing());
        assert!(player.snapshot().session.is_none());
    }

    #[test]
    fn snapshot_reflects_layers_and_volumes() {
        let mut player = player();
        player.play_frequency("alpha", None);
        player.toggle_layer2(Some("rain"));
        player.set_layer2_volume(70);

        let snapshot = player.snapshot();
        assert!(snapshot.layers[0].active);
        assert!(snapshot.layers[1].active);
        assert_eq!(snapshot.layers[1].volume, 70);
        assert_eq!(snapshot.item_id.as_deref(), Some("alpha"));
    }
}
