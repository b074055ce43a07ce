//! The mix engine - up to three concurrent tone layers, spatial panning,
//! the master analyser, and the playback timer.

/*
Ownership And Ordering
======================

The engine owns everything audible: three layer slots (main + two optional),
one spatial panner shared by main/layer-2, the master pause gain, and the
analyser. All mutation funnels through the operation set below; the UI only
ever sees read-only snapshots.

Two ordering rules hold everywhere:

1. TEARDOWN BEFORE SETUP. `start_playback` destroys every source of the
   previous item before creating any source of the next one. There is never
   a window where both items sound, and repeated start/stop cycles cannot
   leak sources. The lifecycle event log exists so tests can verify exactly
   this (every destroy of the old serials precedes every create of the new).

2. CONTROL OPS NEVER FAIL. Every operation called with no item loaded, with
   an unresolvable configuration, or on an already-stopped engine is a
   defensive no-op. The UI guards most of these already; the engine must
   not crash on the ones it misses.

Clocks: the engine has no thread and no timers of its own. The audio
callback pulls `render`, and the host calls `tick` with wall-clock deltas.
`tick` advances even while paused - pause silences the output but does not
stop time, so a playback timer set for "now + 10 minutes" fires 10 minutes
later regardless of how often the listener paused (the deadline is
absolute, not a pausable countdown).
*/

pub mod analyser;
pub mod layer;
pub mod spatial;

use std::collections::VecDeque;

use crate::catalog::{Frequency, PlayableItem, SoundGenerationMode};
use crate::dsp::pan::sweep_gains;
use crate::dsp::smoother::Smoother;
use crate::MAX_BLOCK_SIZE;
use analyser::Analyser;
use layer::{config_is_playable, Layer};
use spatial::SpatialPanner;

/// Pause/resume master fade.
const PAUSE_RAMP_SECS: f32 = 0.03;
/// Most recent lifecycle events kept for diagnostics.
const EVENT_LOG_CAPACITY: usize = 256;

/// The three mix slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Main = 0,
    Layer2 = 1,
    Layer3 = 2,
}

impl Slot {
    const ALL: [Slot; 3] = [Slot::Main, Slot::Layer2, Slot::Layer3];
}

/// Source lifecycle events, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    SourceCreated { slot: Slot, serial: u64 },
    SourceDestroyed { slot: Slot, serial: u64 },
}

/// Read-only view of one slot for the UI.
#[derive(Debug, Clone, Default)]
pub struct LayerSnapshot {
    pub active: bool,
    pub frequency_id: Option<String>,
    pub mode: Option<SoundGenerationMode>,
    pub volume: u8,
}

/// A layer request: resolved frequency plus presentation mode.
pub type LayerConfig<'a> = (&'a Frequency, SoundGenerationMode);

pub struct MixEngine {
    sample_rate: f32,
    slots: [Layer; 3],
    /// Per-slot volumes, persisted across items.
    volumes: [u8; 3],
    current_item: Option<PlayableItem>,
    paused: bool,
    spatial: SpatialPanner,
    analyser: Analyser,
    /// Master pause/resume gain.
    master: Smoother,
    /// Accumulated wall-clock seconds (advances even while paused).
    clock_secs: f64,
    /// Absolute auto-stop deadline on the engine clock.
    timer_deadline: Option<f64>,
    next_serial: u64,
    events: VecDeque<GraphEvent>,
    scratch_l: Vec<f32>,
    scratch_r: Vec<f32>,
    pan_positions: Vec<f32>,
    mono: Vec<f32>,
}

impl MixEngine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            slots: Default::default(),
            volumes: [80, 50, 50],
            current_item: None,
            paused: false,
            spatial: SpatialPanner::new(),
            analyser: Analyser::new(),
            master: Smoother::new(1.0),
            clock_secs: 0.0,
            timer_deadline: None,
            next_serial: 1,
            events: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            scratch_l: vec![0.0; MAX_BLOCK_SIZE],
            scratch_r: vec![0.0; MAX_BLOCK_SIZE],
            pan_positions: vec![0.0; MAX_BLOCK_SIZE],
            mono: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    // --- Playback operations -------------------------------------------

    /// Load `item` and start its layers. Any previous playback is fully
    /// torn down first. Rejected (no-op, previous item keeps playing) when
    /// the main configuration cannot produce a signal.
    pub fn start_playback(
        &mut self,
        item: PlayableItem,
        main: LayerConfig,
        layer2: Option<LayerConfig>,
        layer3: Option<LayerConfig>,
    ) {
        let (main_frequency, main_mode) = main;
        if !config_is_playable(main_frequency, main_mode) {
            return;
        }

        // Old sources down before any new source exists.
        self.teardown_all_layers();
        self.timer_deadline = None;

        self.create_layer(Slot::Main, main_frequency, main_mode);
        if let Some((frequency, mode)) = layer2 {
            self.create_layer(Slot::Layer2, frequency, mode);
        }
        if let Some((frequency, mode)) = layer3 {
            self.create_layer(Slot::Layer3, frequency, mode);
        }

        self.current_item = Some(item);
        self.paused = false;
        self.master.ramp_to(1.0, PAUSE_RAMP_SECS, self.sample_rate);
    }

    /// Suspend sound production without destroying layers. Idempotent.
    pub fn pause(&mut self) {
        if self.current_item.is_none() || self.paused {
            return;
        }
        self.paused = true;
        self.master.ramp_to(0.0, PAUSE_RAMP_SECS, self.sample_rate);
    }

    /// Continue from the held phase. Idempotent.
    pub fn resume(&mut self) {
        if self.current_item.is_none() || !self.paused {
            return;
        }
        self.paused = false;
        self.master.ramp_to(1.0, PAUSE_RAMP_SECS, self.sample_rate);
    }

    /// Full teardown. The analyser stays alive and decays to silence.
    /// Idempotent - stopping a stopped engine is a no-op.
    pub fn stop(&mut self) {
        if self.current_item.is_none() {
            return;
        }
        self.teardown_all_layers();
        self.current_item = None;
        self.paused = false;
        self.timer_deadline = None;
        self.master.snap(1.0);
    }

    /// Add, replace, or remove layer 2 live. Never touches the main layer.
    pub fn toggle_layer2(&mut self, config: Option<LayerConfig>) {
        self.toggle_secondary(Slot::Layer2, config);
    }

    /// Add, replace, or remove layer 3 live. Never touches the main layer.
    pub fn toggle_layer3(&mut self, config: Option<LayerConfig>) {
        self.toggle_secondary(Slot::Layer3, config);
    }

    fn toggle_secondary(&mut self, slot: Slot, config: Option<LayerConfig>) {
        // Secondary layers only exist alongside an audible main layer.
        if self.current_item.is_none() || !self.slots[Slot::Main as usize].is_active() {
            return;
        }
        match config {
            None => self.slots[slot as usize].begin_release(self.sample_rate),
            Some((frequency, mode)) => {
                if self.slots[slot as usize].source_count() > 0 {
                    // Live or mid-release: replace through the fade so the
                    // old signal is never cut at audible gain. Invalid
                    // target keeps the old layer (or lets the release
                    // finish).
                    self.slots[slot as usize].retune(frequency, mode, self.sample_rate);
                } else {
                    self.create_layer(slot, frequency, mode);
                }
            }
        }
    }

    /// Reconfigure all three slots for a new session step without touching
    /// item, timer, or pause state. Active slots retune; absent ones are
    /// released; new ones fade in.
    pub fn apply_step(
        &mut self,
        main: LayerConfig,
        layer2: Option<LayerConfig>,
        layer3: Option<LayerConfig>,
    ) {
        if self.current_item.is_none() {
            return;
        }

        let (main_frequency, main_mode) = main;
        if self.slots[Slot::Main as usize].is_active() {
            self.slots[Slot::Main as usize].retune(main_frequency, main_mode, self.sample_rate);
        } else {
            self.destroy_layer(Slot::Main);
            self.create_layer(Slot::Main, main_frequency, main_mode);
        }
        self.toggle_secondary(Slot::Layer2, layer2);
        self.toggle_secondary(Slot::Layer3, layer3);
    }

    // --- Volumes --------------------------------------------------------

    pub fn set_main_volume(&mut self, volume: i32) {
        self.set_volume(Slot::Main, volume);
    }

    pub fn set_layer2_volume(&mut self, volume: i32) {
        self.set_volume(Slot::Layer2, volume);
    }

    pub fn set_layer3_volume(&mut self, volume: i32) {
        self.set_volume(Slot::Layer3, volume);
    }

    fn set_volume(&mut self, slot: Slot, volume: i32) {
        if self.current_item.is_none() {
            return;
        }
        let clamped = volume.clamp(0, 100) as u8;
        self.volumes[slot as usize] = clamped;
        self.slots[slot as usize].set_volume(clamped, self.sample_rate);
    }

    // --- Timer ----------------------------------------------------------

    /// Schedule an automatic stop `duration_secs` from now on the engine's
    /// wall clock. Zero (or negative) clears any existing timer. The
    /// deadline is absolute: pause/resume do not move it.
    pub fn set_timer(&mut self, duration_secs: f64) {
        if self.current_item.is_none() {
            return;
        }
        self.timer_deadline = if duration_secs > 0.0 {
            Some(self.clock_secs + duration_secs)
        } else {
            None
        };
    }

    pub fn timer_remaining_secs(&self) -> Option<f64> {
        self.timer_deadline
            .map(|deadline| (deadline - self.clock_secs).max(0.0))
    }

    /// Advance the engine wall clock. Called by the host regardless of
    /// pause state. A deadline already in the past fires immediately.
    pub fn tick(&mut self, dt_secs: f64) {
        self.clock_secs += dt_secs.max(0.0);
        if let Some(deadline) = self.timer_deadline {
            if self.current_item.is_some() && self.clock_secs >= deadline {
                self.stop();
            }
        }
    }

    pub fn clock_secs(&self) -> f64 {
        self.clock_secs
    }

    // --- Spatial --------------------------------------------------------

    pub fn set_8d_enabled(&mut self, enabled: bool) {
        if self.current_item.is_none() {
            return;
        }
        self.spatial.set_enabled(enabled);
    }

    pub fn set_panning_speed(&mut self, speed: i32) {
        if self.current_item.is_none() {
            return;
        }
        self.spatial.set_speed(speed.clamp(0, 100) as u8);
    }

    pub fn set_panning_depth(&mut self, depth: i32) {
        if self.current_item.is_none() {
            return;
        }
        self.spatial.set_depth(depth.clamp(0, 100) as u8);
    }

    pub fn is_8d_enabled(&self) -> bool {
        self.spatial.is_enabled()
    }

    // --- Rendering ------------------------------------------------------

    /// Render one stereo block. This is the only place audio is produced;
    /// it also completes deferred layer work (retune swaps, release
    /// teardowns) and feeds the analyser.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        left.fill(0.0);
        right.fill(0.0);

        if self.current_item.is_none() {
            self.analyser.process(false);
            return;
        }

        let silent = self.paused && self.master.is_settled() && self.master.current() == 0.0;
        if silent {
            // Sources hold their phase; nothing advances while paused.
            self.analyser.process(false);
            return;
        }

        let frames_total = left.len();
        let mut offset = 0;
        while offset < frames_total {
            let frames = (frames_total - offset).min(MAX_BLOCK_SIZE);
            let (l_out, r_out) = (
                &mut left[offset..offset + frames],
                &mut right[offset..offset + frames],
            );

            self.spatial
                .render_positions(&mut self.pan_positions[..frames], self.sample_rate);

            for slot in Slot::ALL {
                if self.slots[slot as usize].source_count() == 0 {
                    continue;
                }
                let scratch_l = &mut self.scratch_l[..frames];
                let scratch_r = &mut self.scratch_r[..frames];
                self.slots[slot as usize].render(scratch_l, scratch_r, self.sample_rate);

                // Layer 3 is deliberately excluded from the spatial sweep
                // and always stays centered.
                let swept = slot != Slot::Layer3 && self.spatial.is_enabled();
                if swept {
                    for i in 0..frames {
                        let (gl, gr) = sweep_gains(self.pan_positions[i]);
                        l_out[i] += scratch_l[i] * gl;
                        r_out[i] += scratch_r[i] * gr;
                    }
                } else {
                    for i in 0..frames {
                        l_out[i] += scratch_l[i];
                        r_out[i] += scratch_r[i];
                    }
                }
            }

            // Master pause gain, then the analyser tap.
            for i in 0..frames {
                let g = self.master.next();
                l_out[i] *= g;
                r_out[i] *= g;
                self.mono[i] = (l_out[i] + r_out[i]) * 0.5;
            }
            self.analyser.write(&self.mono[..frames]);

            offset += frames;
        }

        self.finish_deferred_layer_work();
        self.analyser.process(true);
    }

    /// Complete retune swaps and release teardowns whose fades settled
    /// during the block just rendered.
    fn finish_deferred_layer_work(&mut self) {
        for slot in Slot::ALL {
            if self.slots[slot as usize].release_finished() {
                self.destroy_layer(slot);
                continue;
            }
            let new_serial = self.next_serial;
            if let Some(old_serial) =
                self.slots[slot as usize].try_swap_pending(new_serial, self.sample_rate)
            {
                self.next_serial += 1;
                self.push_event(GraphEvent::SourceDestroyed { slot, serial: old_serial });
                self.push_event(GraphEvent::SourceCreated { slot, serial: new_serial });
            }
        }
    }

    // --- Observers ------------------------------------------------------

    pub fn is_playing(&self) -> bool {
        self.current_item.is_some() && !self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn currently_playing_item(&self) -> Option<&PlayableItem> {
        self.current_item.as_ref()
    }

    pub fn layer_snapshot(&self, slot: Slot) -> LayerSnapshot {
        let layer = &self.slots[slot as usize];
        LayerSnapshot {
            active: layer.is_active(),
            frequency_id: layer.frequency_id().map(str::to_string),
            mode: layer.mode(),
            volume: self.volumes[slot as usize],
        }
    }

    /// Live signal sources across all slots (leak diagnostics).
    pub fn active_source_count(&self) -> usize {
        self.slots.iter().map(Layer::source_count).sum()
    }

    /// Configured oscillator frequencies for a slot (diagnostics).
    pub fn oscillator_frequencies(&self, slot: Slot) -> Vec<f32> {
        self.slots[slot as usize].oscillator_frequencies()
    }

    /// Drain the source lifecycle log, oldest first.
    pub fn drain_events(&mut self) -> Vec<GraphEvent> {
        self.events.drain(..).collect()
    }

    pub fn band_levels(&self) -> [f32; 3] {
        self.analyser.band_levels()
    }

    pub fn frequency_data(&self, out: &mut [u8]) {
        self.analyser.frequency_data(out)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    // --- Internals ------------------------------------------------------

    fn create_layer(&mut self, slot: Slot, frequency: &Frequency, mode: SoundGenerationMode) {
        let serial = self.next_serial;
        if let Some(layer) = Layer::create(
            frequency,
            mode,
            self.volumes[slot as usize],
            self.sample_rate,
            serial,
        ) {
            self.next_serial += 1;
            self.slots[slot as usize] = layer;
            self.push_event(GraphEvent::SourceCreated { slot, serial });
        }
    }

    fn destroy_layer(&mut self, slot: Slot) {
        if let Some(serial) = self.slots[slot as usize].destroy() {
            self.push_event(GraphEvent::SourceDestroyed { slot, serial });
        }
    }

    fn teardown_all_layers(&mut self) {
        for slot in Slot::ALL {
            self.destroy_layer(slot);
        }
    }

    fn push_event(&mut self, event: GraphEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn engine_playing(catalog: &Catalog) -> MixEngine {
        let mut engine = MixEngine::new(SAMPLE_RATE);
        let alpha = catalog.frequency("alpha").unwrap();
        engine.start_playback(
            PlayableItem::Frequency { id: "alpha".into() },
            (alpha, SoundGenerationMode::Binaural),
            None,
            None,
        );
        engine
    }

    #[test]
    fn start_creates_sources_and_sets_state() {
        let catalog = Catalog::builtin();
        let engine = engine_playing(&catalog);

        assert!(engine.is_playing());
        assert_eq!(engine.active_source_count(), 2);
        assert_eq!(
            engine.currently_playing_item().unwrap().id(),
            "alpha"
        );
    }

    #[test]
    fn control_ops_without_an_item_are_noops() {
        let mut engine = MixEngine::new(SAMPLE_RATE);
        engine.pause();
        engine.resume();
        engine.stop();
        engine.set_main_volume(90);
        engine.set_timer(10.0);
        engine.set_8d_enabled(true);
        engine.toggle_layer2(None);

        assert!(!engine.is_playing());
        assert_eq!(engine.active_source_count(), 0);
        assert!(engine.timer_remaining_secs().is_none());
        assert!(!engine.is_8d_enabled());
    }

    #[test]
    fn double_pause_and_double_stop_are_noops() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        engine.pause();
        let paused_state = engine.is_paused();
        engine.pause();
        assert_eq!(engine.is_paused(), paused_state);

        engine.stop();
        assert_eq!(engine.active_source_count(), 0);
        engine.stop();
        assert_eq!(engine.active_source_count(), 0);
        assert!(!engine.is_playing());
    }

    #[test]
    fn volumes_clamp_to_range() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        engine.set_main_volume(150);
        assert_eq!(engine.layer_snapshot(Slot::Main).volume, 100);

        engine.set_main_volume(-5);
        assert_eq!(engine.layer_snapshot(Slot::Main).volume, 0);
    }

    #[test]
    fn starting_with_unplayable_main_is_rejected() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);
        let pure = catalog.frequency("432hz").unwrap();

        // 432hz has no beat frequency: binaural is unplayable. The previous
        // item must keep playing untouched.
        engine.start_playback(
            PlayableItem::Frequency { id: "432hz".into() },
            (pure, SoundGenerationMode::Binaural),
            None,
            None,
        );

        assert_eq!(engine.currently_playing_item().unwrap().id(), "alpha");
        assert_eq!(engine.active_source_count(), 2);
    }

    #[test]
    fn item_switch_destroys_before_creating() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);
        engine.drain_events();

        let theta = catalog.frequency("theta").unwrap();
        engine.start_playback(
            PlayableItem::Frequency { id: "theta".into() },
            (theta, SoundGenerationMode::Binaural),
            None,
            None,
        );

        let events = engine.drain_events();
        let first_create = events
            .iter()
            .position(|e| matches!(e, GraphEvent::SourceCreated { .. }))
            .unwrap();
        let last_destroy = events
            .iter()
            .rposition(|e| matches!(e, GraphEvent::SourceDestroyed { .. }))
            .unwrap();
        assert!(
            last_destroy < first_create,
            "teardown must complete before setup: {events:?}"
        );
    }

    #[test]
    fn secondary_layers_require_an_active_main() {
        let catalog = Catalog::builtin();
        let mut engine = MixEngine::new(SAMPLE_RATE);
        let rain = catalog.frequency("rain").unwrap();

        engine.toggle_layer2(Some((rain, SoundGenerationMode::Ambience)));
        assert_eq!(engine.active_source_count(), 0);
    }

    #[test]
    fn toggle_layer2_leaves_main_untouched() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);
        let rain = catalog.frequency("rain").unwrap();
        let main_serial_before = engine.slots[0].serial();

        engine.toggle_layer2(Some((rain, SoundGenerationMode::Ambience)));
        assert_eq!(engine.active_source_count(), 3);
        assert_eq!(engine.slots[0].serial(), main_serial_before);

        engine.toggle_layer2(None);
        // Release is a fade; render past it, then the sources are gone.
        let mut l = vec![0.0; 4096];
        let mut r = vec![0.0; 4096];
        engine.render(&mut l, &mut r);
        assert_eq!(engine.active_source_count(), 2);
        assert_eq!(engine.slots[0].serial(), main_serial_before);
    }

    #[test]
    fn rapid_retoggle_rides_the_release_fade() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);
        let rain = catalog.frequency("rain").unwrap();
        let ocean = catalog.frequency("ocean").unwrap();

        engine.toggle_layer2(Some((rain, SoundGenerationMode::Ambience)));
        let mut l = vec![0.0; 4096];
        let mut r = vec![0.0; 4096];
        engine.render(&mut l, &mut r); // settle the fade-in
        engine.drain_events();

        // Toggle off and straight back on before the release fade settles.
        engine.toggle_layer2(None);
        engine.toggle_layer2(Some((ocean, SoundGenerationMode::Ambience)));

        // The fading sources must still exist: no hard teardown happened.
        assert_eq!(engine.active_source_count(), 3);
        assert!(engine.drain_events().is_empty());

        // Once the fade settles, the swap lands on the new configuration.
        engine.render(&mut l, &mut r);
        assert_eq!(
            engine.layer_snapshot(Slot::Layer2).frequency_id.as_deref(),
            Some("ocean")
        );
        assert_eq!(engine.active_source_count(), 3);

        let events = engine.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            GraphEvent::SourceDestroyed { slot: Slot::Layer2, .. }
        ));
        assert!(matches!(
            events[1],
            GraphEvent::SourceCreated { slot: Slot::Layer2, .. }
        ));
    }

    #[test]
    fn timer_deadline_is_absolute_across_pause() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        engine.set_timer(5.0);
        engine.tick(2.0);
        engine.pause();
        engine.tick(2.0); // paused, but the clock keeps moving
        engine.resume();
        engine.tick(1.0);

        assert!(!engine.is_playing(), "timer must fire at the absolute deadline");
        assert_eq!(engine.active_source_count(), 0);
    }

    #[test]
    fn timer_zero_clears() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        engine.set_timer(5.0);
        assert!(engine.timer_remaining_secs().is_some());
        engine.set_timer(0.0);
        assert!(engine.timer_remaining_secs().is_none());

        engine.tick(10.0);
        assert!(engine.is_playing());
    }

    #[test]
    fn past_deadline_fires_on_next_tick() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        engine.set_timer(1.0);
        engine.tick(60.0); // way past
        assert!(!engine.is_playing());
    }

    #[test]
    fn render_produces_audio_and_feeds_bands() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        let mut l = vec![0.0; 4096];
        let mut r = vec![0.0; 4096];
        engine.render(&mut l, &mut r);
        assert!(l.iter().any(|s| s.abs() > 0.0));

        // A 200 Hz carrier shows up in the bass band.
        let [bass, _, _] = engine.band_levels();
        assert!(bass > 0.0);
    }

    #[test]
    fn paused_engine_renders_silence_after_the_fade() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        let mut l = vec![0.0; 4096];
        let mut r = vec![0.0; 4096];
        engine.render(&mut l, &mut r);

        engine.pause();
        engine.render(&mut l, &mut r); // fade-out happens here
        engine.render(&mut l, &mut r);
        assert!(l.iter().all(|s| *s == 0.0));

        // Sources still exist - pause does not destroy layers.
        assert_eq!(engine.active_source_count(), 2);
    }

    #[test]
    fn stop_keeps_the_analyser_decaying() {
        let catalog = Catalog::builtin();
        let mut engine = engine_playing(&catalog);

        let mut l = vec![0.0; 8192];
        let mut r = vec![0.0; 8192];
        engine.render(&mut l, &mut r);
        let before: f32 = engine.band_levels().iter().sum();
        assert!(before > 0.0);

        engine.stop();
        engine.render(&mut l, &mut r);
        let after: f32 = engine.band_levels().iter().sum();
        assert!(after < before, "analyser should decay, not hold");
    }
}
