//! Static catalog of frequencies, guided sessions, and breathing patterns.
//!
//! The catalog is read-only after construction. The engine only ever looks
//! entries up by id; nothing in the playback path mutates it. A built-in set
//! covers the classic entrainment bands so the player works with no external
//! files, and `Catalog::from_json` loads a richer set from disk.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AttuneError, Result};

/// How a [`Frequency`] maps to an audio signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundGenerationMode {
    /// One continuous sine at the base frequency.
    Pure,
    /// Two sines split hard left/right, detuned by the beat frequency.
    /// Needs headphones for the beat to be perceived.
    Binaural,
    /// One sine amplitude-gated at the beat rate. Works on speakers.
    Isochronic,
    /// Shaped-noise soundscape; ignores the base frequency.
    Ambience,
}

impl SoundGenerationMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::Binaural => "binaural",
            Self::Isochronic => "isochronic",
            Self::Ambience => "ambience",
        }
    }
}

/// One entry in the frequency library. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frequency {
    pub id: String,
    pub name: String,
    /// Carrier frequency in Hz. Zero/negative entries are never playable.
    pub base_hz: f32,
    /// Beat frequency for binaural/isochronic presentation.
    #[serde(default)]
    pub binaural_hz: Option<f32>,
    pub category: String,
    pub default_mode: SoundGenerationMode,
    /// Modes this entry may be played in. Empty means "default mode only".
    #[serde(default)]
    pub available_modes: Vec<SoundGenerationMode>,
    /// UI color theme hint; the engine ignores it.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub premium: bool,
}

impl Frequency {
    /// True if this entry can be rendered at all.
    pub fn is_playable(&self) -> bool {
        self.base_hz > 0.0 || self.default_mode == SoundGenerationMode::Ambience
    }

    /// True if `mode` is a valid presentation for this entry.
    pub fn supports_mode(&self, mode: SoundGenerationMode) -> bool {
        if mode == self.default_mode {
            return true;
        }
        self.available_modes.contains(&mode)
    }
}

/// One timed step of a guided session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Main frequency id; resolved against the catalog at playback time.
    pub main: String,
    #[serde(default)]
    pub layer2: Option<String>,
    #[serde(default)]
    pub layer3: Option<String>,
    pub duration_secs: f64,
}

/// An ordered sequence of steps - a guided session or a user-built stack.
///
/// Steps are immutable once defined; playback addresses them by position,
/// never by identity lookup mid-session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidedSession {
    pub id: String,
    pub name: String,
    pub steps: Vec<Step>,
}

impl GuidedSession {
    /// Total duration = sum of step durations.
    pub fn total_duration_secs(&self) -> f64 {
        self.steps.iter().map(|s| s.duration_secs).sum()
    }
}

/// One named phase of a breathing cycle (inhale, hold, exhale, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathPhase {
    pub name: String,
    pub duration_secs: f64,
}

/// A repeating breathing cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingPattern {
    pub id: String,
    pub name: String,
    pub phases: Vec<BreathPhase>,
}

impl BreathingPattern {
    pub fn cycle_secs(&self) -> f64 {
        self.phases.iter().map(|p| p.duration_secs).sum()
    }
}

/// What the player currently has loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayableItem {
    Frequency { id: String },
    Session { id: String },
}

impl PlayableItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Frequency { id } | Self::Session { id } => id,
        }
    }
}

/// On-disk catalog shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    frequencies: Vec<Frequency>,
    #[serde(default)]
    sessions: Vec<GuidedSession>,
    #[serde(default)]
    breathing_patterns: Vec<BreathingPattern>,
}

/// Read-only, id-keyed collection of everything playable.
#[derive(Debug, Default)]
pub struct Catalog {
    frequencies: HashMap<String, Frequency>,
    sessions: HashMap<String, GuidedSession>,
    patterns: HashMap<String, BreathingPattern>,
}

impl Catalog {
    /// Load a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        for frequency in file.frequencies {
            if frequency.id.is_empty() {
                return Err(AttuneError::Catalog {
                    reason: "frequency entry with empty id".to_string(),
                });
            }
            catalog.frequencies.insert(frequency.id.clone(), frequency);
        }
        for session in file.sessions {
            catalog.sessions.insert(session.id.clone(), session);
        }
        for pattern in file.breathing_patterns {
            catalog.patterns.insert(pattern.id.clone(), pattern);
        }
        Ok(catalog)
    }

    pub fn frequency(&self, id: &str) -> Option<&Frequency> {
        self.frequencies.get(id)
    }

    pub fn session(&self, id: &str) -> Option<&GuidedSession> {
        self.sessions.get(id)
    }

    pub fn pattern(&self, id: &str) -> Option<&BreathingPattern> {
        self.patterns.get(id)
    }

    /// Frequencies sorted by id, for stable UI listings.
    pub fn frequencies_sorted(&self) -> Vec<&Frequency> {
        let mut all: Vec<&Frequency> = self.frequencies.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn sessions_sorted(&self) -> Vec<&GuidedSession> {
        let mut all: Vec<&GuidedSession> = self.sessions.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn patterns_sorted(&self) -> Vec<&BreathingPattern> {
        let mut all: Vec<&BreathingPattern> = self.patterns.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// The built-in library: the four classic entrainment bands (carriers
    /// around 200 Hz, the standard presentation), two pure tones, two
    /// ambience beds, two guided sessions, and two breathing patterns.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();

        let entrainment = [
            ("delta", "Delta Drift", 200.0, 2.5, "sleep"),
            ("theta", "Theta Meditation", 200.0, 6.0, "meditation"),
            ("alpha", "Alpha Calm", 200.0, 10.0, "relaxation"),
            ("beta", "Beta Focus", 220.0, 18.0, "focus"),
        ];
        for (id, name, base_hz, beat_hz, category) in entrainment {
            catalog.frequencies.insert(
                id.to_string(),
                Frequency {
                    id: id.to_string(),
                    name: name.to_string(),
                    base_hz,
                    binaural_hz: Some(beat_hz),
                    category: category.to_string(),
                    default_mode: SoundGenerationMode::Binaural,
                    available_modes: vec![
                        SoundGenerationMode::Binaural,
                        SoundGenerationMode::Isochronic,
                        SoundGenerationMode::Pure,
                    ],
                    color: String::new(),
                    premium: false,
                },
            );
        }

        let pure = [
            ("432hz", "432 Hz Harmony", 432.0),
            ("528hz", "528 Hz Restore", 528.0),
        ];
        for (id, name, base_hz) in pure {
            catalog.frequencies.insert(
                id.to_string(),
                Frequency {
                    id: id.to_string(),
                    name: name.to_string(),
                    base_hz,
                    binaural_hz: None,
                    category: "solfeggio".to_string(),
                    default_mode: SoundGenerationMode::Pure,
                    available_modes: vec![SoundGenerationMode::Pure],
                    color: String::new(),
                    premium: false,
                },
            );
        }

        let ambience = [("rain", "Soft Rain"), ("ocean", "Ocean Bed")];
        for (id, name) in ambience {
            catalog.frequencies.insert(
                id.to_string(),
                Frequency {
                    id: id.to_string(),
                    name: name.to_string(),
                    base_hz: 0.0,
                    binaural_hz: None,
                    category: "ambience".to_string(),
                    default_mode: SoundGenerationMode::Ambience,
                    available_modes: vec![SoundGenerationMode::Ambience],
                    color: String::new(),
                    premium: false,
                },
            );
        }

        catalog.sessions.insert(
            "deep-focus".to_string(),
            GuidedSession {
                id: "deep-focus".to_string(),
                name: "Deep Focus".to_string(),
                steps: vec![
                    Step {
                        title: "Settle".to_string(),
                        description: "Let the alpha wash settle you in.".to_string(),
                        main: "alpha".to_string(),
                        layer2: Some("rain".to_string()),
                        layer3: None,
                        duration_secs: 300.0,
                    },
                    Step {
                        title: "Engage".to_string(),
                        description: "Beta carries the working stretch.".to_string(),
                        main: "beta".to_string(),
                        layer2: Some("rain".to_string()),
                        layer3: None,
                        duration_secs: 1200.0,
                    },
                    Step {
                        title: "Release".to_string(),
                        description: "Back down to alpha before you stop.".to_string(),
                        main: "alpha".to_string(),
                        layer2: None,
                        layer3: None,
                        duration_secs: 300.0,
                    },
                ],
            },
        );

        catalog.sessions.insert(
            "wind-down".to_string(),
            GuidedSession {
                id: "wind-down".to_string(),
                name: "Wind Down".to_string(),
                steps: vec![
                    Step {
                        title: "Unwind".to_string(),
                        description: "Theta over ocean.".to_string(),
                        main: "theta".to_string(),
                        layer2: Some("ocean".to_string()),
                        layer3: None,
                        duration_secs: 600.0,
                    },
                    Step {
                        title: "Drift".to_string(),
                        description: "Delta takes over.".to_string(),
                        main: "delta".to_string(),
                        layer2: Some("ocean".to_string()),
                        layer3: None,
                        duration_secs: 900.0,
                    },
                ],
            },
        );

        catalog.patterns.insert(
            "box".to_string(),
            BreathingPattern {
                id: "box".to_string(),
                name: "Box Breathing".to_string(),
                phases: vec![
                    BreathPhase { name: "inhale".to_string(), duration_secs: 4.0 },
                    BreathPhase { name: "hold".to_string(), duration_secs: 4.0 },
                    BreathPhase { name: "exhale".to_string(), duration_secs: 4.0 },
                    BreathPhase { name: "hold".to_string(), duration_secs: 4.0 },
                ],
            },
        );
        catalog.patterns.insert(
            "4-7-8".to_string(),
            BreathingPattern {
                id: "4-7-8".to_string(),
                name: "4-7-8 Relax".to_string(),
                phases: vec![
                    BreathPhase { name: "inhale".to_string(), duration_secs: 4.0 },
                    BreathPhase { name: "hold".to_string(), duration_secs: 7.0 },
                    BreathPhase { name: "exhale".to_string(), duration_secs: 8.0 },
                ],
            },
        );

        catalog
    }
}
