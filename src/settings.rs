//! Game settings and preferences
//!
//! Loaded from a JSON file; any field missing from the file keeps its default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BUILD_COOLDOWN_TICKS, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "ZOMBIE_SURVIVAL_SETTINGS";
/// Settings file picked up from the working directory when present
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(format!("unknown quality preset: {s}")),
        }
    }
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live hit particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }

    /// Whether drop shadows are drawn under the player and enemies
    pub fn shadows_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Triangle count used to tessellate circles and ellipses
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }
}

/// Errors while reading a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, .. } => {
                write!(f, "failed to read settings from {}", path.display())
            }
            SettingsError::Parse { path, .. } => {
                write!(f, "invalid settings in {}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse { source, .. } => Some(source),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Hit particle effects
    pub particles: bool,

    // === Session ===
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Ticks between walls while the build key is held (0 = every tick)
    pub build_cooldown_ticks: u32,

    // === Display ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Driver ===
    /// Frames the headless binary runs before exiting
    pub demo_frames: u64,
    /// Pace the loop to this many frames per second (unpaced when absent)
    pub target_fps: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,

            seed: None,
            build_cooldown_ticks: BUILD_COOLDOWN_TICKS,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            demo_frames: 3600,
            target_fps: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width.max(1.0), self.viewport_height.max(1.0))
    }

    /// The configured seed, or one derived from the clock
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5eed)
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `$ZOMBIE_SURVIVAL_SETTINGS` or `./settings.json`, else defaults
    pub fn load() -> Self {
        let path = match std::env::var_os(SETTINGS_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !local.exists() {
                    log::info!("Using default settings");
                    return Self::default();
                }
                local
            }
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}: {}; using defaults", error_chain(&e));
                Self::default()
            }
        }
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    e.source().map(|s| s.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "quality": "High", "seed": 42 }"#).expect("parse");
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.build_cooldown_ticks, BUILD_COOLDOWN_TICKS);
        assert_eq!(s.viewport(), Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
        assert_eq!(s.resolved_seed(), 42);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            target_fps: Some(60),
            ..Settings::from_preset(QualityPreset::Low)
        };
        let back = Settings::from_json(&s.to_json()).expect("parse");
        assert_eq!(back, s);
    }

    #[test]
    fn test_particle_cap() {
        let mut s = Settings::from_preset(QualityPreset::Low);
        assert_eq!(s.max_particles(), 64);
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!("MED".parse::<QualityPreset>(), Ok(QualityPreset::Medium));
        assert!("ultra".parse::<QualityPreset>().is_err());
        assert!(!QualityPreset::Low.shadows_enabled());
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Settings::load_from("/nonexistent/zombie/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_from_bad_json() {
        let path = std::env::temp_dir().join("zombie_survival_bad_settings.json");
        std::fs::write(&path, "{ not json").expect("write temp file");
        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        let _ = std::fs::remove_file(&path);
    }
}
