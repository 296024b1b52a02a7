//! Window and asset preferences
//!
//! Read from an optional JSON file next to the binary's working directory.
//! Any field left out of the file keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SCALE;

/// How frames are paced against the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FramePacing {
    /// Wait for vertical blank
    #[default]
    Vsync,
    /// Present as fast as possible
    Immediate,
}

impl FramePacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            FramePacing::Vsync => "Vsync",
            FramePacing::Immediate => "Immediate",
        }
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        match self {
            FramePacing::Vsync => wgpu::PresentMode::AutoVsync,
            FramePacing::Immediate => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

/// Program settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,

    // === Assets ===
    /// Image applied to the water wall
    pub texture_path: PathBuf,

    // === Rendering ===
    /// Uniform position scale for every draw target
    pub scale: f32,
    pub present_mode: FramePacing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            title: "Soft walls".to_string(),
            texture_path: PathBuf::from("assets/water.png"),
            scale: DEFAULT_SCALE,
            present_mode: FramePacing::Vsync,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    const FILE_NAME: &'static str = "soft-walls.json";

    /// Load settings from the default file, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load settings from `path`. A missing, unreadable or malformed file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {:?}, using defaults", path);
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read settings {:?}: {}", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("soft-walls-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!((s.window_width, s.window_height), (800, 600));
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.texture_path, PathBuf::from("assets/water.png"));
        assert_eq!(s.present_mode, FramePacing::Vsync);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "window_width": 1024 }"#).unwrap();
        assert_eq!(s.window_width, 1024);
        assert_eq!(s.window_height, 600);
        assert_eq!(s.title, "Soft walls");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let s = Settings::load_from(Path::new("/nonexistent/soft-walls.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let settings = Settings {
            title: "Needle".to_string(),
            scale: 0.5,
            present_mode: FramePacing::Immediate,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_frame_pacing_names() {
        assert_eq!(FramePacing::Immediate.as_str(), "Immediate");
        assert_eq!(FramePacing::Vsync.present_mode(), wgpu::PresentMode::AutoVsync);
        let s: Settings = serde_json::from_str(r#"{ "present_mode": "Immediate" }"#).unwrap();
        assert_eq!(s.present_mode, FramePacing::Immediate);
    }
}
