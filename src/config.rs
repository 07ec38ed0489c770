//! Application parameter documents
//!
//! All tunables live in RON documents compiled into the binary and
//! deserialized at startup. A missing or malformed field is fatal there,
//! before any screen is built.

use serde::Deserialize;

/// Error type for configuration documents
#[derive(Debug)]
pub enum ConfigError {
    Parse(ron::error::SpannedError),
    Validation(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "parse error: {}", e),
            ConfigError::Validation(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub game: GameConfig,
    pub field_camera: FieldCameraConfig,
    #[serde(default)]
    pub fonts: Vec<FontConfig>,
}

impl AppConfig {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Round length in seconds.
    pub limit_time: f64,
    /// Delay between the ready overlay and the actual start.
    pub start_delay: f64,
    /// How long the result overlay stays up before the task ends.
    pub result_delay: f64,
    /// Remaining time at which the countdown turns red.
    pub warn_time: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldCameraConfig {
    /// Pitch and yaw in degrees.
    pub rotation: [f32; 2],
    pub distance: f32,
    pub target: [f32; 3],
    /// Pinch-zoom clamp range.
    pub distance_range: [f32; 2],
    /// Easing pair: per-second retained fraction base, and its speed.
    pub ease_rate: [f64; 2],
    /// Horizontal field of view in degrees.
    pub fov: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    pub name: String,
    pub path: String,
}
