use serde::{Deserialize, Serialize};

pub const REVEAL_TIMEOUT_MS: u32 = 1_600;
pub const REVEAL_FALLBACK_MS: u32 = 6_000;
pub const ROTATION_INTERVAL_MS: u32 = 900;
pub const FADE_OUT_MS: u32 = 420;
pub const SKILL_BAR_DELAY_MS: u32 = 600;

pub const PARTICLE_MIN_COUNT: usize = 28;
pub const PARTICLE_DENSITY: f64 = 0.06;
pub const PARTICLE_RADIUS_MIN: f64 = 0.9;
pub const PARTICLE_RADIUS_MAX: f64 = 3.7;
pub const PARTICLE_SPEED_MAX: f64 = 0.25;
pub const PARTICLE_ALPHA_MIN: f64 = 0.18;
pub const PARTICLE_ALPHA_MAX: f64 = 0.78;
pub const WRAP_MARGIN: f64 = 20.0;
pub const LINK_DISTANCE: f64 = 120.0;
pub const LINK_ALPHA: f64 = 0.06;
pub const LINK_WIDTH: f64 = 0.5;
pub const DEFAULT_ACCENT: &str = "#00E5FF";

pub const DEFAULT_SPLASH_MESSAGES: [&str; 3] = ["WELCOME", "ようこそ", "स्वागत है"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("splash messages must not be empty")]
    EmptyMessages,
    #[error("invalid particle setting: {0}")]
    Particles(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTimings {
    pub timeout_ms: u32,
    pub fallback_ms: u32,
    pub rotation_interval_ms: u32,
    pub fade_ms: u32,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            timeout_ms: REVEAL_TIMEOUT_MS,
            fallback_ms: REVEAL_FALLBACK_MS,
            rotation_interval_ms: ROTATION_INTERVAL_MS,
            fade_ms: FADE_OUT_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub min_count: usize,
    pub density: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub speed_max: f64,
    pub alpha_min: f64,
    pub alpha_max: f64,
    pub wrap_margin: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub accent_fallback: String,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            min_count: PARTICLE_MIN_COUNT,
            density: PARTICLE_DENSITY,
            radius_min: PARTICLE_RADIUS_MIN,
            radius_max: PARTICLE_RADIUS_MAX,
            speed_max: PARTICLE_SPEED_MAX,
            alpha_min: PARTICLE_ALPHA_MIN,
            alpha_max: PARTICLE_ALPHA_MAX,
            wrap_margin: WRAP_MARGIN,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
            link_width: LINK_WIDTH,
            accent_fallback: DEFAULT_ACCENT.to_string(),
        }
    }
}

impl ParticleSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = |min: f64, max: f64| min.is_finite() && max.is_finite() && min <= max;
        if !ordered(self.radius_min, self.radius_max) {
            return Err(ConfigError::Particles("radius range is empty"));
        }
        if !ordered(self.alpha_min, self.alpha_max) {
            return Err(ConfigError::Particles("alpha range is empty"));
        }
        if !ordered(0.0, self.speed_max) {
            return Err(ConfigError::Particles("speed_max must be non-negative"));
        }
        if !ordered(0.0, self.density) {
            return Err(ConfigError::Particles("density must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub reveal: RevealTimings,
    pub particles: ParticleSettings,
    pub splash_messages: Vec<String>,
    pub skill_bar_delay_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal: RevealTimings::default(),
            particles: ParticleSettings::default(),
            splash_messages: DEFAULT_SPLASH_MESSAGES
                .iter()
                .map(|message| message.to_string())
                .collect(),
            skill_bar_delay_ms: SKILL_BAR_DELAY_MS,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_json::from_str(trimmed)?;
        if config.splash_messages.is_empty() {
            return Err(ConfigError::EmptyMessages);
        }
        config.particles.validate()?;
        Ok(config)
    }
}
