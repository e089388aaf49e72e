pub mod config;
pub mod frame_loop;
pub mod particles;
pub mod reveal;
pub mod site;

pub use config::{ConfigError, ParticleSettings, RevealTimings, SiteConfig};
pub use frame_loop::{FrameLoop, FrameScheduler, LoopState};
pub use particles::{backing_size, particle_count, wrap_particle, Link, Particle, ParticleField};
pub use reveal::{
    MessageRotation, RevealController, RevealState, SplashEffect, SplashEvent, SplashOptions,
    SplashSequencer, TimerKind, TriggerReason,
};
pub use site::{resolve_theme, Theme};
