use std::fmt;

use crate::config::RevealTimings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    NotRevealed,
    Revealing,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerReason {
    Timeout,
    Fallback,
    Load,
    ReducedMotion,
}

impl TriggerReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerReason::Timeout => "timeout",
            TriggerReason::Fallback => "fallback",
            TriggerReason::Load => "load",
            TriggerReason::ReducedMotion => "reduced-motion",
        }
    }
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Timeout,
    Fallback,
    Rotation,
    FadeOut,
}

#[derive(Clone, Debug, Default)]
pub struct RevealController {
    state: RevealState,
    reason: Option<TriggerReason>,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn reason(&self) -> Option<TriggerReason> {
        self.reason
    }

    /// Moves `NotRevealed -> Revealing`. Returns false for every caller after
    /// the first.
    pub fn request_reveal(&mut self, reason: TriggerReason) -> bool {
        if self.state != RevealState::NotRevealed {
            return false;
        }
        self.state = RevealState::Revealing;
        self.reason = Some(reason);
        true
    }

    pub fn complete(&mut self) -> Option<TriggerReason> {
        if self.state != RevealState::Revealing {
            return None;
        }
        self.state = RevealState::Revealed;
        self.reason
    }
}

#[derive(Clone, Debug)]
pub struct MessageRotation {
    messages: Vec<String>,
    cursor: u64,
}

impl MessageRotation {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn next_message(&mut self) -> Option<&str> {
        if self.messages.is_empty() {
            return None;
        }
        let index = (self.cursor % self.messages.len() as u64) as usize;
        self.cursor = self.cursor.wrapping_add(1);
        self.messages.get(index).map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplashOptions {
    pub reduced_motion: bool,
    pub has_splash: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplashEvent {
    TimerFired(TimerKind),
    PageLoaded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplashEffect {
    ShowMessage(String),
    Schedule { timer: TimerKind, delay_ms: u32 },
    StartRotation { interval_ms: u32 },
    Cancel(TimerKind),
    FadeOut { duration_ms: u32 },
    RemoveSplash,
    ShowSite,
    Revealed(TriggerReason),
}

pub struct SplashSequencer {
    controller: RevealController,
    rotation: MessageRotation,
    timings: RevealTimings,
    options: SplashOptions,
    armed: Vec<TimerKind>,
    started: bool,
}

impl SplashSequencer {
    pub fn new(timings: RevealTimings, messages: Vec<String>, options: SplashOptions) -> Self {
        Self {
            controller: RevealController::new(),
            rotation: MessageRotation::new(messages),
            timings,
            options,
            armed: Vec::new(),
            started: false,
        }
    }

    pub fn state(&self) -> RevealState {
        self.controller.state()
    }

    pub fn reason(&self) -> Option<TriggerReason> {
        self.controller.reason()
    }

    pub fn is_armed(&self, timer: TimerKind) -> bool {
        self.armed.contains(&timer)
    }

    pub fn fade_duration_ms(&self) -> u32 {
        if self.options.reduced_motion || !self.options.has_splash {
            0
        } else {
            self.timings.fade_ms
        }
    }

    pub fn start(&mut self) -> Vec<SplashEffect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        if self.options.reduced_motion {
            return self.request(TriggerReason::ReducedMotion);
        }
        let mut effects = Vec::new();
        if let Some(message) = self.rotation.next_message() {
            effects.push(SplashEffect::ShowMessage(message.to_string()));
        }
        self.arm(TimerKind::Rotation);
        effects.push(SplashEffect::StartRotation {
            interval_ms: self.timings.rotation_interval_ms,
        });
        self.arm(TimerKind::Timeout);
        effects.push(SplashEffect::Schedule {
            timer: TimerKind::Timeout,
            delay_ms: self.timings.timeout_ms,
        });
        self.arm(TimerKind::Fallback);
        effects.push(SplashEffect::Schedule {
            timer: TimerKind::Fallback,
            delay_ms: self.timings.fallback_ms,
        });
        effects
    }

    pub fn handle(&mut self, event: SplashEvent) -> Vec<SplashEffect> {
        match event {
            SplashEvent::TimerFired(TimerKind::Rotation) => self.rotate(),
            SplashEvent::TimerFired(TimerKind::Timeout) => {
                self.disarm(TimerKind::Timeout);
                self.request(TriggerReason::Timeout)
            }
            SplashEvent::TimerFired(TimerKind::Fallback) => {
                self.disarm(TimerKind::Fallback);
                self.request(TriggerReason::Fallback)
            }
            SplashEvent::TimerFired(TimerKind::FadeOut) => {
                self.disarm(TimerKind::FadeOut);
                self.finish()
            }
            SplashEvent::PageLoaded => {
                let mut effects = Vec::new();
                if self.disarm(TimerKind::Fallback) {
                    effects.push(SplashEffect::Cancel(TimerKind::Fallback));
                }
                effects.extend(self.request(TriggerReason::Load));
                effects
            }
        }
    }

    fn rotate(&mut self) -> Vec<SplashEffect> {
        if self.controller.state() != RevealState::NotRevealed
            || !self.is_armed(TimerKind::Rotation)
        {
            return Vec::new();
        }
        match self.rotation.next_message() {
            Some(message) => vec![SplashEffect::ShowMessage(message.to_string())],
            None => Vec::new(),
        }
    }

    fn request(&mut self, reason: TriggerReason) -> Vec<SplashEffect> {
        if !self.controller.request_reveal(reason) {
            return Vec::new();
        }
        let mut effects = Vec::new();
        for timer in [TimerKind::Rotation, TimerKind::Timeout, TimerKind::Fallback] {
            if self.disarm(timer) {
                effects.push(SplashEffect::Cancel(timer));
            }
        }
        let duration_ms = self.fade_duration_ms();
        if duration_ms == 0 {
            effects.extend(self.finish());
            return effects;
        }
        effects.push(SplashEffect::FadeOut { duration_ms });
        self.arm(TimerKind::FadeOut);
        effects.push(SplashEffect::Schedule {
            timer: TimerKind::FadeOut,
            delay_ms: duration_ms,
        });
        effects
    }

    fn finish(&mut self) -> Vec<SplashEffect> {
        let Some(reason) = self.controller.complete() else {
            return Vec::new();
        };
        vec![
            SplashEffect::RemoveSplash,
            SplashEffect::ShowSite,
            SplashEffect::Revealed(reason),
        ]
    }

    fn arm(&mut self, timer: TimerKind) {
        if !self.armed.contains(&timer) {
            self.armed.push(timer);
        }
    }

    fn disarm(&mut self, timer: TimerKind) -> bool {
        let before = self.armed.len();
        self.armed.retain(|armed| *armed != timer);
        self.armed.len() != before
    }
}
