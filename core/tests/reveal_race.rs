use folio_core::{
    RevealState, RevealTimings, SplashEffect, SplashEvent, SplashOptions, SplashSequencer,
    TimerKind, TriggerReason,
};

fn messages() -> Vec<String> {
    vec![
        "WELCOME".to_string(),
        "ようこそ".to_string(),
        "स्वागत है".to_string(),
    ]
}

fn sequencer(reduced_motion: bool) -> SplashSequencer {
    SplashSequencer::new(
        RevealTimings::default(),
        messages(),
        SplashOptions {
            reduced_motion,
            has_splash: true,
        },
    )
}

#[derive(Clone, Copy)]
struct PendingTimer {
    due_ms: u32,
    kind: TimerKind,
    interval_ms: Option<u32>,
}

struct Timeline {
    sequencer: SplashSequencer,
    now_ms: u32,
    timers: Vec<PendingTimer>,
    reveals: Vec<(TriggerReason, u32)>,
    shown_messages: Vec<String>,
    fades: Vec<u32>,
    site_shown: usize,
}

impl Timeline {
    fn new(reduced_motion: bool) -> Self {
        Self {
            sequencer: sequencer(reduced_motion),
            now_ms: 0,
            timers: Vec::new(),
            reveals: Vec::new(),
            shown_messages: Vec::new(),
            fades: Vec::new(),
            site_shown: 0,
        }
    }

    fn start(&mut self) {
        let effects = self.sequencer.start();
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<SplashEffect>) {
        for effect in effects {
            match effect {
                SplashEffect::ShowMessage(message) => self.shown_messages.push(message),
                SplashEffect::Schedule { timer, delay_ms } => self.timers.push(PendingTimer {
                    due_ms: self.now_ms + delay_ms,
                    kind: timer,
                    interval_ms: None,
                }),
                SplashEffect::StartRotation { interval_ms } => self.timers.push(PendingTimer {
                    due_ms: self.now_ms + interval_ms,
                    kind: TimerKind::Rotation,
                    interval_ms: Some(interval_ms),
                }),
                SplashEffect::Cancel(kind) => self.timers.retain(|timer| timer.kind != kind),
                SplashEffect::FadeOut { duration_ms } => self.fades.push(duration_ms),
                SplashEffect::RemoveSplash => {}
                SplashEffect::ShowSite => self.site_shown += 1,
                SplashEffect::Revealed(reason) => self.reveals.push((reason, self.now_ms)),
            }
        }
    }

    fn run_until(&mut self, end_ms: u32, mut loads: Vec<u32>) {
        loads.sort_unstable();
        loads.reverse();
        loop {
            let next_timer = self
                .timers
                .iter()
                .enumerate()
                .min_by_key(|(_, timer)| timer.due_ms)
                .map(|(index, timer)| (index, timer.due_ms));
            let next_load = loads.last().copied();
            let timer_first = match (next_timer, next_load) {
                (Some((_, due)), Some(load)) => due <= load,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            if timer_first {
                let Some((index, due)) = next_timer else {
                    break;
                };
                if due > end_ms {
                    if next_load.is_some_and(|load| load <= end_ms) {
                        self.fire_load(&mut loads);
                        continue;
                    }
                    break;
                }
                self.now_ms = due;
                let timer = self.timers.remove(index);
                if let Some(interval_ms) = timer.interval_ms {
                    self.timers.push(PendingTimer {
                        due_ms: due + interval_ms,
                        ..timer
                    });
                }
                let effects = self.sequencer.handle(SplashEvent::TimerFired(timer.kind));
                self.apply(effects);
            } else {
                if next_load.is_some_and(|load| load > end_ms) {
                    break;
                }
                self.fire_load(&mut loads);
            }
        }
        self.now_ms = self.now_ms.max(end_ms);
    }

    fn fire_load(&mut self, loads: &mut Vec<u32>) {
        let Some(at) = loads.pop() else {
            return;
        };
        self.now_ms = at;
        let effects = self.sequencer.handle(SplashEvent::PageLoaded);
        self.apply(effects);
    }
}

fn permutations(items: &[SplashEvent]) -> Vec<Vec<SplashEvent>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for index in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

fn subsets(items: &[SplashEvent]) -> Vec<Vec<SplashEvent>> {
    (0..(1u32 << items.len()))
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, event)| *event)
                .collect()
        })
        .collect()
}

#[test]
fn every_trigger_ordering_reveals_exactly_once() {
    let triggers = [
        SplashEvent::TimerFired(TimerKind::Timeout),
        SplashEvent::TimerFired(TimerKind::Fallback),
        SplashEvent::PageLoaded,
    ];
    for reduced_motion in [false, true] {
        for subset in subsets(&triggers) {
            for order in permutations(&subset) {
                let mut sequencer = sequencer(reduced_motion);
                let mut reveals = Vec::new();
                let mut collect = |effects: Vec<SplashEffect>| {
                    for effect in effects {
                        if let SplashEffect::Revealed(reason) = effect {
                            reveals.push(reason);
                        }
                    }
                };
                collect(sequencer.start());
                for event in &order {
                    collect(sequencer.handle(*event));
                    collect(sequencer.handle(SplashEvent::TimerFired(TimerKind::Rotation)));
                }
                // Stale fade completions must not re-run the post-reveal hook.
                collect(sequencer.handle(SplashEvent::TimerFired(TimerKind::FadeOut)));
                collect(sequencer.handle(SplashEvent::TimerFired(TimerKind::FadeOut)));

                let expected = usize::from(reduced_motion || !order.is_empty());
                assert_eq!(
                    reveals.len(),
                    expected,
                    "reduced_motion={reduced_motion} order={order:?}"
                );
                if reduced_motion {
                    assert_eq!(reveals, vec![TriggerReason::ReducedMotion]);
                } else if let Some(first) = order.first() {
                    let winner = match first {
                        SplashEvent::TimerFired(TimerKind::Timeout) => TriggerReason::Timeout,
                        SplashEvent::TimerFired(TimerKind::Fallback) => TriggerReason::Fallback,
                        _ => TriggerReason::Load,
                    };
                    assert_eq!(reveals, vec![winner]);
                    assert_eq!(sequencer.state(), RevealState::Revealed);
                } else {
                    assert_eq!(sequencer.state(), RevealState::NotRevealed);
                }
            }
        }
    }
}

#[test]
fn early_load_wins_and_cancels_fallback() {
    let mut timeline = Timeline::new(false);
    timeline.start();
    timeline.run_until(10_000, vec![100]);

    assert_eq!(timeline.reveals, vec![(TriggerReason::Load, 100 + 420)]);
    assert_eq!(timeline.fades, vec![420]);
    assert_eq!(timeline.site_shown, 1);
    assert!(timeline.timers.is_empty());
    assert!(!timeline.sequencer.is_armed(TimerKind::Fallback));
    assert_eq!(timeline.sequencer.reason(), Some(TriggerReason::Load));
}

#[test]
fn late_triggers_after_load_are_ignored() {
    let mut sequencer = sequencer(false);
    sequencer.start();
    let mut reveals = Vec::new();
    for event in [
        SplashEvent::PageLoaded,
        SplashEvent::TimerFired(TimerKind::FadeOut),
        SplashEvent::TimerFired(TimerKind::Fallback),
        SplashEvent::TimerFired(TimerKind::Timeout),
    ] {
        for effect in sequencer.handle(event) {
            if let SplashEffect::Revealed(reason) = effect {
                reveals.push(reason);
            }
        }
    }
    assert_eq!(reveals, vec![TriggerReason::Load]);
}

#[test]
fn timeout_wins_without_load_and_rotation_stops() {
    let mut timeline = Timeline::new(false);
    timeline.start();
    timeline.run_until(10_000, Vec::new());

    assert_eq!(timeline.reveals, vec![(TriggerReason::Timeout, 1_600 + 420)]);
    // Initial caption plus ticks at 900ms; the 1800ms tick is cancelled.
    assert_eq!(timeline.shown_messages, vec!["WELCOME", "ようこそ"]);
    assert!(timeline.timers.is_empty());
}

#[test]
fn fallback_reveals_when_timeout_never_fires() {
    let mut timeline = Timeline::new(false);
    timeline.start();
    timeline
        .timers
        .retain(|timer| timer.kind != TimerKind::Timeout);
    timeline.run_until(10_000, Vec::new());

    assert_eq!(timeline.reveals, vec![(TriggerReason::Fallback, 6_000 + 420)]);
    assert_eq!(timeline.shown_messages.len(), 1 + 6);
    assert_eq!(timeline.shown_messages[3], "WELCOME");
}

#[test]
fn load_during_fade_does_not_restart_transition() {
    let mut timeline = Timeline::new(false);
    timeline.start();
    timeline.run_until(10_000, vec![1_700]);

    assert_eq!(timeline.reveals, vec![(TriggerReason::Timeout, 2_020)]);
    assert_eq!(timeline.fades.len(), 1);
}

#[test]
fn reduced_motion_reveals_immediately_without_rotation() {
    let mut timeline = Timeline::new(true);
    timeline.start();

    assert_eq!(timeline.reveals, vec![(TriggerReason::ReducedMotion, 0)]);
    assert!(timeline.shown_messages.is_empty());
    assert!(timeline.fades.is_empty());
    assert!(timeline.timers.is_empty());
    assert_eq!(timeline.sequencer.fade_duration_ms(), 0);

    timeline.run_until(10_000, vec![50]);
    assert_eq!(timeline.reveals.len(), 1);
    assert_eq!(timeline.site_shown, 1);
}
