use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Heat,
    Ice,
}

impl TimerKind {
    pub const ALL: [TimerKind; 2] = [TimerKind::Heat, TimerKind::Ice];

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "heat" => Some(TimerKind::Heat),
            "ice" => Some(TimerKind::Ice),
            _ => None,
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            TimerKind::Heat => Duration::from_secs(10 * 60),
            TimerKind::Ice => Duration::from_secs(70),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerKind::Heat => "Heat pad",
            TimerKind::Ice => "Ice bath",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Pause,
    Toggle,
    Reset,
}

impl TimerAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "start" => Some(TimerAction::Start),
            "pause" => Some(TimerAction::Pause),
            "toggle" => Some(TimerAction::Toggle),
            "reset" => Some(TimerAction::Reset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlarmTone {
    pub offset_ms: u32,
    pub duration_ms: u32,
    pub frequency_hz: u32,
}

pub const ALARM_TONES: [AlarmTone; 3] = [
    AlarmTone { offset_ms: 20, duration_ms: 600, frequency_hz: 440 },
    AlarmTone { offset_ms: 750, duration_ms: 600, frequency_hz: 520 },
    AlarmTone { offset_ms: 1500, duration_ms: 800, frequency_hz: 660 },
];

#[derive(Debug, Clone)]
pub struct Countdown {
    kind: TimerKind,
    phase: TimerPhase,
    remaining: Duration,
    resumed_at: Option<Instant>,
    alarm_pending: bool,
}

impl Countdown {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            phase: TimerPhase::Idle,
            remaining: kind.duration(),
            resumed_at: None,
            alarm_pending: false,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn start(&mut self, now: Instant) {
        self.poll(now);
        match self.phase {
            TimerPhase::Running => {}
            TimerPhase::Finished => {
                self.reset();
                self.resume(now);
            }
            TimerPhase::Idle | TimerPhase::Paused => self.resume(now),
        }
    }

    pub fn pause(&mut self, now: Instant) {
        self.poll(now);
        if self.phase == TimerPhase::Running {
            self.remaining = self.remaining_at(now);
            self.resumed_at = None;
            self.phase = TimerPhase::Paused;
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        self.poll(now);
        if self.phase == TimerPhase::Running {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining = self.kind.duration();
        self.resumed_at = None;
        self.alarm_pending = false;
    }

    pub fn apply(&mut self, action: TimerAction, now: Instant) {
        match action {
            TimerAction::Start => self.start(now),
            TimerAction::Pause => self.pause(now),
            TimerAction::Toggle => self.toggle(now),
            TimerAction::Reset => self.reset(),
        }
    }

    pub fn poll(&mut self, now: Instant) {
        if self.phase != TimerPhase::Running {
            return;
        }
        if self.remaining_at(now).is_zero() {
            self.phase = TimerPhase::Finished;
            self.remaining = Duration::ZERO;
            self.resumed_at = None;
            self.alarm_pending = true;
        }
    }

    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining_at(now);
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
    }

    /// Observes the timer. The snapshot reports `alarm` exactly once after
    /// the countdown reaches zero.
    pub fn snapshot(&mut self, now: Instant) -> TimerSnapshot {
        self.poll(now);
        let remaining_secs = self.remaining_secs(now);
        let alarm = std::mem::take(&mut self.alarm_pending);
        TimerSnapshot {
            id: self.kind,
            label: self.kind.label(),
            phase: self.phase,
            duration_secs: self.kind.duration().as_secs(),
            remaining_secs,
            display: match self.phase {
                TimerPhase::Finished => "Done!".to_string(),
                _ => format_clock(remaining_secs),
            },
            alarm,
        }
    }

    fn resume(&mut self, now: Instant) {
        self.phase = TimerPhase::Running;
        self.resumed_at = Some(now);
    }

    fn remaining_at(&self, now: Instant) -> Duration {
        match self.resumed_at {
            Some(resumed_at) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(resumed_at)),
            None => self.remaining,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub id: TimerKind,
    pub label: &'static str,
    pub phase: TimerPhase,
    pub duration_secs: u64,
    pub remaining_secs: u64,
    pub display: String,
    pub alarm: bool,
}

#[derive(Debug, Clone)]
pub struct TimerBoard {
    timers: Vec<Countdown>,
}

impl Default for TimerBoard {
    fn default() -> Self {
        Self {
            timers: TimerKind::ALL.into_iter().map(Countdown::new).collect(),
        }
    }
}

impl TimerBoard {
    pub fn get_mut(&mut self, kind: TimerKind) -> Option<&mut Countdown> {
        self.timers.iter_mut().find(|timer| timer.kind() == kind)
    }

    pub fn snapshots(&mut self, now: Instant) -> Vec<TimerSnapshot> {
        self.timers.iter_mut().map(|timer| timer.snapshot(now)).collect()
    }
}

pub fn format_clock(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
