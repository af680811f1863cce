//! Time-driven animations
//!
//! - Timelines with easing (entrance fade and slide)
//! - The looping emphasis pulse
//! - A single-threaded scheduler of repeating tasks whose handles
//!   deregister the task when dropped

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Fade-in duration for the entrance
pub const FADE_DURATION: Duration = Duration::from_millis(600);
/// Slide-up duration for the entrance
pub const SLIDE_DURATION: Duration = Duration::from_millis(800);
/// Starting vertical offset of the slide
pub const SLIDE_DISTANCE: f64 = 50.0;
/// Duration of each half of the pulse (grow, then shrink)
pub const PULSE_HALF_PERIOD: Duration = Duration::from_millis(1000);
/// Peak scale of the pulse
pub const PULSE_PEAK: f64 = 1.05;

// === EASING & TIMELINES ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Exponential ease-out: fast start, long tail
    ExpOut,
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress in [0, 1]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::ExpOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// A single interpolation from one value to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Timeline {
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Value after `elapsed`. Lands exactly on `to` once the duration is up.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.is_complete(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

// === ENTRANCE ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrancePhase {
    NotStarted,
    Entering,
    Settled,
}

/// Parallel fade-in and slide-up played once per mount
#[derive(Debug, Clone)]
pub struct Entrance {
    started: Option<Instant>,
    opacity: Timeline,
    offset: Timeline,
}

impl Default for Entrance {
    fn default() -> Self {
        Self {
            started: None,
            opacity: Timeline::new(0.0, 1.0, FADE_DURATION, Easing::Linear),
            offset: Timeline::new(SLIDE_DISTANCE, 0.0, SLIDE_DURATION, Easing::ExpOut),
        }
    }
}

impl Entrance {
    /// Entrance with zero-length timelines, settles as soon as it starts
    pub fn instant() -> Self {
        Self {
            started: None,
            opacity: Timeline::new(0.0, 1.0, Duration::ZERO, Easing::Linear),
            offset: Timeline::new(SLIDE_DISTANCE, 0.0, Duration::ZERO, Easing::ExpOut),
        }
    }

    /// Start the entrance. Later calls are ignored, it only runs once.
    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started.map(|s| now.saturating_duration_since(s))
    }

    pub fn phase(&self, now: Instant) -> EntrancePhase {
        match self.elapsed(now) {
            None => EntrancePhase::NotStarted,
            Some(e) if self.opacity.is_complete(e) && self.offset.is_complete(e) => {
                EntrancePhase::Settled
            }
            Some(_) => EntrancePhase::Entering,
        }
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        match self.elapsed(now) {
            None => self.opacity.from,
            Some(e) => self.opacity.value_at(e),
        }
    }

    pub fn offset(&self, now: Instant) -> f64 {
        match self.elapsed(now) {
            None => self.offset.from,
            Some(e) => self.offset.value_at(e),
        }
    }
}

// === PULSE ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePhase {
    Idle,
    PulsingUp,
    PulsingDown,
}

/// Snapshot of the pulse written by its scheduled task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseState {
    pub phase: PulsePhase,
    pub scale: f64,
}

impl PulseState {
    pub const IDLE: PulseState = PulseState {
        phase: PulsePhase::Idle,
        scale: 1.0,
    };
}

/// Scale oscillating 1 -> peak -> 1, forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub half_period: Duration,
    pub peak: f64,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            half_period: PULSE_HALF_PERIOD,
            peak: PULSE_PEAK,
        }
    }
}

impl Pulse {
    pub fn sample(&self, elapsed: Duration) -> PulseState {
        let half = self.half_period.as_nanos();
        if half == 0 {
            return PulseState::IDLE;
        }
        let cycle = elapsed.as_nanos() % (2 * half);
        let amplitude = self.peak - 1.0;
        if cycle < half {
            PulseState {
                phase: PulsePhase::PulsingUp,
                scale: 1.0 + amplitude * (cycle as f64 / half as f64),
            }
        } else {
            PulseState {
                phase: PulsePhase::PulsingDown,
                scale: self.peak - amplitude * ((cycle - half) as f64 / half as f64),
            }
        }
    }
}

/// A running pulse. Owns its scheduler registration; dropping it stops the pulse.
pub struct PulseAnimation {
    state: Rc<Cell<PulseState>>,
    handle: TaskHandle,
}

impl PulseAnimation {
    pub fn start(scheduler: &Scheduler, now: Instant, pulse: Pulse) -> Self {
        let state = Rc::new(Cell::new(PulseState::IDLE));
        let writer = Rc::clone(&state);
        let handle = scheduler.register(move |t| {
            writer.set(pulse.sample(t.saturating_duration_since(now)));
        });
        Self { state, handle }
    }

    pub fn scale(&self) -> f64 {
        self.state.get().scale
    }

    pub fn phase(&self) -> PulsePhase {
        self.state.get().phase
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_active()
    }

    /// Read-only view of the pulse that survives the animation itself
    #[cfg(test)]
    pub fn watch(&self) -> PulseWatch {
        PulseWatch(Rc::clone(&self.state))
    }
}

/// Observer of a pulse's last written state
#[cfg(test)]
#[derive(Clone)]
pub struct PulseWatch(Rc<Cell<PulseState>>);

#[cfg(test)]
impl PulseWatch {
    pub fn get(&self) -> PulseState {
        self.0.get()
    }
}

// === SCHEDULER ===

type Task = Box<dyn FnMut(Instant)>;

/// Task storage. `live` is the set of registered ids and is the only
/// thing handles touch, so they can cancel while `tasks` is checked out
/// by a running tick.
#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    live: RefCell<HashSet<u64>>,
    tasks: RefCell<Vec<(u64, Task)>>,
}

impl Registry {
    fn is_live(&self, id: u64) -> bool {
        self.live.borrow().contains(&id)
    }
}

/// Repeating tasks driven by the event loop's tick.
///
/// Tasks may register new tasks or drop handles from inside a tick. New
/// tasks first run on the next tick; cancelled ones never run again.
#[derive(Clone, Default)]
pub struct Scheduler {
    registry: Rc<Registry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task to run on every tick until its handle is dropped
    pub fn register(&self, task: impl FnMut(Instant) + 'static) -> TaskHandle {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry.live.borrow_mut().insert(id);
        self.registry.tasks.borrow_mut().push((id, Box::new(task)));
        TaskHandle {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Run every live task once
    pub fn tick(&self, now: Instant) {
        let mut running = std::mem::take(&mut *self.registry.tasks.borrow_mut());
        for (id, task) in running.iter_mut() {
            if self.registry.is_live(*id) {
                task(now);
            }
        }
        running.retain(|(id, _)| self.registry.is_live(*id));

        let mut tasks = self.registry.tasks.borrow_mut();
        running.append(&mut tasks);
        *tasks = running;
    }

    /// Number of live tasks
    pub fn active(&self) -> usize {
        self.registry.live.borrow().len()
    }
}

/// Registration of one task. Cancels the task when dropped.
pub struct TaskHandle {
    id: u64,
    registry: Weak<Registry>,
}

impl TaskHandle {
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.is_live(self.id))
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry.live.borrow_mut().remove(&self.id);
        // Checked out by a running tick, which prunes it instead
        if let Ok(mut tasks) = registry.tasks.try_borrow_mut() {
            tasks.retain(|(id, _)| *id != self.id);
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::ExpOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!(Easing::ExpOut.apply(0.3) > Easing::Linear.apply(0.3));
    }

    #[test]
    fn test_entrance_traces_are_monotonic() {
        let t0 = Instant::now();
        let mut entrance = Entrance::default();
        assert_eq!(entrance.phase(t0), EntrancePhase::NotStarted);
        assert_eq!(entrance.opacity(t0), 0.0);
        assert_eq!(entrance.offset(t0), 50.0);

        entrance.start(t0);
        assert_eq!(entrance.phase(t0), EntrancePhase::Entering);

        let mut last_opacity = entrance.opacity(t0);
        let mut last_offset = entrance.offset(t0);
        assert_eq!(last_opacity, 0.0);
        assert_eq!(last_offset, 50.0);

        let mut opacity_hits = 0;
        let mut offset_hits = 0;
        let mut was_opaque = false;
        let mut was_home = false;
        for step in 1..=120 {
            let now = t0 + ms(step * 10);
            let opacity = entrance.opacity(now);
            let offset = entrance.offset(now);
            assert!(opacity >= last_opacity);
            assert!(offset <= last_offset);
            if opacity == 1.0 && !was_opaque {
                opacity_hits += 1;
            }
            if offset == 0.0 && !was_home {
                offset_hits += 1;
            }
            was_opaque = opacity == 1.0;
            was_home = offset == 0.0;
            last_opacity = opacity;
            last_offset = offset;
        }
        assert_eq!(opacity_hits, 1);
        assert_eq!(offset_hits, 1);
        assert_eq!(entrance.phase(t0 + ms(1200)), EntrancePhase::Settled);
    }

    #[test]
    fn test_entrance_phase_waits_for_slower_timeline() {
        let t0 = Instant::now();
        let mut entrance = Entrance::default();
        entrance.start(t0);
        // Fade done, slide still running
        assert_eq!(entrance.opacity(t0 + ms(700)), 1.0);
        assert_eq!(entrance.phase(t0 + ms(700)), EntrancePhase::Entering);
        assert_eq!(entrance.phase(t0 + ms(800)), EntrancePhase::Settled);
    }

    #[test]
    fn test_entrance_start_is_idempotent() {
        let t0 = Instant::now();
        let mut entrance = Entrance::default();
        entrance.start(t0);
        entrance.start(t0 + ms(500));
        assert_eq!(entrance.opacity(t0 + ms(600)), 1.0);
    }

    #[test]
    fn test_instant_entrance_settles_immediately() {
        let t0 = Instant::now();
        let mut entrance = Entrance::instant();
        entrance.start(t0);
        assert_eq!(entrance.phase(t0), EntrancePhase::Settled);
        assert_eq!(entrance.opacity(t0), 1.0);
        assert_eq!(entrance.offset(t0), 0.0);
    }

    #[test]
    fn test_pulse_sample() {
        let pulse = Pulse::default();
        let start = pulse.sample(Duration::ZERO);
        assert_eq!(start.phase, PulsePhase::PulsingUp);
        assert_eq!(start.scale, 1.0);

        let quarter = pulse.sample(ms(500));
        assert!((quarter.scale - 1.025).abs() < 1e-9);

        let peak = pulse.sample(ms(1000));
        assert_eq!(peak.phase, PulsePhase::PulsingDown);
        assert!((peak.scale - 1.05).abs() < 1e-9);

        let wrapped = pulse.sample(ms(2000));
        assert_eq!(wrapped.phase, PulsePhase::PulsingUp);
        assert_eq!(wrapped.scale, 1.0);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let pulse = Pulse::default();
        for step in 0..1000 {
            let s = pulse.sample(ms(step * 37));
            assert!(s.scale >= 1.0 && s.scale <= 1.05 + 1e-9);
        }
    }

    #[test]
    fn test_scheduler_runs_until_handle_dropped() {
        let scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let handle = scheduler.register(move |_| c.set(c.get() + 1));
        assert_eq!(scheduler.active(), 1);
        assert!(handle.is_active());

        let now = Instant::now();
        scheduler.tick(now);
        scheduler.tick(now);
        assert_eq!(count.get(), 2);

        drop(handle);
        assert_eq!(scheduler.active(), 0);
        scheduler.tick(now);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_handle_outliving_scheduler() {
        let scheduler = Scheduler::new();
        let handle = scheduler.register(|_| {});
        drop(scheduler);
        assert!(!handle.is_active());
        drop(handle);
    }

    #[test]
    fn test_task_can_cancel_another_task_mid_tick() {
        let scheduler = Scheduler::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let victim = scheduler.register(move |_| counter.set(counter.get() + 1));

        let mut owned = Some(victim);
        let killer = scheduler.register(move |_| {
            drop(owned.take());
        });

        let t0 = Instant::now();
        scheduler.tick(t0);
        // Victim ran before the killer dropped its handle
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.active(), 1);

        scheduler.tick(t0 + ms(10));
        scheduler.tick(t0 + ms(20));
        assert_eq!(hits.get(), 1);
        assert!(killer.is_active());
    }

    #[test]
    fn test_cancelled_later_in_same_tick_does_not_run() {
        let scheduler = Scheduler::new();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

        let killer_slot = Rc::clone(&slot);
        let _killer = scheduler.register(move |_| {
            killer_slot.borrow_mut().take();
        });
        let counter = Rc::clone(&hits);
        *slot.borrow_mut() = Some(scheduler.register(move |_| counter.set(counter.get() + 1)));

        scheduler.tick(Instant::now());
        assert_eq!(hits.get(), 0);
        assert_eq!(scheduler.active(), 1);
    }

    #[test]
    fn test_task_can_register_mid_tick() {
        let scheduler = Scheduler::new();
        let spawned: Rc<RefCell<Vec<TaskHandle>>> = Rc::new(RefCell::new(Vec::new()));
        let hits = Rc::new(Cell::new(0));

        let inner = scheduler.clone();
        let sink = Rc::clone(&spawned);
        let counter = Rc::clone(&hits);
        let _spawner = scheduler.register(move |_| {
            if sink.borrow().is_empty() {
                let counter = Rc::clone(&counter);
                let handle = inner.register(move |_| counter.set(counter.get() + 1));
                sink.borrow_mut().push(handle);
            }
        });

        let t0 = Instant::now();
        scheduler.tick(t0);
        assert_eq!(scheduler.active(), 2);
        // New tasks start on the following tick
        assert_eq!(hits.get(), 0);

        scheduler.tick(t0 + ms(10));
        assert_eq!(hits.get(), 1);

        spawned.borrow_mut().clear();
        scheduler.tick(t0 + ms(20));
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.active(), 1);
    }

    #[test]
    fn test_pulse_animation_stops_after_drop() {
        let scheduler = Scheduler::new();
        let t0 = Instant::now();
        let pulse = PulseAnimation::start(&scheduler, t0, Pulse::default());
        assert_eq!(pulse.phase(), PulsePhase::Idle);
        assert!(pulse.is_running());

        scheduler.tick(t0 + ms(500));
        assert_eq!(pulse.phase(), PulsePhase::PulsingUp);
        scheduler.tick(t0 + ms(1500));
        assert_eq!(pulse.phase(), PulsePhase::PulsingDown);

        let watch = pulse.watch();
        let frozen = watch.get();
        drop(pulse);
        assert_eq!(scheduler.active(), 0);

        for step in 0..10 {
            scheduler.tick(t0 + ms(1600 + step * 100));
            assert_eq!(watch.get(), frozen);
        }
    }
}
