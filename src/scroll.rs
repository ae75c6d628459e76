//! Automatic panning driven by fixed-interval ticks.
//!
//! The host owns the clock: each frame it calls [`AutoPan::advance`] with the elapsed time.
//! A tick is a complete offset mutation, so stopping a timer needs no cleanup. Ticks that
//! are missed during a long frame are dropped rather than replayed.

use crate::config::AutoPanConfig;
use crate::constants;
use crate::error::GridError;
use crate::widget::GridEdit;
use std::time::Duration;

/// A repeating timer that fires at most once per [`ScrollTimer::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTimer {
    interval: Duration,
    step: f64,
    running: bool,
    elapsed: Duration,
}

impl ScrollTimer {
    /// Creates a stopped timer.
    pub fn new(interval: Duration, step: f64) -> Self {
        Self {
            interval,
            step,
            running: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offset increment per tick.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Whether the timer is ticking.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts ticking from a fresh phase.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = Duration::ZERO;
    }

    /// Stops ticking.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Starts or stops the timer; does nothing when already in that state.
    pub fn set_running(&mut self, running: bool) {
        match (self.running, running) {
            (false, true) => self.start(),
            (true, false) => self.stop(),
            _ => {}
        }
    }

    /// Advances the clock, returning true when a tick fires.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running || self.interval.is_zero() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.interval {
            return false;
        }
        // The phase is below the interval, so its whole seconds fit in a u64.
        let phase = self.elapsed.as_nanos() % self.interval.as_nanos();
        let secs = u64::try_from(phase / 1_000_000_000).unwrap_or(u64::MAX);
        let nanos = (phase % 1_000_000_000) as u32;
        self.elapsed = Duration::new(secs, nanos);
        true
    }

    /// Time left until the next tick, or `None` when stopped.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.running
            .then(|| self.interval.saturating_sub(self.elapsed))
    }
}

/// Horizontal and vertical auto-pan timers sharing a speed multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPan {
    /// Timer moving the viewport along x
    pub horizontal: ScrollTimer,
    /// Timer moving the viewport along y
    pub vertical: ScrollTimer,
    speed: f64,
}

impl Default for AutoPan {
    fn default() -> Self {
        Self::drift()
    }
}

impl AutoPan {
    /// Slow horizontal drift: 16 units every second, running.
    pub fn drift() -> Self {
        let interval = Duration::from_millis(constants::DRIFT_INTERVAL_MS);
        let mut pan = Self {
            horizontal: ScrollTimer::new(interval, constants::DRIFT_STEP),
            vertical: ScrollTimer::new(interval, constants::DRIFT_STEP),
            speed: 1.0,
        };
        pan.horizontal.start();
        pan
    }

    /// One unit per 16 ms on each axis, stopped.
    pub fn smooth() -> Self {
        let interval = Duration::from_millis(constants::SMOOTH_INTERVAL_MS);
        Self {
            horizontal: ScrollTimer::new(interval, constants::SMOOTH_STEP),
            vertical: ScrollTimer::new(interval, constants::SMOOTH_STEP),
            speed: 1.0,
        }
    }

    /// Builds timers from a validated config.
    pub fn from_config(config: &AutoPanConfig) -> Result<Self, GridError> {
        config.validate()?;
        let interval = Duration::from_millis(config.interval_ms);
        let mut pan = Self {
            horizontal: ScrollTimer::new(interval, config.step),
            vertical: ScrollTimer::new(interval, config.step),
            speed: config.speed,
        };
        pan.horizontal.set_running(config.horizontal);
        pan.vertical.set_running(config.vertical);
        Ok(pan)
    }

    /// Multiplier applied to each step.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the step multiplier.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), GridError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(GridError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// True when either axis is ticking.
    pub fn is_running(&self) -> bool {
        self.horizontal.is_running() || self.vertical.is_running()
    }

    /// Shortest wait until any running timer ticks.
    pub fn until_next_tick(&self) -> Option<Duration> {
        match (
            self.horizontal.until_next_tick(),
            self.vertical.until_next_tick(),
        ) {
            (Some(h), Some(v)) => Some(h.min(v)),
            (h, v) => h.or(v),
        }
    }

    /// Advances both timers and pans the grid once for whatever fired.
    ///
    /// Returns whether the offset changed.
    ///
    /// # Arguments
    ///
    /// * `dt` - Time elapsed since the previous call
    /// * `grid` - Widget whose viewport is moved
    pub fn advance(&mut self, dt: Duration, grid: &mut GridEdit) -> Result<bool, GridError> {
        let dx = if self.horizontal.advance(dt) {
            self.horizontal.step() * self.speed
        } else {
            0.0
        };
        let dy = if self.vertical.advance(dt) {
            self.vertical.step() * self.speed
        } else {
            0.0
        };
        if dx == 0.0 && dy == 0.0 {
            return Ok(false);
        }
        grid.pan_by(dx, dy)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = ScrollTimer::new(ms(10), 1.0);
        assert!(!timer.advance(ms(100)));
        assert_eq!(timer.until_next_tick(), None);
    }

    #[test]
    fn test_timer_fires_on_interval_and_keeps_phase() {
        let mut timer = ScrollTimer::new(ms(10), 1.0);
        timer.start();
        assert!(!timer.advance(ms(6)));
        assert_eq!(timer.until_next_tick(), Some(ms(4)));
        assert!(timer.advance(ms(6)));
        assert_eq!(timer.until_next_tick(), Some(ms(8)));
    }

    #[test]
    fn test_missed_ticks_are_not_queued() {
        let mut timer = ScrollTimer::new(ms(10), 1.0);
        timer.start();
        assert!(timer.advance(ms(95)));
        assert!(!timer.advance(ms(1)));
        assert_eq!(timer.until_next_tick(), Some(ms(4)));
    }

    #[test]
    fn test_huge_frame_time_saturates() {
        let mut timer = ScrollTimer::new(ms(10), 1.0);
        timer.start();
        assert!(!timer.advance(ms(3)));
        assert!(timer.advance(Duration::MAX));
        assert!(timer.advance(Duration::MAX));
        assert!(timer.until_next_tick().is_some_and(|wait| wait <= ms(10)));

        let mut slow = ScrollTimer::new(Duration::from_secs(u64::MAX / 2), 1.0);
        slow.start();
        assert!(slow.advance(Duration::MAX));
        assert!(slow.until_next_tick().is_some());
    }

    #[test]
    fn test_restart_resets_phase() {
        let mut timer = ScrollTimer::new(ms(10), 1.0);
        timer.start();
        timer.advance(ms(7));
        timer.stop();
        timer.set_running(true);
        assert_eq!(timer.until_next_tick(), Some(ms(10)));
    }

    #[test]
    fn test_drift_moves_horizontally_once_per_second() {
        let mut grid = GridEdit::new();
        let mut pan = AutoPan::drift();
        assert!(!pan.advance(ms(500), &mut grid).unwrap());
        assert!(pan.advance(ms(500), &mut grid).unwrap());
        assert_eq!(grid.offset().x, 16.0);
        assert_eq!(grid.offset().y, 0.0);
    }

    #[test]
    fn test_smooth_pans_both_axes_with_speed() {
        let mut grid = GridEdit::new();
        grid.attach();
        grid.resize(40.0, 40.0).unwrap();
        let mut pan = AutoPan::smooth();
        assert!(!pan.is_running());
        pan.horizontal.start();
        pan.vertical.start();
        pan.set_speed(2.5).unwrap();

        let before = grid.generation();
        assert!(pan.advance(ms(16), &mut grid).unwrap());
        assert_eq!(grid.offset().x, 2.5);
        assert_eq!(grid.offset().y, 2.5);
        // Both axes fired in the same frame but the grid redrew once.
        assert_eq!(grid.generation(), before + 1);
    }

    #[test]
    fn test_until_next_tick_picks_the_sooner_axis() {
        let mut pan = AutoPan::smooth();
        pan.horizontal = ScrollTimer::new(ms(100), 1.0);
        pan.horizontal.start();
        pan.vertical.start();
        assert_eq!(pan.until_next_tick(), Some(ms(16)));
        pan.vertical.stop();
        assert_eq!(pan.until_next_tick(), Some(ms(100)));
    }

    #[test]
    fn test_from_config() {
        let config = AutoPanConfig {
            horizontal: false,
            vertical: true,
            interval_ms: 50,
            step: -2.0,
            speed: 0.5,
        };
        let mut pan = AutoPan::from_config(&config).unwrap();
        assert!(!pan.horizontal.is_running());
        assert!(pan.vertical.is_running());

        let mut grid = GridEdit::new();
        pan.advance(ms(50), &mut grid).unwrap();
        assert_eq!(grid.offset().y, -1.0);

        assert!(pan.set_speed(0.0).is_err());
        assert!(AutoPan::from_config(&AutoPanConfig {
            speed: f64::NAN,
            ..AutoPanConfig::default()
        })
        .is_err());
    }
}
