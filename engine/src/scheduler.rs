//! Scheduler Module
//!
//! Logical timers advanced by the host tick loop. Timers never touch OS
//! clocks: the owner calls [`Scheduler::advance`] once per tick with the
//! elapsed delta and reacts to the handles that fired. This keeps timer
//! behavior deterministic and fully testable.

/// Opaque handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct TimerEntry {
    handle: TimerHandle,
    remaining: f32,
    /// `Some(interval)` for repeating timers, `None` for one-shots.
    interval: Option<f32>,
}

/// Tick-driven timer pool.
///
/// Fired handles are reported in arming order. A repeating timer whose
/// interval was crossed more than once in a single `advance` fires once
/// per crossing.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<TimerEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer firing after `delay` seconds.
    pub fn schedule_once(&mut self, delay: f32) -> TimerHandle {
        self.push_entry(delay.max(0.0), None)
    }

    /// Arm a repeating timer firing every `interval` seconds.
    ///
    /// A non-positive interval is clamped to a single minimal step so the
    /// timer cannot fire unboundedly within one tick.
    pub fn schedule_repeating(&mut self, interval: f32) -> TimerHandle {
        let interval = interval.max(1e-3);
        self.push_entry(interval, Some(interval))
    }

    fn push_entry(&mut self, remaining: f32, interval: Option<f32>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(TimerEntry {
            handle,
            remaining,
            interval,
        });
        handle
    }

    /// Cancel a pending timer. Cancelling an expired or unknown handle is
    /// a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|entry| entry.handle != handle);
    }

    /// Whether the handle still refers to a pending timer.
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    /// Advance the logical clock by `delta_time` seconds and collect the
    /// handles that fired, in arming order.
    pub fn advance(&mut self, delta_time: f32) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        if delta_time <= 0.0 {
            return fired;
        }

        for entry in &mut self.entries {
            entry.remaining -= delta_time;
            while entry.remaining <= 0.0 {
                fired.push(entry.handle);
                match entry.interval {
                    Some(interval) => entry.remaining += interval,
                    None => break,
                }
            }
        }

        // Expired one-shots are removed after collection
        self.entries
            .retain(|entry| entry.interval.is_some() || entry.remaining > 0.0);

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(1.0);

        assert!(scheduler.advance(0.5).is_empty());
        assert_eq!(scheduler.advance(0.6), vec![handle]);
        assert!(scheduler.advance(10.0).is_empty());
        assert!(!scheduler.is_scheduled(handle));
    }

    #[test]
    fn test_repeating_fires_every_interval() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_repeating(0.5);

        assert_eq!(scheduler.advance(0.5), vec![handle]);
        assert!(scheduler.advance(0.25).is_empty());
        assert_eq!(scheduler.advance(0.25), vec![handle]);
        assert!(scheduler.is_scheduled(handle));
    }

    #[test]
    fn test_repeating_catches_up_on_large_delta() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_repeating(0.5);

        let fired = scheduler.advance(1.6);
        assert_eq!(fired, vec![handle, handle, handle]);
    }

    #[test]
    fn test_cancel_removes_pending_fire() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(1.0);
        scheduler.cancel(handle);

        assert!(!scheduler.is_scheduled(handle));
        assert!(scheduler.advance(2.0).is_empty());
    }

    #[test]
    fn test_fire_order_is_arming_order() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule_once(1.0);
        let second = scheduler.schedule_once(0.5);

        // Both expire within the same tick; arming order is preserved
        assert_eq!(scheduler.advance(1.5), vec![first, second]);
    }

    #[test]
    fn test_zero_delay_fires_next_advance() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(0.0);
        assert_eq!(scheduler.advance(0.001), vec![handle]);
    }
}
