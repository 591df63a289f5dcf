use std::time::{Duration, Instant};

/// Fixed-rate frame pacer.
///
/// The window backend calls [`FramePacer::wait`] once per presented frame; it
/// sleeps until the next frame deadline. A target of `0` fps disables pacing.
///
/// Deadlines advance by whole intervals from the previous deadline so the
/// average rate stays on target. If a frame overruns by more than one interval
/// the schedule restarts from "now" instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    started: Instant,
    interval: Option<Duration>,
    next_deadline: Instant,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            interval: frame_interval(target_fps),
            next_deadline: now,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.interval = frame_interval(fps);
        self.next_deadline = Instant::now();
    }

    /// Current target frame interval; `None` when unpaced.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Restarts the elapsed-time baseline (window realization).
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.next_deadline = now;
    }

    /// Monotonic time since the last [`restart`](Self::restart).
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Blocks until the next frame deadline.
    pub fn wait(&mut self) {
        let Some(interval) = self.interval else { return };
        let now = Instant::now();
        let deadline = next_deadline(self.next_deadline, now, interval);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.next_deadline = deadline;
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(60)
    }
}

fn frame_interval(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64))
}

/// Next deadline after `prev`, resynchronized to `now` when more than one
/// interval behind.
fn next_deadline(prev: Instant, now: Instant, interval: Duration) -> Instant {
    let candidate = prev + interval;
    if candidate + interval < now { now } else { candidate }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fps_is_unpaced() {
        assert_eq!(frame_interval(0), None);
        let mut p = FramePacer::new(0);
        p.wait();
        assert!(p.interval().is_none());
    }

    #[test]
    fn sixty_fps_interval() {
        let i = frame_interval(60).unwrap();
        assert!((i.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn on_schedule_advances_by_one_interval() {
        let base = Instant::now();
        let interval = Duration::from_millis(16);
        let now = base + Duration::from_millis(5);
        assert_eq!(next_deadline(base, now, interval), base + interval);
    }

    #[test]
    fn long_stall_resyncs_to_now() {
        let base = Instant::now();
        let interval = Duration::from_millis(16);
        let now = base + Duration::from_millis(100);
        assert_eq!(next_deadline(base, now, interval), now);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let p = FramePacer::new(60);
        let a = p.elapsed();
        let b = p.elapsed();
        assert!(b >= a);
    }
}
