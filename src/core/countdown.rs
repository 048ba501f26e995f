//! Whole-second countdown that ends the run when it hits zero.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Less than a second accumulated, or already expired.
    Idle,
    /// One or more seconds went by and time remains.
    Ticked,
    /// Reached zero on this call. Reported once.
    Expired,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    remaining: u32,
    accumulated: f32,
    state: CountdownState,
    text: String,
}

pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        let state = if secs == 0 { CountdownState::Expired } else { CountdownState::Running };
        Self { remaining: secs, accumulated: 0.0, state, text: format_mm_ss(secs) }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// `mm:ss` label, refreshed on every decrement.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tick(&mut self, dt: f32) -> Tick {
        if self.state == CountdownState::Expired { return Tick::Idle; }
        self.accumulated += dt.max(0.0);
        let mut ticked = false;
        while self.accumulated >= 1.0 {
            self.accumulated -= 1.0;
            self.remaining -= 1;
            ticked = true;
            if self.remaining == 0 {
                self.accumulated = 0.0;
                self.state = CountdownState::Expired;
                self.text = format_mm_ss(0);
                log::info!("countdown expired");
                return Tick::Expired;
            }
        }
        if !ticked { return Tick::Idle; }
        self.text = format_mm_ss(self.remaining);
        log::debug!("countdown {}", self.text);
        Tick::Ticked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(181), "03:01");
        assert_eq!(format_mm_ss(60), "01:00");
        assert_eq!(format_mm_ss(9), "00:09");
    }

    #[test]
    fn decrements_once_per_second() {
        let mut c = Countdown::new(5);
        assert_eq!(c.tick(0.5), Tick::Idle);
        assert_eq!(c.remaining(), 5);
        assert_eq!(c.tick(0.5), Tick::Ticked);
        assert_eq!(c.remaining(), 4);
        assert_eq!(c.text(), "00:04");
        assert_eq!(c.tick(0.25), Tick::Idle);
        assert_eq!(c.remaining(), 4);
    }

    #[test]
    fn long_frame_consumes_whole_seconds_and_carries_the_rest() {
        let mut c = Countdown::new(10);
        assert_eq!(c.tick(2.5), Tick::Ticked);
        assert_eq!(c.remaining(), 8);
        assert_eq!(c.tick(0.5), Tick::Ticked);
        assert_eq!(c.remaining(), 7);
    }

    #[test]
    fn expires_exactly_once_at_zero() {
        let mut c = Countdown::new(3);
        let mut expirations = 0;
        for _ in 0..10 {
            if c.tick(1.0) == Tick::Expired { expirations += 1; }
            assert!(c.remaining() <= 3);
        }
        assert_eq!(expirations, 1);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.state(), CountdownState::Expired);
        assert_eq!(c.text(), "00:00");
    }

    #[test]
    fn overshoot_stops_at_zero() {
        let mut c = Countdown::new(2);
        assert_eq!(c.tick(100.0), Tick::Expired);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.tick(100.0), Tick::Idle);
    }

    #[test]
    fn hard_budget_expires_on_second_61() {
        let mut c = Countdown::new(crate::core::difficulty::Difficulty::Hard.countdown_secs());
        for _ in 0..60 {
            assert_ne!(c.tick(1.0), Tick::Expired);
        }
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.tick(1.0), Tick::Expired);
    }
}
