use serde::{Deserialize, Serialize};

/// Tracks in-world time as accumulated game minutes.
///
/// The host drives the clock with elapsed real seconds; the configured
/// ratio converts them to game minutes. Days are 24 hours; night runs
/// from 20:00 to 06:00.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    minutes: f64,
    minutes_per_second: f64,
}

impl GameClock {
    /// Create a clock at `start_minute` with the given real-time ratio.
    pub fn new(start_minute: f64, minutes_per_second: f64) -> Self {
        Self {
            minutes: start_minute,
            minutes_per_second,
        }
    }

    /// Advance by elapsed real seconds; returns the game-minute delta.
    pub fn advance(&mut self, real_seconds: f64) -> f64 {
        let delta = real_seconds.max(0.0) * self.minutes_per_second;
        self.minutes += delta;
        delta
    }

    /// Total game minutes since the epoch of this clock.
    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    /// Hour of the current day, in `[0, 24)`.
    pub fn hour_of_day(&self) -> f64 {
        (self.minutes / 60.0).rem_euclid(24.0)
    }

    /// Whether it is currently night (20:00–06:00).
    pub fn is_night(&self) -> bool {
        let hour = self.hour_of_day();
        !(6.0..20.0).contains(&hour)
    }

    /// The configured game minutes per real second.
    pub fn minutes_per_second(&self) -> f64 {
        self.minutes_per_second
    }
}

/// Whether a given hour of day falls in the night band.
pub fn hour_is_night(hour: f64) -> bool {
    let hour = hour.rem_euclid(24.0);
    !(6.0..20.0).contains(&hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_converts_by_ratio() {
        let mut clock = GameClock::new(0.0, 2.0);
        let delta = clock.advance(30.0);
        assert!((delta - 60.0).abs() < f64::EPSILON);
        assert!((clock.minutes() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hour_of_day_wraps() {
        let clock = GameClock::new(25.0 * 60.0, 1.0);
        assert!((clock.hour_of_day() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn night_band_boundaries() {
        assert!(hour_is_night(23.0));
        assert!(hour_is_night(3.0));
        assert!(hour_is_night(20.0));
        assert!(!hour_is_night(6.0));
        assert!(!hour_is_night(12.0));
        assert!(!hour_is_night(19.9));
    }

    #[test]
    fn negative_real_time_is_ignored() {
        let mut clock = GameClock::new(100.0, 1.0);
        let delta = clock.advance(-5.0);
        assert_eq!(delta, 0.0);
        assert!((clock.minutes() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn is_night_tracks_the_clock() {
        let night = GameClock::new(2.0 * 60.0, 1.0);
        assert!(night.is_night());
        let noon = GameClock::new(12.0 * 60.0, 1.0);
        assert!(!noon.is_night());
    }
}
