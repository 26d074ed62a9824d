use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::HOURS_PER_TICK;

/// Continuous 24-hour game clock, advanced once per fixed simulation
/// tick. A full day takes `TICKS_PER_DAY` ticks (5 real-time minutes at
/// the 100 ms tick rate).
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    /// Hour of day in [0, 24).
    pub hour: f32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            day: 1,
            hour: 6.0, // start at sunrise
        }
    }
}

impl GameClock {
    pub fn tick(&mut self) {
        self.hour += HOURS_PER_TICK;
        // Wrap is modular, never clamped.
        if self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day += 1;
        }
    }

    /// Night runs from 19:00 to 05:00; dawn/dusk transition bands are
    /// handled by the presentation layer.
    pub fn is_night(&self) -> bool {
        Self::night_hour(self.hour)
    }

    /// Hour-only form of [`is_night`](Self::is_night), for callers that
    /// work from a raw hour rather than the clock resource.
    pub fn night_hour(hour: f32) -> bool {
        !(5.0..19.0).contains(&hour)
    }

    pub fn formatted(&self) -> String {
        let h = self.hour as u32;
        let m = ((self.hour - h as f32) * 60.0) as u32;
        format!("Day {} {:02}:{:02}", self.day, h, m)
    }
}

pub fn tick_game_clock(mut clock: ResMut<GameClock>) {
    clock.tick();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TICKS_PER_DAY;

    #[test]
    fn full_day_of_ticks_returns_to_start() {
        let mut clock = GameClock::default();
        let start = clock.hour;
        for _ in 0..TICKS_PER_DAY {
            clock.tick();
        }
        assert_eq!(clock.day, 2);
        assert!((clock.hour - start).abs() < 1e-2);
    }

    #[test]
    fn wrap_is_modular() {
        let mut clock = GameClock {
            day: 1,
            hour: 23.995,
        };
        clock.tick();
        assert!(clock.hour >= 0.0 && clock.hour < 0.01);
        assert_eq!(clock.day, 2);
    }

    #[test]
    fn night_spans_evening_and_early_morning() {
        assert!(GameClock { day: 1, hour: 23.0 }.is_night());
        assert!(GameClock { day: 1, hour: 3.0 }.is_night());
        assert!(!GameClock { day: 1, hour: 12.0 }.is_night());
        assert!(!GameClock { day: 1, hour: 5.0 }.is_night());
    }

    #[test]
    fn night_hour_agrees_with_the_clock_predicate() {
        for hour in [0.0, 4.9, 5.0, 12.0, 18.9, 19.0, 23.0] {
            assert_eq!(
                GameClock { day: 1, hour }.is_night(),
                GameClock::night_hour(hour)
            );
        }
    }

    #[test]
    fn formatted_readout() {
        let clock = GameClock { day: 3, hour: 14.5 };
        assert_eq!(clock.formatted(), "Day 3 14:30");
    }
}
