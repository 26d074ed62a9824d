use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::WEATHER_RESAMPLE_CHANCE;
use crate::sim_rng::SimRng;

/// Current weather condition. Transitions are memoryless: there is no
/// minimum-duration guarantee, so short flickers are possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Rain,
    Fog,
}

impl WeatherCondition {
    pub fn name(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Fog => "Fog",
        }
    }

    /// Sun-intensity multiplier under this condition.
    pub fn dim_factor(self) -> f32 {
        match self {
            WeatherCondition::Clear => 1.0,
            WeatherCondition::Rain | WeatherCondition::Fog => 0.4,
        }
    }

    /// Night-window emissive boost: lit windows read brighter against a
    /// rainy or foggy sky.
    pub fn emissive_boost(self) -> f32 {
        match self {
            WeatherCondition::Clear => 1.5,
            WeatherCondition::Rain | WeatherCondition::Fog => 2.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weather {
    pub condition: WeatherCondition,
}

/// Fired whenever the condition actually changes, so consumers can react
/// without polling the resource every tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct WeatherChangeEvent {
    pub old: WeatherCondition,
    pub new: WeatherCondition,
}

/// Map a uniform draw in [0, 1) to a condition via cumulative weights
/// clear 0.5 / rain 0.3 / fog 0.2.
///
/// Boundary convention: comparisons are strict, so a draw of exactly 0.5
/// resolves to Rain and exactly 0.8 to Fog.
pub fn condition_for_draw(draw: f32) -> WeatherCondition {
    if draw < 0.5 {
        WeatherCondition::Clear
    } else if draw < 0.8 {
        WeatherCondition::Rain
    } else {
        WeatherCondition::Fog
    }
}

/// Fixed-tick weather update: with small probability, resample the
/// condition from the categorical distribution above.
pub fn tick_weather(
    mut rng: ResMut<SimRng>,
    mut weather: ResMut<Weather>,
    mut changes: EventWriter<WeatherChangeEvent>,
) {
    if rng.0.gen::<f32>() >= WEATHER_RESAMPLE_CHANCE {
        return;
    }
    let old = weather.condition;
    let new = condition_for_draw(rng.0.gen::<f32>());
    if new != old {
        weather.condition = new;
        changes.send(WeatherChangeEvent { old, new });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_boundaries_are_strict() {
        assert_eq!(condition_for_draw(0.0), WeatherCondition::Clear);
        assert_eq!(condition_for_draw(0.499), WeatherCondition::Clear);
        assert_eq!(condition_for_draw(0.5), WeatherCondition::Rain);
        assert_eq!(condition_for_draw(0.799), WeatherCondition::Rain);
        assert_eq!(condition_for_draw(0.8), WeatherCondition::Fog);
        assert_eq!(condition_for_draw(0.999), WeatherCondition::Fog);
    }

    #[test]
    fn rain_and_fog_dim_the_sun() {
        assert_eq!(WeatherCondition::Clear.dim_factor(), 1.0);
        assert_eq!(WeatherCondition::Rain.dim_factor(), 0.4);
        assert_eq!(WeatherCondition::Fog.dim_factor(), 0.4);
    }

    #[test]
    fn bad_weather_boosts_window_glow() {
        assert!(WeatherCondition::Rain.emissive_boost() > WeatherCondition::Clear.emissive_boost());
    }

    #[test]
    fn change_event_fires_when_a_resample_lands() {
        let mut app = App::new();
        app.init_resource::<Weather>()
            .insert_resource(SimRng::from_seed(7))
            .add_event::<WeatherChangeEvent>()
            .add_systems(Update, tick_weather);

        // Resamples are rare (p = 0.002 per tick) and only half land on a
        // different condition, so run plenty of ticks.
        let mut fired = None;
        for _ in 0..50_000 {
            app.update();
            let events = app.world().resource::<Events<WeatherChangeEvent>>();
            let mut cursor = events.get_cursor();
            if let Some(change) = cursor.read(events).last() {
                fired = Some(*change);
                break;
            }
        }

        let change = fired.expect("condition should change within 50k ticks");
        assert_ne!(change.old, change.new);
        assert_eq!(app.world().resource::<Weather>().condition, change.new);
    }
}
