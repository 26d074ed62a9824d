use bevy::prelude::*;
use std::time::Duration;

pub mod catalog;
pub mod config;
pub mod economy;
pub mod placement;
pub mod sim_rng;
pub mod spatial;
pub mod structures;
pub mod time_of_day;
pub mod weather;

use economy::{recompute_stats, tick_demand, CityStats, RciDemand, Treasury};
use sim_rng::SimRng;
use structures::{City, StructureSetChanged};
use time_of_day::{tick_game_clock, GameClock};
use weather::{tick_weather, Weather, WeatherChangeEvent};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(
            config::TICK_MILLIS,
        )))
        .init_resource::<catalog::StructureCatalog>()
        .init_resource::<City>()
        .init_resource::<Treasury>()
        .init_resource::<CityStats>()
        .init_resource::<RciDemand>()
        .init_resource::<GameClock>()
        .init_resource::<Weather>()
        .init_resource::<SimRng>()
        .add_event::<StructureSetChanged>()
        .add_event::<WeatherChangeEvent>()
        // Demand targets depend on stats computed from the *current*
        // structure set, so the clock/weather step runs first each tick.
        .add_systems(
            FixedUpdate,
            (tick_game_clock, tick_weather, tick_demand).chain(),
        )
        // Stats are a derived cache rebuilt once per structure-set
        // mutation, not once per tick.
        .add_systems(Update, recompute_stats);
    }
}
