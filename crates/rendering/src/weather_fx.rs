//! Visible weather: a recycled pool of rain streaks and a dome of stars
//! whose brightness follows the night sky.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use rand::Rng;

use simulation::config::WORLD_HALF;
use simulation::sim_rng::SimRng;
use simulation::time_of_day::GameClock;
use simulation::weather::{Weather, WeatherChangeEvent, WeatherCondition};

use crate::day_night::star_visibility;
use crate::input::StatusMessage;

const RAIN_DROPS: usize = 400;
const RAIN_CEILING: f32 = 45.0;
const STAR_COUNT: usize = 150;
const STAR_DOME_RADIUS: f32 = 320.0;

#[derive(Component)]
pub struct RainRig;

#[derive(Component)]
pub struct RainDrop {
    fall_speed: f32,
}

pub fn spawn_rain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
) {
    let streak = meshes.add(Cuboid::new(0.03, 0.7, 0.03));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.7, 0.75, 0.85, 0.5),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands
        .spawn((RainRig, Transform::IDENTITY, Visibility::Hidden))
        .with_children(|parent| {
            for _ in 0..RAIN_DROPS {
                let x = rng.0.gen_range(-WORLD_HALF..WORLD_HALF);
                let z = rng.0.gen_range(-WORLD_HALF..WORLD_HALF);
                let y = rng.0.gen_range(0.0..RAIN_CEILING);
                parent.spawn((
                    RainDrop {
                        fall_speed: rng.0.gen_range(22.0..34.0),
                    },
                    Mesh3d(streak.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(x, y, z),
                    NotShadowCaster,
                ));
            }
        });
}

pub fn update_rain(
    time: Res<Time>,
    weather: Res<Weather>,
    mut rigs: Query<&mut Visibility, With<RainRig>>,
    mut drops: Query<(&RainDrop, &mut Transform)>,
) {
    let raining = weather.condition == WeatherCondition::Rain;
    for mut visibility in &mut rigs {
        *visibility = if raining {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if !raining {
        return;
    }
    for (drop, mut transform) in &mut drops {
        transform.translation.y -= drop.fall_speed * time.delta_secs();
        if transform.translation.y < 0.0 {
            transform.translation.y += RAIN_CEILING;
        }
    }
}

/// Surfaces weather transitions in the status ticker.
pub fn announce_weather_change(
    mut changes: EventReader<WeatherChangeEvent>,
    mut status: ResMut<StatusMessage>,
) {
    for change in changes.read() {
        let text = match change.new {
            WeatherCondition::Clear => "Skies clearing",
            WeatherCondition::Rain => "Rain moving in",
            WeatherCondition::Fog => "Fog rolling in",
        };
        status.set(text, false);
    }
}

#[derive(Component)]
pub struct StarDome;

#[derive(Resource)]
pub struct StarMaterial(pub Handle<StandardMaterial>);

pub fn spawn_stars(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
) {
    let speck = meshes.add(Sphere::new(0.6));
    let material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        emissive: LinearRgba::BLACK,
        unlit: true,
        ..default()
    });
    commands.insert_resource(StarMaterial(material.clone()));
    commands
        .spawn((StarDome, Transform::IDENTITY, Visibility::Hidden))
        .with_children(|parent| {
            for _ in 0..STAR_COUNT {
                // Random point on the upper hemisphere, kept off the horizon.
                let azimuth = rng.0.gen_range(0.0..std::f32::consts::TAU);
                let altitude = rng.0.gen_range(0.15..1.4f32);
                let (sa, ca) = azimuth.sin_cos();
                let (sh, ch) = altitude.sin_cos();
                parent.spawn((
                    Mesh3d(speck.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(
                        ca * ch * STAR_DOME_RADIUS,
                        sh * STAR_DOME_RADIUS,
                        sa * ch * STAR_DOME_RADIUS,
                    ),
                    NotShadowCaster,
                ));
            }
        });
}

pub fn update_stars(
    clock: Res<GameClock>,
    weather: Res<Weather>,
    star_material: Res<StarMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut domes: Query<&mut Visibility, With<StarDome>>,
) {
    let brightness = star_visibility(clock.hour, weather.condition);
    for mut visibility in &mut domes {
        *visibility = if brightness > 0.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Some(material) = materials.get_mut(&star_material.0) {
        material.emissive = LinearRgba::WHITE * (brightness * 4.0);
    }
}
