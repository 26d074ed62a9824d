//! Day/night cycle: sun light, sky color, distance fog, night-time
//! window glow, and star visibility all derive from the game clock and
//! the current weather.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

use simulation::time_of_day::GameClock;
use simulation::weather::{Weather, WeatherCondition};

use crate::structure_render::StructureMaterials;

const SUN_BASE_ILLUMINANCE: f32 = 10_000.0;

/// Phase angle of the sun: 0 at 06:00 (sunrise), PI/2 at noon, PI at
/// 18:00 (sunset).
pub fn sun_angle(hour: f32) -> f32 {
    (hour - 6.0) / 24.0 * TAU
}

/// Sun illuminance in lux; zero while the sun is below the horizon,
/// dimmed by overcast weather.
pub fn sun_illuminance(hour: f32, weather: WeatherCondition) -> f32 {
    sun_angle(hour).sin().max(0.0) * SUN_BASE_ILLUMINANCE * weather.dim_factor()
}

/// Emissive strength of window glazing. Ramps up through the evening,
/// boosted under rain and fog when interiors read brighter against the
/// gloom.
pub fn window_emissive(hour: f32, weather: WeatherCondition) -> f32 {
    (-sun_angle(hour).cos()).max(0.0) * weather.emissive_boost()
}

/// Star brightness: a half-sine over the night hours peaking at
/// midnight, and only under a clear sky.
pub fn star_visibility(hour: f32, weather: WeatherCondition) -> f32 {
    if weather != WeatherCondition::Clear || !GameClock::night_hour(hour) {
        return 0.0;
    }
    // 19:00 -> t=0, midnight -> t=0.5, 05:00 -> t=1.
    let t = ((hour + 24.0 - 19.0) % 24.0) / 10.0;
    (t * PI).sin().max(0.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn vec_lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

const SKY_DAY: Vec3 = Vec3::new(0.53, 0.73, 0.92);
const SKY_NIGHT: Vec3 = Vec3::new(0.04, 0.05, 0.12);
const SKY_HORIZON: Vec3 = Vec3::new(0.95, 0.55, 0.35);
const SKY_STORM: Vec3 = Vec3::new(0.35, 0.37, 0.40);
const SKY_MIST: Vec3 = Vec3::new(0.75, 0.77, 0.80);

/// Target sky color for an hour and weather, before smoothing.
pub fn sky_color_target(hour: f32, weather: WeatherCondition) -> Vec3 {
    let base = if (5.0..7.0).contains(&hour) {
        // dawn: night -> warm horizon -> day
        let t = (hour - 5.0) / 2.0;
        if t < 0.5 {
            vec_lerp(SKY_NIGHT, SKY_HORIZON, t * 2.0)
        } else {
            vec_lerp(SKY_HORIZON, SKY_DAY, (t - 0.5) * 2.0)
        }
    } else if (7.0..17.0).contains(&hour) {
        SKY_DAY
    } else if (17.0..19.0).contains(&hour) {
        let t = (hour - 17.0) / 2.0;
        if t < 0.5 {
            vec_lerp(SKY_DAY, SKY_HORIZON, t * 2.0)
        } else {
            vec_lerp(SKY_HORIZON, SKY_NIGHT, (t - 0.5) * 2.0)
        }
    } else {
        SKY_NIGHT
    };
    match weather {
        WeatherCondition::Clear => base,
        WeatherCondition::Rain => vec_lerp(base, SKY_STORM, 0.6),
        WeatherCondition::Fog => vec_lerp(base, SKY_MIST, 0.7),
    }
}

/// Smoothed sky color, so weather flips fade instead of popping.
#[derive(Resource)]
pub struct SkyState {
    pub current: Vec3,
}

impl Default for SkyState {
    fn default() -> Self {
        Self { current: SKY_DAY }
    }
}

pub fn spawn_sun(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: SUN_BASE_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 4.0, PI / 6.0, 0.0)),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });
}

/// Drives the sun's intensity, color, and direction from the clock.
pub fn update_day_night_cycle(
    clock: Res<GameClock>,
    weather: Res<Weather>,
    mut suns: Query<(&mut DirectionalLight, &mut Transform)>,
    mut ambient: ResMut<AmbientLight>,
) {
    let hour = clock.hour;
    let angle = sun_angle(hour);
    let illuminance = sun_illuminance(hour, weather.condition);

    // Low sun goes warm, high sun near-white.
    let warmth = angle.sin().clamp(0.0, 1.0);
    let color = Color::srgb(1.0, lerp(0.6, 0.95, warmth), lerp(0.3, 0.9, warmth));

    // Elevation follows the sine of the phase angle; azimuth sweeps
    // east to west over the daylight arc.
    let elevation_angle = angle.sin() * (PI / 2.0);
    let azimuth = PI / 3.0 - (hour - 6.0) * (PI / 18.0);
    for (mut sun, mut transform) in &mut suns {
        sun.illuminance = illuminance.max(400.0);
        sun.color = if illuminance > 0.0 {
            color
        } else {
            // moonlight stand-in
            Color::srgb(0.5, 0.55, 0.8)
        };
        *transform =
            Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -elevation_angle, azimuth, 0.0));
    }

    let daylight = angle.sin().max(0.0);
    ambient.brightness = lerp(50.0, 300.0, daylight) * weather.condition.dim_factor().max(0.6);
    ambient.color = Color::srgb(
        lerp(0.4, 0.9, daylight),
        lerp(0.45, 0.9, daylight),
        lerp(0.7, 1.0, daylight),
    );
}

/// Smooths the sky toward its target and applies it to the clear color
/// and the camera's distance fog.
pub fn update_sky(
    time: Res<Time>,
    clock: Res<GameClock>,
    weather: Res<Weather>,
    mut sky: ResMut<SkyState>,
    mut clear_color: ResMut<ClearColor>,
    cameras: Query<Entity, With<Camera3d>>,
    mut commands: Commands,
) {
    let target = sky_color_target(clock.hour, weather.condition);
    let blend = (time.delta_secs() * 1.5).min(1.0);
    sky.current = vec_lerp(sky.current, target, blend);
    let color = Color::srgb(sky.current.x, sky.current.y, sky.current.z);
    clear_color.0 = color;

    let (start, end) = match weather.condition {
        WeatherCondition::Fog => (10.0, 90.0),
        WeatherCondition::Rain => (40.0, 220.0),
        WeatherCondition::Clear => (80.0, 400.0),
    };
    for entity in &cameras {
        commands.entity(entity).insert(DistanceFog {
            color,
            falloff: FogFalloff::Linear { start, end },
            ..default()
        });
    }
}

/// Drives the shared glazing material's emissive term so windows light
/// up through the evening.
pub fn update_window_emissive(
    clock: Res<GameClock>,
    weather: Res<Weather>,
    mats: Res<StructureMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let strength = window_emissive(clock.hour, weather.condition);
    if let Some(material) = materials.get_mut(&mats.glazing) {
        material.emissive = LinearRgba::rgb(1.0, 0.85, 0.55) * strength;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_peaks_at_noon() {
        assert!((sun_angle(12.0) - PI / 2.0).abs() < 1e-5);
        assert!(
            sun_illuminance(12.0, WeatherCondition::Clear)
                > sun_illuminance(9.0, WeatherCondition::Clear)
        );
    }

    #[test]
    fn sun_is_dark_at_night() {
        assert_eq!(sun_illuminance(0.0, WeatherCondition::Clear), 0.0);
        assert_eq!(sun_illuminance(23.0, WeatherCondition::Clear), 0.0);
    }

    #[test]
    fn overcast_dims_the_sun() {
        let clear = sun_illuminance(12.0, WeatherCondition::Clear);
        let rain = sun_illuminance(12.0, WeatherCondition::Rain);
        assert!((rain - clear * 0.4).abs() < 1e-3);
    }

    #[test]
    fn windows_glow_in_the_evening_not_at_noon() {
        assert_eq!(window_emissive(12.0, WeatherCondition::Clear), 0.0);
        assert!(window_emissive(18.0, WeatherCondition::Clear) > 1.4);
    }

    #[test]
    fn rain_boosts_window_glow() {
        let clear = window_emissive(18.0, WeatherCondition::Clear);
        let rain = window_emissive(18.0, WeatherCondition::Rain);
        assert!(rain > clear);
    }

    #[test]
    fn stars_need_clear_night() {
        assert_eq!(star_visibility(12.0, WeatherCondition::Clear), 0.0);
        assert_eq!(star_visibility(0.0, WeatherCondition::Rain), 0.0);
        assert!(star_visibility(0.0, WeatherCondition::Clear) > 0.9);
        // fades toward the edges of the night
        assert!(
            star_visibility(20.0, WeatherCondition::Clear)
                < star_visibility(0.0, WeatherCondition::Clear)
        );
    }

    #[test]
    fn sky_goes_dark_at_night() {
        let day = sky_color_target(12.0, WeatherCondition::Clear);
        let night = sky_color_target(0.0, WeatherCondition::Clear);
        assert!(night.length() < day.length());
    }

    #[test]
    fn fog_washes_out_the_sky() {
        let clear = sky_color_target(12.0, WeatherCondition::Clear);
        let fog = sky_color_target(12.0, WeatherCondition::Fog);
        assert!((fog - SKY_MIST).length() < (clear - SKY_MIST).length());
    }
}
