/// Tiles per side of the (square) world grid.
pub const GRID_SIZE: usize = 64;

/// Edge length of one grid tile in world units.
pub const TILE_SIZE: f32 = 2.0;

/// Half the world extent. The grid is centered at the origin, so valid
/// world coordinates lie within [-WORLD_HALF, WORLD_HALF] on both axes.
pub const WORLD_HALF: f32 = GRID_SIZE as f32 * TILE_SIZE * 0.5;

/// Fixed simulation tick interval driving the clock, weather, and demand.
pub const TICK_MILLIS: u64 = 100;

/// Number of simulation ticks in one full 24-hour day/night cycle.
pub const TICKS_PER_DAY: u32 = 3000;

/// Game-hours added to the clock each simulation tick.
pub const HOURS_PER_TICK: f32 = 24.0 / TICKS_PER_DAY as f32;

/// Per-tick probability that the weather is resampled.
pub const WEATHER_RESAMPLE_CHANCE: f32 = 0.002;

/// Exponential smoothing factor applied to each RCI demand component per tick.
pub const DEMAND_SMOOTHING: f32 = 0.05;

/// Base population/jobs multiplier per footprint tile.
pub const ECONOMY_BASE_FACTOR: f32 = 10.0;

/// Funds available at the start of a session.
pub const STARTING_FUNDS: i64 = 20_000;
