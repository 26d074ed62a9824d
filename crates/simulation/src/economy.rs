use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, StructureCatalog};
use crate::config::{DEMAND_SMOOTHING, ECONOMY_BASE_FACTOR, STARTING_FUNDS};
use crate::structures::{City, PlacedStructure, StructureSetChanged};

/// City funds. Debited on placement, never auto-replenished.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Treasury {
    pub funds: i64,
}

impl Default for Treasury {
    fn default() -> Self {
        Self {
            funds: STARTING_FUNDS,
        }
    }
}

/// Derived city statistics. Population and jobs are a cache recomputed
/// from scratch on every structure-set mutation; happiness and level are
/// carried in state but not derived by any core formula.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u32,
    pub jobs: u32,
    pub happiness: f32,
    pub level: u32,
}

impl Default for CityStats {
    fn default() -> Self {
        Self {
            population: 0,
            jobs: 0,
            happiness: 50.0,
            level: 1,
        }
    }
}

/// Smoothed residential/commercial/industrial demand, each in [0, 100].
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct RciDemand {
    pub residential: f32,
    pub commercial: f32,
    pub industrial: f32,
}

impl Default for RciDemand {
    fn default() -> Self {
        Self {
            residential: 50.0,
            commercial: 50.0,
            industrial: 50.0,
        }
    }
}

/// Recompute total population and jobs from the structure set alone.
///
/// Structures whose type no longer resolves are skipped with a warning
/// rather than failing the whole aggregation.
pub fn aggregate(structures: &[PlacedStructure], catalog: &StructureCatalog) -> (u32, u32) {
    let mut population = 0u32;
    let mut jobs = 0u32;
    for placed in structures {
        let Some(ty) = catalog.get(&placed.type_id) else {
            warn!(
                "skipping structure {:?} with unknown type '{}'",
                placed.id, placed.type_id
            );
            continue;
        };
        let area = (ty.width * ty.depth) as f32;
        match ty.category {
            Category::Residential => {
                population +=
                    (area * ECONOMY_BASE_FACTOR * (1.0 + ty.width as f32 * 0.5)).floor() as u32;
            }
            Category::Commercial | Category::Industrial | Category::Office => {
                jobs += (area * ECONOMY_BASE_FACTOR * (1.0 + ty.width as f32 * 0.2)).floor() as u32;
            }
            Category::Utility | Category::Decoration | Category::Road | Category::Tool => {}
        }
    }
    (population, jobs)
}

/// Instantaneous demand targets from the current population/jobs balance.
/// Returned as (residential, commercial, industrial), each in [0, 100].
pub fn demand_targets(population: u32, jobs: u32) -> (f32, f32, f32) {
    let pop = population as f32;
    let jobs = jobs as f32;
    let residential = if population == 0 {
        100.0
    } else {
        (50.0 + (jobs - pop) * 0.1).clamp(0.0, 100.0)
    };
    let commercial = ((pop * 0.5 - jobs * 0.2) / 2.0).clamp(0.0, 100.0);
    let industrial = ((pop * 0.4 - jobs * 0.3) / 2.0).clamp(0.0, 100.0);
    (residential, commercial, industrial)
}

fn smooth_toward(current: &mut f32, target: f32) {
    *current += (target - *current) * DEMAND_SMOOTHING;
    *current = current.clamp(0.0, 100.0);
}

/// Rebuilds the population/jobs cache whenever the structure set changes.
pub fn recompute_stats(
    mut changes: EventReader<StructureSetChanged>,
    city: Res<City>,
    catalog: Res<StructureCatalog>,
    mut stats: ResMut<CityStats>,
) {
    if changes.is_empty() {
        return;
    }
    changes.clear();
    let (population, jobs) = aggregate(&city.structures, &catalog);
    stats.population = population;
    stats.jobs = jobs;
}

/// Fixed-tick demand update: each RCI component moves 5% of the way
/// toward its target, giving overshoot-free convergence with a half-life
/// of about 14 ticks.
pub fn tick_demand(stats: Res<CityStats>, mut demand: ResMut<RciDemand>) {
    let (r, c, i) = demand_targets(stats.population, stats.jobs);
    smooth_toward(&mut demand.residential, r);
    smooth_toward(&mut demand.commercial, c);
    smooth_toward(&mut demand.industrial, i);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::structures::Rotation;

    #[test]
    fn residential_1x1_houses_fifteen() {
        let catalog = build_catalog();
        let mut city = City::default();
        city.insert("residential_1".into(), 1.0, 1.0, Rotation::Deg0, 0);
        let (pop, jobs) = aggregate(&city.structures, &catalog);
        assert_eq!(pop, 15); // floor(1 * 10 * 1.5)
        assert_eq!(jobs, 0);
    }

    #[test]
    fn commercial_2x2_employs_fifty_six() {
        let catalog = build_catalog();
        let mut city = City::default();
        city.insert("commercial_2".into(), 2.0, 2.0, Rotation::Deg0, 0);
        let (pop, jobs) = aggregate(&city.structures, &catalog);
        assert_eq!(pop, 0);
        assert_eq!(jobs, 56); // floor(4 * 10 * 1.4)
    }

    #[test]
    fn decorations_contribute_nothing() {
        let catalog = build_catalog();
        let mut city = City::default();
        city.insert("park".into(), 1.0, 1.0, Rotation::Deg0, 0);
        city.insert("road".into(), 5.0, 5.0, Rotation::Deg0, 0);
        city.insert("landfill".into(), 11.0, 11.0, Rotation::Deg0, 0);
        assert_eq!(aggregate(&city.structures, &catalog), (0, 0));
    }

    #[test]
    fn aggregation_is_pure_over_place_and_remove() {
        let catalog = build_catalog();
        let mut city = City::default();
        city.insert("residential_2".into(), 3.0, 3.0, Rotation::Deg0, 0);
        let before = aggregate(&city.structures, &catalog);
        let id = city.insert("office_3".into(), 13.0, 13.0, Rotation::Deg0, 0);
        city.remove(id).unwrap();
        assert_eq!(aggregate(&city.structures, &catalog), before);
    }

    #[test]
    fn unknown_types_are_skipped() {
        let catalog = build_catalog();
        let mut city = City::default();
        city.insert("not_in_catalog".into(), 1.0, 1.0, Rotation::Deg0, 0);
        assert_eq!(aggregate(&city.structures, &catalog), (0, 0));
    }

    #[test]
    fn empty_city_demands_residents() {
        let (r, _, _) = demand_targets(0, 0);
        assert_eq!(r, 100.0);
    }

    #[test]
    fn balanced_city_targets_fifty_residential() {
        let (r, _, _) = demand_targets(200, 200);
        assert!((r - 50.0).abs() < 1e-5);
    }

    #[test]
    fn targets_are_clamped() {
        let (r, c, i) = demand_targets(1, 100_000);
        assert_eq!(r, 100.0);
        assert_eq!(c, 0.0);
        assert_eq!(i, 0.0);
    }

    #[test]
    fn smoothing_contracts_by_five_percent() {
        let mut current = 100.0;
        smooth_toward(&mut current, 50.0);
        assert!((current - 97.5).abs() < 1e-4);
    }

    #[test]
    fn smoothing_is_idempotent_at_fixed_point() {
        let mut current = 42.0;
        smooth_toward(&mut current, 42.0);
        assert!((current - 42.0).abs() < 1e-6);
    }

    #[test]
    fn demand_converges_within_fourteen_ticks() {
        // Scenario: res=100 with a 50 target reaches ~50 +- 1% of range
        // after roughly one half-life * 2.
        let mut current = 100.0;
        for _ in 0..14 {
            smooth_toward(&mut current, 50.0);
        }
        assert!(current < 75.0 && current > 50.0);
        for _ in 0..76 {
            smooth_toward(&mut current, 50.0);
        }
        assert!((current - 50.0).abs() < 1.0);
    }
}
