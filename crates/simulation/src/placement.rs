use thiserror::Error;

use crate::catalog::StructureCatalog;
use crate::economy::Treasury;
use crate::spatial::is_occupied;
use crate::structures::{City, Rotation, StructureId};

/// Why a commit was rejected. All variants are non-fatal: the session
/// keeps running and no state is mutated on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("can't build here")]
    InvalidPlacement,
    #[error("not enough funds (need {cost}, have {funds})")]
    InsufficientFunds { cost: i64, funds: i64 },
    #[error("unknown structure type '{0}'")]
    UnknownType(String),
}

/// Commit a placement at an already-snapped world position.
///
/// Validation order: type resolution, collision, funds. The mutation is
/// atomic: either the structure is appended and funds debited by exactly
/// the type's cost, or nothing changes.
///
/// Collision is rechecked here even though the preview already validated
/// it, so a commit can never race a stale preview.
pub fn try_place(
    city: &mut City,
    treasury: &mut Treasury,
    catalog: &StructureCatalog,
    type_id: &str,
    x: f32,
    z: f32,
    rotation: Rotation,
    variant: u8,
) -> Result<StructureId, PlacementError> {
    let ty = catalog
        .get(type_id)
        .ok_or_else(|| PlacementError::UnknownType(type_id.to_string()))?;
    if is_occupied(city, catalog, x, z, ty.width, ty.depth) {
        return Err(PlacementError::InvalidPlacement);
    }
    if treasury.funds < ty.cost {
        return Err(PlacementError::InsufficientFunds {
            cost: ty.cost,
            funds: treasury.funds,
        });
    }
    treasury.funds -= ty.cost;
    Ok(city.insert(type_id.to_string(), x, z, rotation, variant))
}

/// Remove a structure by id. No refund is granted; in-core funds only
/// ever decrease. Returns false when the id no longer exists.
pub fn demolish(city: &mut City, id: StructureId) -> bool {
    city.remove(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::config::TILE_SIZE;

    #[test]
    fn place_debits_exact_cost() {
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury { funds: 1000 };
        let cost = catalog.get("residential_1").unwrap().cost;
        try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "residential_1",
            1.0,
            1.0,
            Rotation::Deg0,
            0,
        )
        .unwrap();
        assert_eq!(treasury.funds, 1000 - cost);
        assert_eq!(city.structures.len(), 1);
    }

    #[test]
    fn insufficient_funds_mutates_nothing() {
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury { funds: 5 };
        let err = try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "office_4",
            0.0,
            0.0,
            Rotation::Deg0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, PlacementError::InsufficientFunds { .. }));
        assert_eq!(treasury.funds, 5);
        assert!(city.structures.is_empty());
    }

    #[test]
    fn collision_mutates_nothing() {
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury { funds: 10_000 };
        try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "commercial_2",
            2.0,
            2.0,
            Rotation::Deg0,
            0,
        )
        .unwrap();
        let funds_after_first = treasury.funds;
        let err = try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "residential_1",
            2.0,
            2.0,
            Rotation::Deg0,
            0,
        )
        .unwrap_err();
        assert_eq!(err, PlacementError::InvalidPlacement);
        assert_eq!(treasury.funds, funds_after_first);
        assert_eq!(city.structures.len(), 1);
    }

    #[test]
    fn collision_is_checked_before_funds() {
        // An unaffordable AND colliding placement reports the collision,
        // matching the preview the player was shown.
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury { funds: 100_000 };
        try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "residential_1",
            1.0,
            1.0,
            Rotation::Deg0,
            0,
        )
        .unwrap();
        treasury.funds = 0;
        let err = try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "residential_1",
            1.0,
            1.0,
            Rotation::Deg0,
            0,
        )
        .unwrap_err();
        assert_eq!(err, PlacementError::InvalidPlacement);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury::default();
        let err = try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "volcano",
            0.0,
            0.0,
            Rotation::Deg0,
            0,
        )
        .unwrap_err();
        assert_eq!(err, PlacementError::UnknownType("volcano".into()));
    }

    #[test]
    fn adjacent_tiles_both_place() {
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury::default();
        try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "residential_1",
            1.0,
            1.0,
            Rotation::Deg0,
            0,
        )
        .unwrap();
        try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "residential_1",
            1.0 + TILE_SIZE,
            1.0,
            Rotation::Deg0,
            1,
        )
        .unwrap();
        assert_eq!(city.structures.len(), 2);
    }

    #[test]
    fn demolish_removes_once() {
        let catalog = build_catalog();
        let mut city = City::default();
        let mut treasury = Treasury::default();
        let id = try_place(
            &mut city,
            &mut treasury,
            &catalog,
            "park",
            3.0,
            3.0,
            Rotation::Deg0,
            0,
        )
        .unwrap();
        let funds = treasury.funds;
        assert!(demolish(&mut city, id));
        assert!(!demolish(&mut city, id));
        // No refund.
        assert_eq!(treasury.funds, funds);
    }
}
