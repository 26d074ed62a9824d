use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Gameplay category of a catalog entry. The four zoned categories
/// contribute to population or jobs; the rest are decorative or tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Residential,
    Commercial,
    Industrial,
    Office,
    Utility,
    Decoration,
    Road,
    Tool,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
            Category::Industrial => "Industrial",
            Category::Office => "Office",
            Category::Utility => "Utility",
            Category::Decoration => "Decoration",
            Category::Road => "Road",
            Category::Tool => "Tools",
        }
    }

    /// Zoned categories get size-expanded catalog entries and three
    /// procedural style variants each.
    pub fn is_zoned(self) -> bool {
        matches!(
            self,
            Category::Residential | Category::Commercial | Category::Industrial | Category::Office
        )
    }

    /// Tool entries never commit a structure; they act on what is
    /// already placed.
    pub fn is_tool(self) -> bool {
        self == Category::Tool
    }

    fn key(self) -> &'static str {
        match self {
            Category::Residential => "residential",
            Category::Commercial => "commercial",
            Category::Industrial => "industrial",
            Category::Office => "office",
            Category::Utility => "utility",
            Category::Decoration => "decoration",
            Category::Road => "road",
            Category::Tool => "tool",
        }
    }
}

/// Immutable catalog entry describing a placeable structure type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureType {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Footprint extent in grid tiles.
    pub width: u32,
    pub depth: u32,
    /// Nominal height in world units, consumed by the form generator.
    pub height: f32,
    /// Base wall color as linear RGB.
    pub base_color: [f32; 3],
    pub cost: i64,
    pub description: String,
}

/// The static structure catalog, built once at startup and never mutated.
#[derive(Resource, Debug, Clone)]
pub struct StructureCatalog {
    pub entries: Vec<StructureType>,
}

impl StructureCatalog {
    pub fn get(&self, type_id: &str) -> Option<&StructureType> {
        self.entries.iter().find(|t| t.id == type_id)
    }

    /// Entries of a given category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &StructureType> {
        self.entries.iter().filter(move |t| t.category == category)
    }
}

impl Default for StructureCatalog {
    fn default() -> Self {
        build_catalog()
    }
}

/// Per-category parameters used by the size expansion below.
fn zoned_params(category: Category) -> (i64, f32, [f32; 3]) {
    // (base cost, base height, base color)
    match category {
        Category::Residential => (200, 4.0, [0.42, 0.62, 0.38]),
        Category::Commercial => (300, 6.0, [0.35, 0.48, 0.72]),
        Category::Industrial => (250, 3.5, [0.70, 0.62, 0.30]),
        Category::Office => (400, 8.0, [0.52, 0.45, 0.70]),
        _ => unreachable!("only zoned categories are size-expanded"),
    }
}

/// Build the catalog: each zoned category expanded into 1x1 .. 4x4
/// footprints with quadratic cost scaling, plus fixed singleton entries
/// for the park, landfill, road tile, and the de-zone tool.
pub fn build_catalog() -> StructureCatalog {
    let mut entries = Vec::new();

    for category in [
        Category::Residential,
        Category::Commercial,
        Category::Industrial,
        Category::Office,
    ] {
        let (base_cost, base_height, base_color) = zoned_params(category);
        for size in 1u32..=4 {
            entries.push(StructureType {
                id: format!("{}_{}", category.key(), size),
                name: format!("{} {}x{}", category.name(), size, size),
                category,
                width: size,
                depth: size,
                height: base_height * (1.0 + size as f32 * 0.5),
                base_color,
                cost: base_cost * (size * size) as i64,
                description: format!(
                    "A {} lot covering {}x{} tiles.",
                    category.name().to_lowercase(),
                    size,
                    size
                ),
            });
        }
    }

    entries.push(StructureType {
        id: "park".into(),
        name: "Park".into(),
        category: Category::Decoration,
        width: 2,
        depth: 2,
        height: 1.0,
        base_color: [0.30, 0.60, 0.28],
        cost: 150,
        description: "A small green space with trees and rocks.".into(),
    });
    entries.push(StructureType {
        id: "landfill".into(),
        name: "Landfill".into(),
        category: Category::Utility,
        width: 3,
        depth: 3,
        height: 1.5,
        base_color: [0.45, 0.40, 0.32],
        cost: 350,
        description: "Where the city's garbage ends up.".into(),
    });
    entries.push(StructureType {
        id: "road".into(),
        name: "Road".into(),
        category: Category::Road,
        width: 1,
        depth: 1,
        height: 0.1,
        base_color: [0.25, 0.25, 0.27],
        cost: 10,
        description: "A single paved tile.".into(),
    });
    entries.push(StructureType {
        id: "dezone".into(),
        name: "De-zone".into(),
        category: Category::Tool,
        width: 1,
        depth: 1,
        height: 0.1,
        base_color: [0.8, 0.3, 0.2],
        cost: 0,
        description: "Remove the structure under the cursor.".into(),
    });

    StructureCatalog { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoned_categories_have_four_sizes() {
        let catalog = build_catalog();
        for cat in [
            Category::Residential,
            Category::Commercial,
            Category::Industrial,
            Category::Office,
        ] {
            assert_eq!(catalog.by_category(cat).count(), 4);
        }
    }

    #[test]
    fn cost_scales_quadratically() {
        let catalog = build_catalog();
        let r1 = catalog.get("residential_1").unwrap();
        let r3 = catalog.get("residential_3").unwrap();
        assert_eq!(r3.cost, r1.cost * 9);
    }

    #[test]
    fn height_scales_with_size() {
        let catalog = build_catalog();
        let o1 = catalog.get("office_1").unwrap();
        let o4 = catalog.get("office_4").unwrap();
        // base * 1.5 vs base * 3.0
        assert!((o4.height / o1.height - 2.0).abs() < 1e-5);
    }

    #[test]
    fn singleton_tools_present() {
        let catalog = build_catalog();
        assert!(catalog.get("road").is_some());
        assert!(catalog.get("dezone").is_some());
        assert_eq!(catalog.get("dezone").unwrap().cost, 0);
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let catalog = build_catalog();
        assert!(catalog.get("casino_9").is_none());
    }
}
