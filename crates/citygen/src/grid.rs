use crate::config::{CityGenConfig, NoiseField, ZoningConfig};
use crate::constants::palette_for;
use rand::random_range;

/// Keeps integer cell coordinates off the Perlin lattice, where the raw
/// noise function vanishes
const LATTICE_PHASE: f32 = 0.137;
const FOOTPRINT_FREQ: f32 = 0.37;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Park,
    Solar,
}

impl BuildingKind {
    pub fn label(&self) -> &'static str {
        match self {
            BuildingKind::Residential => "residential",
            BuildingKind::Commercial => "commercial",
            BuildingKind::Industrial => "industrial",
            BuildingKind::Park => "park",
            BuildingKind::Solar => "solar",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Building {
    pub col: usize,
    pub row: usize,
    /// Planar world coordinates, grid centered on the origin
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub kind: BuildingKind,
    pub color: [f32; 3],
    pub energy_efficiency: f32,
    pub population: u32,
    pub green_score: f32,
}

/// Cosmetic aggregates republished on every regeneration
#[derive(Debug, Clone, Copy, Default)]
pub struct CityStats {
    pub total_population: u32,
    pub average_efficiency: f32,
    pub average_green_score: f32,
    pub renewable_fraction: f32,
}

#[derive(Debug, Clone)]
pub struct CityGrid {
    pub buildings: Vec<Building>,
    pub stats: CityStats,
}

/// Maps a [0, 1] noise value onto a building kind through the ordered
/// zoning bands
pub fn classify_kind(noise: f32, zoning: &ZoningConfig) -> BuildingKind {
    if noise < zoning.park_threshold {
        BuildingKind::Park
    } else if noise < zoning.solar_threshold {
        BuildingKind::Solar
    } else if noise < zoning.residential_threshold {
        BuildingKind::Residential
    } else if noise < zoning.commercial_threshold {
        BuildingKind::Commercial
    } else {
        BuildingKind::Industrial
    }
}

/// Deterministic kind assignment for one cell given the seed and drift offset
pub fn cell_kind(config: &CityGenConfig, seed: u32, noise_offset: f32, col: usize, row: usize) -> BuildingKind {
    let kind_field = NoiseField::new(seed, config.grid.kind_noise_frequency);
    let n = kind_field.sample01_shifted(
        col as f32 + LATTICE_PHASE,
        row as f32 + LATTICE_PHASE,
        noise_offset,
    );
    classify_kind(n, &config.zoning)
}

/// Deterministic height assignment for one cell. Cells further along the
/// column axis trend taller through a linear falloff factor.
pub fn cell_height(config: &CityGenConfig, seed: u32, noise_offset: f32, col: usize, row: usize) -> f32 {
    let grid = &config.grid;
    let height_field = NoiseField::new(seed, grid.height_noise_frequency);
    let n = height_field.sample01_evolving(
        col as f32 + LATTICE_PHASE,
        row as f32 + LATTICE_PHASE,
        noise_offset,
    );
    let last = (grid.grid_size - 1).max(1) as f32;
    let falloff = grid.falloff_min + (col as f32 / last) * (grid.falloff_max - grid.falloff_min);
    grid.min_height + n * falloff * (grid.max_height - grid.min_height)
}

/// Generates the full building grid and its aggregate stats.
///
/// Kind and height are pure functions of (seed, noise_offset, cell); palette
/// choice and the cosmetic scores roll fresh randomness on every call.
pub fn generate(config: &CityGenConfig, seed: u32, noise_offset: f32) -> CityGrid {
    let grid = &config.grid;
    let kind_field = NoiseField::new(seed, grid.kind_noise_frequency);
    let height_field = NoiseField::new(seed, grid.height_noise_frequency);
    let footprint_field = NoiseField::new(seed, FOOTPRINT_FREQ);

    let half = config.half_extent();
    let last = (grid.grid_size - 1).max(1) as f32;

    let mut buildings = Vec::with_capacity(grid.grid_size * grid.grid_size);
    let mut total_population: u32 = 0;
    let mut total_efficiency = 0.0;
    let mut total_green = 0.0;
    let mut solar_count: usize = 0;

    for col in 0..grid.grid_size {
        for row in 0..grid.grid_size {
            let cx = col as f32 + LATTICE_PHASE;
            let cy = row as f32 + LATTICE_PHASE;

            let kind_noise = kind_field.sample01_shifted(cx, cy, noise_offset);
            let kind = classify_kind(kind_noise, &config.zoning);

            let falloff =
                grid.falloff_min + (col as f32 / last) * (grid.falloff_max - grid.falloff_min);
            let height_noise = height_field.sample01_evolving(cx, cy, noise_offset);
            let height =
                grid.min_height + height_noise * falloff * (grid.max_height - grid.min_height);

            let width = grid.spacing
                * (grid.footprint_base + footprint_field.sample01(cx, cy) * grid.footprint_span);
            let depth = grid.spacing
                * (grid.footprint_base
                    + footprint_field.sample01(cx + 100.0, cy + 100.0) * grid.footprint_span);

            let energy_efficiency = random_range(0.5..1.0);
            let population = if kind == BuildingKind::Residential {
                random_range(10..50)
            } else {
                0
            };
            let green_score = random_range(0.3..1.0);

            if kind == BuildingKind::Solar {
                solar_count += 1;
            }
            total_population += population;
            total_efficiency += energy_efficiency;
            total_green += green_score;

            let palette = palette_for(kind);
            let color = palette[random_range(0..palette.len())];

            buildings.push(Building {
                col,
                row,
                x: col as f32 * grid.spacing - half,
                y: row as f32 * grid.spacing - half,
                width,
                height,
                depth,
                kind,
                color,
                energy_efficiency,
                population,
                green_score,
            });
        }
    }

    let count = buildings.len() as f32;
    let stats = CityStats {
        total_population,
        average_efficiency: total_efficiency / count,
        average_green_score: total_green / count,
        renewable_fraction: solar_count as f32 / count,
    };

    CityGrid { buildings, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CityGenConfig {
        CityGenConfig::default()
    }

    #[test]
    fn test_classification_bands() {
        let zoning = test_config().zoning;
        let cases = [
            (0.10, BuildingKind::Park),
            (0.18, BuildingKind::Solar),
            (0.35, BuildingKind::Residential),
            (0.65, BuildingKind::Commercial),
            (0.90, BuildingKind::Industrial),
        ];
        for (noise, expected) in cases {
            assert_eq!(classify_kind(noise, &zoning), expected, "noise {noise}");
        }
    }

    #[test]
    fn test_classification_band_edges() {
        let zoning = test_config().zoning;
        assert_eq!(classify_kind(0.0, &zoning), BuildingKind::Park);
        // Thresholds are exclusive upper bounds of their band
        assert_eq!(classify_kind(0.15, &zoning), BuildingKind::Solar);
        assert_eq!(classify_kind(0.2, &zoning), BuildingKind::Residential);
        assert_eq!(classify_kind(0.5, &zoning), BuildingKind::Commercial);
        assert_eq!(classify_kind(0.8, &zoning), BuildingKind::Industrial);
        assert_eq!(classify_kind(1.0, &zoning), BuildingKind::Industrial);
    }

    #[test]
    fn test_generation_is_deterministic_in_kind_and_height() {
        let config = test_config();
        let a = generate(&config, 7, 0.25);
        let b = generate(&config, 7, 0.25);
        assert_eq!(a.buildings.len(), b.buildings.len());
        for (left, right) in a.buildings.iter().zip(&b.buildings) {
            assert_eq!(left.kind, right.kind);
            assert_eq!(left.height, right.height);
            assert_eq!(left.width, right.width);
        }
    }

    #[test]
    fn test_cell_functions_match_generated_grid() {
        let config = test_config();
        let grid = generate(&config, 99, 1.5);
        for building in grid.buildings.iter().step_by(37) {
            assert_eq!(
                cell_kind(&config, 99, 1.5, building.col, building.row),
                building.kind
            );
            assert_eq!(
                cell_height(&config, 99, 1.5, building.col, building.row),
                building.height
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = test_config();
        let a = generate(&config, 1, 0.0);
        let b = generate(&config, 2, 0.0);
        let same = a
            .buildings
            .iter()
            .zip(&b.buildings)
            .filter(|(l, r)| l.kind == r.kind)
            .count();
        assert!(same < a.buildings.len(), "seeds produced identical zoning");
    }

    #[test]
    fn test_heights_within_bounds() {
        let config = test_config();
        let grid = generate(&config, 5, 0.0);
        for building in &grid.buildings {
            assert!(building.height >= config.grid.min_height);
            assert!(building.height <= config.grid.max_height);
        }
    }

    #[test]
    fn test_stats_invariants() {
        let config = test_config();
        let grid = generate(&config, 11, 0.7);
        let n = grid.buildings.len();
        assert_eq!(n, config.grid.grid_size * config.grid.grid_size);

        assert!(grid.stats.average_efficiency >= 0.5);
        assert!(grid.stats.average_efficiency <= 1.0);
        assert!(grid.stats.average_green_score >= 0.3);
        assert!(grid.stats.average_green_score <= 1.0);

        let solar = grid
            .buildings
            .iter()
            .filter(|b| b.kind == BuildingKind::Solar)
            .count();
        assert_eq!(grid.stats.renewable_fraction, solar as f32 / n as f32);

        let population: u32 = grid.buildings.iter().map(|b| b.population).sum();
        assert_eq!(grid.stats.total_population, population);
        for building in &grid.buildings {
            if building.kind != BuildingKind::Residential {
                assert_eq!(building.population, 0);
            }
        }
    }
}
