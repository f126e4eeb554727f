use crate::grid::BuildingKind;

pub const RESIDENTIAL_PALETTE: &[[f32; 3]] = &[
    [0.639, 0.725, 0.788], // #A3B9C9
    [0.561, 0.639, 0.702], // #8FA3B3
    [0.482, 0.557, 0.616], // #7B8E9D
    [0.769, 0.831, 0.878], // #C4D4E0
    [0.584, 0.659, 0.718], // #95A8B7
];

pub const COMMERCIAL_PALETTE: &[[f32; 3]] = &[
    [0.537, 0.667, 0.788], // #89AAC9
    [0.420, 0.553, 0.682], // #6B8DAE
    [0.365, 0.478, 0.580], // #5D7A94
    [0.482, 0.608, 0.722], // #7B9BB8
    [0.627, 0.722, 0.820], // #A0B8D1
];

pub const INDUSTRIAL_PALETTE: &[[f32; 3]] = &[
    [0.651, 0.541, 0.420], // #A68A6B
    [0.545, 0.451, 0.333], // #8B7355
    [0.427, 0.353, 0.263], // #6D5A43
    [0.620, 0.506, 0.392], // #9E8164
    [0.710, 0.608, 0.486], // #B59B7C
];

pub const PARK_PALETTE: &[[f32; 3]] = &[
    [0.361, 0.604, 0.294], // #5C9A4B
    [0.290, 0.482, 0.235], // #4A7B3C
    [0.235, 0.384, 0.188], // #3C6230
    [0.420, 0.686, 0.349], // #6BAF59
    [0.310, 0.514, 0.255], // #4F8341
];

pub const SOLAR_PALETTE: &[[f32; 3]] = &[
    [0.173, 0.243, 0.314], // #2C3E50
    [0.204, 0.286, 0.369], // #34495E
    [0.161, 0.502, 0.725], // #2980B9
    [0.204, 0.596, 0.859], // #3498DB
];

/// Face color of the tilted solar panel slab
pub const SOLAR_PANEL_COLOR: [f32; 3] = [0.161, 0.502, 0.725]; // #2980B9
/// Grid lines drawn across solar panels
pub const SOLAR_GRID_COLOR: [f32; 3] = [0.204, 0.596, 0.859]; // #3498DB
pub const SOLAR_GRID_STEP: f32 = 5.0;

pub const WINDOW_SIZE: f32 = 5.0;
pub const WINDOW_SPACING: f32 = 15.0;
/// Chance a window is lit on any given frame
pub const WINDOW_LIT_PROBABILITY: f64 = 0.8;
/// Lit windows roll a brightness in this range (fraction of full white)
pub const WINDOW_MIN_BRIGHTNESS: f32 = 200.0 / 255.0;

pub const RAIN_COLOR: [f32; 3] = [0.537, 0.812, 0.941]; // #89CFF0
pub const SNOW_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

pub fn palette_for(kind: BuildingKind) -> &'static [[f32; 3]] {
    match kind {
        BuildingKind::Residential => RESIDENTIAL_PALETTE,
        BuildingKind::Commercial => COMMERCIAL_PALETTE,
        BuildingKind::Industrial => INDUSTRIAL_PALETTE,
        BuildingKind::Park => PARK_PALETTE,
        BuildingKind::Solar => SOLAR_PALETTE,
    }
}
