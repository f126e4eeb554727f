pub use crate::config::{CityGenConfig, NoiseField, get_config, reload_config};
pub use crate::cycle::DayCycle;
pub use crate::grid::{Building, BuildingKind, CityGrid, CityStats, generate};
pub use crate::painter::back_to_front;
pub use crate::weather::{WeatherBounds, WeatherKind, WeatherState};
