use crate::city::events::{NewCitySeedEvent, RegenerateCityEvent};
use crate::city::resources::{CitySettings, CityWeather, CurrentCityStats, SimulationClock};
use crate::core::state::SceneState;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

/// Height of the top bar; pointer input above this line belongs to the HUD
pub const HUD_HEIGHT: f32 = 56.0;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, render_hud);
    }
}

pub fn render_hud(
    mut contexts: EguiContexts,
    state: Res<State<SceneState>>,
    mut next_state: ResMut<NextState<SceneState>>,
    settings: Option<Res<CitySettings>>,
    stats: Option<Res<CurrentCityStats>>,
    clock: Option<Res<SimulationClock>>,
    weather: Option<Res<CityWeather>>,
    mut regenerate_events: MessageWriter<RegenerateCityEvent>,
    mut new_seed_events: MessageWriter<NewCitySeedEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::top("scene_bar")
        .exact_height(HUD_HEIGHT)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let current = *state.get();

                if current == SceneState::AssetLoading {
                    ui.label("Loading textures...");
                    return;
                }

                if ui
                    .selectable_label(current == SceneState::Globe, "Globe")
                    .clicked()
                    && current != SceneState::Globe
                {
                    next_state.set(SceneState::Globe);
                }
                if ui
                    .selectable_label(current == SceneState::City, "City")
                    .clicked()
                    && current != SceneState::City
                {
                    next_state.set(SceneState::City);
                }

                if current != SceneState::City {
                    return;
                }

                ui.separator();
                if let Some(stats) = &stats {
                    let stats = &stats.stats;
                    ui.label(format!("Population {}", stats.total_population));
                    ui.label(format!("Efficiency {:.0}%", stats.average_efficiency * 100.0));
                    ui.label(format!("Green {:.0}%", stats.average_green_score * 100.0));
                    ui.label(format!("Renewable {:.0}%", stats.renewable_fraction * 100.0));
                }
                if let (Some(clock), Some(weather)) = (&clock, &weather) {
                    ui.separator();
                    ui.label(format!("{:02.0}:00", clock.cycle.hour().floor()));
                    ui.label(weather.state.kind.label());
                    if clock.paused {
                        ui.label("paused");
                    }
                }

                ui.separator();
                if let Some(settings) = &settings {
                    ui.label(format!("Seed {}", settings.seed));
                }
                if ui.button("Regenerate").clicked() {
                    regenerate_events.write(RegenerateCityEvent);
                }
                if ui.button("New seed").clicked() {
                    new_seed_events.write(NewCitySeedEvent);
                }
            });
        });
}
