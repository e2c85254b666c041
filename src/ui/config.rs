use eframe::egui::Color32;

pub use crate::ui::text::{UI_TEXT, UiText};

/// UI colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,

    // The class ramp every map and chart shares
    pub degraded: Color32,
    pub stable: Color32,
    pub improved: Color32,
    pub nodata: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub map_height: f32,
    pub drawer_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(120, 190, 120),
        subsection_heading: Color32::from_rgb(190, 170, 90),
        central_panel: Color32::from_rgb(24, 28, 24),
        side_panel: Color32::from_rgb(18, 20, 18),

        degraded: Color32::from_rgb(200, 70, 60),
        stable: Color32::from_rgb(220, 200, 110),
        improved: Color32::from_rgb(90, 170, 90),
        nodata: Color32::from_rgb(45, 45, 45),
    },
    map_height: 420.0,
    drawer_width: 180.0,
};
