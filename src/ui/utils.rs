use eframe::egui::{Color32, Context, RichText, Ui, Visuals};

use crate::domain::landcover::DegClass;
use crate::ui::config::UI_CONFIG;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase();
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Small gray helper text under a control
pub fn helper_text(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text.into()).small().color(Color32::GRAY));
}

/// Fill color of a degradation byte, shared by maps and charts.
pub fn deg_color(byte: i32) -> Color32 {
    match DegClass::from_byte(byte) {
        Some(DegClass::Degraded) => UI_CONFIG.colors.degraded,
        Some(DegClass::Stable) => UI_CONFIG.colors.stable,
        Some(DegClass::Improved) => UI_CONFIG.colors.improved,
        None => UI_CONFIG.colors.nodata,
    }
}

/// Hectares with a thousands-friendly precision.
pub fn format_area(area_ha: f64) -> String {
    if area_ha >= 10_000.0 {
        format!("{:.0} ha", area_ha)
    } else if area_ha >= 100.0 {
        format!("{:.1} ha", area_ha)
    } else {
        format!("{:.2} ha", area_ha)
    }
}
