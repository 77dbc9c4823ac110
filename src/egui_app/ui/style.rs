//! Shared palette and status tones for the egui renderer.

use egui::{Color32, Stroke, Visuals};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(22, 24, 26),
        bg_tertiary: Color32::from_rgb(38, 40, 44),
        panel_outline: Color32::from_rgb(48, 52, 58),
        text_primary: Color32::from_rgb(192, 198, 206),
        text_muted: Color32::from_rgb(136, 142, 150),
        accent: Color32::from_rgb(127, 196, 255),
        warning: Color32::from_rgb(200, 138, 64),
        success: Color32::from_rgb(102, 176, 136),
    }
}

/// Tune the dark visuals to the app palette.
pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.bg_tertiary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Tone of a status bar message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Polling",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}

/// Color for a run status chip.
pub fn run_status_color(status: &crate::api::RunStatus) -> Color32 {
    use crate::api::RunStatus;
    match status {
        RunStatus::Pending => Color32::from_rgb(136, 142, 150),
        RunStatus::Running => Color32::from_rgb(31, 139, 255),
        RunStatus::Success => Color32::from_rgb(102, 176, 136),
        RunStatus::Failure => Color32::from_rgb(192, 57, 43),
        RunStatus::Other(_) => Color32::from_rgb(160, 140, 90),
    }
}

/// Color for a plugin status chip.
pub fn plugin_status_color(status: &crate::api::PluginStatus) -> Color32 {
    use crate::api::PluginStatus;
    match status {
        PluginStatus::Pending => Color32::from_rgb(136, 142, 150),
        PluginStatus::Active => Color32::from_rgb(102, 176, 136),
        PluginStatus::Error => Color32::from_rgb(192, 57, 43),
        PluginStatus::Other(_) => Color32::from_rgb(160, 140, 90),
    }
}
