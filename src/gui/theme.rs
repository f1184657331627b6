//! Centralized theme and styling system for the GUI
//!
//! Provides the AppTheme struct with colors, spacing, and styled widget factories.

use eframe::egui;

/// Centralized theme and styling system
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,

    // Accent colors
    pub accent_violet: egui::Color32,
    pub accent_teal: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Dark slate background with violet accents
            background: egui::Color32::from_rgb(14, 14, 20),
            surface: egui::Color32::from_rgb(22, 22, 30),
            surface_hover: egui::Color32::from_rgb(32, 32, 44),
            surface_active: egui::Color32::from_rgb(44, 44, 60),
            panel_fill: egui::Color32::from_rgb(18, 18, 26),
            text_primary: egui::Color32::from_rgb(228, 228, 240),
            text_secondary: egui::Color32::from_rgb(150, 150, 168),

            primary: egui::Color32::from_rgb(147, 112, 219),
            secondary: egui::Color32::from_rgb(70, 70, 90),
            success: egui::Color32::from_rgb(92, 200, 130),
            warning: egui::Color32::from_rgb(255, 170, 0),
            error: egui::Color32::from_rgb(235, 87, 87),

            accent_violet: egui::Color32::from_rgb(147, 112, 219),
            accent_teal: egui::Color32::from_rgb(64, 190, 190),

            spacing_xs: 6.0,
            spacing_sm: 12.0,
            spacing_md: 20.0,
            spacing_lg: 28.0,

            button_small: egui::vec2(100.0, 28.0),
            button_medium: egui::vec2(140.0, 36.0),
        }
    }
}

impl AppTheme {
    /// Create a themed button with consistent sizing and colors
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .strong(),
        )
        .fill(self.surface)
        .stroke(egui::Stroke::new(2.0, self.primary))
        .min_size(self.button_medium)
    }

    /// Create a small themed button
    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.secondary)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
            .min_size(self.button_small)
    }

    /// Create a themed frame for surface elements
    pub fn frame_surface(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(4.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
    }

    /// Create a themed frame for panels/cards
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(4.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.accent_violet))
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    // Outline text inputs so they stand out against panels
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.accent_violet);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.indent = 20.0;

    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(20.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(12.0, egui::FontFamily::Monospace),
    );

    ctx.set_style(style);
}
