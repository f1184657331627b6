//! Settings view implementation
//!
//! Contains the settings panel rendering including:
//! - General defaults (refresh interval, page size, default account)
//! - Daemon endpoint selection and custom endpoint management
//! - About section

use crate::config::validate_endpoint_url;
use crate::gui::app::{SettingsTab, VaultApp};
use crate::gui::notifications::NotificationEntry;
use crate::user_settings::CustomEndpoint;
use eframe::egui::{self, RichText};

impl VaultApp {
    /// Render the settings view
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.add_space(self.theme.spacing_md);

        ui.horizontal(|ui| {
            for (tab, label) in [
                (SettingsTab::General, "General"),
                (SettingsTab::Endpoints, "Endpoints"),
            ] {
                if ui
                    .selectable_label(self.settings_tab == tab, label)
                    .clicked()
                {
                    self.settings_tab = tab;
                }
            }
        });
        ui.add_space(self.theme.spacing_md);

        match self.settings_tab {
            SettingsTab::General => self.render_general_settings(ui),
            SettingsTab::Endpoints => self.render_endpoint_settings(ui),
        }
    }

    fn render_general_settings(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("General").size(16.0).strong());
            ui.add_space(self.theme.spacing_sm);

            egui::Grid::new("general_settings_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_md, self.theme.spacing_sm])
                .show(ui, |ui| {
                    ui.label("Auto refresh interval (seconds):");
                    ui.add(
                        egui::DragValue::new(&mut self.settings_pending_refresh_secs)
                            .speed(1)
                            .clamp_range(0..=600),
                    );
                    ui.end_row();

                    ui.label("Listing page size:");
                    ui.add(
                        egui::DragValue::new(&mut self.settings_pending_page_size)
                            .speed(1)
                            .clamp_range(1..=500),
                    );
                    ui.end_row();

                    ui.label("Default account:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.settings_pending_default_account)
                            .hint_text("first account when empty")
                            .desired_width(240.0),
                    );
                    ui.end_row();
                });

            let dirty = self.settings_pending_refresh_secs != self.user_settings.auto_refresh_secs
                || self.settings_pending_page_size != self.user_settings.page_size
                || self.settings_pending_default_account.trim()
                    != self.user_settings.default_account.as_deref().unwrap_or("");

            if dirty {
                ui.add_space(self.theme.spacing_sm);
                ui.horizontal(|ui| {
                    if ui.add(self.theme.button_primary("Save")).clicked() {
                        self.user_settings.auto_refresh_secs = self.settings_pending_refresh_secs;
                        self.user_settings.page_size = self.settings_pending_page_size;
                        let account = self.settings_pending_default_account.trim();
                        self.user_settings.default_account = if account.is_empty() {
                            None
                        } else {
                            Some(account.to_string())
                        };
                        self.config.auto_refresh_secs = self.settings_pending_refresh_secs;
                        self.config.page_size = self.settings_pending_page_size;
                        if let Err(e) = self.user_settings.save() {
                            self.notifications.push_back(NotificationEntry::new(format!(
                                "Failed to save settings: {}",
                                e
                            )));
                        } else {
                            self.notifications
                                .push_back(NotificationEntry::new("Settings saved."));
                        }
                    }
                    ui.label(
                        RichText::new("(unsaved changes)")
                            .small()
                            .color(self.theme.warning),
                    );
                });
            }
        });

        ui.add_space(self.theme.spacing_md);
        self.render_about_panel(ui);
    }

    fn render_about_panel(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("About VaultView").size(16.0).strong());
            ui.add_space(self.theme.spacing_sm);

            egui::Grid::new("about_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label(RichText::new("Version:").color(self.theme.text_secondary));
                    ui.label(
                        RichText::new(env!("CARGO_PKG_VERSION"))
                            .strong()
                            .color(self.theme.accent_violet),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Settings file:").color(self.theme.text_secondary));
                    let settings_path = crate::user_settings::UserSettings::settings_path_display();
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&settings_path)
                                .small()
                                .color(self.theme.text_secondary),
                        );
                        if ui
                            .add(egui::Button::new("📋").small())
                            .on_hover_text("Copy path")
                            .clicked()
                        {
                            ui.output_mut(|o| o.copied_text = settings_path.clone());
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(self.theme.spacing_sm);
            ui.horizontal(|ui| {
                if ui
                    .link(RichText::new("📖 README").color(self.theme.accent_teal))
                    .clicked()
                {
                    if let Err(e) = open::that("https://github.com/vaultview/vaultview#readme") {
                        self.notifications
                            .push_back(NotificationEntry::new(format!("Failed to open URL: {}", e)));
                    }
                }
                ui.separator();
                if ui
                    .link(RichText::new("🐛 Report Issue").color(self.theme.accent_teal))
                    .clicked()
                {
                    if let Err(e) = open::that("https://github.com/vaultview/vaultview/issues") {
                        self.notifications
                            .push_back(NotificationEntry::new(format!("Failed to open URL: {}", e)));
                    }
                }
            });
        });
    }

    fn render_endpoint_settings(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("Daemon endpoint").size(16.0).strong());
            ui.add_space(self.theme.spacing_sm);

            let current_label = self.settings_pending_endpoint.clone();
            egui::ComboBox::from_label("")
                .selected_text(&current_label)
                .show_ui(ui, |ui| {
                    for endpoint in crate::config::ENDPOINTS.iter() {
                        let selected = self.settings_pending_endpoint == endpoint.label;
                        if ui.selectable_label(selected, endpoint.label).clicked() {
                            self.settings_pending_endpoint = endpoint.label.to_string();
                        }
                    }
                    if !self.user_settings.custom_endpoints.is_empty() {
                        ui.separator();
                        ui.label(
                            RichText::new("── Custom ──")
                                .small()
                                .color(self.theme.text_secondary),
                        );
                        for endpoint in &self.user_settings.custom_endpoints {
                            let selected = self.settings_pending_endpoint == endpoint.label;
                            if ui.selectable_label(selected, &endpoint.label).clicked() {
                                self.settings_pending_endpoint = endpoint.label.clone();
                            }
                        }
                    }
                });

            if self.settings_pending_endpoint != self.user_settings.selected_endpoint {
                ui.add_space(self.theme.spacing_xs);
                ui.horizontal(|ui| {
                    if ui.add(self.theme.button_primary("Switch endpoint")).clicked() {
                        let label = self.settings_pending_endpoint.clone();
                        self.apply_endpoint_selection(&label);
                    }
                    ui.label(
                        RichText::new("(unapplied selection)")
                            .small()
                            .color(self.theme.warning),
                    );
                });
            }
        });

        ui.add_space(self.theme.spacing_md);
        self.render_custom_endpoint_manager(ui);
    }

    fn render_custom_endpoint_manager(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("Custom endpoints").size(16.0).strong());
            ui.add_space(self.theme.spacing_sm);

            // Existing endpoints with edit/remove controls
            let mut edit: Option<CustomEndpoint> = None;
            let mut remove: Option<String> = None;
            if self.user_settings.custom_endpoints.is_empty() {
                ui.label(
                    RichText::new("No custom endpoints configured.")
                        .color(self.theme.text_secondary),
                );
            } else {
                egui::Grid::new("custom_endpoints_grid")
                    .num_columns(3)
                    .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                    .striped(true)
                    .show(ui, |ui| {
                        for endpoint in &self.user_settings.custom_endpoints {
                            ui.label(&endpoint.label);
                            ui.monospace(&endpoint.json_rpc_url);
                            ui.horizontal(|ui| {
                                if ui.add(egui::Button::new("Edit").small()).clicked() {
                                    edit = Some(endpoint.clone());
                                }
                                if ui.add(egui::Button::new("Remove").small()).clicked() {
                                    remove = Some(endpoint.label.clone());
                                }
                            });
                            ui.end_row();
                        }
                    });
            }
            if let Some(endpoint) = edit {
                self.endpoint_form.populate_from(&endpoint);
            }
            if let Some(label) = remove {
                if self.user_settings.remove_custom_endpoint(&label) {
                    if let Err(e) = self.user_settings.save() {
                        self.notifications.push_back(NotificationEntry::new(format!(
                            "Failed to save settings: {}",
                            e
                        )));
                    } else {
                        self.notifications
                            .push_back(NotificationEntry::new(format!("Removed {}", label)));
                    }
                }
            }

            ui.add_space(self.theme.spacing_sm);
            ui.separator();
            ui.add_space(self.theme.spacing_sm);

            // Add/edit form
            let editing = self.endpoint_form.editing_label.is_some();
            ui.label(if editing { "Edit endpoint" } else { "Add endpoint" });
            ui.add_space(self.theme.spacing_xs);
            egui::Grid::new("endpoint_form_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_sm, self.theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label("Label:");
                    ui.add_enabled(
                        !editing,
                        egui::TextEdit::singleline(&mut self.endpoint_form.label)
                            .desired_width(240.0),
                    );
                    ui.end_row();

                    ui.label("JSON-RPC URL:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.endpoint_form.json_rpc_url)
                            .hint_text("http://host:9000/json_rpc")
                            .desired_width(360.0),
                    );
                    ui.end_row();
                });

            if let Some(error) = &self.endpoint_form.error {
                ui.colored_label(self.theme.error, error);
            }

            ui.add_space(self.theme.spacing_xs);
            ui.horizontal(|ui| {
                let action = if editing { "Update" } else { "Add" };
                if ui.add(self.theme.button_small(action)).clicked() {
                    self.submit_endpoint_form();
                }
                if editing && ui.add(self.theme.button_small("Cancel")).clicked() {
                    self.endpoint_form.clear();
                }
            });
        });
    }

    fn submit_endpoint_form(&mut self) {
        let label = self.endpoint_form.label.trim().to_string();
        if label.is_empty() {
            self.endpoint_form.error = Some("Label is required.".to_string());
            return;
        }
        let url = match validate_endpoint_url(&self.endpoint_form.json_rpc_url) {
            Ok(url) => url.to_string(),
            Err(e) => {
                self.endpoint_form.error = Some(format!("Invalid URL: {}", e));
                return;
            }
        };

        let endpoint = CustomEndpoint::new(label.clone(), url);
        let applied = if self.endpoint_form.editing_label.is_some() {
            self.user_settings.update_custom_endpoint(endpoint)
        } else {
            self.user_settings.add_custom_endpoint(endpoint)
        };
        if !applied {
            self.endpoint_form.error = Some(format!("The label '{}' is already in use.", label));
            return;
        }

        if let Err(e) = self.user_settings.save() {
            self.notifications
                .push_back(NotificationEntry::new(format!("Failed to save settings: {}", e)));
        } else {
            self.notifications
                .push_back(NotificationEntry::new(format!("Saved endpoint {}", label)));
        }
        self.endpoint_form.clear();
    }
}
