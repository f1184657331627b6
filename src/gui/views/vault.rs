//! Vault view implementation
//!
//! Shows the wallet's accounts. The first fetched account becomes the
//! selection when nothing is selected yet; with no accounts at all an
//! onboarding hint is shown instead.

use crate::gui::app::VaultApp;
use crate::gui::helpers::abbreviate_id;
use eframe::egui::{self, RichText};

impl VaultApp {
    /// Render the vault view
    pub(crate) fn view_vault(&mut self, ui: &mut egui::Ui) {
        ui.heading("Vault");
        ui.add_space(self.theme.spacing_md);

        if self.vault.accounts.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading accounts...").color(self.theme.text_secondary));
            });
            return;
        }

        if let Some(error) = self.vault.accounts.error() {
            let message = error.to_string();
            ui.colored_label(self.theme.error, message);
            ui.add_space(self.theme.spacing_sm);
            if ui.add(self.theme.button_small("Retry")).clicked() {
                self.start_fetch_accounts();
            }
            return;
        }

        let Some(list) = self.vault.accounts.value() else {
            return;
        };

        if list.accounts.is_empty() {
            self.theme.frame_panel().show(ui, |ui| {
                ui.label(RichText::new("Welcome").size(18.0).strong());
                ui.add_space(self.theme.spacing_xs);
                ui.label("This wallet has no accounts yet. Create one with the daemon CLI and it will appear here.");
            });
            return;
        }

        let accounts = list.accounts.clone();
        let selected = self.vault.selected_account.clone();
        let mut newly_selected: Option<String> = None;

        self.theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new(format!("Accounts ({})", accounts.len()))
                    .size(16.0)
                    .strong(),
            );
            ui.add_space(self.theme.spacing_sm);

            egui::Grid::new("accounts_grid")
                .num_columns(3)
                .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                .striped(true)
                .show(ui, |ui| {
                    for account in &accounts {
                        let is_selected = selected.as_deref() == Some(account.name.as_str());
                        if ui.selectable_label(is_selected, &account.name).clicked() {
                            newly_selected = Some(account.name.clone());
                        }
                        ui.horizontal(|ui| {
                            ui.monospace(abbreviate_id(&account.address));
                            if ui
                                .add(egui::Button::new("📋").small())
                                .on_hover_text("Copy address")
                                .clicked()
                            {
                                ui.output_mut(|o| o.copied_text = account.address.clone());
                            }
                        });
                        if account.is_default {
                            ui.label(RichText::new("default").small().color(self.theme.accent_teal));
                        } else {
                            ui.label("");
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(name) = newly_selected {
            self.vault.selected_account = Some(name);
        }

        if let Some(name) = &self.vault.selected_account {
            ui.add_space(self.theme.spacing_md);
            self.theme.frame_surface().show(ui, |ui| {
                ui.label(
                    RichText::new(format!("Active account: {}", name))
                        .color(self.theme.accent_violet),
                );
                ui.label(
                    RichText::new("Assets and balances for this account are shown in the daemon's asset view.")
                        .small()
                        .color(self.theme.text_secondary),
                );
            });
        }
    }
}
