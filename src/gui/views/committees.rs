//! Committees view implementation
//!
//! Renders the epoch summary and the committee layout for the current
//! epoch. All data is opaque validator-network state from the daemon.

use crate::gui::app::VaultApp;
use crate::gui::helpers::abbreviate_id;
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

impl VaultApp {
    /// Render the committees view
    pub(crate) fn view_committees(&mut self, ui: &mut egui::Ui) {
        ui.heading("Committees");
        ui.add_space(self.theme.spacing_md);

        self.render_epoch_panel(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_committees_panel(ui);
    }

    fn render_epoch_panel(&mut self, ui: &mut egui::Ui) {
        let mut refresh = false;

        self.theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Epoch").size(16.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let is_loading = self.committees.epoch.is_loading();
                    if ui
                        .add_enabled(!is_loading, self.theme.button_small("Refresh"))
                        .clicked()
                    {
                        refresh = true;
                    }
                });
            });
            ui.add_space(self.theme.spacing_sm);

            if self.committees.epoch.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading epoch...").color(self.theme.text_secondary));
                });
                return;
            }
            if let Some(error) = self.committees.epoch.error() {
                ui.colored_label(self.theme.error, error.to_string());
                return;
            }
            let Some(summary) = self.committees.epoch.value() else {
                return;
            };

            egui::Grid::new("epoch_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label(RichText::new("Current epoch").color(self.theme.text_secondary));
                    ui.label(summary.current_epoch.to_string());
                    ui.end_row();

                    ui.label(RichText::new("Validity").color(self.theme.text_secondary));
                    if summary.is_valid {
                        ui.colored_label(self.theme.success, "valid");
                    } else {
                        ui.colored_label(self.theme.warning, "not valid");
                    }
                    ui.end_row();

                    ui.label(RichText::new("Committee shard").color(self.theme.text_secondary));
                    match &summary.committee_shard {
                        Some(shard) => {
                            ui.label(format!(
                                "bucket {} of {} ({} members)",
                                shard.bucket, shard.num_committees, shard.num_members
                            ));
                        }
                        None => {
                            ui.label(
                                RichText::new("not registered").color(self.theme.text_secondary),
                            );
                        }
                    }
                    ui.end_row();
                });
        });

        if refresh {
            self.start_fetch_epoch();
        }
    }

    fn render_committees_panel(&mut self, ui: &mut egui::Ui) {
        let mut refresh = false;

        self.theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Network committees").size(16.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let is_loading = self.committees.committees.is_loading();
                    if ui
                        .add_enabled(!is_loading, self.theme.button_small("Refresh"))
                        .clicked()
                    {
                        refresh = true;
                    }
                });
            });
            ui.add_space(self.theme.spacing_sm);

            if self.committees.committees.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new("Loading committees...").color(self.theme.text_secondary),
                    );
                });
                return;
            }
            if let Some(error) = self.committees.committees.error() {
                ui.colored_label(self.theme.error, error.to_string());
                return;
            }
            let Some(response) = self.committees.committees.value() else {
                return;
            };
            if response.committees.is_empty() {
                ui.label(RichText::new("Empty").color(self.theme.text_secondary));
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto())
                .column(Column::remainder())
                .column(Column::auto())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Bucket");
                    });
                    header.col(|ui| {
                        ui.strong("Shard range");
                    });
                    header.col(|ui| {
                        ui.strong("Validators");
                    });
                })
                .body(|mut body| {
                    for committee in &response.committees {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(committee.bucket.to_string());
                            });
                            row.col(|ui| {
                                ui.monospace(format!(
                                    "{} .. {}",
                                    abbreviate_id(&committee.shard_range.start),
                                    abbreviate_id(&committee.shard_range.end)
                                ));
                            });
                            row.col(|ui| {
                                ui.label(committee.validators.len().to_string());
                            });
                        });
                    }
                });
        });

        if refresh {
            self.start_fetch_committees();
        }
    }
}
