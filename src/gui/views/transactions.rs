//! Transactions view implementation
//!
//! Contains the recent-transactions list, the lookup-by-id field, and
//! the details panel driven by the TransactionView widget.

use crate::gui::app::{TransactionsState, VaultApp};
use crate::gui::helpers::{abbreviate_id, format_fees, format_timestamp, is_valid_transaction_id, status_color};
use eframe::egui::{self, RichText};

impl VaultApp {
    /// Render the transactions view
    pub(crate) fn view_transactions(&mut self, ui: &mut egui::Ui) {
        ui.heading("Transactions");
        ui.add_space(self.theme.spacing_md);

        self.render_lookup_row(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_transaction_list(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_transaction_details(ui);
    }

    fn render_lookup_row(&mut self, ui: &mut egui::Ui) {
        let mut submitted = false;
        ui.horizontal(|ui| {
            ui.label("Transaction id:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.transactions.lookup_input)
                    .hint_text("64 hex characters")
                    .desired_width(420.0)
                    .font(egui::TextStyle::Monospace),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
            if ui.add(self.theme.button_small("Lookup")).clicked() {
                submitted = true;
            }
        });

        if submitted {
            let input = self.transactions.lookup_input.trim().to_string();
            if is_valid_transaction_id(&input) {
                self.transactions.lookup_error = None;
                self.start_fetch_transaction_detail(input);
            } else {
                self.transactions.lookup_error =
                    Some("Transaction ids are 64 hex characters.".to_string());
            }
        }
        if let Some(error) = &self.transactions.lookup_error {
            ui.colored_label(self.theme.warning, error);
        }
    }

    fn render_transaction_list(&mut self, ui: &mut egui::Ui) {
        let mut clicked: Option<String> = None;

        self.theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recent").size(16.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let is_loading = self.transactions.list.is_loading();
                    if ui
                        .add_enabled(!is_loading, self.theme.button_small("Refresh"))
                        .clicked()
                    {
                        self.start_fetch_transactions();
                    }
                });
            });
            ui.add_space(self.theme.spacing_sm);

            if self.transactions.list.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new("Loading transactions...").color(self.theme.text_secondary),
                    );
                });
                return;
            }
            if let Some(error) = self.transactions.list.error() {
                ui.colored_label(self.theme.error, error.to_string());
                return;
            }
            let Some(list) = self.transactions.list.value() else {
                return;
            };
            if list.transactions.is_empty() {
                ui.label(RichText::new("Empty").color(self.theme.text_secondary));
                return;
            }

            let selected = self.transactions.selected_id.clone();
            egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                egui::Grid::new("tx_list_grid")
                    .num_columns(4)
                    .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                    .striped(true)
                    .show(ui, |ui| {
                        for summary in &list.transactions {
                            let is_selected = selected.as_deref() == Some(summary.id.as_str());
                            if ui
                                .selectable_label(
                                    is_selected,
                                    RichText::new(abbreviate_id(&summary.id)).monospace(),
                                )
                                .clicked()
                            {
                                clicked = Some(summary.id.clone());
                            }
                            ui.colored_label(status_color(summary.status), summary.status.as_str());
                            ui.label(format_fees(summary.total_fees_charged));
                            ui.label(
                                RichText::new(format_timestamp(summary.timestamp))
                                    .small()
                                    .color(self.theme.text_secondary),
                            );
                            ui.end_row();
                        }
                    });
            });
        });

        if let Some(id) = clicked {
            self.start_fetch_transaction_detail(id);
        }
    }

    fn render_transaction_details(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let mut refresh_id: Option<String> = None;

        self.theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Transaction Details").size(16.0).strong());
                if let Some(id) = &self.transactions.selected_id {
                    let id = id.clone();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let is_loading = self.transactions.detail.is_loading();
                        if ui
                            .add_enabled(!is_loading, theme.button_small("Refresh"))
                            .clicked()
                        {
                            refresh_id = Some(id);
                        }
                    });
                }
            });
            ui.add_space(theme.spacing_sm);

            let TransactionsState {
                detail_view, detail, ..
            } = &mut self.transactions;
            detail_view.show(ui, &theme, detail);
        });

        if let Some(id) = refresh_id {
            self.start_fetch_transaction_detail(id);
        }
    }
}
