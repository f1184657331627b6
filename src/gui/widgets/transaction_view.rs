//! Transaction details widget
//! Renders a fetched transaction in one of several mutually exclusive
//! modes depending on the fetch phase and the daemon-reported status.

use std::collections::HashSet;

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::async_job::FetchState;
use crate::gui::helpers::{format_fees, format_timestamp, status_color};
use crate::gui::theme::AppTheme;
use crate::types::{Event, Instruction, LogEntry, SubstateDiff, TransactionRecord};

/// The disclosure panels of the finalized view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    FeeInstructions,
    Instructions,
    Events,
    Logs,
    Substates,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::FeeInstructions,
        Panel::Instructions,
        Panel::Events,
        Panel::Logs,
        Panel::Substates,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Panel::FeeInstructions => "Fee Instructions",
            Panel::Instructions => "Instructions",
            Panel::Events => "Events",
            Panel::Logs => "Logs",
            Panel::Substates => "Substates",
        }
    }
}

/// Set of currently expanded panels. Each panel toggles independently;
/// bulk actions open or clear the whole set. Not persisted across
/// navigation - a new widget starts collapsed.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    open: HashSet<Panel>,
}

impl PanelState {
    pub fn is_open(&self, panel: Panel) -> bool {
        self.open.contains(&panel)
    }

    pub fn toggle(&mut self, panel: Panel) {
        if !self.open.remove(&panel) {
            self.open.insert(panel);
        }
    }

    pub fn expand_all(&mut self) {
        self.open.extend(Panel::ALL);
    }

    pub fn collapse_all(&mut self) {
        self.open.clear();
    }

    /// False exactly when the collapse-all control should be disabled.
    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }
}

/// The mutually exclusive render modes, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Fetch in flight; nothing else is checked
    Loading,
    /// Fetch failed; the error message is shown verbatim
    Error,
    /// No transaction selected or fetched
    Nothing,
    /// Not yet finalized; informational message only, no table
    StillPending,
    /// Rejected or invalid; summary table with the failure reason
    FailureSummary,
    /// Finalized; summary table plus disclosure panels
    Finalized,
}

/// Select the render mode for a fetch outcome.
pub fn render_mode(fetch: &FetchState<TransactionRecord>) -> RenderMode {
    match fetch {
        FetchState::Loading(_) => RenderMode::Loading,
        FetchState::Failed(_) => RenderMode::Error,
        FetchState::Idle => RenderMode::Nothing,
        FetchState::Ready(record) => {
            if record.status.is_pending() {
                RenderMode::StillPending
            } else if record.status.is_rejected() {
                RenderMode::FailureSummary
            } else {
                RenderMode::Finalized
            }
        }
    }
}

/// Panels shown for a record: fee instructions and instructions always,
/// the execution panels only when the daemon attached a result.
pub fn visible_panels(record: &TransactionRecord) -> Vec<Panel> {
    let mut panels = vec![Panel::FeeInstructions, Panel::Instructions];
    if record.result.is_some() {
        panels.extend([Panel::Events, Panel::Logs, Panel::Substates]);
    }
    panels
}

/// State for the transaction details widget
pub struct TransactionView {
    panels: PanelState,
}

impl TransactionView {
    pub fn new() -> Self {
        Self {
            panels: PanelState::default(),
        }
    }

    /// Collapse everything; called when the widget is pointed at a new
    /// transaction.
    pub fn reset(&mut self) {
        self.panels.collapse_all();
    }

    /// Render the transaction details view
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        theme: &AppTheme,
        fetch: &FetchState<TransactionRecord>,
    ) {
        match render_mode(fetch) {
            RenderMode::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading transaction...").color(theme.text_secondary));
                });
            }
            RenderMode::Error => {
                if let Some(message) = fetch.error() {
                    ui.colored_label(theme.error, message);
                }
            }
            RenderMode::Nothing => {}
            RenderMode::StillPending => {
                ui.vertical_centered(|ui| {
                    ui.label("Transaction is still pending. Please check back later.");
                });
            }
            RenderMode::FailureSummary => {
                if let Some(record) = fetch.value() {
                    render_failure_summary(ui, theme, record);
                }
            }
            RenderMode::Finalized => {
                if let Some(record) = fetch.value() {
                    self.render_finalized(ui, theme, record);
                }
            }
        }
    }

    fn render_finalized(&mut self, ui: &mut egui::Ui, theme: &AppTheme, record: &TransactionRecord) {
        egui::Grid::new("tx_summary_grid")
            .num_columns(2)
            .spacing([theme.spacing_md, theme.spacing_xs])
            .show(ui, |ui| {
                ui.label(RichText::new("Transaction Hash").color(theme.text_secondary));
                ui.monospace(record.id());
                ui.end_row();

                ui.label(RichText::new("Timestamp").color(theme.text_secondary));
                ui.label(format_timestamp(record.timestamp));
                ui.end_row();

                ui.label(RichText::new("Total Fees").color(theme.text_secondary));
                ui.label(format_fees(record.total_fees()));
                ui.end_row();

                ui.label(RichText::new("Status").color(theme.text_secondary));
                ui.colored_label(status_color(record.status), record.status.as_str());
                ui.end_row();

                if record.transaction_failure.is_some() {
                    ui.label(RichText::new("Reason").color(theme.text_secondary));
                    ui.label(record.reason());
                    ui.end_row();
                }
            });

        ui.add_space(theme.spacing_md);
        ui.horizontal(|ui| {
            ui.heading("More Info");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.panels.any_open(), theme.button_small("Collapse All"))
                    .clicked()
                {
                    self.panels.collapse_all();
                }
                if ui.add(theme.button_small("Expand All")).clicked() {
                    self.panels.expand_all();
                }
            });
        });
        ui.add_space(theme.spacing_xs);

        self.panel(ui, Panel::FeeInstructions, |ui| {
            render_instructions(ui, theme, &record.transaction.fee_instructions);
        });
        self.panel(ui, Panel::Instructions, |ui| {
            render_instructions(ui, theme, &record.transaction.instructions);
        });
        if let Some(result) = &record.result {
            self.panel(ui, Panel::Events, |ui| {
                render_events(ui, theme, &result.events);
            });
            self.panel(ui, Panel::Logs, |ui| {
                render_logs(ui, theme, &result.logs);
            });
            self.panel(ui, Panel::Substates, |ui| {
                render_substates(ui, theme, &result.result);
            });
        }
    }

    /// Render one disclosure panel whose open state is owned by this
    /// widget rather than by egui.
    fn panel(&mut self, ui: &mut egui::Ui, panel: Panel, add_contents: impl FnOnce(&mut egui::Ui)) {
        let open = self.panels.is_open(panel);
        let response = egui::CollapsingHeader::new(panel.title())
            .id_source(panel.title())
            .open(Some(open))
            .show(ui, add_contents);
        if response.header_response.clicked() {
            self.panels.toggle(panel);
        }
    }
}

impl Default for TransactionView {
    fn default() -> Self {
        Self::new()
    }
}

fn render_failure_summary(ui: &mut egui::Ui, theme: &AppTheme, record: &TransactionRecord) {
    egui::Grid::new("tx_failure_grid")
        .num_columns(2)
        .spacing([theme.spacing_md, theme.spacing_xs])
        .show(ui, |ui| {
            ui.label(RichText::new("Transaction Hash").color(theme.text_secondary));
            ui.monospace(record.id());
            ui.end_row();

            ui.label(RichText::new("Timestamp").color(theme.text_secondary));
            ui.label(format_timestamp(record.timestamp));
            ui.end_row();

            ui.label(RichText::new("Status").color(theme.text_secondary));
            ui.colored_label(status_color(record.status), record.status.as_str());
            ui.end_row();

            ui.label(RichText::new("Reason").color(theme.text_secondary));
            ui.label(record.reason());
            ui.end_row();
        });
}

fn render_instructions(ui: &mut egui::Ui, theme: &AppTheme, instructions: &[Instruction]) {
    if instructions.is_empty() {
        ui.label(RichText::new("Empty").color(theme.text_secondary));
        return;
    }
    egui::Grid::new(ui.id().with("instruction_grid"))
        .num_columns(2)
        .spacing([theme.spacing_md, theme.spacing_xs])
        .show(ui, |ui| {
            for (index, instruction) in instructions.iter().enumerate() {
                ui.label(RichText::new(format!("{}", index)).color(theme.text_secondary));
                ui.monospace(instruction.summary());
                ui.end_row();
            }
        });
}

fn render_events(ui: &mut egui::Ui, theme: &AppTheme, events: &[Event]) {
    if events.is_empty() {
        ui.label(RichText::new("Empty").color(theme.text_secondary));
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Topic");
            });
            header.col(|ui| {
                ui.strong("Substate");
            });
            header.col(|ui| {
                ui.strong("Payload");
            });
        })
        .body(|mut body| {
            for event in events {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&event.topic);
                    });
                    row.col(|ui| {
                        ui.monospace(event.substate_id.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        ui.monospace(event.payload.to_string());
                    });
                });
            }
        });
}

fn render_logs(ui: &mut egui::Ui, theme: &AppTheme, logs: &[LogEntry]) {
    if logs.is_empty() {
        ui.label(RichText::new("Empty").color(theme.text_secondary));
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Level");
            });
            header.col(|ui| {
                ui.strong("Message");
            });
            header.col(|ui| {
                ui.strong("Timestamp");
            });
        })
        .body(|mut body| {
            for entry in logs {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&entry.level);
                    });
                    row.col(|ui| {
                        ui.label(&entry.message);
                    });
                    row.col(|ui| {
                        ui.label(&entry.timestamp);
                    });
                });
            }
        });
}

fn render_substates(ui: &mut egui::Ui, theme: &AppTheme, diff: &SubstateDiff) {
    if diff.up_substates.is_empty() && diff.down_substates.is_empty() {
        ui.label(RichText::new("Empty").color(theme.text_secondary));
        return;
    }
    ui.label(format!(
        "{} created, {} consumed",
        diff.up_substates.len(),
        diff.down_substates.len()
    ));
    ui.add_space(theme.spacing_xs);
    for substate in &diff.up_substates {
        ui.monospace(format!("+ {}", substate));
    }
    for substate in &diff.down_substates {
        ui.monospace(format!("- {}", substate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::async_job::AsyncJob;
    use crate::types::TransactionStatus;
    use anyhow::Result;
    use std::sync::mpsc;

    fn record(status: TransactionStatus) -> TransactionRecord {
        serde_json::from_value(serde_json::json!({
            "transaction": {
                "id": "abc123",
                "fee_instructions": [],
                "instructions": []
            },
            "status": status.as_str()
        }))
        .unwrap()
    }

    fn record_with(status: TransactionStatus, extra: serde_json::Value) -> TransactionRecord {
        let mut value = serde_json::json!({
            "transaction": {
                "id": "abc123",
                "fee_instructions": [],
                "instructions": []
            },
            "status": status.as_str()
        });
        value
            .as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        serde_json::from_value(value).unwrap()
    }

    // ==================== render_mode tests ====================

    #[test]
    fn test_render_mode_loading_checks_nothing_else() {
        let (_tx, rx) = mpsc::channel::<Result<TransactionRecord>>();
        let fetch = FetchState::Loading(AsyncJob::new(rx));
        assert_eq!(render_mode(&fetch), RenderMode::Loading);
    }

    #[test]
    fn test_render_mode_error() {
        let fetch: FetchState<TransactionRecord> =
            FetchState::Failed("daemon unreachable".to_string());
        assert_eq!(render_mode(&fetch), RenderMode::Error);
    }

    #[test]
    fn test_render_mode_nothing_when_idle() {
        let fetch: FetchState<TransactionRecord> = FetchState::Idle;
        assert_eq!(render_mode(&fetch), RenderMode::Nothing);
    }

    #[test]
    fn test_render_mode_pending_statuses_show_message_not_table() {
        for status in [
            TransactionStatus::New,
            TransactionStatus::DryRun,
            TransactionStatus::Pending,
        ] {
            let fetch = FetchState::Ready(record(status));
            assert_eq!(render_mode(&fetch), RenderMode::StillPending);
        }
    }

    #[test]
    fn test_render_mode_rejected_statuses() {
        for status in [
            TransactionStatus::Rejected,
            TransactionStatus::InvalidTransaction,
        ] {
            let fetch = FetchState::Ready(record(status));
            assert_eq!(render_mode(&fetch), RenderMode::FailureSummary);
        }
    }

    #[test]
    fn test_render_mode_finalized_statuses() {
        for status in [
            TransactionStatus::Accepted,
            TransactionStatus::OnlyFeeAccepted,
        ] {
            let fetch = FetchState::Ready(record(status));
            assert_eq!(render_mode(&fetch), RenderMode::Finalized);
        }
    }

    // ==================== failure reason tests ====================

    #[test]
    fn test_rejected_reason_formats_first_pair() {
        let record = record_with(
            TransactionStatus::Rejected,
            serde_json::json!({
                "transaction_failure": {"ExecutionFailure": "out of gas"}
            }),
        );
        assert_eq!(record.reason(), "ExecutionFailure: out of gas");
    }

    #[test]
    fn test_rejected_reason_defaults_without_failure() {
        let record = record(TransactionStatus::InvalidTransaction);
        assert_eq!(record.reason(), "No reason");
    }

    #[test]
    fn test_finalized_fees_default_to_zero() {
        let record = record(TransactionStatus::Accepted);
        assert_eq!(record.total_fees(), 0);
    }

    // ==================== visible_panels tests ====================

    #[test]
    fn test_execution_panels_absent_without_result() {
        for status in [
            TransactionStatus::Accepted,
            TransactionStatus::Rejected,
            TransactionStatus::Pending,
        ] {
            let panels = visible_panels(&record(status));
            assert_eq!(panels, vec![Panel::FeeInstructions, Panel::Instructions]);
        }
    }

    #[test]
    fn test_execution_panels_present_with_result() {
        let record = record_with(
            TransactionStatus::Accepted,
            serde_json::json!({ "result": {} }),
        );
        let panels = visible_panels(&record);
        assert_eq!(panels.len(), 5);
        assert!(panels.contains(&Panel::Events));
        assert!(panels.contains(&Panel::Logs));
        assert!(panels.contains(&Panel::Substates));
    }

    // ==================== PanelState tests ====================

    #[test]
    fn test_panels_start_collapsed() {
        let state = PanelState::default();
        assert!(!state.any_open());
        for panel in Panel::ALL {
            assert!(!state.is_open(panel));
        }
    }

    #[test]
    fn test_toggle_is_independent_per_panel() {
        let mut state = PanelState::default();
        state.toggle(Panel::Logs);

        assert!(state.is_open(Panel::Logs));
        assert!(!state.is_open(Panel::Events));
        assert!(!state.is_open(Panel::FeeInstructions));

        state.toggle(Panel::Logs);
        assert!(!state.is_open(Panel::Logs));
    }

    #[test]
    fn test_expand_all_opens_all_five() {
        let mut state = PanelState::default();
        state.expand_all();
        for panel in Panel::ALL {
            assert!(state.is_open(panel));
        }
    }

    #[test]
    fn test_expand_then_collapse_all_empties_set() {
        let mut state = PanelState::default();
        state.expand_all();
        state.collapse_all();

        // any_open() gating the collapse-all control must now disable it
        assert!(!state.any_open());
        for panel in Panel::ALL {
            assert!(!state.is_open(panel));
        }
    }

    #[test]
    fn test_widget_reset_collapses_panels() {
        let mut view = TransactionView::new();
        view.panels.expand_all();
        view.reset();
        assert!(!view.panels.any_open());
    }
}
