//! Main GUI application module
//!
//! Contains the VaultApp struct, per-section state, and the frame loop.

use crate::{
    client::WalletDaemonClient,
    config::{Config, NetworkKind, ENDPOINTS},
    types::{
        AccountsListResponse, CommitteesResponse, EpochSummary, TransactionRecord,
        TransactionsListResponse,
    },
    user_settings::{CustomEndpoint, UserSettings},
};
use anyhow::Result;
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use tokio::runtime::Builder;

use super::async_job::{AsyncJob, FetchState};
use super::notifications::NotificationEntry;
use super::theme::{configure_style, AppTheme};
use super::widgets::TransactionView;

/// GUI section enum for navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Vault,
    Transactions,
    Committees,
    Settings,
}

/// State for the vault (accounts) section
#[derive(Default)]
pub(crate) struct VaultState {
    pub(crate) accounts: FetchState<AccountsListResponse>,
    /// Name of the account whose assets are shown. Populated from the
    /// first fetched account when nothing is selected.
    pub(crate) selected_account: Option<String>,
}

/// State for the transactions section
#[derive(Default)]
pub(crate) struct TransactionsState {
    pub(crate) list: FetchState<TransactionsListResponse>,
    pub(crate) lookup_input: String,
    pub(crate) lookup_error: Option<String>,
    pub(crate) selected_id: Option<String>,
    pub(crate) detail: FetchState<TransactionRecord>,
    pub(crate) detail_view: TransactionView,
}

/// State for the committees section
#[derive(Default)]
pub(crate) struct CommitteesState {
    pub(crate) epoch: FetchState<EpochSummary>,
    pub(crate) committees: FetchState<CommitteesResponse>,
}

/// Tabs of the settings section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SettingsTab {
    General,
    Endpoints,
}

/// State for the custom endpoint form in settings
#[derive(Default)]
pub(crate) struct EndpointFormState {
    pub(crate) label: String,
    pub(crate) json_rpc_url: String,
    pub(crate) error: Option<String>,
    /// Some(label) when editing an existing endpoint
    pub(crate) editing_label: Option<String>,
}

impl EndpointFormState {
    pub(crate) fn clear(&mut self) {
        self.label.clear();
        self.json_rpc_url.clear();
        self.error = None;
        self.editing_label = None;
    }

    pub(crate) fn populate_from(&mut self, endpoint: &CustomEndpoint) {
        self.label = endpoint.label.clone();
        self.json_rpc_url = endpoint.json_rpc_url.clone();
        self.error = None;
        self.editing_label = Some(endpoint.label.clone());
    }
}

pub struct VaultApp {
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) section: Section,
    pub(crate) notifications: VecDeque<NotificationEntry>,
    pub(crate) show_notifications_popup: bool,
    pub(crate) vault: VaultState,
    pub(crate) transactions: TransactionsState,
    pub(crate) committees: CommitteesState,
    // Settings page editing state
    pub(crate) settings_tab: SettingsTab,
    pub(crate) settings_pending_endpoint: String,
    pub(crate) settings_pending_refresh_secs: u64,
    pub(crate) settings_pending_page_size: u64,
    pub(crate) settings_pending_default_account: String,
    pub(crate) endpoint_form: EndpointFormState,
    // Auto refresh bookkeeping
    pub(crate) last_refresh: std::time::Instant,
}

impl VaultApp {
    fn new(config: Config, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let user_settings = UserSettings::load();

        // Resolve the configured endpoint from user settings; the passed
        // config is only the fallback for a fresh install.
        let config = Self::config_for_selection(&user_settings).unwrap_or(config);

        let settings_pending_endpoint = user_settings.selected_endpoint.clone();
        let settings_pending_refresh_secs = user_settings.auto_refresh_secs;
        let settings_pending_page_size = user_settings.page_size;
        let settings_pending_default_account =
            user_settings.default_account.clone().unwrap_or_default();

        let mut app = Self {
            config,
            user_settings,
            theme,
            section: Section::Vault,
            notifications: VecDeque::with_capacity(20),
            show_notifications_popup: false,
            vault: VaultState::default(),
            transactions: TransactionsState::default(),
            committees: CommitteesState::default(),
            settings_tab: SettingsTab::General,
            settings_pending_endpoint,
            settings_pending_refresh_secs,
            settings_pending_page_size,
            settings_pending_default_account,
            endpoint_form: EndpointFormState::default(),
            last_refresh: std::time::Instant::now(),
        };
        app.refresh_section_data();
        app
    }

    /// Build a Config for the settings' selected endpoint, if it resolves.
    fn config_for_selection(settings: &UserSettings) -> Option<Config> {
        if let Some(builtin) = crate::config::find_endpoint_by_label(&settings.selected_endpoint) {
            let mut config = Config::from_endpoint(builtin);
            config.auto_refresh_secs = settings.auto_refresh_secs;
            config.page_size = settings.page_size;
            Some(config)
        } else if let Some(custom) = settings.get_custom_endpoint(&settings.selected_endpoint) {
            let mut config = Config::from_custom_endpoint(custom);
            config.auto_refresh_secs = settings.auto_refresh_secs;
            config.page_size = settings.page_size;
            Some(config)
        } else {
            None
        }
    }

    /// Spawn a background job on its own thread with a current-thread
    /// runtime; the result arrives over a single-shot channel.
    pub(crate) fn spawn_job<T, FutBuilder, Fut>(&self, builder: FutBuilder) -> AsyncJob<T>
    where
        T: Send + 'static,
        FutBuilder: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<T>> + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(builder()),
                Err(e) => Err(anyhow::anyhow!("Failed to create async runtime: {}", e)),
            };
            let _ = tx.send(result);
        });
        AsyncJob::new(rx)
    }

    // ---- fetch starters ----

    pub(crate) fn start_fetch_accounts(&mut self) {
        let url = self.config.json_rpc_url.clone();
        let page_size = self.config.page_size;
        self.vault.accounts = FetchState::Loading(self.spawn_job(move || async move {
            let client = WalletDaemonClient::new(&url)?;
            Ok(client.accounts_list(page_size, 0).await?)
        }));
    }

    pub(crate) fn start_fetch_transactions(&mut self) {
        let url = self.config.json_rpc_url.clone();
        let page_size = self.config.page_size;
        self.transactions.list = FetchState::Loading(self.spawn_job(move || async move {
            let client = WalletDaemonClient::new(&url)?;
            Ok(client.transactions_list(page_size, 0).await?)
        }));
    }

    /// Start the detail fetch that drives the TransactionView widget.
    /// Supersedes any in-flight detail fetch.
    pub(crate) fn start_fetch_transaction_detail(&mut self, id: String) {
        let url = self.config.json_rpc_url.clone();
        self.transactions.selected_id = Some(id.clone());
        self.transactions.detail_view.reset();
        self.transactions.detail = FetchState::Loading(self.spawn_job(move || async move {
            let client = WalletDaemonClient::new(&url)?;
            Ok(client.transaction_get(&id).await?)
        }));
    }

    pub(crate) fn start_fetch_epoch(&mut self) {
        let url = self.config.json_rpc_url.clone();
        self.committees.epoch = FetchState::Loading(self.spawn_job(move || async move {
            let client = WalletDaemonClient::new(&url)?;
            Ok(client.epoch_summary().await?)
        }));
    }

    pub(crate) fn start_fetch_committees(&mut self) {
        let url = self.config.json_rpc_url.clone();
        self.committees.committees = FetchState::Loading(self.spawn_job(move || async move {
            let client = WalletDaemonClient::new(&url)?;
            Ok(client.committees_list().await?)
        }));
    }

    /// (Re)start the fetches backing the active section.
    pub(crate) fn refresh_section_data(&mut self) {
        match self.section {
            Section::Vault => self.start_fetch_accounts(),
            Section::Transactions => self.start_fetch_transactions(),
            Section::Committees => {
                self.start_fetch_epoch();
                self.start_fetch_committees();
            }
            Section::Settings => {}
        }
        self.last_refresh = std::time::Instant::now();
    }

    fn poll_jobs(&mut self) {
        let notifications = &mut self.notifications;
        poll_fetch(&mut self.vault.accounts, notifications, "Account list");
        poll_fetch(&mut self.transactions.list, notifications, "Transaction list");
        poll_fetch(
            &mut self.transactions.detail,
            notifications,
            "Transaction lookup",
        );
        poll_fetch(&mut self.committees.epoch, notifications, "Epoch summary");
        poll_fetch(&mut self.committees.committees, notifications, "Committee list");

        // Default the vault selection to the first fetched account
        if self.vault.selected_account.is_none() {
            if let Some(list) = self.vault.accounts.value() {
                let preferred = self
                    .user_settings
                    .default_account
                    .as_ref()
                    .filter(|name| list.accounts.iter().any(|a| &a.name == *name))
                    .cloned();
                self.vault.selected_account = preferred.or_else(|| {
                    list.accounts.first().map(|account| account.name.clone())
                });
            }
        }
    }

    fn auto_refresh(&mut self) {
        if self.config.auto_refresh_secs == 0 {
            return;
        }
        if self.last_refresh.elapsed().as_secs() >= self.config.auto_refresh_secs
            && self.section != Section::Settings
        {
            self.refresh_section_data();
        }
    }

    /// Switch to a new daemon endpoint and drop all fetched data.
    pub(crate) fn apply_endpoint_selection(&mut self, label: &str) {
        self.user_settings.selected_endpoint = label.to_string();
        if let Some(config) = Self::config_for_selection(&self.user_settings) {
            self.config = config;
        }
        self.vault = VaultState::default();
        self.transactions = TransactionsState::default();
        self.committees = CommitteesState::default();
        self.refresh_section_data();
        self.notifications
            .push_back(NotificationEntry::new(format!("Switched to {}", label)));
        if let Err(e) = self.user_settings.save() {
            self.notifications
                .push_back(NotificationEntry::new(format!("Failed to save settings: {}", e)));
        }
    }

    pub(crate) fn network_badge(&self) -> (&'static str, egui::Color32) {
        match self.config.kind {
            NetworkKind::Localnet => ("local", self.theme.accent_teal),
            NetworkKind::Devnet => ("devnet", self.theme.warning),
            NetworkKind::Testnet => ("testnet", self.theme.accent_violet),
            NetworkKind::Mainnet => ("mainnet", self.theme.success),
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                ui.heading(RichText::new("VaultView").color(self.theme.primary));
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(12.0)
                        .color(self.theme.text_secondary),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Endpoint selector (rightmost)
                    let mut switched: Option<String> = None;
                    egui::ComboBox::from_id_source("endpoint_selector")
                        .selected_text(&self.config.label)
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for endpoint in ENDPOINTS.iter() {
                                let selected =
                                    self.user_settings.selected_endpoint == endpoint.label;
                                if ui.selectable_label(selected, endpoint.label).clicked() {
                                    switched = Some(endpoint.label.to_string());
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
                                    let selected =
                                        self.user_settings.selected_endpoint == endpoint.label;
                                    if ui.selectable_label(selected, &endpoint.label).clicked() {
                                        switched = Some(endpoint.label.clone());
                                    }
                                }
                            }
                        });
                    if let Some(label) = switched {
                        self.apply_endpoint_selection(&label);
                    }

                    ui.add_space(self.theme.spacing_sm);

                    let (badge, badge_color) = self.network_badge();
                    ui.label(RichText::new(badge).small().color(badge_color));

                    ui.add_space(self.theme.spacing_sm);

                    // Notifications bell
                    let bell = if self.notifications.is_empty() {
                        "🔔".to_string()
                    } else {
                        format!("🔔 {}", self.notifications.len())
                    };
                    if ui.add(egui::Button::new(bell).small()).clicked() {
                        self.show_notifications_popup = !self.show_notifications_popup;
                    }
                });
            });
            ui.add_space(6.0);
        });

        if self.show_notifications_popup {
            egui::Window::new("Notifications")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::RIGHT_TOP, [-12.0, 48.0])
                .show(ctx, |ui| {
                    if self.notifications.is_empty() {
                        ui.label(RichText::new("Nothing yet.").color(self.theme.text_secondary));
                    }
                    for entry in self.notifications.iter().rev().take(10) {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(entry.time_ago())
                                    .small()
                                    .color(self.theme.text_secondary),
                            );
                            ui.label(&entry.message);
                        });
                    }
                    ui.add_space(self.theme.spacing_xs);
                    ui.horizontal(|ui| {
                        if ui.button("Clear").clicked() {
                            self.notifications.clear();
                        }
                        if ui.button("Close").clicked() {
                            self.show_notifications_popup = false;
                        }
                    });
                });
        }
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav_panel")
            .resizable(false)
            .default_width(170.0)
            .show(ctx, |ui| {
                ui.add_space(self.theme.spacing_md);
                let entries = [
                    (Section::Vault, "Vault"),
                    (Section::Transactions, "Transactions"),
                    (Section::Committees, "Committees"),
                    (Section::Settings, "Settings"),
                ];
                for (section, label) in entries {
                    let selected = self.section == section;
                    if ui
                        .selectable_label(selected, RichText::new(label).size(15.0))
                        .clicked()
                        && !selected
                    {
                        self.section = section;
                        self.refresh_section_data();
                    }
                    ui.add_space(self.theme.spacing_xs);
                }
            });
    }
}

/// Poll a fetch state and record a notification when a fetch fails.
fn poll_fetch<T>(
    state: &mut FetchState<T>,
    notifications: &mut VecDeque<NotificationEntry>,
    what: &str,
) {
    let was_loading = state.is_loading();
    state.poll();
    if was_loading {
        if let Some(error) = state.error() {
            tracing::warn!("{} fetch failed: {}", what, error);
            notifications.push_back(NotificationEntry::new(format!("{} failed: {}", what, error)));
        }
    }
}

impl App for VaultApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();
        self.auto_refresh();

        self.render_top_bar(ctx);
        self.render_sidebar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(self.theme.spacing_md);
            egui::ScrollArea::vertical().show(ui, |ui| {
                match self.section {
                    Section::Vault => self.view_vault(ui),
                    Section::Transactions => self.view_transactions(ui),
                    Section::Committees => self.view_committees(ui),
                    Section::Settings => self.view_settings(ui),
                }
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

pub fn launch(config: Config) -> Result<()> {
    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(VaultApp::new(config.clone(), &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]);

    let native_options = NativeOptions {
        viewport,
        // Restore window size/position between sessions
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("VaultView - Wallet Daemon Dashboard", native_options, Box::new(app_creator))
        .map_err(|e| anyhow::anyhow!("Failed to start GUI: {}", e))
}
