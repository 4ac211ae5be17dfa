use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Scenario, SessionLogEntry, SessionStats},
    format::{format_money, format_scenario_type},
};

use client_core::dispatcher;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{user_facing_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);
const ERROR_BANNER_TTL: Duration = Duration::from_secs(5);
const DEFAULT_DRAFT_SCORE: u8 = 5;
/// How long after an accepted rating the backend waits before fetching the
/// next scenario on its own; the spinner appears only once that fetch is due.
const AUTO_ADVANCE_SPINNER_DELAY: Duration = Duration::from_millis(1500);

/// Session UI state machine. `Loading` is not a state of its own; the
/// overlay is layered on top of whichever state issued the network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelState {
    /// No scenario on screen yet.
    Idle,
    /// Scenario visible, rating panel hidden (after a successful submit,
    /// while the auto-advance timer runs).
    ScenarioShown,
    /// Scenario visible with the rating controls exposed.
    RatingPanelVisible,
    /// Rating posted, waiting for the backend verdict.
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
    expires_at: Instant,
}

impl StatusBanner {
    fn success(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Success,
            message: message.into(),
            expires_at: Instant::now() + SUCCESS_BANNER_TTL,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Error,
            message: message.into(),
            expires_at: Instant::now() + ERROR_BANNER_TTL,
        }
    }
}

enum ChatLine {
    User(String),
    Bot(String),
    Scenario(Scenario),
    Log(SessionLogEntry),
}

pub struct LabelingApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    panel: PanelState,
    loading: Option<String>,
    auto_advance_at: Option<Instant>,
    current_scenario: Option<Scenario>,
    draft_score: u8,
    last_sent_draft: u8,
    stats: SessionStats,
    transcript: Vec<ChatLine>,
    chat_input: String,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl LabelingApp {
    pub fn new(
        server_url: String,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            panel: PanelState::Idle,
            loading: None,
            auto_advance_at: None,
            current_scenario: None,
            draft_score: DEFAULT_DRAFT_SCORE,
            last_sent_draft: DEFAULT_DRAFT_SCORE,
            stats: SessionStats::default(),
            transcript: Vec::new(),
            chat_input: String::new(),
            status: "Press Start to get your first scenario".to_string(),
            status_banner: None,
        }
    }

    fn request_new_scenario(&mut self) {
        self.loading = Some("Generating new scenario...".to_string());
        // The rating controls go away with the outgoing scenario.
        self.panel = if self.current_scenario.is_some() {
            PanelState::ScenarioShown
        } else {
            PanelState::Idle
        };
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::GenerateScenario,
            &mut self.status,
        );
    }

    fn submit_rating(&mut self) {
        self.loading = Some("Submitting rating...".to_string());
        self.panel = PanelState::Submitting;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitRating {
                score: self.draft_score,
            },
            &mut self.status,
        );
    }

    fn export_data(&mut self) {
        self.loading = Some("Uploading data to Hugging Face dataset...".to_string());
        dispatch_backend_command(&self.cmd_tx, BackendCommand::ExportData, &mut self.status);
    }

    fn send_chat_message(&mut self) {
        let message = self.chat_input.trim().to_string();
        if message.is_empty() {
            return;
        }
        self.chat_input.clear();
        self.transcript.push(ChatLine::User(message.clone()));

        if dispatcher::is_scenario_request(&message) {
            self.request_new_scenario();
        } else {
            let (_, reply) = dispatcher::respond(&message, &mut rand::thread_rng());
            self.transcript.push(ChatLine::Bot(reply.to_string()));
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ScenarioReady(scenario) => {
                    self.current_scenario = Some(scenario.clone());
                    self.transcript.push(ChatLine::Scenario(scenario));
                    self.draft_score = DEFAULT_DRAFT_SCORE;
                    self.last_sent_draft = DEFAULT_DRAFT_SCORE;
                    self.panel = PanelState::RatingPanelVisible;
                    self.loading = None;
                    self.auto_advance_at = None;
                    self.status =
                        "Rate the entrepreneurial readiness for this scenario".to_string();
                }
                UiEvent::ScenarioLogged(entry) => {
                    self.transcript.push(ChatLine::Log(entry));
                }
                UiEvent::RatingAccepted { score } => {
                    self.status_banner = Some(StatusBanner::success(format!(
                        "Rating submitted! Score: {score}/10"
                    )));
                    self.panel = PanelState::ScenarioShown;
                    // The next scenario request fires on its own after a fixed
                    // delay; the spinner waits until it does.
                    self.auto_advance_at = Some(Instant::now() + AUTO_ADVANCE_SPINNER_DELAY);
                }
                UiEvent::StatsUpdated(stats) => {
                    self.stats = stats;
                }
                UiEvent::ExportFinished(message) => {
                    self.loading = None;
                    self.status_banner = Some(StatusBanner::success(message));
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "backend operation failed: {}",
                        err.message()
                    );
                    self.loading = None;
                    self.auto_advance_at = None;
                    if self.panel == PanelState::Submitting {
                        self.panel = PanelState::RatingPanelVisible;
                    }
                    self.status = err.message().to_string();
                    self.status_banner = Some(StatusBanner::error(user_facing_failure(
                        err.context(),
                        err.category(),
                    )));
                }
            }
        }
    }

    fn tick_auto_advance(&mut self) {
        if let Some(due) = self.auto_advance_at {
            if due <= Instant::now() {
                self.auto_advance_at = None;
                self.loading = Some("Generating new scenario...".to_string());
            }
        }
    }

    fn expire_status_banner(&mut self) {
        if let Some(banner) = &self.status_banner {
            if banner.expires_at <= Instant::now() {
                self.status_banner = None;
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Success => (
                    egui::Color32::from_rgb(47, 92, 57),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(88, 156, 104)),
                ),
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Entrepreneurial Readiness Labeler");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "Completed: {}  |  Types seen: {}",
                    self.stats.completed_scenarios, self.stats.distinct_scenario_types
                ));
            });
        });
        ui.horizontal(|ui| {
            let start_label = if self.panel == PanelState::Idle {
                "Start"
            } else {
                "New Scenario"
            };
            if ui.button(start_label).clicked() {
                self.request_new_scenario();
            }
            let can_skip = self.current_scenario.is_some();
            if ui.add_enabled(can_skip, egui::Button::new("Skip")).clicked() {
                self.request_new_scenario();
            }
            if ui.button("Export Data").clicked() {
                self.export_data();
            }
            if let Some(message) = &self.loading {
                ui.spinner();
                ui.label(message);
            } else {
                ui.weak(&self.status);
            }
        });
        ui.weak(format!("Backend: {}", self.server_url));
        self.show_status_banner(ui);
    }

    fn show_scenario_card(ui: &mut egui::Ui, scenario: &Scenario) {
        egui::Frame::NONE
            .fill(ui.visuals().extreme_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "New Scenario: {}",
                        format_scenario_type(&scenario.scenario_type)
                    ))
                    .strong(),
                );
                ui.weak(&scenario.description);
                ui.add_space(4.0);
                egui::Grid::new(ui.next_auto_id())
                    .num_columns(2)
                    .spacing([24.0, 2.0])
                    .show(ui, |ui| {
                        ui.label("Savings:");
                        ui.label(format_money(scenario.savings_amount));
                        ui.end_row();
                        ui.label("Monthly Income:");
                        ui.label(format_money(scenario.monthly_income));
                        ui.end_row();
                        ui.label("Monthly Expenses:");
                        ui.label(format_money(scenario.monthly_expenses));
                        ui.end_row();
                        ui.label("Entertainment:");
                        ui.label(format_money(scenario.monthly_entertainment));
                        ui.end_row();
                        ui.label("Sales Skills:");
                        ui.label(format!("{}/10", scenario.sales_skills));
                        ui.end_row();
                        ui.label("Risk Level:");
                        ui.label(format!("{}/10", scenario.risk_level));
                        ui.end_row();
                        ui.label("Age:");
                        ui.label(format!("{} years", scenario.age));
                        ui.end_row();
                        ui.label("Dependents:");
                        ui.label(format!("{} people", scenario.dependents));
                        ui.end_row();
                        ui.label("Assets:");
                        ui.label(format_money(scenario.assets));
                        ui.end_row();
                        ui.label("Confidence:");
                        ui.label(format!("{}/10", scenario.confidence));
                        ui.end_row();
                        ui.label("Idea Difficulty:");
                        ui.label(format!("{}/10", scenario.difficulty));
                        ui.end_row();
                    });
            });
    }

    fn show_transcript(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.transcript {
                    match line {
                        ChatLine::User(text) => {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                                ui.label(egui::RichText::new(text).strong());
                            });
                        }
                        ChatLine::Bot(text) => {
                            ui.label(text);
                        }
                        ChatLine::Scenario(scenario) => {
                            Self::show_scenario_card(ui, scenario);
                        }
                        ChatLine::Log(entry) => {
                            ui.weak(format!(
                                "Scenario Logged: {} - Score: {}/10 at {}",
                                format_scenario_type(&entry.scenario.scenario_type),
                                entry.score,
                                entry.timestamp.format("%Y-%m-%d %H:%M:%S")
                            ));
                        }
                    }
                    ui.add_space(6.0);
                }
            });
    }

    fn show_rating_panel(&mut self, ui: &mut egui::Ui) {
        let submitting = self.panel == PanelState::Submitting;
        ui.horizontal(|ui| {
            ui.label("Entrepreneurial readiness:");
            let slider = ui.add_enabled(
                !submitting,
                egui::Slider::new(&mut self.draft_score, 0..=10),
            );
            if slider.changed() && self.draft_score != self.last_sent_draft {
                self.last_sent_draft = self.draft_score;
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SetDraftScore {
                        score: self.draft_score,
                    },
                    &mut self.status,
                );
            }
            ui.label(format!("{}/10", self.draft_score));
            if ui
                .add_enabled(!submitting, egui::Button::new("Submit Rating"))
                .clicked()
            {
                self.submit_rating();
            }
        });
    }

    fn show_chat_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let input = ui.add_sized(
                [ui.available_width() - 70.0, 28.0],
                egui::TextEdit::singleline(&mut self.chat_input)
                    .hint_text("Ask about funding, risk, skills..."),
            );
            let enter_pressed =
                input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Send").clicked() || enter_pressed {
                self.send_chat_message();
                input.request_focus();
            }
        });
    }
}

impl eframe::App for LabelingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.tick_auto_advance();
        self.expire_status_banner();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_header(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            ui.add_space(6.0);
            if matches!(
                self.panel,
                PanelState::RatingPanelVisible | PanelState::Submitting
            ) {
                self.show_rating_panel(ui);
            }
            self.show_chat_row(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.transcript.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.weak("Press Start to fetch your first scenario, or say hello below.");
                });
            } else {
                self.show_transcript(ui);
            }
        });

        // Keep banner expiry and backend events ticking without input.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn sample_scenario() -> Scenario {
        Scenario {
            scenario_type: "side_hustle".to_string(),
            description: "Exploring a business on the side".to_string(),
            savings_amount: 12000,
            monthly_income: 4500,
            monthly_expenses: 2000,
            monthly_entertainment: 300,
            sales_skills: 6,
            risk_level: 4,
            age: 29,
            dependents: 1,
            assets: 25000,
            confidence: 7,
            difficulty: 5,
        }
    }

    fn app_with_channels() -> (
        LabelingApp,
        crossbeam_channel::Receiver<BackendCommand>,
        crossbeam_channel::Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = LabelingApp::new("http://127.0.0.1:5000".to_string(), cmd_tx, ui_rx);
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn accepted_rating_defers_spinner_until_next_fetch_is_due() {
        let (mut app, _cmd_rx, ui_tx) = app_with_channels();
        ui_tx
            .send(UiEvent::ScenarioReady(sample_scenario()))
            .expect("queue event");
        ui_tx
            .send(UiEvent::RatingAccepted { score: 7 })
            .expect("queue event");
        app.process_ui_events();

        // The rating was just accepted; the backend waits before fetching.
        assert!(app.loading.is_none());
        assert_eq!(app.panel, PanelState::ScenarioShown);
        assert!(app.auto_advance_at.is_some());

        app.auto_advance_at = Some(Instant::now());
        app.tick_auto_advance();
        assert!(app.loading.is_some());
        assert!(app.auto_advance_at.is_none());
    }

    #[test]
    fn arriving_scenario_cancels_pending_spinner() {
        let (mut app, _cmd_rx, ui_tx) = app_with_channels();
        ui_tx
            .send(UiEvent::ScenarioReady(sample_scenario()))
            .expect("queue event");
        ui_tx
            .send(UiEvent::RatingAccepted { score: 3 })
            .expect("queue event");
        ui_tx
            .send(UiEvent::ScenarioReady(sample_scenario()))
            .expect("queue event");
        app.process_ui_events();

        assert!(app.auto_advance_at.is_none());
        assert!(app.loading.is_none());
        assert_eq!(app.panel, PanelState::RatingPanelVisible);
    }

    #[test]
    fn requesting_a_new_scenario_hides_the_rating_panel() {
        let (mut app, cmd_rx, ui_tx) = app_with_channels();
        ui_tx
            .send(UiEvent::ScenarioReady(sample_scenario()))
            .expect("queue event");
        app.process_ui_events();
        assert_eq!(app.panel, PanelState::RatingPanelVisible);

        app.request_new_scenario();
        assert_eq!(app.panel, PanelState::ScenarioShown);
        assert!(app.loading.is_some());
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::GenerateScenario)
        ));
    }

    #[test]
    fn first_request_stays_idle_until_a_scenario_arrives() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        app.request_new_scenario();
        assert_eq!(app.panel, PanelState::Idle);
        assert!(cmd_rx.try_recv().is_ok());
    }
}
