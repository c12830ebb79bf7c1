use eframe::{self, egui};
use egui::ViewportBuilder;
use log::{error, info};

use crate::api::OpenDota;
use crate::charts::{self, HeroProStat, PlayerKda, RecentMatch, WinLoss};
use crate::error::ApiError;
use crate::heroes::{HeroNames, HERO_IDS_FILE};

use super::plots;

/// How many heroes the pro-stats chart shows
const TOP_HEROES: usize = 20;

/// Chart currently on screen
enum ResultView {
    Kda {
        entries: Vec<PlayerKda>,
        caption: String,
    },
    WinLoss {
        record: WinLoss,
        player: String,
    },
    Recent {
        player: String,
        rows: Vec<RecentMatch>,
    },
    Heroes(Vec<HeroProStat>),
}

pub struct MatchStatsApp {
    api: OpenDota,
    heroes: HeroNames,
    id_input: String,
    status: String,
    view: Option<ResultView>,
}

impl MatchStatsApp {
    pub fn new(api: OpenDota, heroes: HeroNames) -> Self {
        Self {
            api,
            heroes,
            id_input: String::new(),
            status: "Enter a match or account ID.".to_string(),
            view: None,
        }
    }

    fn fail(&mut self, e: ApiError) {
        error!("Request failed: {}", e);
        self.status = e.to_string();
        self.view = None;
    }

    fn show_match_stats(&mut self) {
        match self.api.match_details(&self.id_input) {
            Ok(data) => {
                let entries = charts::kda_entries(&data, &self.heroes);
                if entries.is_empty() {
                    self.status = "No player data in this match.".to_string();
                    self.view = None;
                    return;
                }
                let caption = match charts::match_outcome(&data) {
                    Some(o) => format!(
                        "{} victory in {:.0} minutes",
                        if o.radiant_win { "Radiant" } else { "Dire" },
                        o.duration_secs as f64 / 60.0
                    ),
                    None => String::new(),
                };
                self.view = Some(ResultView::Kda { entries, caption });
                self.status = "Match statistics displayed.".to_string();
            }
            Err(e) => self.fail(e),
        }
    }

    fn show_win_loss(&mut self) {
        match self.api.player_win_lose(&self.id_input) {
            Ok(data) => {
                let record = charts::win_loss(&data);
                let player = self.player_display_name();
                self.view = Some(ResultView::WinLoss { record, player });
                self.status = "Win/loss record displayed.".to_string();
            }
            Err(e) => self.fail(e),
        }
    }

    fn show_recent_matches(&mut self) {
        match self.api.recent_matches(&self.id_input) {
            Ok(data) => {
                let rows = charts::recent_matches(&data);
                if rows.is_empty() {
                    self.status = "No recent matches for this player.".to_string();
                    self.view = None;
                    return;
                }
                let player = self.player_display_name();
                self.view = Some(ResultView::Recent { player, rows });
                self.status = "Recent matches displayed.".to_string();
            }
            Err(e) => self.fail(e),
        }
    }

    fn show_hero_stats(&mut self) {
        match self.api.hero_stats() {
            Ok(data) => {
                self.view = Some(ResultView::Heroes(charts::hero_pro_stats(
                    &data,
                    &self.heroes,
                    TOP_HEROES,
                )));
                self.status = "Hero statistics displayed.".to_string();
            }
            Err(e) => self.fail(e),
        }
    }

    fn clear_cache(&mut self) {
        match self.api.clear_cache() {
            Ok(message) => self.status = message,
            Err(e) => self.fail(e),
        }
    }

    /// Profile lookup is best-effort; the raw ID is a fine fallback label
    fn player_display_name(&self) -> String {
        self.api
            .player_profile(&self.id_input)
            .ok()
            .and_then(|profile| charts::persona_name(&profile))
            .unwrap_or_else(|| format!("Player {}", self.id_input))
    }
}

impl eframe::App for MatchStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Match Statistics Viewer");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Match / account ID:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.id_input)
                        .desired_width(200.0)
                        .hint_text("e.g. 271145478"),
                );
            });
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.button("Match KDA").clicked() {
                    self.show_match_stats();
                }
                if ui.button("Win / Loss").clicked() {
                    self.show_win_loss();
                }
                if ui.button("Recent Matches").clicked() {
                    self.show_recent_matches();
                }
                if ui.button("Hero Stats").clicked() {
                    self.show_hero_stats();
                }
                if ui.button("Clear Cache").clicked() {
                    self.clear_cache();
                }
            });
            ui.add_space(5.0);

            ui.label(&self.status);
            ui.add_space(10.0);

            egui::ScrollArea::vertical().show(ui, |ui| match &self.view {
                Some(ResultView::Kda { entries, caption }) => {
                    plots::show_kda(ui, entries, caption);
                }
                Some(ResultView::WinLoss { record, player }) => {
                    plots::show_win_loss(ui, *record, player);
                }
                Some(ResultView::Recent { player, rows }) => {
                    plots::show_recent(ui, player, rows);
                }
                Some(ResultView::Heroes(stats)) => {
                    plots::show_heroes(ui, stats);
                }
                None => {}
            });
        });
    }
}

pub fn launch_gui() -> Result<(), eframe::Error> {
    let heroes = HeroNames::load_or_empty(HERO_IDS_FILE);
    let api = OpenDota::default();
    info!("Using cache directory {:?}", api.cache().cache_dir());

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Match Statistics Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(MatchStatsApp::new(api, heroes)))),
    )
}
