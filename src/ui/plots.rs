//! Chart rendering for the result panel.

use eframe::egui::{self, Color32};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::charts::{HeroProStat, PlayerKda, RecentMatch, WinLoss};

const KILLS_COLOR: Color32 = Color32::from_rgb(0xff, 0x99, 0x99);
const DEATHS_COLOR: Color32 = Color32::from_rgb(0x66, 0xb3, 0xff);
const ASSISTS_COLOR: Color32 = Color32::from_rgb(0x99, 0xff, 0x99);

/// Grouped K/D/A bars per player, with a detail table underneath
pub fn show_kda(ui: &mut egui::Ui, entries: &[PlayerKda], caption: &str) {
    if !caption.is_empty() {
        ui.label(caption);
        ui.add_space(5.0);
    }

    let mut kills = Vec::new();
    let mut deaths = Vec::new();
    let mut assists = Vec::new();
    for (i, e) in entries.iter().enumerate() {
        let x = i as f64;
        kills.push(Bar::new(x - 0.25, e.kills as f64).width(0.22).name(&e.hero));
        deaths.push(Bar::new(x, e.deaths as f64).width(0.22).name(&e.hero));
        assists.push(Bar::new(x + 0.25, e.assists as f64).width(0.22).name(&e.hero));
    }

    Plot::new("kda_plot")
        .legend(Legend::default())
        .height(260.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(kills).color(KILLS_COLOR).name("Kills"));
            plot_ui.bar_chart(BarChart::new(deaths).color(DEATHS_COLOR).name("Deaths"));
            plot_ui.bar_chart(BarChart::new(assists).color(ASSISTS_COLOR).name("Assists"));
        });

    ui.add_space(10.0);
    egui::Grid::new("kda_table")
        .spacing([15.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Hero");
            ui.strong("Kills");
            ui.strong("Deaths");
            ui.strong("Assists");
            ui.strong("KDA");
            ui.end_row();

            for e in entries {
                ui.label(&e.hero);
                ui.label(e.kills.to_string());
                ui.label(e.deaths.to_string());
                ui.label(e.assists.to_string());
                ui.label(format!("{:.2}", e.kda()));
                ui.end_row();
            }
        });
}

/// Two bars: games won and games lost
pub fn show_win_loss(ui: &mut egui::Ui, record: WinLoss, player: &str) {
    ui.label(format!(
        "{}: {} wins / {} losses — {:.1}% over {} games",
        player,
        record.win,
        record.lose,
        record.win_rate(),
        record.total()
    ));
    ui.add_space(5.0);

    Plot::new("wl_plot")
        .legend(Legend::default())
        .height(220.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(vec![Bar::new(0.0, record.win as f64).width(0.5)])
                    .color(ASSISTS_COLOR)
                    .name("Wins"),
            );
            plot_ui.bar_chart(
                BarChart::new(vec![Bar::new(1.0, record.lose as f64).width(0.5)])
                    .color(KILLS_COLOR)
                    .name("Losses"),
            );
        });
}

/// Gold/XP per minute over the player's recent matches, oldest first
pub fn show_recent(ui: &mut egui::Ui, player: &str, rows: &[RecentMatch]) {
    ui.label(format!("{} — last {} matches", player, rows.len()));
    ui.add_space(5.0);

    // Upstream order is newest first; plot left-to-right chronologically
    let gpm: Vec<[f64; 2]> = rows
        .iter()
        .rev()
        .enumerate()
        .map(|(i, m)| [i as f64, m.gold_per_min as f64])
        .collect();
    let xpm: Vec<[f64; 2]> = rows
        .iter()
        .rev()
        .enumerate()
        .map(|(i, m)| [i as f64, m.xp_per_min as f64])
        .collect();

    Plot::new("recent_plot")
        .legend(Legend::default())
        .height(220.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(gpm))
                    .color(Color32::GOLD)
                    .name("Gold/min"),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(xpm))
                    .color(DEATHS_COLOR)
                    .name("XP/min"),
            );
        });

    ui.add_space(10.0);
    egui::Grid::new("recent_table")
        .spacing([15.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Date");
            ui.strong("Result");
            ui.strong("Duration");
            ui.strong("K/D/A");
            ui.strong("GPM");
            ui.strong("XPM");
            ui.end_row();

            for m in rows {
                ui.label(m.start_date());
                ui.label(if m.won { "Won" } else { "Lost" });
                ui.label(format!("{:.0} min", m.duration_minutes()));
                ui.label(format!("{}/{}/{}", m.kills, m.deaths, m.assists));
                ui.label(m.gold_per_min.to_string());
                ui.label(m.xp_per_min.to_string());
                ui.end_row();
            }
        });
}

/// Pro pick and win counts for the most picked heroes
pub fn show_heroes(ui: &mut egui::Ui, stats: &[HeroProStat]) {
    ui.label(format!(
        "Top {} most picked heroes in professional games",
        stats.len()
    ));
    ui.add_space(5.0);

    let mut picks = Vec::new();
    let mut wins = Vec::new();
    for (i, s) in stats.iter().enumerate() {
        let x = i as f64;
        let label = format!("{} ({:.1}% won)", s.name, s.pro_win_rate());
        picks.push(Bar::new(x - 0.2, s.pro_pick as f64).width(0.35).name(&label));
        wins.push(Bar::new(x + 0.2, s.pro_win as f64).width(0.35).name(&label));
    }

    Plot::new("hero_plot")
        .legend(Legend::default())
        .height(260.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(picks).color(DEATHS_COLOR).name("Pro picks"));
            plot_ui.bar_chart(BarChart::new(wins).color(ASSISTS_COLOR).name("Pro wins"));
        });

    ui.add_space(10.0);
    egui::Grid::new("hero_table")
        .spacing([15.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Hero");
            ui.strong("Pro picks");
            ui.strong("Pro wins");
            ui.strong("Win rate");
            ui.end_row();

            for s in stats {
                ui.label(&s.name);
                ui.label(s.pro_pick.to_string());
                ui.label(s.pro_win.to_string());
                ui.label(format!("{:.1}%", s.pro_win_rate()));
                ui.end_row();
            }
        });
}
