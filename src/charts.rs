//! Chart data shaping.
//!
//! Pure functions that reshape façade JSON into plain plot data for the
//! presentation layer. Missing or non-numeric fields default to zero;
//! nothing here performs I/O or fails.

use crate::heroes::HeroNames;
use chrono::DateTime;
use serde_json::Value;

/// One player's kill/death/assist line from a match
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerKda {
    pub hero: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
}

impl PlayerKda {
    /// Kills plus assists per death, deaths floored at one
    pub fn kda(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }
}

/// Outcome line for the match chart caption
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub radiant_win: bool,
    pub duration_secs: i64,
}

/// Aggregate win/loss record for a player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WinLoss {
    pub win: i64,
    pub lose: i64,
}

impl WinLoss {
    pub fn total(&self) -> i64 {
        self.win + self.lose
    }

    /// Win percentage over all recorded games, zero when there are none
    pub fn win_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.win as f64 * 100.0 / self.total() as f64
        }
    }
}

/// One row of a player's recent-match history
#[derive(Debug, Clone, PartialEq)]
pub struct RecentMatch {
    pub match_id: i64,
    pub start_time: i64,
    pub duration_secs: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub gold_per_min: i64,
    pub xp_per_min: i64,
    pub won: bool,
}

impl RecentMatch {
    /// Start time as a calendar date, "-" when the timestamp is absent
    pub fn start_date(&self) -> String {
        DateTime::from_timestamp(self.start_time, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs as f64 / 60.0
    }
}

/// Pick/win numbers for one hero in professional games
#[derive(Debug, Clone, PartialEq)]
pub struct HeroProStat {
    pub hero_id: i64,
    pub name: String,
    pub pro_pick: i64,
    pub pro_win: i64,
}

impl HeroProStat {
    pub fn pro_win_rate(&self) -> f64 {
        if self.pro_pick == 0 {
            0.0
        } else {
            self.pro_win as f64 * 100.0 / self.pro_pick as f64
        }
    }
}

fn int(value: &Value, field: &str) -> i64 {
    value.get(field).and_then(Value::as_i64).unwrap_or(0)
}

/// KDA entries for the first ten players of a match
pub fn kda_entries(match_data: &Value, heroes: &HeroNames) -> Vec<PlayerKda> {
    let empty = Vec::new();
    let players = match_data
        .get("players")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    players
        .iter()
        .take(10)
        .map(|p| PlayerKda {
            hero: heroes.name(int(p, "hero_id")),
            kills: int(p, "kills"),
            deaths: int(p, "deaths"),
            assists: int(p, "assists"),
        })
        .collect()
}

/// Winner and duration of a match, if the payload carries them
pub fn match_outcome(match_data: &Value) -> Option<MatchOutcome> {
    Some(MatchOutcome {
        radiant_win: match_data.get("radiant_win")?.as_bool()?,
        duration_secs: int(match_data, "duration"),
    })
}

/// Win/loss record from a `/players/{id}/wl` payload
pub fn win_loss(data: &Value) -> WinLoss {
    WinLoss {
        win: int(data, "win"),
        lose: int(data, "lose"),
    }
}

/// Rows from a `/players/{id}/recentMatches` payload, upstream order kept
pub fn recent_matches(data: &Value) -> Vec<RecentMatch> {
    let empty = Vec::new();
    let matches = data.as_array().unwrap_or(&empty);

    matches
        .iter()
        .map(|m| {
            // Slots 0-127 are radiant, 128-255 dire
            let radiant = int(m, "player_slot") < 128;
            let radiant_win = m.get("radiant_win").and_then(Value::as_bool).unwrap_or(false);
            RecentMatch {
                match_id: int(m, "match_id"),
                start_time: int(m, "start_time"),
                duration_secs: int(m, "duration"),
                kills: int(m, "kills"),
                deaths: int(m, "deaths"),
                assists: int(m, "assists"),
                gold_per_min: int(m, "gold_per_min"),
                xp_per_min: int(m, "xp_per_min"),
                won: radiant == radiant_win,
            }
        })
        .collect()
}

/// The `top_n` most pro-picked heroes from a `/heroStats` payload
pub fn hero_pro_stats(data: &Value, heroes: &HeroNames, top_n: usize) -> Vec<HeroProStat> {
    let empty = Vec::new();
    let rows = data.as_array().unwrap_or(&empty);

    let mut stats: Vec<HeroProStat> = rows
        .iter()
        .map(|h| {
            let hero_id = int(h, "id");
            // heroStats rows usually name themselves; fall back to the map
            let name = h
                .get("localized_name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| heroes.name(hero_id));
            HeroProStat {
                hero_id,
                name,
                pro_pick: int(h, "pro_pick"),
                pro_win: int(h, "pro_win"),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.pro_pick.cmp(&a.pro_pick).then(a.hero_id.cmp(&b.hero_id)));
    stats.truncate(top_n);
    stats
}

/// Display name from a `/players/{id}` payload
pub fn persona_name(profile: &Value) -> Option<String> {
    profile
        .get("profile")?
        .get("personaname")?
        .as_str()
        .map(str::to_string)
}
