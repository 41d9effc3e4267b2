//! Integration test: report export
//!
//! Runs a short simulation and checks the exporter's tables, the CSV files
//! written from them, and the JSON report.

use pokesim::content::{Chapter, Configuration, Event, EventKind};
use pokesim::creature::Creature;
use pokesim::simulator::export::{
    battle_log_table, chapter_progression_table, export_tables, power_progression_table,
    summary_table, write_csv,
};
use pokesim::simulator::{run_simulation, CancelToken, NullObserver, SimConfig, SimulationResult};
use std::fs;

fn short_run() -> SimulationResult {
    let content = Configuration::new(
        vec![
            Chapter::new("Route 1", 2, 0.0).with_events(vec![Event::new(
                "Youngster",
                EventKind::TrainerBattle,
            )
            .with_reward_gold(30)
            .with_encounter(Creature::new("Rattata", 30, 56, 35, 3))]),
            Chapter::new("Route 2", 3, 0.0)
                .with_events(vec![Event::new("Chest", EventKind::Treasure).with_reward_gold(20)]),
        ],
        vec![Creature::new("Charmander", 39, 52, 43, 5)],
    );
    run_simulation(
        &content,
        &SimConfig::seeded(8),
        &mut NullObserver,
        &CancelToken::new(),
    )
    .unwrap()
}

#[test]
fn test_progression_tables_follow_game_days() {
    let result = short_run();

    let power = power_progression_table(&result);
    assert_eq!(power.rows.len(), 5);
    assert_eq!(power.rows[0][3], "0");
    assert_eq!(power.rows[4][3], "8");
    assert_eq!(power.rows[4][4], "00:08");
    assert_eq!(power.rows[4][0], "2");
    assert_eq!(power.rows[4][1], "3");

    let chapters = chapter_progression_table(&result);
    assert_eq!(chapters.rows.len(), 2);
    assert_eq!(chapters.rows[0][2], "completed");
    assert_eq!(chapters.rows[0][3], "4");
    assert_eq!(chapters.rows[1][3], "10");
    assert_eq!(chapters.rows[1][4], "00:10");
}

#[test]
fn test_battle_log_rows_are_numbered_with_labels() {
    let result = short_run();
    let battles = battle_log_table(&result);

    assert_eq!(battles.rows.len() as u64, result.total_battles);
    assert!(!battles.rows.is_empty());
    for (idx, row) in battles.rows.iter().enumerate() {
        assert_eq!(row[0], (idx + 1).to_string());
        assert!(row[1] == "win" || row[1] == "lose");
        assert_eq!(row[4], "Rattata (Lvl 3)");
    }
    assert!(battles.rows[0][3].starts_with("Charmander (Lvl 5)"));
}

#[test]
fn test_summary_covers_counters() {
    let result = short_run();
    let summary = summary_table(&result);
    let value = |key: &str| {
        summary
            .rows
            .iter()
            .find(|row| row[0] == key)
            .map(|row| row[1].clone())
    };

    assert_eq!(value("Status").as_deref(), Some("completed"));
    assert_eq!(value("Total Game Days").as_deref(), Some("5"));
    assert_eq!(value("Real Player Time (seconds)").as_deref(), Some("10"));
    assert_eq!(value("Real Player Time").as_deref(), Some("10 seconds"));
    assert_eq!(value("Chapters Completed").as_deref(), Some("2"));
    assert!(value("Gold Earned").is_some());
    assert!(value("Items Used").is_some());
}

#[test]
fn test_write_csv_creates_one_file_per_table() {
    let result = short_run();
    let dir = std::env::temp_dir().join(format!("pokesim-export-{}", uuid::Uuid::new_v4()));

    let written = write_csv(&result, &dir).unwrap();

    assert_eq!(written.len(), export_tables(&result).len());
    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "summary.csv",
            "power_progression.csv",
            "chapter_progression.csv",
            "battle_log.csv"
        ]
    );

    let battle_csv = fs::read_to_string(dir.join("battle_log.csv")).unwrap();
    assert!(battle_csv.starts_with("Battle,Result,Rounds,Player Party,Enemy Party\n"));
    assert_eq!(battle_csv.lines().count() as u64, result.total_battles + 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_json_report_uses_results_viewer_keys() {
    let result = short_run();
    let json: serde_json::Value = serde_json::from_str(&result.to_json()).unwrap();

    assert_eq!(json["status"], "completed");
    assert_eq!(json["chaptersCompleted"], 2);
    assert_eq!(json["totalGameDays"], 5);
    assert_eq!(json["realPlayerTimeSeconds"], 10);
    assert_eq!(json["realPlayerTimeMinutes"], 0);
    assert!(json["totalPlaytimeSeconds"].is_u64());
    assert_eq!(
        json["totalPowerProgression"].as_array().map(Vec::len),
        Some(5)
    );
    assert_eq!(json["chapterProgression"][1]["gameDay"], 5);
    assert_eq!(
        json["battleLog"].as_array().map(Vec::len),
        Some(result.total_battles as usize)
    );
    assert_eq!(json["battleLog"][0]["enemyParty"][0]["name"], "Rattata");
    assert!(json["battleLog"][0]["playerParty"].is_array());
    assert!(json.get("real_player_time").is_none());
    assert!(json.get("chapters_completed").is_none());
}
