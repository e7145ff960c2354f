use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_chase::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use maze_chase::engine::{GameEngine, GameEngineOptions};
use maze_chase::types::{Direction, RuntimeEvent, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

const DEFAULT_FPS: u32 = 60;
const MAX_PELLETS: usize = 244;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    seconds: Option<u32>,
    #[arg(long)]
    scenarios: Option<usize>,
    #[arg(long)]
    fps: Option<u32>,
    #[arg(long)]
    lives: Option<u32>,
    #[arg(long)]
    run_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct Scenario {
    name: String,
    seconds: u32,
    fps: u32,
    lives: u32,
    seed: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
struct ScenarioResultLine {
    scenario: String,
    seed: u32,
    seconds: u32,
    #[serde(rename = "finalScore")]
    final_score: u32,
    #[serde(rename = "highScore")]
    high_score: u32,
    #[serde(rename = "maxLevel")]
    max_level: u32,
    #[serde(rename = "pelletsEaten")]
    pellets_eaten: u32,
    #[serde(rename = "ghostsEaten")]
    ghosts_eaten: u32,
    #[serde(rename = "fruitsEaten")]
    fruits_eaten: u32,
    deaths: u32,
    #[serde(rename = "levelsCleared")]
    levels_cleared: u32,
    #[serde(rename = "gameOvers")]
    game_overs: u32,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioRunResult {
    #[serde(flatten)]
    result: ScenarioResultLine,
    #[serde(rename = "anomalyRecords")]
    anomaly_records: Vec<AnomalyRecord>,
    finished_tick: u64,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    #[serde(rename = "generatedAtIso")]
    generated_at_iso: String,
    #[serde(rename = "scenarioCount")]
    scenario_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averageScore")]
    average_score: u32,
    scenarios: Vec<ScenarioResultLine>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: String,
    event: String,
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let scenarios = resolve_scenarios(&cli);
    let run_started_at_ms = now_ms();
    let seed_hint = scenarios.first().map(|scenario| scenario.seed).unwrap_or(0);
    let run_id = cli
        .run_id
        .clone()
        .unwrap_or_else(|| default_run_id(seed_hint, run_started_at_ms));
    let mut has_anomaly = false;
    let mut scenario_results = Vec::new();
    let mut total_anomalies = 0usize;

    for scenario in scenarios {
        emit_log(
            "info",
            "scenario_started",
            &run_id,
            Some(&scenario.name),
            Some(scenario.seed),
            None,
            json!({
                "seconds": scenario.seconds,
                "fps": scenario.fps,
                "lives": scenario.lives,
            }),
        );
        let scenario_run = match run_scenario(&scenario) {
            Ok(run) => run,
            Err(error) => {
                emit_log(
                    "error",
                    "scenario_failed",
                    &run_id,
                    Some(&scenario.name),
                    Some(scenario.seed),
                    None,
                    json!({ "error": error.to_string() }),
                );
                std::process::exit(2);
            }
        };

        for anomaly in &scenario_run.anomaly_records {
            emit_log(
                "warn",
                "anomaly_detected",
                &run_id,
                Some(&scenario.name),
                Some(scenario.seed),
                Some(anomaly.tick),
                json!({
                    "message": anomaly.message,
                }),
            );
        }

        if !scenario_run.result.anomalies.is_empty() {
            has_anomaly = true;
        }
        total_anomalies += scenario_run.anomaly_records.len();

        emit_log(
            "info",
            "scenario_finished",
            &run_id,
            Some(&scenario.name),
            Some(scenario.seed),
            Some(scenario_run.finished_tick),
            json!({
                "finalScore": scenario_run.result.final_score,
                "maxLevel": scenario_run.result.max_level,
                "deaths": scenario_run.result.deaths,
                "anomalyCount": scenario_run.anomaly_records.len(),
            }),
        );

        println!(
            "{}",
            serde_json::to_string(&scenario_run.result).expect("scenario result should serialize")
        );
        scenario_results.push(scenario_run.result);
    }

    let summary = build_run_summary(
        run_id.clone(),
        run_started_at_ms,
        now_ms(),
        scenario_results,
        total_anomalies,
    );

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                None,
                None,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        None,
        None,
        None,
        json!({
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "averageScore": summary.average_score,
            "summaryOut": summary_out_written,
        }),
    );

    if has_anomaly {
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run_scenario(scenario: &Scenario) -> Result<ScenarioRunResult, maze_chase::error::MazeError> {
    let mut engine = GameEngine::new(
        scenario.seed,
        GameEngineOptions {
            lives: scenario.lives,
            start_paused: false,
            autopilot: true,
            start_level: 0,
        },
    )?;
    let dt = 1.0 / scenario.fps as f64;
    let total_ticks = scenario.seconds as u64 * scenario.fps as u64;

    let mut result = ScenarioResultLine {
        scenario: scenario.name.clone(),
        seed: scenario.seed,
        seconds: scenario.seconds,
        ..ScenarioResultLine::default()
    };
    let mut anomaly_records = Vec::new();
    let mut anomaly_seen = HashSet::new();
    let mut last_tick = 0;

    for _ in 0..total_ticks {
        engine.step(dt, Direction::Stop);
        let snapshot = engine.build_snapshot(true);
        last_tick = snapshot.tick;
        tally_events(&mut result, &snapshot.events);
        result.max_level = result.max_level.max(snapshot.level);
        for message in collect_snapshot_anomalies(&snapshot, scenario.lives) {
            push_anomaly(
                &mut result.anomalies,
                &mut anomaly_records,
                &mut anomaly_seen,
                snapshot.tick,
                message,
            );
        }
    }

    result.final_score = engine.score();
    result.high_score = engine.high_score().max(engine.score());
    Ok(ScenarioRunResult {
        result,
        anomaly_records,
        finished_tick: last_tick,
    })
}

fn tally_events(result: &mut ScenarioResultLine, events: &[RuntimeEvent]) {
    for event in events {
        match event {
            RuntimeEvent::PelletEaten { .. } => result.pellets_eaten += 1,
            RuntimeEvent::GhostEaten { .. } => result.ghosts_eaten += 1,
            RuntimeEvent::FruitEaten { .. } => result.fruits_eaten += 1,
            RuntimeEvent::PlayerCaught { .. } => result.deaths += 1,
            RuntimeEvent::LevelCleared { .. } => result.levels_cleared += 1,
            RuntimeEvent::GameOver { .. } => result.game_overs += 1,
            RuntimeEvent::LevelStarted { .. }
            | RuntimeEvent::GhostReleased { .. }
            | RuntimeEvent::FruitSpawned { .. }
            | RuntimeEvent::FruitExpired => {}
        }
    }
}

fn in_bounds(x: f64, y: f64) -> bool {
    x.is_finite()
        && y.is_finite()
        && (0.0..=SCREEN_WIDTH as f64).contains(&x)
        && (0.0..=SCREEN_HEIGHT as f64).contains(&y)
}

fn collect_snapshot_anomalies(snapshot: &Snapshot, lives: u32) -> Vec<String> {
    let mut anomalies = Vec::new();
    if !in_bounds(snapshot.pacman.x, snapshot.pacman.y) {
        anomalies.push(format!(
            "pacman off screen: ({}, {})",
            snapshot.pacman.x, snapshot.pacman.y
        ));
    }
    for ghost in &snapshot.ghosts {
        if !in_bounds(ghost.x, ghost.y) {
            anomalies.push(format!("ghost off screen: {:?}", ghost.kind));
        }
    }
    if snapshot.pellets_left > MAX_PELLETS {
        anomalies.push(format!("pellet count grew: {}", snapshot.pellets_left));
    }
    if snapshot.lives > lives {
        anomalies.push(format!("lives above start: {}", snapshot.lives));
    }
    anomalies
}

fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
    let seed = normalize_seed(cli.seed.unwrap_or_else(rand::random::<u64>));
    let fps = cli.fps.unwrap_or(DEFAULT_FPS).clamp(10, 240);
    let lives = cli.lives.unwrap_or(maze_chase::constants::STARTING_LIVES).clamp(1, 99);

    if let Some(seconds) = cli.seconds {
        return vec![Scenario {
            name: "custom".to_string(),
            seconds: seconds.clamp(1, 3_600),
            fps,
            lives,
            seed,
        }];
    }

    let count = cli.scenarios.unwrap_or(2).clamp(1, 64);
    (0..count)
        .map(|idx| Scenario {
            name: if idx == 0 {
                "quick-check".to_string()
            } else {
                format!("endurance-{idx}")
            },
            seconds: if idx == 0 { 60 } else { 300 },
            fps,
            lives,
            seed: normalize_seed(seed as u64 + idx as u64),
        })
        .collect()
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    tick: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        tick,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn default_run_id(seed: u32, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    run_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    scenarios: Vec<ScenarioResultLine>,
    anomaly_count: usize,
) -> RunSummary {
    let scenario_count = scenarios.len();
    let total_score: u64 = scenarios.iter().map(|s| s.final_score as u64).sum();
    let average_score = if scenario_count == 0 {
        0
    } else {
        (total_score / scenario_count as u64) as u32
    };
    RunSummary {
        run_id,
        started_at_ms,
        finished_at_ms,
        generated_at_iso: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        scenario_count,
        anomaly_count,
        average_score,
        scenarios,
    }
}

fn emit_log(
    level: &str,
    event: &str,
    run_id: &str,
    scenario: Option<&str>,
    seed: Option<u32>,
    tick: Option<u64>,
    details: Value,
) {
    let log_line = StructuredLogLine {
        timestamp_ms: now_ms(),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        scenario: scenario.map(|value| value.to_string()),
        seed,
        tick,
        details,
    };
    eprintln!(
        "{}",
        serde_json::to_string(&log_line).expect("structured log should serialize")
    );
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).expect("run summary should serialize");
    std::fs::write(path, summary_text)
}
