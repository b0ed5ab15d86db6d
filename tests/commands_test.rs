//! Integration tests for command handlers

use std::fs;

use fixture_stats::{
    cli::{AnchorArgs, ArchiveSource},
    commands::{
        fixture_report::{handle_fixture_report, FixtureReportParams},
        handle_batch_report, CommandContext,
    },
    FixtureError, FixtureId, FixtureReport, Settings,
};
use tempfile::TempDir;

const SIMILAR: &str = "\u{feff}fixture_id,competition,utcDate_fixture,rank,fd_found,fd_FTHG,fd_FTAG,fd_HC,fd_AC,score_fulltime_prev,delta_total_val\n\
77,BSA,2024-03-10T19:00:00Z,1,true,2,0,6,3,2-0,0.5\n\
77,BSA,2024-03-10T19:00:00Z,2,true,1,0,4,5,1-0,1.0\n\
88,BSA,2024-03-11T19:00:00Z,1,true,5,5,9,9,5-5,0.1\n";

const PANEL: &str = "fixture_id,side,team_name,pos,pts,baseline_gf_mean,baseline_gf_cv_pct\n\
77,HOME,Santos FC,4,30,1.4,20\n\
77,AWAY,São Paulo,9,22,1.1,45\n";

const ARCHIVE: &str = "Date,HomeTeam,AwayTeam,FTHG,FTAG,HC,AC\n\
20/02/2024,Santos,Gremio,1,1,5,3\n\
24/02/2024,Bahia,Sao Paulo,0,2,4,4\n\
01/03/2024,Santos,Vasco,3,0,8,2\n\
15/03/2024,Santos,Bahia,1,0,6,6\n";

fn write_sources(dir: &TempDir) {
    fs::write(dir.path().join("BSA__ID77__Santos_vs_Sao_Paulo__top12.csv"), SIMILAR).unwrap();
    fs::write(dir.path().join("BSA__ID77__Santos_vs_Sao_Paulo__panels.csv"), PANEL).unwrap();
    fs::write(dir.path().join("archive.csv"), ARCHIVE).unwrap();
}

fn report_params(dir: &TempDir, out: &str) -> FixtureReportParams {
    FixtureReportParams {
        similar: dir.path().join("BSA__ID77__Santos_vs_Sao_Paulo__top12.csv"),
        panel: Some(dir.path().join("BSA__ID77__Santos_vs_Sao_Paulo__panels.csv")),
        archive: ArchiveSource {
            archive: Some(dir.path().join("archive.csv")),
            archive_url: None,
        },
        home: None,
        away: None,
        date: None,
        anchors: AnchorArgs::default(),
        fixture_id: Some(FixtureId::new(77)),
        limit: None,
        as_json: true,
        out: Some(dir.path().join(out)),
    }
}

fn read_report(dir: &TempDir, out: &str) -> FixtureReport {
    let text = fs::read_to_string(dir.path().join(out)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn test_report_command_writes_json() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir);
    let ctx = CommandContext::with_settings(Settings::default());

    handle_fixture_report(&ctx, report_params(&dir, "out/report.json"))
        .await
        .unwrap();
    let report = read_report(&dir, "out/report.json");

    assert_eq!(report.home.display_name, "Santos FC");
    assert_eq!(report.away.position, Some(9));
    assert_eq!(report.statistics.home_picks.len(), 2);
    assert_eq!(report.goal_summary.samples, 2);

    let home_dates: Vec<&str> = report.home.recent_matches.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(home_dates, vec!["2024-03-01", "2024-02-20"]);
    assert_eq!(report.away.recent_matches.len(), 1);
}

#[tokio::test]
async fn test_report_command_honours_overrides() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir);
    let ctx = CommandContext::with_settings(Settings::default());

    let mut params = report_params(&dir, "report.json");
    params.date = Some("2024-04-01".parse().unwrap());
    params.limit = Some(1);
    params.anchors = AnchorArgs {
        home_anchor: Some("santos".to_string()),
        home_anchor_score: Some(0.8),
        ..Default::default()
    };
    handle_fixture_report(&ctx, params).await.unwrap();
    let report = read_report(&dir, "report.json");

    let anchor = report.home.anchor.unwrap();
    assert!((anchor.score - 0.8).abs() < 1e-12);
    assert_eq!(report.home.recent_matches.len(), 1);
    assert_eq!(report.home.recent_matches[0].date, "2024-03-15");
}

#[tokio::test]
async fn test_report_command_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let ctx = CommandContext::with_settings(Settings::default());

    let err = handle_fixture_report(&ctx, report_params(&dir, "report.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, FixtureError::Io(_)));
}

#[tokio::test]
async fn test_batch_command_reads_manifest() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir);
    fs::write(
        dir.path().join("manifest.json"),
        r#"[
            {"similar": "BSA__ID77__Santos_vs_Sao_Paulo__top12.csv", "archive": "archive.csv", "fixture_id": 77},
            {"similar": "BSA__ID77__Santos_vs_Sao_Paulo__top12.csv", "archive": "archive.csv", "fixture_id": 77}
        ]"#,
    )
    .unwrap();
    let ctx = CommandContext::with_settings(Settings::default());

    handle_batch_report(&ctx, &dir.path().join("manifest.json"), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_batch_command_bad_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("manifest.json"), r#"{"similar": 3}"#).unwrap();
    let ctx = CommandContext::with_settings(Settings::default());

    let err = handle_batch_report(&ctx, &dir.path().join("manifest.json"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, FixtureError::Manifest(_)));
}

#[test]
fn test_context_rejects_missing_explicit_config() {
    let dir = TempDir::new().unwrap();
    let err = CommandContext::new(Some(dir.path().join("nope.json").as_path())).err().unwrap();
    assert!(matches!(err, FixtureError::Config { .. }));
}

#[test]
fn test_context_loads_policy_from_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"policy": {"cv_cap": 100.0}, "recent_limit": 5}"#).unwrap();

    let ctx = CommandContext::new(Some(path.as_path())).unwrap();
    assert_eq!(ctx.settings.policy.cv_cap, 100.0);
    assert_eq!(ctx.settings.policy.green_max, 35.0);
    assert_eq!(ctx.recent_limit(None), 5);
}
