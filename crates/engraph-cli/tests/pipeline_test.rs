//! End-to-end pipeline test: week folders on disk to chart and table output

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use engraph_cli::{ReportPipeline, WeekReport};
use engraph_config::{CombinedConfig, Config, WeekGroup};

fn write_week(root: &Path, name: &str, days: &[&str]) -> PathBuf {
    let folder = root.join(name);
    fs::create_dir_all(&folder).unwrap();
    for (i, contents) in days.iter().enumerate() {
        let mut file = File::create(folder.join(format!("day{}.csv", i + 1))).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }
    folder
}

fn base_config(output: &Path) -> Config {
    let mut config = Config::default();
    config.output.directory = output.to_path_buf();
    config.output.export_tables = true;
    config
}

#[tokio::test]
async fn pipeline_writes_chart_and_tables() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    // day1 = [A, B, A], day2 = [A, C]
    let dec17 = write_week(
        data_dir.path(),
        "dec17",
        &["user_id\nA\nB\nA\n", "user_id\nA\nC\n"],
    );
    let dec24 = write_week(data_dir.path(), "dec24", &["user_id\nD\nE\n"]);

    let mut config = base_config(output_dir.path());
    config.weeks.push(WeekGroup {
        label: "en".to_string(),
        folders: vec![dec17, dec24],
        palette: None,
    });
    config.validate_all().unwrap();

    ReportPipeline::new(config).run().await.unwrap();

    let chart_path = output_dir.path().join("en.png");
    assert!(chart_path.exists());
    assert!(fs::metadata(&chart_path).unwrap().len() > 1000);

    let tables_path = output_dir.path().join("en_tables.json");
    let json = fs::read_to_string(&tables_path).unwrap();
    let reports: Vec<WeekReport> = serde_json::from_str(&json).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].week, "dec17");
    assert_eq!(reports[0].table.total_users(), 3);
    assert_eq!(reports[0].table.rows()[0].frequency, 1);
    assert_eq!(reports[0].table.rows()[0].tally, 2);
    assert_eq!(reports[0].table.rows()[1].frequency, 3);
    assert_eq!(reports[0].table.rows()[1].tally, 1);
    assert_eq!(reports[1].week, "dec24");
    assert_eq!(reports[1].table.total_users(), 2);
}

#[tokio::test]
async fn pipeline_renders_combined_chart() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let en_week = write_week(data_dir.path(), "en_dec17", &["user_id\nA\nB\n"]);
    let ar_week = write_week(data_dir.path(), "ar_dec17", &["user_id\nX\nX\nY\n"]);

    let mut config = base_config(output_dir.path());
    config.output.export_tables = false;
    config.weeks.push(WeekGroup {
        label: "en".to_string(),
        folders: vec![en_week],
        palette: None,
    });
    config.weeks.push(WeekGroup {
        label: "ar".to_string(),
        folders: vec![ar_week],
        palette: None,
    });
    config.combined = Some(CombinedConfig {
        label: "combined".to_string(),
        primary: "en".to_string(),
        secondary: "ar".to_string(),
    });
    config.validate_all().unwrap();

    ReportPipeline::new(config).run().await.unwrap();

    assert!(output_dir.path().join("en.png").exists());
    assert!(output_dir.path().join("ar.png").exists());
    assert!(output_dir.path().join("combined.png").exists());
    assert!(!output_dir.path().join("en_tables.json").exists());
}

#[tokio::test]
async fn pipeline_handles_empty_week_folder() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let empty = data_dir.path().join("dec31");
    fs::create_dir_all(&empty).unwrap();
    let full = write_week(data_dir.path(), "jan8", &["user_id\nA\n"]);

    let mut config = base_config(output_dir.path());
    config.weeks.push(WeekGroup {
        label: "en".to_string(),
        folders: vec![empty, full],
        palette: None,
    });

    ReportPipeline::new(config).run().await.unwrap();

    let json = fs::read_to_string(output_dir.path().join("en_tables.json")).unwrap();
    let reports: Vec<WeekReport> = serde_json::from_str(&json).unwrap();
    assert!(reports[0].table.is_empty());
    assert_eq!(reports[1].table.total_users(), 1);
    assert_eq!(reports[1].table.rows()[0].percentage, 100.0);
}

#[tokio::test]
async fn pipeline_fails_on_missing_folder() {
    let output_dir = TempDir::new().unwrap();

    let mut config = base_config(output_dir.path());
    config.weeks.push(WeekGroup {
        label: "en".to_string(),
        folders: vec![PathBuf::from("does/not/exist")],
        palette: None,
    });

    let result = ReportPipeline::new(config).run().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn pipeline_respects_palette_override() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let week = write_week(data_dir.path(), "dec17", &["user_id\nA\nB\n"]);

    let mut config = base_config(output_dir.path());
    config.output.export_tables = false;
    config.weeks.push(WeekGroup {
        label: "custom".to_string(),
        folders: vec![week],
        palette: Some(BTreeMap::from([(1, "#123456".to_string())])),
    });
    config.validate_all().unwrap();

    ReportPipeline::new(config).run().await.unwrap();
    assert!(output_dir.path().join("custom.png").exists());
}
