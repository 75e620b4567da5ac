use askql_observability::{Logging, LoggingConfig, LoggingError, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use tracing::level_filters::LevelFilter;

fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Split `<timestamp> - <LEVEL> - <message>` and check the timestamp layout.
fn parse_line(line: &str) -> (String, String) {
    let mut parts = line.splitn(3, " - ");
    let ts = parts.next().unwrap();
    let level = parts.next().unwrap_or_else(|| panic!("no level in {line:?}"));
    let message = parts.next().unwrap_or_else(|| panic!("no message in {line:?}"));
    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
        .unwrap_or_else(|e| panic!("bad timestamp {ts:?}: {e}"));
    (level.to_string(), message.to_string())
}

#[test]
fn writes_one_formatted_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let dispatch = Logging::new(LoggingConfig::file_only(&path)).dispatch().unwrap();

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("User Question: How many people joined in 2023?");
        tracing::warn!("Invalid SQL query generated: I cannot help with that");
        tracing::error!("Database connection failed: timed out");
        tracing::debug!("not written at INFO");
    });

    let lines: Vec<(String, String)> = read_lines(&path).iter().map(|l| parse_line(l)).collect();
    assert_eq!(
        lines,
        vec![
            ("INFO".to_string(), "User Question: How many people joined in 2023?".to_string()),
            ("WARNING".to_string(), "Invalid SQL query generated: I cannot help with that".to_string()),
            ("ERROR".to_string(), "Database connection failed: timed out".to_string()),
        ]
    );
}

#[test]
fn appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    std::fs::write(&path, "2024-01-01 00:00:00 - INFO - earlier run\n").unwrap();

    let dispatch = Logging::new(LoggingConfig::file_only(&path)).dispatch().unwrap();
    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("Query executed successfully. No data found.");
    });

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "2024-01-01 00:00:00 - INFO - earlier run");
    assert_eq!(parse_line(&lines[1]).1, "Query executed successfully. No data found.");
}

#[test]
fn folds_multi_line_messages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let dispatch = Logging::new(LoggingConfig::file_only(&path)).dispatch().unwrap();

    tracing::dispatcher::with_default(&dispatch, || {
        let sql = "SELECT ID, Name\nFROM Sample_Data\nWHERE Age > 30;";
        tracing::info!("Generated SQL Query: {sql}");
    });

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(
        parse_line(&lines[0]).1,
        "Generated SQL Query: SELECT ID, Name FROM Sample_Data WHERE Age > 30;"
    );
}

#[test]
fn library_noise_stays_out_of_the_event_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let dispatch = Logging::new(LoggingConfig::file_only(&path)).dispatch().unwrap();

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!(target: "sqlx::query", "summary=\"SELECT COUNT(*) …\"");
        tracing::info!(target: "askql::pipeline", "User Question: hi");
    });

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(parse_line(&lines[0]).1, "User Question: hi");
}

#[test]
fn level_threshold_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let config = LoggingConfig::file_only(&path).with_level(LevelFilter::WARN);
    let dispatch = Logging::new(config).dispatch().unwrap();

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("dropped");
        tracing::warn!("kept");
    });

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(parse_line(&lines[0]), ("WARNING".to_string(), "kept".to_string()));
}

#[test]
fn concurrent_writers_keep_lines_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let dispatch = Logging::new(LoggingConfig::file_only(&path)).dispatch().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let dispatch = dispatch.clone();
            std::thread::spawn(move || {
                tracing::dispatcher::with_default(&dispatch, || {
                    for i in 0..50 {
                        tracing::info!("User Question: worker {worker} question {i}");
                    }
                });
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 400);
    for line in &lines {
        let (level, message) = parse_line(line);
        assert_eq!(level, "INFO");
        assert!(message.starts_with("User Question: worker "), "corrupt line: {line:?}");
    }
}

#[test]
fn unwritable_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("app.log");
    match Logging::new(LoggingConfig::file_only(&path)).dispatch() {
        Err(LoggingError::Open { path: reported, .. }) => assert_eq!(reported, path),
        Err(other) => panic!("expected Open error, got {other}"),
        Ok(_) => panic!("expected Open error"),
    }
}
