use mln_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn read_logs(dir: &Path) -> String {
    fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|path| fs::read_to_string(path).unwrap())
        .collect()
}

#[test]
#[serial]
fn file_logging_writes_into_the_log_directory() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("mln-sda").join("var").join("log");

    let logger = Logger::builder()
        .name("mln")
        .path(&log_dir)
        .level(LevelFilter::INFO)
        .directives("mln_noisy=off")
        .init()?;

    assert!(logger.guard().is_some(), "file output must hold a writer guard");

    tracing::info!(command = "ls", "Dispatched command");
    tracing::debug!("below the configured level");
    tracing::info!(target: "mln_noisy", "silenced by directive");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let contents = read_logs(&log_dir);
    assert!(contents.contains("Dispatched command"));
    assert!(!contents.contains("below the configured level"));
    assert!(!contents.contains("silenced by directive"));

    let second = Logger::builder().name("mln-again").console(true).init();
    assert!(
        matches!(second, Err(LoggerError::Subscriber { .. })),
        "the global subscriber can only be installed once"
    );

    Ok(())
}
