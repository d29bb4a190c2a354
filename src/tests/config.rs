use super::Config;
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn test_defaults_when_file_is_empty() {
    let cfg = Config::from_toml("");
    assert_eq!(cfg.filter_debounce_ms, 250);
    assert_eq!(cfg.file_extensions, vec!["md".to_string()]);
    assert_eq!(cfg.filter_batch, 16);
    assert_eq!(cfg.log_file, "");
    assert_eq!(cfg.debounce(), Duration::from_millis(250));
}

#[test]
fn test_values_override_defaults() {
    let cfg = Config::from_toml(
        "filter_debounce_ms = 100\nfile_extensions = [\"md\", \"markdown\"]\nlog_file = \"reader.log\"\n",
    );
    assert_eq!(cfg.filter_debounce_ms, 100);
    assert_eq!(cfg.file_extensions, vec!["md".to_string(), "markdown".to_string()]);
    assert_eq!(cfg.filter_batch, 16);
    assert_eq!(cfg.log_file, "reader.log");
}

#[test]
fn test_unreadable_file_falls_back_to_defaults() {
    let cfg = Config::from_toml("filter_debounce_ms = \"soon\"");
    assert_eq!(cfg.filter_debounce_ms, 250);
}
