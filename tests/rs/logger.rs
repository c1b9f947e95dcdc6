//! Integration tests for logger behavior.

use uni_grades::logger::{
    is_console_suppressed, restore_console, set_level, set_level_from_str, suppress_console, Level,
};
use uni_grades::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn console_can_be_suppressed_and_restored() {
    suppress_console();
    assert!(is_console_suppressed());
    error!("hidden while the dashboard owns the terminal");
    restore_console();
    assert!(!is_console_suppressed());
}
