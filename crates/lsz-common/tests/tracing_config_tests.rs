use super::*;

#[test]
fn test_parse_known_formats() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
}

#[test]
fn test_parse_unknown_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}

#[test]
fn test_second_install_reports_existing_subscriber() {
    let _ = install(LogFormat::Text, EnvFilter::new("off"));
    let second = install(LogFormat::Json, EnvFilter::new("off"));
    assert!(second.is_err());
}
