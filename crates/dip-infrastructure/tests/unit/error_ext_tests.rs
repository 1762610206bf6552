//! Error context extension tests

use dip_domain::Error;
use dip_infrastructure::error_ext::ErrorContext;

#[test]
fn test_io_context_wraps_error() {
    let result: std::result::Result<(), std::io::Error> =
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));

    let err = result.io_context("Reading dip.toml").unwrap_err();

    match err {
        Error::Io { message, .. } => {
            assert!(message.starts_with("Reading dip.toml"));
            assert!(message.contains("gone"));
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context_wraps_error() {
    let result: std::result::Result<u8, std::num::ParseIntError> = "x".parse::<u8>();

    let err = result.config_context("Parsing level").unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}
