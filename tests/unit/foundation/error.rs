use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ShowError::config("x").to_string().contains("config error:"));
    assert!(ShowError::backend("x").to_string().contains("backend error:"));
    assert!(ShowError::asset("x").to_string().contains("asset error:"));
}

#[test]
fn io_error_names_the_path() {
    let err = ShowError::io(
        "missing/template.ini",
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    let msg = err.to_string();
    assert!(msg.starts_with("io error: missing/template.ini"));
    assert!(msg.contains("gone"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
