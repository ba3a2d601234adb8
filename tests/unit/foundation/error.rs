use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PanelGridError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PanelGridError::template("x")
            .to_string()
            .contains("template error:")
    );
    assert!(
        PanelGridError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PanelGridError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PanelGridError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
