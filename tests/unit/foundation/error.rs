use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ComposeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ComposeError::pipeline("x")
            .to_string()
            .contains("pipeline error:")
    );
    assert!(ComposeError::decode("x").to_string().contains("decode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ComposeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
