use super::super::version::parse_language_version;

#[test]
fn test_plain_version() {
    assert_eq!(parse_language_version("4.60"), 4.6);
    assert_eq!(parse_language_version("3.30"), 3.3);
}

#[test]
fn test_strips_text_around_number() {
    assert_eq!(parse_language_version("OpenGL GLSL 4.50 core"), 4.5);
    assert_eq!(parse_language_version("OpenGL ES GLSL ES 3.20"), 3.2);
}

#[test]
fn test_vendor_digits_are_concatenated() {
    assert_eq!(parse_language_version("4.60 NVIDIA 550.54"), 4.6055);
}

#[test]
fn test_empty_or_unparsable() {
    assert_eq!(parse_language_version(""), 0.0);
    assert_eq!(parse_language_version("unknown"), 0.0);
    assert_eq!(parse_language_version("."), 0.0);
}

#[test]
fn test_integer_version() {
    assert_eq!(parse_language_version("version 4"), 4.0);
}
