use super::*;

#[test]
fn skips_blank_comment_and_malformed_lines() {
    let src = "\n# a comment\n   \nimage = a.png\nnot a directive\n  #indented comment\n";
    let lines = parse_directives(src);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].key, "image");
    assert_eq!(lines[0].value, "a.png");
    assert_eq!(lines[0].line, 4);
}

#[test]
fn trims_key_and_value_whitespace() {
    let lines = parse_directives("  text_color   =   255,0,0   \n");
    assert_eq!(lines[0].key, "text_color");
    assert_eq!(lines[0].value, "255,0,0");
}

#[test]
fn quoted_values_keep_equals_and_hash() {
    let lines = parse_directives("set = \"greeting=hi # there\"\n");
    assert_eq!(lines[0].key, "set");
    assert_eq!(lines[0].value, "greeting=hi # there");
}

#[test]
fn quoted_value_drops_text_after_closing_quote() {
    let lines = parse_directives("text = \"Hello\" trailing\n");
    assert_eq!(lines[0].value, "Hello");
}

#[test]
fn unterminated_quote_is_kept_verbatim() {
    let lines = parse_directives("text = \"Hello\n");
    assert_eq!(lines[0].value, "\"Hello");
}

#[test]
fn value_splits_at_first_equals_only() {
    let lines = parse_directives("set=name=value\n");
    assert_eq!(lines[0].key, "set");
    assert_eq!(lines[0].value, "name=value");
}

#[test]
fn empty_value_is_kept() {
    let lines = parse_directives("text =\n");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].value, "");
}

#[test]
fn read_missing_file_is_io_error() {
    let err = read_directives(Path::new("definitely/not/here.ini")).unwrap_err();
    assert!(matches!(err, ShowError::Io { .. }));
}
