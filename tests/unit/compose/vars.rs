use super::*;

#[test]
fn text_without_delimiters_is_unchanged() {
    let vars = VariableStore::isolated();
    for s in ["", "plain", "one { brace }", "}} then {", "a}b{c"] {
        assert_eq!(vars.expand(s), s);
    }
}

#[test]
fn names_match_case_insensitively() {
    let mut vars = VariableStore::isolated();
    vars.set("Title", "Hello");
    assert_eq!(vars.expand("{{title}}"), "Hello");
    assert_eq!(vars.expand("{{TITLE}}"), "Hello");

    vars.set("TITLE", "Bye");
    assert_eq!(vars.len(), 1);
    assert_eq!(vars.get("title").as_deref(), Some("Bye"));
}

#[test]
fn undefined_name_expands_to_itself() {
    let vars = VariableStore::isolated();
    assert_eq!(vars.expand("{{missing}}"), "missing");
    assert_eq!(vars.expand("x{{}}y"), "xy");
}

#[test]
fn multiple_spans_in_one_pass() {
    let mut vars = VariableStore::isolated();
    vars.set("x", "1");
    vars.set("y", "2");
    assert_eq!(vars.expand("a{{x}}b{{y}}c"), "a1b2c");
}

#[test]
fn unterminated_open_is_copied_verbatim() {
    let mut vars = VariableStore::isolated();
    vars.set("x", "1");
    assert_eq!(vars.expand("{{x}} and {{y"), "1 and {{y");
    assert_eq!(vars.expand("{{"), "{{");
}

#[test]
fn expansion_is_not_recursive() {
    let mut vars = VariableStore::isolated();
    vars.set("outer", "{{inner}}");
    vars.set("inner", "deep");
    assert_eq!(vars.expand("{{outer}}"), "{{inner}}");
}

#[test]
fn environment_is_consulted_only_when_enabled() {
    let path = std::env::var("PATH").unwrap_or_default();
    assert!(!path.is_empty(), "PATH should be set in the test environment");

    assert_eq!(VariableStore::new().expand("{{PATH}}"), path);
    assert_eq!(VariableStore::isolated().expand("{{PATH}}"), "PATH");
}

#[test]
fn stored_value_shadows_environment() {
    let mut vars = VariableStore::new();
    vars.set("path", "mine");
    assert_eq!(vars.get("PATH").as_deref(), Some("mine"));
}

#[test]
fn assignment_with_and_without_substitution() {
    let mut vars = VariableStore::isolated();
    vars.set("name", "world");

    assert!(vars.set_assignment("greeting=hello {{name}}", true));
    assert_eq!(vars.get("greeting").as_deref(), Some("hello world"));

    assert!(vars.set_assignment("raw=hello {{name}}", false));
    assert_eq!(vars.get("raw").as_deref(), Some("hello {{name}}"));

    assert!(vars.set_assignment("eq=a=b", false));
    assert_eq!(vars.get("eq").as_deref(), Some("a=b"));

    assert!(!vars.set_assignment("no equals sign", true));
    assert!(vars.get("no equals sign").is_none());
}
