use super::*;
use crate::{
    compose::vars::VariableStore,
    foundation::core::Size,
    render::headless::HeadlessBackend,
};

fn composer() -> Composer<HeadlessBackend> {
    Composer::with_vars(
        HeadlessBackend::new(Size::new(640, 480)),
        VariableStore::isolated(),
    )
}

#[test]
fn alias_pieces_split_on_double_semicolon() {
    let pieces: Vec<_> = split_aliases("a=1;;b=x;y;;;;c=").collect();
    assert_eq!(pieces, vec!["a=1", "b=x;y", "c="]);
    assert_eq!(split_aliases("").count(), 0);
}

#[test]
fn option_file_uses_directive_syntax() {
    let src = "# games\n\nmario = title=Super Mario;;year=1985\n  zelda=\"title=Zelda # 1\"\nbroken line\n";
    let entries = parse_options(src);
    assert_eq!(
        entries,
        vec![
            OptionEntry {
                id: "mario".to_owned(),
                aliases: "title=Super Mario;;year=1985".to_owned(),
            },
            OptionEntry {
                id: "zelda".to_owned(),
                aliases: "title=Zelda # 1".to_owned(),
            },
        ]
    );
}

#[test]
fn missing_option_file_is_an_io_error() {
    let err = read_options(Path::new("/nonexistent/options.ini")).unwrap_err();
    assert!(matches!(err, ShowError::Io { .. }));
}

#[test]
fn zero_options_is_a_config_error() {
    let mut c = composer();
    let err = build_options(&mut c, &[], &[]).unwrap_err();
    assert!(matches!(err, ShowError::Config(_)));
    assert!(c.carousel().is_empty());
}

#[test]
fn startup_selection_default_and_by_id() {
    let entries = parse_options("a=\nb=\nc=\n");

    let mut c = composer();
    assert_eq!(build_options(&mut c, &entries, &[]).unwrap(), 3);
    select_startup(&mut c, None);
    assert_eq!(c.carousel().selected_id(), Some("a"));

    let mut c = composer();
    build_options(&mut c, &entries, &[]).unwrap();
    select_startup(&mut c, Some("B"));
    assert_eq!(c.carousel().selected_id(), Some("b"));

    let mut c = composer();
    build_options(&mut c, &entries, &[]).unwrap();
    select_startup(&mut c, Some("zzz"));
    assert_eq!(c.carousel().selected_id(), Some("c"));
}

#[test]
fn each_option_sees_its_own_variables() {
    let mut c = composer();
    let entries = parse_options("one = label=first\ntwo = label=second;;extra={{label}}!\n");
    build_options(&mut c, &entries, &[]).unwrap();
    assert_eq!(c.vars().get("id").as_deref(), Some("two"));
    assert_eq!(c.vars().get("extra").as_deref(), Some("second!"));
}
