use matches::assert_matches;

use super::*;

#[test]
fn declares_an_unset_cell() {
    let run = run_ok(vec![inst!(DEFVAR, var("GF@fresh"))], "");
    let cell = VarRef::parse("GF@fresh").unwrap();
    let variable = run.processor.memory().variable(&cell).unwrap();
    assert!(!variable.is_set());
    assert_eq!(variable.type_name(), "");
}

#[test]
fn redefinition_is_a_semantic_error() {
    let err = run_err(
        vec![inst!(DEFVAR, var("GF@twice")), inst!(DEFVAR, var("GF@twice"))],
        "",
    );
    assert_matches!(err, Error::Semantic(_));
}

#[test]
fn missing_temporary_frame() {
    let err = run_err(vec![inst!(DEFVAR, var("TF@a"))], "");
    assert_eq!(err, Error::FrameNotFound(FrameName::TF));
}

#[test]
fn missing_local_frame() {
    let err = run_err(vec![inst!(DEFVAR, var("LF@a"))], "");
    assert_eq!(err, Error::FrameNotFound(FrameName::LF));
}

#[test]
fn same_name_in_different_frames() {
    run_ok(
        vec![
            inst!(DEFVAR, var("GF@a")),
            inst!(CREATEFRAME),
            inst!(DEFVAR, var("TF@a")),
        ],
        "",
    );
}
