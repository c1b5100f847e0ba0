use super::*;

#[test]
fn dprint_renders_to_the_log() {
    let run = run_ok(
        vec![inst!(DPRINT, string("debug")), inst!(WRITE, string("out"))],
        "",
    );
    assert_eq!(run.log, "debug");
    assert_eq!(run.output, "out");
}

#[test]
fn break_reports_the_executed_count() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@a")),
            inst!(CREATEFRAME),
            inst!(BREAK),
        ],
        "",
    );
    assert!(run.log.contains("executed 3"));
    assert!(run.log.contains("globals 1"));
    assert!(run.log.contains("temporary present"));
    assert_eq!(run.output, "");
}
