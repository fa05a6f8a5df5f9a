//! End-to-end tests through the library entry points.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use tayozanx::config::Config;
use tayozanx::error::{EvalErrorKind, ParseError, TayoError};
use tayozanx::ExecutionMode;

fn run_mode(source: &str, config: &Config, mode: ExecutionMode) -> Result<String, TayoError> {
    let mut out = Vec::new();
    tayozanx::run_with_output(source, config, mode, false, &mut out)?;
    Ok(String::from_utf8(out).expect("output is utf-8"))
}

fn tree(source: &str) -> String {
    run_mode(source, &Config::default(), ExecutionMode::TreeWalk).unwrap()
}

fn vm(source: &str) -> String {
    run_mode(source, &Config::default(), ExecutionMode::Bytecode).unwrap()
}

#[test]
fn test_hello_loop_scenario() {
    let source = "show \"Hi\"\nset x = 2\nloop x\n    show x\nend";
    assert_eq!(tree(source), "Hi\n2\n2\n");
}

#[test]
fn test_chained_comparison_in_both_executors() {
    let source = "set x = 5\nshow 0 < x < 10\nshow (x > 1) + 1";
    assert_eq!(tree(source), "True\n2\n");
    assert_eq!(vm(source), tree(source));
}

#[test]
fn test_false_if_body_produces_no_output() {
    assert_eq!(tree("if 0\n  show \"never\"\nend"), "");
}

#[test]
fn test_substitution_is_transparent() {
    assert_eq!(tree("set x = 3\nshow x+2"), "5\n");
}

#[test]
fn test_similar_names_do_not_collide() {
    assert_eq!(tree("set x = 1\nset x2 = 20\nshow x2 + x"), "21\n");
    assert_eq!(tree("set s = \"a+b\"\nshow s"), "a+b\n");
}

#[test]
fn test_set_without_equals_is_structural_error() {
    let err = run_mode("set x 5", &Config::default(), ExecutionMode::Both).unwrap_err();
    assert!(matches!(
        err,
        TayoError::Parse(ParseError::MissingSeparator { line: 1, .. })
    ));
    assert_eq!(err.code(), "E003");
}

#[test]
fn test_vm_matches_interpreter_on_top_level_statements() {
    let sources = [
        "show \"Hi\"\nset x = 2\nshow x * 3.5\nshow x // 3",
        "set name = 'Tayo'\nshow name + ' ' + 2\nshow len(name) > 3",
        "set a = 10\nset a = a ** 2\nshow a % 7\nshow -a / 4",
    ];
    for source in sources {
        assert_eq!(vm(source), tree(source));
    }
}

#[test]
fn test_vm_ignores_blocks() {
    let source = "show 1\nloop 3\n  show 2\nend\ngame start\n  show 3\nend\nshow 4";
    assert_eq!(tree(source), "1\n2\n2\n2\n🎮 Game engine started\n3\n4\n");
    assert_eq!(vm(source), "1\n4\n");
}

#[test]
fn test_executors_do_not_share_variables() {
    // `y` only exists inside a block, which the VM never sees.
    let source = "if 1\n  set y = 5\nend\nshow y";
    assert_eq!(tree(source), "5\n");

    let err = run_mode(source, &Config::default(), ExecutionMode::Bytecode).unwrap_err();
    match err {
        TayoError::Eval(err) => {
            assert_eq!(err.kind, EvalErrorKind::UndefinedVariable("y".to_string()));
            assert_eq!(err.line, Some(4));
        }
        other => panic!("Expected evaluation error, got {other}"),
    }
}

#[test]
fn test_both_mode_prints_headers() {
    let out = run_mode("show 1", &Config::default(), ExecutionMode::Both).unwrap();
    assert_eq!(out, "▶ Interpreter\n1\n\n▶ Compiler/VM\n1\n");
}

#[test]
fn test_both_mode_stops_at_interpreter_error() {
    let mut out = Vec::new();
    let result = tayozanx::run_with_output(
        "show 1\nshow 1 / 0",
        &Config::default(),
        ExecutionMode::Both,
        false,
        &mut out,
    );
    assert!(matches!(result, Err(TayoError::Eval(_))));
    assert_eq!(String::from_utf8(out).unwrap(), "▶ Interpreter\n1\n");
}

#[test]
fn test_disassembly_precedes_vm_output() {
    let mut out = Vec::new();
    tayozanx::run_with_output(
        "set x = 1\nshow x",
        &Config::default(),
        ExecutionMode::Bytecode,
        true,
        &mut out,
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "== <script> ==\n0000    1 SET    x '1'\n0001    2 PRINT  'x'\n---\n1\n"
    );
}

#[test]
fn test_default_aliases_apply() {
    assert_eq!(tree("let x = 4\nprint x\nshow \"print let\""), "4\nprint let\n");
}

#[test]
fn test_configured_aliases_and_strictness() {
    let config = Config::parse("aliases:\n  say: show\nstrict: true\n").unwrap();
    assert_eq!(
        run_mode("say 7", &config, ExecutionMode::TreeWalk).unwrap(),
        "7\n"
    );

    // The configured table replaces the defaults.
    let err = run_mode("print 7", &config, ExecutionMode::TreeWalk).unwrap_err();
    assert!(matches!(
        err,
        TayoError::Parse(ParseError::UnknownStatement { line: 1, .. })
    ));
}

#[test]
fn test_compile_and_disassemble_entry_points() {
    let chunk = tayozanx::compile("show 1\nloop 2\n  show 2\nend\nset z = 3", &Config::default()).unwrap();
    assert_eq!(chunk.len(), 2);
    assert_eq!(
        tayozanx::disassemble(&chunk),
        "== <script> ==\n0000    1 PRINT  '1'\n0001    5 SET    z '3'\n"
    );

    let program = tayozanx::parse("show 1", &Config::default()).unwrap();
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_run_file_checks_extension_before_reading() {
    let err = tayozanx::run_file(
        Path::new("does/not/exist.txt"),
        &Config::default(),
        ExecutionMode::TreeWalk,
        false,
    )
    .unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[test]
fn test_run_file_reports_missing_file() {
    let err = tayozanx::run_file(
        Path::new("does/not/exist.tzx"),
        &Config::default(),
        ExecutionMode::TreeWalk,
        false,
    )
    .unwrap_err();
    assert_eq!(err.code(), "E004");
}

#[test]
fn test_read_script_accepts_both_extensions() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["game.tzx", "game.tasx"] {
        let path = dir.path().join(name);
        fs::write(&path, "show 1\n").unwrap();
        assert_eq!(
            tayozanx::read_script(&path, &Config::default()).unwrap(),
            "show 1\n"
        );
    }
}
