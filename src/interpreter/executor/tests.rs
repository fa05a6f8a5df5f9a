use pretty_assertions::assert_eq;
use std::time::Instant;

use indexmap::IndexMap;

use super::world::{TICK_FRAMES, TICK_INTERVAL};
use crate::error::{EvalErrorKind, TayoError};
use crate::eval::Value;
use crate::interpreter::{Environment, Interpreter};
use crate::lexer::lex_source;
use crate::parser::Parser;

fn run(source: &str) -> Result<(String, Environment), TayoError> {
    let program = Parser::new(lex_source(source, &IndexMap::new())).parse()?;
    let mut interpreter = Interpreter::with_output(Vec::new());
    let mut env = Environment::new();
    interpreter.run_in(&program, &mut env)?;
    let output = String::from_utf8_lossy(interpreter.output()).into_owned();
    Ok((output, env))
}

fn output(source: &str) -> String {
    run(source).unwrap().0
}

fn eval_error(source: &str) -> (EvalErrorKind, Option<usize>) {
    match run(source) {
        Err(TayoError::Eval(err)) => (err.kind, err.line),
        Err(other) => panic!("Expected evaluation error, got {other}"),
        Ok(_) => panic!("Expected evaluation error"),
    }
}

#[test]
fn test_show_and_set() {
    assert_eq!(output("show \"Hi\"\nset x = 2\nshow x * 3"), "Hi\n6\n");
}

#[test]
fn test_loop_sees_mutations() {
    let source = "set n = 0\nloop 3\n  set n = n + 1\n  show n\nend";
    assert_eq!(output(source), "1\n2\n3\n");
}

#[test]
fn test_loop_count_from_variable_evaluated_once() {
    let source = "set x = 2\nloop x\n  set x = x + 10\n  show x\nend";
    assert_eq!(output(source), "12\n22\n");
}

#[test]
fn test_loop_count_conversions() {
    assert_eq!(output("loop 2.9\n  show 1\nend"), "1\n1\n");
    assert_eq!(output("loop -4\n  show 1\nend"), "");
    assert_eq!(output("loop true\n  show 1\nend"), "1\n");
    assert_eq!(output("loop 0\n  show 1\nend"), "");
}

#[test]
fn test_loop_count_rejects_strings() {
    let (kind, line) = eval_error("show 1\nloop \"three\"\n  show 1\nend");
    assert!(matches!(kind, EvalErrorKind::InvalidCount(_)));
    assert_eq!(line, Some(2));
}

#[test]
fn test_if_truthiness() {
    let source = "if 0\n  show 1\nend\nif \"\"\n  show 2\nend\nif 0.5\n  show 3\nend\nif \"no\"\n  show 4\nend";
    assert_eq!(output(source), "3\n4\n");
}

#[test]
fn test_nested_blocks_share_one_environment() {
    let source = "if 1\n  loop 2\n    set inner = 7\n  end\nend\nshow inner";
    assert_eq!(output(source), "7\n");
}

#[test]
fn test_data_records() {
    let source = "set base = 5\ndata player\n  hp = base * 2\n  name = \"Tayo\"\nend\nshow player.name + \" \" + player.hp";
    let (out, env) = run(source).unwrap();
    assert_eq!(out, "Tayo 10\n");

    let record = env.data("player").unwrap();
    assert_eq!(record.get("hp"), Some(&Value::Int(10)));
}

#[test]
fn test_undefined_field() {
    let (kind, line) = eval_error("data d\n  a = 1\nend\nshow d.b");
    assert_eq!(
        kind,
        EvalErrorKind::UndefinedField {
            record: "d".to_string(),
            field: "b".to_string()
        }
    );
    assert_eq!(line, Some(4));
}

#[test]
fn test_game_markers_and_bodies() {
    let source = "game start\n  scene intro\n    entity hero\n      show \"hero ready\"\n    end\n  end\nend";
    let (out, env) = run(source).unwrap();
    assert_eq!(
        out,
        "🎮 Game engine started\n🗺 Scene: intro\n👾 Entity: hero\nhero ready\n"
    );
    assert!(env.entity("hero").is_some());
}

#[test]
fn test_ui_page_and_route_run_bodies() {
    let source = "ui page home\n  show \"welcome\"\nend\nroute /about\n  show 1 + 1\nend";
    assert_eq!(
        output(source),
        "🖼 UI page: home\nwelcome\n🌐 Route: /about\n2\n"
    );
}

#[test]
fn test_tick_runs_three_frames() {
    let source = "set frame = 0\ntick\n  set frame = frame + 1\n  show frame\nend";
    assert_eq!(output(source), "⏱ Tick loop (3 frames)\n1\n2\n3\n");
}

#[test]
fn test_tick_pauses_between_frames() {
    let started = Instant::now();
    output("tick\n  show 1\nend");
    let gaps = (TICK_FRAMES - 1) as u32;
    assert!(started.elapsed() >= TICK_INTERVAL * gaps);
}

#[test]
fn test_chained_comparison_in_condition() {
    let source = "set x = 5\nif 0 < x < 10\n  show \"in range\"\nend\nif 0 < x < 3\n  show \"never\"\nend";
    assert_eq!(output(source), "in range\n");
}

#[test]
fn test_comparison_results_are_numbers() {
    assert_eq!(output("show (1 < 2) + 1\nshow 1 == true\nshow 2 > 1"), "2\nTrue\nTrue\n");
}

#[test]
fn test_show_quoted_text_with_inner_quotes() {
    assert_eq!(output("show \"say \"hi\"\""), "say \"hi\"\n");
}

#[test]
fn test_runtime_error_line() {
    let (kind, line) = eval_error("show 1\nif 1\n  show 1 / 0\nend");
    assert_eq!(kind, EvalErrorKind::DivisionByZero);
    assert_eq!(line, Some(3));
}

#[test]
fn test_error_stops_execution() {
    let program = Parser::new(lex_source("show 1\nshow missing\nshow 2", &IndexMap::new()))
        .parse()
        .unwrap();
    let mut interpreter = Interpreter::with_output(Vec::new());
    assert!(interpreter.run(&program).is_err());
    assert_eq!(interpreter.into_output(), b"1\n".to_vec());
}
