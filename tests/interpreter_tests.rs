use minilang_debugger::debugger::{Interpreter, RunOutcome, RuntimeError};

// Helper to build an interpreter with a program already loaded
fn load(source: &str) -> Interpreter {
    let mut interp = Interpreter::new();
    interp.load(source).expect("program should parse");
    interp
}

fn run_to_end(interp: &mut Interpreter) -> Vec<String> {
    let outcome = interp.run().expect("program should run");
    assert_eq!(outcome, RunOutcome::Finished, "expected a full pass");
    interp.take_output()
}

#[cfg(test)]
mod execution_tests {
    use super::*;

    #[test]
    fn test_set_and_print() {
        let mut interp = load("set a 5\nprint a");
        assert_eq!(run_to_end(&mut interp), vec!["5"]);
    }

    #[test]
    fn test_sub_variable() {
        let source = r#"set a 5
sub a 2
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["3"]);
    }

    #[test]
    fn test_set_overrides_previous_value() {
        let source = r#"set a 5
set a 6
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["6"]);
    }

    #[test]
    fn test_call_function_and_print() {
        let source = r#"def f
    set a 5
call f
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["5"]);
    }

    #[test]
    fn test_call_function_sub_and_print() {
        let source = r#"set a 5
def f
    sub a 3
call f
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["2"]);
    }

    #[test]
    fn test_variable_set_in_function_survives_return() {
        let source = r#"def f
    set a 1
call f
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["1"]);
    }

    #[test]
    fn test_calling_twice_accumulates() {
        let source = r#"set a 5
def f
    sub a 1
call f
call f
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["3"]);
    }

    #[test]
    fn test_function_defined_in_earlier_block() {
        let mut interp = load("def f\n    set a 5");
        interp
            .load("call f\nprint a")
            .expect("second block should parse");
        assert_eq!(run_to_end(&mut interp), vec!["5"]);
    }

    #[test]
    fn test_rem_removes_variable() {
        let source = r#"set a 5
rem a
print a"#;
        let mut interp = load(source);
        let err = interp.run().expect_err("print of removed variable fails");
        assert_eq!(
            err,
            RuntimeError::UndefinedVariable {
                name: "a".to_string(),
                line: 2
            }
        );
    }

    #[test]
    fn test_rem_of_missing_variable_is_harmless() {
        let mut interp = load("rem ghost\nset a 1\nprint a");
        assert_eq!(run_to_end(&mut interp), vec!["1"]);
    }

    #[test]
    fn test_multiple_prints_in_order() {
        let source = r#"set a 1
set b 2
print a
print b
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["1", "2", "1"]);
    }

    #[test]
    fn test_negative_values() {
        let source = r#"set a 2
sub a 5
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec!["-3"]);
    }

    #[test]
    fn test_sub_wraps_on_overflow() {
        let source = r#"set a -9223372036854775808
sub a 1
print a"#;
        let mut interp = load(source);
        assert_eq!(run_to_end(&mut interp), vec![i64::MAX.to_string()]);
    }

    #[test]
    fn test_run_after_finish_replays_program() {
        let mut interp = load("set a 1\nprint a");
        assert_eq!(run_to_end(&mut interp), vec!["1"]);
        assert!(interp.is_idle(), "call stack should be empty after a pass");
        // A second run starts a fresh pass over the same program
        assert_eq!(run_to_end(&mut interp), vec!["1"]);
    }
}

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn test_memory_dump_tracks_last_changed_line() {
        let source = r#"set a 5
set b 4
print a"#;
        let mut interp = load(source);
        interp.add_breakpoint(2);

        let outcome = interp.run().expect("run should pause");
        assert_eq!(outcome, RunOutcome::Paused { line: 2 });

        let mem = interp.inspect_memory();
        assert_eq!(
            mem,
            vec![("a".to_string(), 5, 0), ("b".to_string(), 4, 1)],
            "each entry carries value and line of last assignment"
        );
    }

    #[test]
    fn test_memory_keeps_first_write_order() {
        let source = r#"set b 1
set a 2
set b 3"#;
        let mut interp = load(source);
        run_to_end(&mut interp);

        let mem = interp.inspect_memory();
        assert_eq!(
            mem,
            vec![("b".to_string(), 3, 2), ("a".to_string(), 2, 1)],
            "rewriting a variable keeps its original position"
        );
    }

    #[test]
    fn test_sub_updates_last_changed_line() {
        let source = r#"set a 5
sub a 1"#;
        let mut interp = load(source);
        run_to_end(&mut interp);
        assert_eq!(interp.inspect_memory(), vec![("a".to_string(), 4, 1)]);
    }
}

#[cfg(test)]
mod trace_tests {
    use super::*;

    #[test]
    fn test_trace_shows_call_site_and_name() {
        let source = r#"def test
    set a 4
call test
call test
print a"#;
        let mut interp = load(source);
        interp.add_breakpoint(1);

        // First call: pause inside the function body
        assert_eq!(interp.run().expect("run"), RunOutcome::Paused { line: 1 });
        assert_eq!(interp.inspect_trace(), vec![(2, "test".to_string())]);

        // Second call pauses again at the same body line
        assert_eq!(interp.run().expect("run"), RunOutcome::Paused { line: 1 });
        assert_eq!(interp.inspect_trace(), vec![(3, "test".to_string())]);

        // Final pass completes
        assert_eq!(interp.run().expect("run"), RunOutcome::Finished);
        assert_eq!(interp.take_output(), vec!["4"]);
        assert!(interp.inspect_trace().is_empty());
    }

    #[test]
    fn test_trace_lists_nested_calls_innermost_first() {
        let source = r#"def inner
    set a 1
def outer
    call inner
call outer"#;
        let mut interp = load(source);
        interp.add_breakpoint(1);

        assert_eq!(interp.run().expect("run"), RunOutcome::Paused { line: 1 });
        assert_eq!(
            interp.inspect_trace(),
            vec![(3, "inner".to_string()), (4, "outer".to_string())]
        );
    }

    #[test]
    fn test_trace_omits_root() {
        let mut interp = load("set a 1\nprint a");
        interp.add_breakpoint(1);
        assert_eq!(interp.run().expect("run"), RunOutcome::Paused { line: 1 });
        assert!(
            interp.inspect_trace().is_empty(),
            "the root frame never appears in the trace"
        );
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_print_of_undefined_variable() {
        let mut interp = load("print a");
        let err = interp.run().expect_err("should fail");
        assert_eq!(
            err,
            RuntimeError::UndefinedVariable {
                name: "a".to_string(),
                line: 0
            }
        );
    }

    #[test]
    fn test_sub_from_undefined_variable() {
        let mut interp = load("sub a 1");
        let err = interp.run().expect_err("should fail");
        assert_eq!(
            err,
            RuntimeError::UndefinedVariable {
                name: "a".to_string(),
                line: 0
            }
        );
    }

    #[test]
    fn test_call_of_undefined_function() {
        let mut interp = load("call nope");
        let err = interp.run().expect_err("should fail");
        assert_eq!(
            err,
            RuntimeError::UndefinedFunction {
                name: "nope".to_string(),
                line: 0
            }
        );
    }

    #[test]
    fn test_state_survives_runtime_error() {
        let source = r#"set a 1
print ghost
set b 2"#;
        let mut interp = load(source);

        let err = interp.run().expect_err("should fail on line 1");
        assert_eq!(
            err,
            RuntimeError::UndefinedVariable {
                name: "ghost".to_string(),
                line: 1
            }
        );

        // Work done before the failure is retained, the failing statement
        // stays current
        assert_eq!(interp.inspect_memory(), vec![("a".to_string(), 1, 0)]);
        assert!(!interp.is_idle());
        let again = interp.run().expect_err("retry hits the same statement");
        assert_eq!(err, again);
    }
}
