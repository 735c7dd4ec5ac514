//! Error message extraction from captured stderr.
//!
//! The relay flattens stderr into one blob (lines joined by a single
//! space by default), so the patterns here never rely on line breaks.
//! Each pattern stops at a newline too, so a `\n` separator works as
//! well.

use std::sync::OnceLock;

use regex::Regex;

use crate::language::Language;

/// Exceptions raised by the Python runtime itself rather than by a bug.
const PYTHON_CONTROL_FLOW: &[&str] = &["KeyboardInterrupt", "SystemExit", "GeneratorExit"];

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

/// Start of a `SomeError: ` or `pkg.SomeException: ` token.
fn exception_token() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"(?:^|\s)([A-Za-z_][\w.]*(?:Error|Exception)(?: \[\w+\])?: )",
    )
}

/// Where a message ends when nothing else follows it on the line.
fn line_end() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"\n")
}

/// Where a message ends in JavaScript and JVM output: the first stack
/// frame, Node's version trailer, or a line break.
fn stack_frame() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"\s+at\s|\s+Node\.js v|\n")
}

fn ruby_error() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"in [`'][^'\n]*': ([^\n]+?\([A-Z]\w*(?:::\w+)*\))",
    )
}

fn go_compile_error() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"\.go:\d+(?::\d+)?: ([^\n]+?)(?:\s+\S+\.go:\d+|\n|$)",
    )
}

fn go_panic() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"panic: ([^\n]+?)(?:\s+goroutine \d+|\s+\[recovered\]|\n|$)")
}

fn javac_error() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"\.java:\d+: error: ([^\n]+?)(?:\s+\^|\s+\d+ errors?\s*$|\n|$)",
    )
}

fn java_thread_exception() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r#"Exception in thread "[^"]*" ([\w.$]+)"#)
}

/// Pull the message worth searching for out of captured stderr.
///
/// Returns `None` when there is nothing to search for: no stderr at all,
/// or a Python exit caused by an interrupt or `sys.exit`.
pub fn extract_error(stderr: &str, language: Option<Language>) -> Option<String> {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        return None;
    }

    let found = match language {
        Some(Language::Python) => python(stderr)?,
        Some(Language::Node) => node(stderr),
        Some(Language::Ruby) => ruby(stderr),
        Some(Language::Go) => go(stderr),
        Some(Language::Java) => java(stderr),
        None => last_exception(stderr, line_end()),
    };

    found
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty())
        .or_else(|| language.is_none().then(|| stderr.to_string()))
}

/// Outer `None` means "do not search at all".
fn python(stderr: &str) -> Option<Option<String>> {
    if PYTHON_CONTROL_FLOW.iter().any(|e| stderr.contains(e)) {
        return None;
    }
    Some(last_exception(stderr, line_end()))
}

fn node(stderr: &str) -> Option<String> {
    last_exception(stderr, stack_frame())
}

fn ruby(stderr: &str) -> Option<String> {
    ruby_error()
        .captures(stderr)
        .map(|caps| caps[1].to_string())
        .or_else(|| last_exception(stderr, line_end()))
}

fn go(stderr: &str) -> Option<String> {
    if let Some(caps) = go_panic().captures(stderr) {
        return Some(caps[1].to_string());
    }
    go_compile_error()
        .captures(stderr)
        .map(|caps| caps[1].to_string())
}

fn java(stderr: &str) -> Option<String> {
    if let Some(caps) = javac_error().captures(stderr) {
        return Some(caps[1].to_string());
    }
    if let Some(found) = last_exception(stderr, stack_frame()) {
        return Some(found);
    }
    java_thread_exception()
        .captures(stderr)
        .map(|caps| caps[1].to_string())
}

/// The last exception in `stderr`, from its name up to `stop`.
///
/// Only the token is matched repeatedly, so a chained traceback yields
/// the exception that was raised last.
fn last_exception(stderr: &str, stop: &Regex) -> Option<String> {
    let start = exception_token()
        .captures_iter(stderr)
        .last()?
        .get(1)?
        .start();
    let rest = &stderr[start..];
    let end = stop.find(rest).map_or(rest.len(), |m| m.start());
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stderr() {
        assert_eq!(extract_error("", Some(Language::Python)), None);
        assert_eq!(extract_error("   ", None), None);
    }

    #[test]
    fn test_python_traceback() {
        let stderr = "Traceback (most recent call last): \
                      File \"app.py\", line 3, in <module> print(total) \
                      NameError: name 'total' is not defined";
        assert_eq!(
            extract_error(stderr, Some(Language::Python)).as_deref(),
            Some("NameError: name 'total' is not defined")
        );
    }

    #[test]
    fn test_python_newline_separated() {
        let stderr = "Traceback (most recent call last):\n  File \"a.py\", line 1\nZeroDivisionError: division by zero\n";
        assert_eq!(
            extract_error(stderr, Some(Language::Python)).as_deref(),
            Some("ZeroDivisionError: division by zero")
        );
    }

    #[test]
    fn test_python_keyboard_interrupt_is_skipped() {
        let stderr = "Traceback (most recent call last): File \"a.py\", line 2 KeyboardInterrupt";
        assert_eq!(extract_error(stderr, Some(Language::Python)), None);
    }

    #[test]
    fn test_node_reference_error() {
        let stderr = "/tmp/x.js:1 console.log(y) ^ \
                      ReferenceError: y is not defined \
                      at Object.<anonymous> (/tmp/x.js:1:13) \
                      at Module._compile (node:internal/modules/cjs/loader:1256:14) \
                      Node.js v20.11.0";
        assert_eq!(
            extract_error(stderr, Some(Language::Node)).as_deref(),
            Some("ReferenceError: y is not defined")
        );
    }

    #[test]
    fn test_ruby_name_error() {
        let stderr = "main.rb:1:in `<main>': undefined local variable or method `x' for main:Object (NameError)";
        assert_eq!(
            extract_error(stderr, Some(Language::Ruby)).as_deref(),
            Some("undefined local variable or method `x' for main:Object (NameError)")
        );
    }

    #[test]
    fn test_go_compile_error() {
        let stderr = "# command-line-arguments ./main.go:5:2: undefined: counter ./main.go:6:2: declared and not used: y";
        assert_eq!(
            extract_error(stderr, Some(Language::Go)).as_deref(),
            Some("undefined: counter")
        );
    }

    #[test]
    fn test_go_panic() {
        let stderr = "panic: runtime error: index out of range [5] with length 3 goroutine 1 [running]: main.main()";
        assert_eq!(
            extract_error(stderr, Some(Language::Go)).as_deref(),
            Some("runtime error: index out of range [5] with length 3")
        );
    }

    #[test]
    fn test_javac_error() {
        let stderr = "Main.java:3: error: cannot find symbol System.out.println(x); ^ symbol: variable x location: class Main 1 error";
        assert_eq!(
            extract_error(stderr, Some(Language::Java)).as_deref(),
            Some("cannot find symbol System.out.println(x);")
        );

        let stderr = "Main.java:3: error: ';' expected\n        int x = 1\n                 ^\n1 error";
        assert_eq!(
            extract_error(stderr, Some(Language::Java)).as_deref(),
            Some("';' expected")
        );
    }

    #[test]
    fn test_java_runtime_exception() {
        let stderr = "Exception in thread \"main\" java.lang.ArithmeticException: / by zero at Main.main(Main.java:3)";
        assert_eq!(
            extract_error(stderr, Some(Language::Java)).as_deref(),
            Some("java.lang.ArithmeticException: / by zero")
        );
    }

    #[test]
    fn test_python_chained_traceback() {
        let stderr = "Traceback (most recent call last): \
                      File \"a.py\", line 3, in <module> d['k'] KeyError: 'k' \
                      During handling of the above exception, another exception occurred: \
                      Traceback (most recent call last): \
                      File \"a.py\", line 5, in <module> raise ValueError('bad') \
                      ValueError: bad";
        assert_eq!(
            extract_error(stderr, Some(Language::Python)).as_deref(),
            Some("ValueError: bad")
        );
    }

    #[test]
    fn test_python_message_keeps_at() {
        let stderr = "TypeError: 'Foo' object at 0x7f is not callable";
        assert_eq!(
            extract_error(stderr, Some(Language::Python)).as_deref(),
            Some("TypeError: 'Foo' object at 0x7f is not callable")
        );
    }

    #[test]
    fn test_node_takes_last_error() {
        let stderr = "TypeError: first at foo (/x.js:1:1) RangeError: second at bar (/x.js:2:2)";
        assert_eq!(
            extract_error(stderr, Some(Language::Node)).as_deref(),
            Some("RangeError: second")
        );
    }

    #[test]
    fn test_java_caused_by_chain() {
        let stderr = "Exception in thread \"main\" java.lang.RuntimeException: wrapper \
                      at Main.main(Main.java:9) \
                      Caused by: java.io.IOException: disk full at Main.write(Main.java:4)";
        assert_eq!(
            extract_error(stderr, Some(Language::Java)).as_deref(),
            Some("java.io.IOException: disk full")
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_blob() {
        assert_eq!(
            extract_error("segmentation fault (core dumped)", None).as_deref(),
            Some("segmentation fault (core dumped)")
        );
        assert_eq!(
            extract_error("warning: x TypeError: bad operand", None).as_deref(),
            Some("TypeError: bad operand")
        );
    }

    #[test]
    fn test_known_language_without_match() {
        assert_eq!(extract_error("some chatter", Some(Language::Node)), None);
    }
}
