use std::process::Command;

fn repeat() -> Command {
    Command::new(env!("CARGO_BIN_EXE_repeat"))
}

#[test]
fn help_works() {
    let out = repeat()
        .arg("--help")
        .output()
        .expect("failed to run repeat --help");
    assert!(
        out.status.success(),
        "repeat --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Usage:") && stdout.contains("--repeat") && stdout.contains("--verbose"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn prints_the_string_the_requested_number_of_times() {
    let out = repeat()
        .args(["--repeat", "3", "ab"])
        .output()
        .expect("failed to run repeat");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "ababab\n");
}

#[test]
fn trailing_positional_is_printed_once() {
    let out = repeat()
        .args(["--repeat", "2", "ab", "!"])
        .output()
        .expect("failed to run repeat");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "abab!\n");
}

#[test]
fn missing_required_positional_fails_with_usage() {
    let out = repeat().output().expect("failed to run repeat");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("missing required argument") && stderr.contains("Usage:"),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn bad_repeat_count_fails_with_diagnostic() {
    let out = repeat()
        .args(["--repeat", "three", "ab"])
        .output()
        .expect("failed to run repeat");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("invalid value 'three'"),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn verbose_description_goes_to_stderr() {
    let out = repeat()
        .args(["-v", "hello"])
        .output()
        .expect("failed to run repeat");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hello\n");
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("about to print 'hello' 1 times"),
        "expected verbose description on stderr"
    );
}

#[test]
fn literal_text_after_sentinel() {
    let out = repeat()
        .args(["--", "--repeat"])
        .output()
        .expect("failed to run repeat");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "--repeat\n");
}
