mod common;

use common::{run_recap, TestEnv};

#[test]
fn analyze_subcommand_is_available() {
    let output = run_recap(&["analyze", "--help"]);

    assert!(
        output.status.success(),
        "analyze --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn analyze_reports_missing_transcript_file() {
    let output = run_recap(&["analyze", "does-not-exist.txt"]);

    assert!(
        !output.status.success(),
        "analyze should fail for a missing file\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read transcript file"),
        "expected missing file error, got:\n{}",
        stderr
    );
}

#[test]
fn analyze_rejects_unsupported_format() {
    let env = TestEnv::new();
    let transcript = env.write_file("meeting.txt", "Mary should review the budget.");

    let output = env.run(&["analyze", transcript.to_str().unwrap(), "--format", "yaml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported format"),
        "expected format error, got:\n{}",
        stderr
    );
}

#[test]
fn config_path_points_at_config_toml() {
    let env = TestEnv::new();
    let path = env.config_path();
    assert!(path.ends_with("recap/config.toml"), "got {}", path.display());
}

#[test]
fn config_init_writes_default_file() {
    let env = TestEnv::new();

    let output = env.run(&["config", "init"]);
    assert!(
        output.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let contents = std::fs::read_to_string(env.config_path()).expect("config file should exist");
    assert!(contents.contains("summarization_model"));

    // A second init without --force refuses to overwrite.
    let output = env.run(&["config", "init"]);
    assert!(!output.status.success());
}

#[test]
fn completions_generate_for_bash() {
    let output = run_recap(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}
