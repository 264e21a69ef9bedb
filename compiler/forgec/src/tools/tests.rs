use super::*;
use pretty_assertions::assert_eq;

#[test]
fn missing_binary_is_not_found() {
    let err = Tool::new("forge-no-such-tool-7d1c").run().unwrap_err();
    assert!(matches!(err, ToolError::NotFound { ref tool } if tool == "forge-no-such-tool-7d1c"));
    assert_eq!(
        err.to_string(),
        "`forge-no-such-tool-7d1c` not found on PATH; install it and try again"
    );
}

#[test]
fn display_joins_arguments() {
    let tool = Tool::new("atlas").args(["migrate", "diff"]).arg("init");
    assert_eq!(tool.display(), "atlas migrate diff init");
    assert_eq!(tool.program(), "atlas");
}

#[test]
fn failure_message_includes_output() {
    let err = ToolError::Failed {
        tool: "atlas".into(),
        status: ExitStatus::Code(1),
        output: "Error: connection refused\n".into(),
    };
    assert_eq!(
        err.to_string(),
        "`atlas` failed (exit code 1):\nError: connection refused"
    );
    let quiet = ToolError::Failed {
        tool: "atlas".into(),
        status: ExitStatus::Signal,
        output: String::new(),
    };
    assert_eq!(quiet.to_string(), "`atlas` failed (terminated by signal)");
}

#[cfg(unix)]
#[test]
fn combined_output_on_success_and_failure() {
    let out = Tool::new("sh")
        .args(["-c", "printf out; printf err >&2"])
        .run()
        .unwrap();
    assert_eq!(out, "out\nerr");

    let err = Tool::new("sh")
        .args(["-c", "echo partial; echo broken >&2; exit 3"])
        .run()
        .unwrap_err();
    match err {
        ToolError::Failed { status, output, .. } => {
            assert_eq!(status, ExitStatus::Code(3));
            assert_eq!(output, "partial\nbroken\n");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn env_and_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = Tool::new("sh")
        .args(["-c", "printf \"$FORGE_TEST_VALUE\"; pwd"])
        .env("FORGE_TEST_VALUE", "42 ")
        .current_dir(dir.path())
        .run()
        .unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    assert_eq!(out.trim_end(), format!("42 {}", canonical.display()));
}
