//! Runs the built `asplit` binary with isolated XDG directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates an (empty) input file; the player is never real in these tests.
    fn input(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, b"not really audio").unwrap();
        path
    }

    fn config(&self, body: &str) -> PathBuf {
        let path = self.path().join("asplit.toml");
        fs::write(&path, body).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_asplit"))
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_STATE_HOME", self.path().join("state"))
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn cli_reports_missing_input_file() {
    let sb = Sandbox::new();
    let out = sb.run(&["--end", "00:10:00", "missing.wav"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("file not found"), "{}", stderr(&out));
}

#[test]
fn cli_rejects_malformed_time() {
    let sb = Sandbox::new();
    let input = sb.input("a.wav");
    let out = sb.run(&["--start", "00:60:00", "--end", "01:00:00", input.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("invalid start time"), "{}", stderr(&out));
}

#[test]
fn cli_rejects_bad_speed_and_threads() {
    let sb = Sandbox::new();
    let input = sb.input("a.wav");
    let file = input.to_str().unwrap();

    let out = sb.run(&["--end", "00:10:00", "--speedup", "0", file]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("speedup factor must be greater than zero"));

    let out = sb.run(&["--end", "00:10:00", "--threads", "0", file]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("at least 1"));
}

#[test]
fn cli_requires_end_when_probe_unavailable() {
    let sb = Sandbox::new();
    let input = sb.input("a.wav");
    let cfg = sb.config("[probe]\nprogram = \"asplit-test-missing-mediainfo\"\n");
    let out = sb.run(&["--config", cfg.to_str().unwrap(), input.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("end time must be supplied"), "{}", stderr(&out));
}

#[test]
fn cli_dry_run_lists_parts_in_order() {
    let sb = Sandbox::new();
    let input = sb.input("lecture.flac");
    let out = sb.run(&[
        "--dry-run",
        "--end",
        "00:50:00",
        "-o",
        "parts",
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", stderr(&out));

    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    let dir = Path::new("parts");
    assert_eq!(
        lines,
        vec![
            format!("{} [00:00:00-00:20:00]", dir.join("lecture-1.ogg").display()),
            format!("{} [00:20:00-00:40:00]", dir.join("lecture-2.ogg").display()),
            format!("{} [00:40:00-00:50:00]", dir.join("lecture-3.ogg").display()),
        ]
    );
    assert!(!sb.path().join("parts").exists(), "dry run should not create files");
}

#[cfg(unix)]
#[test]
fn cli_failed_parts_do_not_fail_the_run() {
    let sb = Sandbox::new();
    let input = sb.input("a.wav");
    let cfg = sb.config("[player]\nprogram = \"false\"\nextra_args = []\n");
    let out = sb.run(&[
        "--config",
        cfg.to_str().unwrap(),
        "--end",
        "00:30:00",
        "-d",
        "10",
        "-p",
        "",
        "-o",
        "out",
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", stderr(&out));
    let err = stderr(&out);
    for (seq, range) in [
        (1, "[00:00:00-00:10:00]"),
        (2, "[00:10:00-00:20:00]"),
        (3, "[00:20:00-00:30:00]"),
    ] {
        let needle = format!("error splitting part #{seq} {range}");
        assert_eq!(err.matches(&needle).count(), 1, "{needle} in {err}");
    }
    let summary_at = err.find("split 3 part(s), 3 failed").expect(&err);
    assert!(err.rfind("error splitting part").unwrap() < summary_at, "{err}");
    assert!(sb.path().join("out").is_dir());
}

#[test]
fn cli_numbering_past_u64_max_is_fatal() {
    let sb = Sandbox::new();
    let input = sb.input("a.wav");
    let out = sb.run(&[
        "--dry-run",
        "--end",
        "00:40:00",
        "-n",
        "18446744073709551615",
        input.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("numbering from 18446744073709551615"), "{}", stderr(&out));
}

#[cfg(unix)]
#[test]
fn cli_successful_run_reports_summary() {
    let sb = Sandbox::new();
    let input = sb.input("a.wav");
    let cfg = sb.config("threads = 3\n\n[player]\nprogram = \"true\"\n");
    let out = sb.run(&[
        "--config",
        cfg.to_str().unwrap(),
        "--start",
        "00:05:00",
        "--end",
        "01:05:00",
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stderr(&out).contains("split 3 part(s), 0 failed"), "{}", stderr(&out));
}

#[test]
fn cli_prints_completions() {
    let sb = Sandbox::new();
    let out = sb.run(&["--completions", "bash"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("asplit"));
}
