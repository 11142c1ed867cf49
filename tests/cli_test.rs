//! Black-box tests of the `multilock` binary's command surface (§6).
//! Requires a live Redis instance; see `tests/common/mod.rs`.

use assert_cmd::Command;
use predicates::str::contains;

fn redis_url() -> String {
    std::env::var("MULTILOCK_TEST_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string())
}

#[test]
#[ignore]
fn flush_then_info_shows_empty_state() {
    Command::cargo_bin("multilock")
        .unwrap()
        .args(["-r", &redis_url(), "flush", "cli_test_info"])
        .assert()
        .success();

    Command::cargo_bin("multilock")
        .unwrap()
        .args(["-r", &redis_url(), "info", "cli_test_info"])
        .assert()
        .success()
        .stdout(contains("exclusive: None"))
        .stdout(contains("shared: []"));
}

#[test]
#[ignore]
fn exclusive_then_exclusive_with_no_retries_exits_nonzero() {
    Command::cargo_bin("multilock")
        .unwrap()
        .args(["-r", &redis_url(), "flush", "cli_test_exclusive"])
        .assert()
        .success();

    // Hold the lock for 2 seconds in the background, then attempt a
    // contending acquire with no retries while it's held.
    let mut holder = std::process::Command::new(assert_cmd::cargo::cargo_bin("multilock"))
        .args([
            "-r",
            &redis_url(),
            "exclusive",
            "cli_test_exclusive",
            "--ttl",
            "2",
        ])
        .spawn()
        .unwrap();

    std::thread::sleep(std::time::Duration::from_millis(300));

    Command::cargo_bin("multilock")
        .unwrap()
        .args([
            "-r",
            &redis_url(),
            "exclusive",
            "cli_test_exclusive",
            "--ttl",
            "0.1",
            "--retry-count",
            "0",
        ])
        .assert()
        .failure()
        .code(1);

    holder.wait().unwrap();
}
