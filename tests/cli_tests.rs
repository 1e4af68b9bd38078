use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gator_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gator").unwrap();
    cmd.env("GATOR_DB_PATH", dir.path().join("gator.db"))
        .env("GATOR_CONFIG_PATH", dir.path().join("gatorconfig.json"))
        .env_remove("GATOR_POLL_INTERVAL")
        .env_remove("GATOR_REQUEST_TIMEOUT_SECS")
        .env("RUST_LOG", "warn");
    cmd
}

fn register(dir: &TempDir, name: &str) {
    gator_cmd(dir).args(["register", name]).assert().success();
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("addfeed"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("agg"));
}

#[test]
fn test_browse_help_shows_default_limit() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir)
        .args(["browse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: 2]"));
}

#[test]
fn test_register_marks_current_user() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");
    register(&dir, "holgith");

    gator_cmd(&dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("holgith (current)"))
        .stdout(predicate::str::contains("kahya (current)").not());
}

#[test]
fn test_login_switches_user() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");
    register(&dir, "holgith");

    gator_cmd(&dir)
        .args(["login", "kahya"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user set to: 'kahya'"));

    gator_cmd(&dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("kahya (current)"));
}

#[test]
fn test_login_unknown_user_fails() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir)
        .args(["login", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: ghost"));
}

#[test]
fn test_register_twice_fails() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir)
        .args(["register", "kahya"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User already exists: kahya"));
}

#[test]
fn test_browse_requires_login() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir)
        .arg("browse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user is logged in"));
}

#[test]
fn test_addfeed_then_feeds_and_following() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir)
        .args(["addfeed", "Boot.dev", "https://blog.boot.dev/index.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User 'kahya' is now following feed 'Boot.dev'",
        ));

    gator_cmd(&dir)
        .arg("feeds")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) Feed: Boot.dev"))
        .stdout(predicate::str::contains(" - URL: https://blog.boot.dev/index.xml"))
        .stdout(predicate::str::contains(" - User: kahya"));

    gator_cmd(&dir)
        .arg("following")
        .assert()
        .success()
        .stdout(predicate::str::contains("Boot.dev"));
}

#[test]
fn test_addfeed_rejects_non_http_url() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir)
        .args(["addfeed", "Files", "ftp://example.com/feed.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid feed URL"));
}

#[test]
fn test_unfollow_without_following_fails() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir)
        .args(["unfollow", "https://blog.boot.dev/index.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You are not following this feed"));
}

#[test]
fn test_browse_with_no_posts() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir)
        .arg("browse")
        .assert()
        .success()
        .stdout(predicate::str::contains("No posts yet"));
}

#[test]
fn test_browse_zero_limit_fails() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir)
        .args(["browse", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-positive number of posts"));
}

#[test]
fn test_reset_clears_users() {
    let dir = TempDir::new().unwrap();
    register(&dir, "kahya");

    gator_cmd(&dir).arg("reset").assert().success();

    gator_cmd(&dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("kahya").not());
}

#[test]
fn test_agg_invalid_interval_fails() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir)
        .args(["agg", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration 'soon'"));
}

#[test]
fn test_invalid_poll_interval_env_fails() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir)
        .env("GATOR_POLL_INTERVAL", "0s")
        .arg("users")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration '0s'"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    gator_cmd(&dir).arg("frobnicate").assert().failure();
}
