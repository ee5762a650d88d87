use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docsgrab(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docsgrab").unwrap();
    // Keep the user's real settings file out of the test.
    cmd.env("HOME", home.path());
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd
}

#[test]
fn help_describes_the_tool() {
    let home = TempDir::new().unwrap();
    docsgrab(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reference"))
        .stdout(predicate::str::contains("ai-instructions.md"));
}

#[test]
fn rejects_non_github_url_before_any_work() {
    let home = TempDir::new().unwrap();
    docsgrab(&home)
        .arg("https://gitlab.com/acme/widgets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GitHub URL"));
}

#[test]
fn rejects_malformed_url() {
    let home = TempDir::new().unwrap();
    docsgrab(&home)
        .arg("not-a-url")
        .assert()
        .failure();
}

#[test]
fn missing_target_directory_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    docsgrab(&home)
        .args([
            "https://github.com/acme/widgets",
            "--target",
            "/nonexistent/docsgrab-target",
            "--quiet",
        ])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn explicit_missing_settings_file_fails() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    docsgrab(&home)
        .args([
            "https://github.com/acme/widgets",
            "--target",
            target.path().to_str().unwrap(),
            "--config",
            "/nonexistent/settings.json",
            "--quiet",
        ])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("Settings file not found"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    let home = TempDir::new().unwrap();
    docsgrab(&home)
        .args(["https://github.com/acme/widgets", "--quiet", "--verbose"])
        .assert()
        .failure();
}
