use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn photofetch_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("photofetch")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("albums"))
        .stdout(predicate::str::contains("photos"))
        .stdout(predicate::str::contains("album-photos"));
    Ok(())
}

#[test]
fn photofetch_albums_without_token_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_home = TempDir::new()?;
    let mut cmd = Command::cargo_bin("photofetch")?;
    cmd.arg("albums");
    cmd.env("MOCK_KEYRING", "1");
    cmd.env_remove("MOCK_ACCESS_TOKEN");
    cmd.env("HOME", tmp_home.path());
    cmd.assert().failure();
    Ok(())
}

#[test]
fn photofetch_lists_albums_from_api() -> Result<(), Box<dyn std::error::Error>> {
    let server = mocks::photos_server();
    mocks::expect_albums(&server);

    let tmp_home = TempDir::new()?;
    let mut cmd = Command::cargo_bin("photofetch")?;
    cmd.args(["--api-base-url", &mocks::base_url(&server), "albums"]);
    cmd.env("MOCK_KEYRING", "1");
    cmd.env("MOCK_ACCESS_TOKEN", "token");
    cmd.env("HOME", tmp_home.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Number of albums: 2"))
        .stdout(predicate::str::contains("Holidays"));
    Ok(())
}

#[test]
fn photofetch_fetches_photos_and_prints_commands() -> Result<(), Box<dyn std::error::Error>> {
    let server = mocks::photos_server();
    mocks::expect_search(&server, "token", mocks::search_page(&["p1", "p2"], None));

    let tmp_home = TempDir::new()?;
    let mut cmd = Command::cargo_bin("photofetch")?;
    cmd.args([
        "--api-base-url",
        &mocks::base_url(&server),
        "photos",
        "2022-01-01-2022-01-31",
    ]);
    cmd.env("MOCK_KEYRING", "1");
    cmd.env("MOCK_ACCESS_TOKEN", "token");
    cmd.env("HOME", tmp_home.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Number of photos: 2"))
        .stdout(predicate::str::contains(
            "curl https://example.com/base/p1=d --output p1.jpg",
        ));
    Ok(())
}

#[test]
fn photofetch_exports_download_script() -> Result<(), Box<dyn std::error::Error>> {
    let server = mocks::photos_server();
    mocks::expect_search(&server, "token", mocks::search_page(&["p1"], None));

    let tmp_home = TempDir::new()?;
    let script_path = tmp_home.path().join("download_photos.sh");
    let mut cmd = Command::cargo_bin("photofetch")?;
    cmd.args([
        "--api-base-url",
        &mocks::base_url(&server),
        "album-photos",
        "album-1",
        "--export",
    ]);
    cmd.arg(&script_path);
    cmd.env("MOCK_KEYRING", "1");
    cmd.env("MOCK_ACCESS_TOKEN", "token");
    cmd.env("HOME", tmp_home.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Download script written"));

    let script = std::fs::read_to_string(&script_path)?;
    assert!(script.contains("curl https://example.com/base/p1=d --output p1.jpg"));
    Ok(())
}
