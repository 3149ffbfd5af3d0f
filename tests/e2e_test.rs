//! End-to-end tests that drive the `jjal` binary against a local stub service.

mod common;

use common::StubServer;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

async fn jjal(endpoint: &str, store_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_jjal"))
        .args(args)
        .arg("--endpoint")
        .arg(endpoint)
        .arg("--store-dir")
        .arg(store_dir)
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to run jjal")
}

#[tokio::test]
async fn e2e_say_then_list_favorites() {
    let server = StubServer::start("200 OK", r#"{"_id": "e2e"}"#).await;
    let dir = tempfile::tempdir().unwrap();

    let output = jjal(&server.base_url, dir.path(), &["say", "good", "morning", "--favorite"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("1번째 고양이 가라사대"), "stdout: {}", stdout);
    assert!(stdout.contains("/cat/e2e/says/GOOD%20MORNING?t="), "stdout: {}", stdout);
    assert!(stdout.contains("💖"), "stdout: {}", stdout);
    assert_eq!(
        server.request_lines(),
        vec!["GET /cat/says/GOOD%20MORNING?json=true HTTP/1.1".to_string()]
    );

    let output = jjal(&server.base_url, dir.path(), &["favorites"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Favorites (1):"), "stdout: {}", stdout);
    assert!(stdout.contains("/cat/e2e/says/GOOD%20MORNING?t="));
}

#[tokio::test]
async fn e2e_hangul_caption_is_rejected_without_request() {
    let server = StubServer::start("200 OK", r#"{"_id": "never"}"#).await;
    let dir = tempfile::tempdir().unwrap();

    let output = jjal(&server.base_url, dir.path(), &["say", "안녕"]).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Hangul"));
    assert!(server.requests().is_empty());
    assert!(!dir.path().join("counter.json").exists());
}

#[tokio::test]
async fn e2e_service_failure_keeps_counter() {
    let server = StubServer::start("500 Internal Server Error", "{}").await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("counter.json"), "3").unwrap();

    let output = jjal(&server.base_url, dir.path(), &["say", "hello"]).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not retrieve image"));
    assert_eq!(std::fs::read_to_string(dir.path().join("counter.json")).unwrap(), "3");
}

#[tokio::test]
async fn e2e_empty_gallery_hint() {
    let dir = tempfile::tempdir().unwrap();

    let output = jjal("http://127.0.0.1:9", dir.path(), &["favorites"]).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("하트를 눌러"));
}

#[tokio::test]
async fn e2e_interactive_session_validates_and_saves() {
    let server = StubServer::start("200 OK", r#"{"_id": "live"}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let counter_path = dir.path().join("counter.json");

    let mut child = Command::new(env!("CARGO_BIN_EXE_jjal"))
        .arg("--endpoint")
        .arg(&server.base_url)
        .arg("--store-dir")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start jjal");
    let mut stdin = child.stdin.take().unwrap();

    stdin.write_all("안녕\n\nhi\n".as_bytes()).await.unwrap();
    stdin.flush().await.unwrap();

    // Favorite only once the HI image has replaced the greeting
    let mut applied = false;
    for _ in 0..400 {
        if std::fs::read_to_string(&counter_path).is_ok_and(|c| c == "1") {
            applied = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert!(applied, "HI image was never applied");

    stdin.write_all(b"/fav\n").await.unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.expect("Failed to wait for jjal");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Hangul characters are not allowed"), "stdout: {}", stdout);
    assert!(stdout.contains("caption must not be empty"), "stdout: {}", stdout);
    assert!(stdout.contains("💖 Saved"), "stdout: {}", stdout);

    let mut lines = server.request_lines();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "GET /cat/says/FIRST%20CAT?json=true HTTP/1.1".to_string(),
            "GET /cat/says/HI?json=true HTTP/1.1".to_string(),
        ]
    );

    assert_eq!(std::fs::read_to_string(&counter_path).unwrap(), "1");
    let favorites: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("favorites.json")).unwrap())
            .unwrap();
    assert_eq!(favorites.len(), 1);
    assert!(favorites[0].contains("/cat/live/says/HI?t="), "favorites: {:?}", favorites);
}
