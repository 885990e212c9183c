#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;

const POST_A: &str = r#"{"id":1,"title":"A","image":"http://host/a.png","content":"body","date":"1/2/2025","status":true}"#;

fn quaderno() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("quaderno"));
    cmd.env_remove("QUADERNO_BACKEND_URL")
        .env_remove("QUADERNO_CONFIG_FILE")
        .env_remove("QUADERNO_LOG_LEVEL")
        .env_remove("QUADERNO_LOG_FORMAT");
    cmd
}

#[test]
fn posts_list_works_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_A}]"));
    });

    let assert = quaderno()
        .env("QUADERNO_BACKEND_URL", server.base_url())
        .arg("posts")
        .arg("list")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"title\": \"A\""));
    mock.assert();
}

#[test]
fn missing_backend_fails_fast() {
    quaderno()
        .arg("posts")
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("backend"));
}

#[test]
fn create_with_blank_title_is_rejected_before_any_post() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });
    let create = server.mock(|when, then| {
        when.method("POST").path("/posts");
        then.status(201)
            .header("content-type", "application/json")
            .body(POST_A);
    });

    let assert = quaderno()
        .env("QUADERNO_BACKEND_URL", server.base_url())
        .args([
            "posts",
            "create",
            "--title",
            "   ",
            "--image",
            "http://host/t.png",
            "--content",
            "body",
        ])
        .assert()
        .failure();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("title must not be empty"));
    create.assert_hits(0);
}

#[test]
fn console_landing_lists_routes() {
    let server = MockServer::start();

    let assert = quaderno()
        .env("QUADERNO_BACKEND_URL", server.base_url())
        .args(["console", "--route", "/"])
        .write_stdin("quit\n")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("/list-post"));
}

#[test]
fn console_list_screen_renders_the_collection() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_A}]"));
    });

    let assert = quaderno()
        .env("QUADERNO_BACKEND_URL", server.base_url())
        .args(["console", "--route", "/list-post"])
        .write_stdin("quit\n")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("A"));
    assert!(output.contains("published"));
    mock.assert();
}

#[test]
fn unknown_route_is_a_usage_error() {
    let server = MockServer::start();

    let assert = quaderno()
        .env("QUADERNO_BACKEND_URL", server.base_url())
        .args(["console", "--route", "/nope"])
        .assert()
        .failure();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("unknown route"));
}
