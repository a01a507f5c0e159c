//! Binary-level tests: spawn the `stagein` executable against a temp workdir
//! and a stub queue-metadata endpoint, then assert on the persisted status
//! report and the process exit code.

use std::path::Path;
use std::process::Stdio;

use serde_json::Value;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned JSON body to every HTTP request, on an ephemeral port.
async fn spawn_queue_endpoint(body: String) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let body = body.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    addr
}

/// The full required argument list for a two-file invocation.
fn stagein_command(workdir: &Path, lfns: &str, scopes: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_stagein"));
    cmd.args([
        "-q",
        "TEST_QUEUE",
        "-w",
        workdir.to_str().unwrap(),
        "--lfns",
        lfns,
        "--scopes",
        scopes,
        "--eventtype",
        "get_sm",
        "--localsite",
        "LOCAL",
        "--remotesite",
        "REMOTE",
        "--produserid",
        "user",
        "--jobid",
        "1",
        "--taskid",
        "2",
        "--jobdefinitionid",
        "3",
        "--filesizes",
        "9,9",
        "--checksums",
        ",",
        "--allowlans",
        "True,True",
        "--allowwans",
        "False,False",
        "--directaccesslans",
        "None,None",
        "--directaccesswans",
        "None,None",
        "--istars",
        "False,False",
        "--accessmodes",
        ",",
        "--storagetokens",
        ",",
        "--guids",
        "g1,g2",
    ])
    .env_remove("STAGEIN_CONFIG")
    .env_remove("STAGEIN_INFOSERVICE_URL")
    .env("RUST_LOG", "error")
    .stdout(Stdio::null())
    .stderr(Stdio::null());
    cmd
}

fn read_report(workdir: &Path) -> Value {
    let raw = std::fs::read_to_string(workdir.join("stagein_status.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_successful_run_exits_zero_and_stages_files() {
    let replicas = TempDir::new().unwrap();
    let workdir = TempDir::new().unwrap();
    std::fs::create_dir_all(replicas.path().join("mc16")).unwrap();
    std::fs::write(replicas.path().join("mc16/f1"), b"payload-1").unwrap();
    std::fs::write(replicas.path().join("mc16/f2"), b"payload-2").unwrap();

    let queue_json = format!(
        r#"{{"name":"TEST_QUEUE","site":"SITE1","endpoint":"file://{}"}}"#,
        replicas.path().display()
    );
    let addr = spawn_queue_endpoint(queue_json).await;

    let status = stagein_command(workdir.path(), "f1,f2", "mc16,mc16")
        .env("STAGEIN_INFOSERVICE_URL", format!("http://{}", addr))
        .status()
        .await
        .expect("failed to run stagein");
    assert_eq!(status.code(), Some(0));

    let report = read_report(workdir.path());
    assert_eq!(report["f1"][0], "done");
    assert_eq!(report["f2"][0], "done");
    assert_eq!(report["error"][0], "");
    assert_eq!(report["error"][1], 0);
    assert_eq!(report["error"][2], Value::Null);
    assert_eq!(
        std::fs::read(workdir.path().join("f1")).unwrap(),
        b"payload-1".to_vec()
    );
}

#[tokio::test]
async fn test_dispatch_failure_exits_twelve_with_error_entry() {
    // no metadata endpoint configured: the dispatch fails before any
    // per-file transfer, and the extracted error lands in the report
    let workdir = TempDir::new().unwrap();

    let status = stagein_command(workdir.path(), "f1,f2", "mc16,mc16")
        .status()
        .await
        .expect("failed to run stagein");
    assert_eq!(status.code(), Some(12));

    let report = read_report(workdir.path());
    assert_eq!(report["error"][1], "1099");
    assert!(report["error"][0]
        .as_str()
        .unwrap()
        .contains("no queue metadata"));
    assert_eq!(report["error"][2], Value::Null);
    // untransferred descriptors still appear, with null outcomes
    assert_eq!(report["f1"][0], Value::Null);
    assert_eq!(report["f2"][1], Value::Null);
}

#[tokio::test]
async fn test_pilot_log_written_unless_suppressed() {
    let workdir = TempDir::new().unwrap();
    let status = stagein_command(workdir.path(), "f1,f2", "mc16,mc16")
        .status()
        .await
        .unwrap();
    assert_eq!(status.code(), Some(12));
    assert!(workdir.path().join("stagein.log").exists());

    let quiet = TempDir::new().unwrap();
    let status = stagein_command(quiet.path(), "f1,f2", "mc16,mc16")
        .arg("--no-pilot-log")
        .status()
        .await
        .unwrap();
    assert_eq!(status.code(), Some(12));
    assert!(!quiet.path().join("stagein.log").exists());
}

#[tokio::test]
async fn test_missing_required_flag_is_a_usage_error() {
    let workdir = TempDir::new().unwrap();
    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_stagein"))
        .args(["-q", "TEST_QUEUE", "-w", workdir.path().to_str().unwrap()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .unwrap();
    assert_ne!(status.code(), Some(0));
    assert!(!workdir.path().join("stagein_status.json").exists());
}
