//! Shared helpers: fake `bdy` binaries and a canned HTTP responder.

#![allow(dead_code)]

use bdy_package_publish::{ActionEnv, ActionHost, OutputManager};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub type Lines = Arc<Mutex<Vec<String>>>;

/// Host over `env` whose output is captured
pub fn capturing_host(env: ActionEnv) -> (ActionHost, Lines) {
    let (output, lines) = OutputManager::capturing();
    (ActionHost::new(env, output), lines)
}

pub fn captured(lines: &Lines) -> Vec<String> {
    lines.lock().unwrap().clone()
}

/// Write an executable shell script named `name` into `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A `bdy` that answers `version` and prints `publish_output` for anything else.
///
/// Arguments of the last non-version call are written to `args.txt` next to it.
#[cfg(unix)]
pub fn fake_bdy(dir: &Path, publish_output: &str) -> PathBuf {
    let args_file = dir.join("args.txt");
    write_script(
        dir,
        "bdy",
        &format!(
            r#"if [ "$1" = "version" ]; then
  printf '2.3.1\nUsage: bdy [options] [command]\n'
  exit 0
fi
printf '%s\n' "$@" > '{}'
printf '%s\n' '{}'"#,
            args_file.display(),
            publish_output
        ),
    )
}

/// Arguments recorded by [`fake_bdy`]
pub fn recorded_args(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Serve one canned response per connection, in order.
///
/// Returns the base URL (`http://127.0.0.1:PORT`).
pub async fn serve(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let reason = if status == 200 { "OK" } else { "Not Found" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}")
}
