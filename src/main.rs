//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` locally so the watch screen preview can be opened at
//! http://127.0.0.1:8000.

use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return ExitCode::SUCCESS;
    }

    log::info!("building wasm pkg");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(_) => {
            log::error!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            log::warn!("wasm-pack not found in PATH. Skipping wasm build; the preview may serve stale artifacts.");
        }
    }

    log::info!("serving static/ at http://127.0.0.1:8000");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", "8000", "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(server) => server,
        Err(err) => {
            log::error!("failed to start http server: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Keep process alive while the server runs
    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                log::warn!("http server exited with {status}");
                return ExitCode::FAILURE;
            }
            Ok(None) => thread::sleep(Duration::from_secs(5)),
            Err(err) => {
                log::error!("lost track of http server: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
}
