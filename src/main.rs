//! Host-side helper: `cargo run` builds the story's WASM package into `static/pkg`
//! and serves `static/` on a local port (`SCROLLSTORY_PORT`, default 8000).

use std::env;
use std::process::{Command, ExitCode, Stdio};

fn main() -> ExitCode {
    let port = env::var("SCROLLSTORY_PORT").unwrap_or_else(|_| "8000".to_owned());

    println!("Building WASM pkg …");
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
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!(
                "wasm-pack finished with errors. \
                 Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
            );
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Serving whatever static/pkg already holds.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(st) => {
            eprintln!("http server exited with {st}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            ExitCode::FAILURE
        }
    }
}
