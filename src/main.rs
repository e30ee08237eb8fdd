//! Demo runner: packs the WASM module into `static/pkg` and serves the demo
//! page from `static/` until interrupted.

use std::process::{Command, ExitStatus, Stdio};
use std::{env, thread, time::Duration};

const PORT: &str = "8000";
const PKG_DIR: &str = "static/pkg";

fn pack() -> std::io::Result<ExitStatus> {
    Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", PKG_DIR])
        .status()
}

fn main() {
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("nightsky: packing wasm into {PKG_DIR}");
    match pack() {
        Ok(st) if st.success() => {}
        Ok(st) => {
            eprintln!("nightsky: wasm-pack exited with {st}");
            std::process::exit(1);
        }
        Err(e) => {
            // Serve whatever is already in static/pkg.
            eprintln!("nightsky: cannot run wasm-pack ({e}); serving the existing {PKG_DIR}");
        }
    }

    let mut server = match Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            eprintln!("nightsky: python3 http.server did not start: {e}");
            std::process::exit(1);
        }
    };
    println!("nightsky: demo at http://127.0.0.1:{PORT}/ (append ?variant=net for the net)");

    loop {
        if let Ok(Some(status)) = server.try_wait() {
            eprintln!("nightsky: server stopped ({status})");
            break;
        }
        thread::sleep(Duration::from_secs(1));
    }
}
