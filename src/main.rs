//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! with wasm-pack and serves `static/` on a local port.
//!
//! `cargo run -- 9000` picks another port.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::{
        env,
        process::{Command, Stdio},
    };

    use anyhow::{bail, Context};
    use log::{info, warn};

    const DEFAULT_PORT: u16 = 8000;

    fn build_pkg() -> anyhow::Result<()> {
        info!("Building wasm pkg …");
        let status = Command::new("wasm-pack")
            .args([
                "build",
                "--release",
                "--target",
                "web",
                "--out-dir",
                "static/pkg",
            ])
            .status();

        match status {
            Ok(st) if st.success() => Ok(()),
            Ok(st) => bail!("wasm-pack finished with {st}."),
            Err(_) => {
                warn!("wasm-pack not found in PATH, the site may serve stale artifacts.");
                Ok(())
            }
        }
    }

    pub fn main() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let port = match env::args().nth(1) {
            Some(p) => p.parse::<u16>().with_context(|| format!("Invalid port {p}"))?,
            None => DEFAULT_PORT,
        };

        build_pkg()?;

        info!("Serving static/ at http://127.0.0.1:{port} …");
        let port = port.to_string();
        let status = Command::new("python3")
            .args(["-m", "http.server", port.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .context("Failed to start http server")?;

        if !status.success() {
            bail!("http server exited with {status}.");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
