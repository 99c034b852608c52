// SPDX-License-Identifier: MPL-2.0
use riceswipe::config;
use riceswipe::error::{Error, Result};
use riceswipe::replay::{self, Script};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const USAGE: &str = "usage: riceswipe [--config <path>] [--frame-ms <n>] <script.toml>";

struct Args {
    config: Option<PathBuf>,
    frame_ms: Option<u64>,
    script: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut args = pico_args::Arguments::from_env();
    let parse = |err: pico_args::Error| Error::Config(err.to_string());

    let config = args.opt_value_from_str("--config").map_err(parse)?;
    let frame_ms = args.opt_value_from_str("--frame-ms").map_err(parse)?;
    let script = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Config(USAGE.into()))?;

    Ok(Args {
        config,
        frame_ms,
        script,
    })
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    let mut settings = config.gesture;
    if let Some(frame_ms) = args.frame_ms {
        settings.frame_interval_ms = frame_ms;
    }
    let settings = settings.sanitized();

    let script = Script::load(&args.script)?;
    log::debug!(
        "replaying {} with {} events",
        args.script.display(),
        script.events.len()
    );

    if let (Some(domain), Some(video)) = (config.public_media_domain.as_deref(), script.feed_video()) {
        if let Some(url) = video.playable_url(domain) {
            println!("source: {url}");
        }
    }

    let frame_interval: Duration = settings.frame_interval();
    for entry in replay::replay(&script, &settings, frame_interval)? {
        println!("{entry}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("riceswipe: {err}");
            ExitCode::FAILURE
        }
    }
}
