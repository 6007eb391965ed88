//! `invite-link`: binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`AppConfig`] from `TRUSTPILOT_*` environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Read one invitation record as JSON from stdin.
//! 4. Build the canonical payload and encode the link.
//! 5. Print the link on stdout.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use invite_link::config::AppConfig;
use invite_link::{payload, telemetry, InvitationRecord, LinkEncoder, LinkError, TracingSink};

fn main() -> ExitCode {
    match run() {
        Ok(url) => {
            println!("{url}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: failed to generate invitation link: {e:#}");
            let code = e.downcast_ref::<LinkError>().map_or(1, LinkError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<String> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    // Telemetry is not yet up; errors surface through main's stderr line.
    let cfg = AppConfig::from_env().context("configuration invalid")?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        domain = %cfg.domain,
        "invite-link starting"
    );

    // -----------------------------------------------------------------------
    // 3. Input
    // -----------------------------------------------------------------------
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read invitation record from stdin")?;
    let record: InvitationRecord =
        serde_json::from_str(&input).context("stdin is not a valid invitation record")?;

    // -----------------------------------------------------------------------
    // 4. Payload + link
    // -----------------------------------------------------------------------
    let payload = payload::build(record)?;
    let encoder = LinkEncoder::new(cfg.link_config(), TracingSink);
    Ok(encoder.encode(&payload)?)
}
