//! lanchat terminal client.
//!
//! # Usage
//!
//! ```bash
//! lanchat --host 127.0.0.1 --port 5555 --user Alice
//! ```
//!
//! Each line typed is sent as a chat message; `/quit` or end of input leaves.
//! Chat goes to stdout, logs go to stderr.

use std::{
    io::{self, BufReader, Write},
    process::ExitCode,
};

use chrono::Local;
use clap::Parser;
use lanchat_cli::{Args, exit_code, print_events, render};
use lanchat_client::{Session, StopReason, input::spawn_line_reader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Events buffered between the receive loop and the terminal.
const EVENT_BUFFER: usize = 64;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let session = match Session::connect(args.session_config()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(error = %e, "session failed to start");
            if let Err(write_err) = writeln!(io::stderr(), "{}", render::format_session_error(&e)) {
                tracing::debug!(error = %write_err, "failed to report error");
            }
            return ExitCode::from(exit_code(&e));
        },
    };

    let stop = session.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.trigger(StopReason::Interrupted);
        }
    });

    let input = spawn_line_reader(BufReader::new(io::stdin()));
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let printer = tokio::spawn(print_events(events_rx, Local, io::stdout()));

    let reason = session.run(input, events_tx).await;
    tracing::info!(%reason, "session ended");

    let mut out = match printer.await {
        Ok(out) => out,
        Err(e) => {
            tracing::warn!(error = %e, "printer task failed");
            io::stdout()
        },
    };

    let notice = render::format_stop_reason(&reason);
    let written = notice
        .iter()
        .map(String::as_str)
        .chain([render::BYE])
        .try_for_each(|line| writeln!(out, "{line}"));
    if let Err(e) = written.and_then(|()| out.flush()) {
        tracing::debug!(error = %e, "failed to write closing notice");
    }

    ExitCode::SUCCESS
}
