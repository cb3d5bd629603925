//! Line-oriented check-in loop and per-submission output.
//!
//! Each line is processed to completion (decide, append, persist, render)
//! before the next one is read.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::debug;

use crate::core::types::Outcome;
use crate::render::{Tone, celebration_banner, message, pick_celebration, render_listings};
use crate::session::Session;

const PROMPT: &str = "ID> ";
const QUIT_COMMANDS: &[&str] = &[":q", ":quit"];

/// Totals for one interactive run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Submit one identifier and write the reply plus both listings to `out`.
pub fn submit_and_render<W: Write + ?Sized, G: Rng + ?Sized>(
    session: &mut Session,
    input: Option<&str>,
    out: &mut W,
    rng: &mut G,
) -> Result<Outcome> {
    let outcome = session.submit(input)?;
    let reply = message(&outcome);
    match reply.tone {
        Tone::Success => {
            writeln!(out, "✔ {}", reply.text)?;
            writeln!(out, "{}", celebration_banner(pick_celebration(rng)))?;
        }
        Tone::Warning => writeln!(out, "! {}", reply.text)?,
    }
    writeln!(out)?;
    write!(out, "{}", render_listings(&session.listings()))?;
    out.flush().context("flush output")?;
    Ok(outcome)
}

/// Read identifiers line by line until EOF or a quit command.
pub fn run_loop<R: BufRead, W: Write, G: Rng + ?Sized>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
    rng: &mut G,
) -> Result<LoopSummary> {
    let mut summary = LoopSummary::default();
    write!(out, "{PROMPT}")?;
    out.flush().context("flush prompt")?;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("read input line")?;
        if read == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail identifier parsing downstream.
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim();
        if QUIT_COMMANDS.contains(&trimmed) {
            debug!("quit requested");
            break;
        }
        let outcome = submit_and_render(session, Some(trimmed), out, rng)?;
        if outcome.is_accepted() {
            summary.accepted += 1;
        } else {
            summary.rejected += 1;
        }
        write!(out, "\n{PROMPT}")?;
        out.flush().context("flush prompt")?;
    }
    writeln!(out)?;
    Ok(summary)
}
