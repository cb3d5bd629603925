//! Plain-text rendering of outcomes and listings for the CLI.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::listing::Listings;
use crate::core::types::{Celebration, Outcome};

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
}

/// User-facing reply to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

/// Map an outcome to its user-facing message.
///
/// `InvalidFormat` deliberately reads the same as `UnknownIdentity`.
pub fn message(outcome: &Outcome) -> Message {
    let warning = |text: &str| Message {
        tone: Tone::Warning,
        text: text.to_string(),
    };
    match outcome {
        Outcome::Accepted { identity, .. } => Message {
            tone: Tone::Success,
            text: format!("Hello, {}! Nice to see you! 👋", identity.name),
        },
        Outcome::Duplicate => warning("This ID has already checked in; no need to check in twice. ❌"),
        Outcome::UnknownIdentity | Outcome::InvalidFormat => {
            warning("Unknown ID, please try again. ⚠️")
        }
        Outcome::EmptyInput => warning("Please enter an ID before checking in. ⌨️"),
    }
}

/// Pick a celebration effect at random.
pub fn pick_celebration<R: Rng + ?Sized>(rng: &mut R) -> Celebration {
    Celebration::ALL
        .choose(rng)
        .copied()
        .unwrap_or(Celebration::Balloons)
}

/// One-line banner for a celebration effect.
pub fn celebration_banner(celebration: Celebration) -> &'static str {
    match celebration {
        Celebration::Snow => "❄  ❄  ❄  ❄  ❄  ❄  ❄",
        Celebration::Balloons => "🎈 🎈 🎈 🎈 🎈 🎈 🎈",
    }
}

/// Render both listings as aligned text tables.
pub fn render_listings(listings: &Listings) -> String {
    let checked_rows: Vec<Vec<String>> = listings
        .checked
        .iter()
        .map(|entry| {
            vec![
                entry.id.to_string(),
                entry.name.clone().unwrap_or_else(|| "?".to_string()),
                entry.timestamp.clone().unwrap_or_default(),
            ]
        })
        .collect();
    let unchecked_rows: Vec<Vec<String>> = listings
        .unchecked
        .iter()
        .map(|identity| vec![identity.id.to_string(), identity.name.clone()])
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Checked in ({}):\n", checked_rows.len()));
    out.push_str(&render_table(&["id", "name", "checked_at"], &checked_rows));
    out.push('\n');
    out.push_str(&format!("Not checked in ({}):\n", unchecked_rows.len()));
    out.push_str(&render_table(&["id", "name"], &unchecked_rows));
    out
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "  (none)\n".to_string();
    }
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listing::CheckedEntry;
    use crate::core::types::{CheckInRecord, Identity};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn invalid_format_reads_like_unknown_identity() {
        assert_eq!(
            message(&Outcome::InvalidFormat),
            message(&Outcome::UnknownIdentity)
        );
    }

    #[test]
    fn accepted_greets_by_name() {
        let outcome = Outcome::Accepted {
            identity: Identity::new(1001, "Alice"),
            record: CheckInRecord::pending(1001),
        };
        let reply = message(&outcome);
        assert_eq!(reply.tone, Tone::Success);
        assert!(reply.text.contains("Alice"));
    }

    #[test]
    fn celebration_is_drawn_from_all_effects() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<Celebration> = (0..32).map(|_| pick_celebration(&mut rng)).collect();
        assert!(picks.contains(&Celebration::Snow));
        assert!(picks.contains(&Celebration::Balloons));
    }

    #[test]
    fn listings_render_aligned_tables() {
        let listings = Listings {
            checked: vec![CheckedEntry {
                id: 1001,
                name: Some("Alice".to_string()),
                timestamp: Some("2024-05-01 08:00:00".to_string()),
            }],
            unchecked: Vec::new(),
        };
        let rendered = render_listings(&listings);
        let expected = "Checked in (1):\n  id    name   checked_at\n  ----  -----  -------------------\n  1001  Alice  2024-05-01 08:00:00\n\nNot checked in (0):\n  (none)\n";
        assert_eq!(rendered, expected);
    }
}
