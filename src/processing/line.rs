//! Per-line processing and the input loop.
//!
//! Each input line is fully parsed, expanded, and buffered before the next
//! line is read. Malformed lines are reported and skipped; only an output
//! sink failure aborts the run.

use crate::error::{LineError, TokenError};
use crate::output::OutputBatcher;
use crate::processing::expand_v6::ENUMERATION_CAP;
use crate::processing::{expand_v4, expand_v6, parse_token, Token};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Per-family emission gates.
///
/// Detection and validation always run for both families; these flags only
/// suppress emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyFilter {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl FamilyFilter {
    /// Include both families.
    pub fn all() -> FamilyFilter {
        FamilyFilter {
            ipv4: true,
            ipv6: true,
        }
    }
}

/// Outcome of one successfully parsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSummary {
    /// Addresses emitted for this line.
    pub emitted: u64,
    /// True when an IPv6 range was truncated at the enumeration cap.
    pub clamped: bool,
}

/// Totals across one whole input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Non-blank lines seen.
    pub lines: u64,
    /// Addresses emitted in total.
    pub emitted: u64,
    /// Lines skipped as malformed.
    pub skipped: u64,
    /// Lines whose enumeration was clamped.
    pub clamped: u64,
}

/// Parse one trimmed token and emit its addresses.
///
/// Bare addresses pass through in canonical form (no expansion loop runs);
/// CIDR tokens dispatch to the matching family's expander.
pub fn expand_line<W: Write>(
    token: &str,
    filter: FamilyFilter,
    out: &mut OutputBatcher<W>,
) -> Result<LineSummary, LineError> {
    let summary = match parse_token(token)? {
        Token::V4(addr) => {
            let mut emitted = 0;
            if filter.ipv4 {
                out.emit(&addr)?;
                emitted = 1;
            }
            LineSummary {
                emitted,
                clamped: false,
            }
        }
        Token::V6(addr) => {
            let mut emitted = 0;
            if filter.ipv6 {
                out.emit(&addr)?;
                emitted = 1;
            }
            LineSummary {
                emitted,
                clamped: false,
            }
        }
        Token::V4Cidr(cidr) => {
            let emitted = expand_v4::expand(&cidr, filter.ipv4, out)?;
            LineSummary {
                emitted,
                clamped: false,
            }
        }
        Token::V6Cidr(cidr) => {
            let result = expand_v6::expand(&cidr, filter.ipv6, out)?;
            LineSummary {
                emitted: result.emitted,
                clamped: result.clamped,
            }
        }
    };
    Ok(summary)
}

/// Read tokens line by line, expand each, and flush the batcher at the end.
///
/// Leading/trailing whitespace is trimmed and blank lines are skipped.
/// Diagnostics for malformed lines and clamped ranges go to the log sink;
/// they never interrupt the following lines.
pub fn process_input<R: BufRead, W: Write>(
    reader: R,
    filter: FamilyFilter,
    out: &mut OutputBatcher<W>,
) -> Result<ProcessSummary, LineError> {
    let mut summary = ProcessSummary::default();

    for line in reader.lines() {
        let line = line.map_err(LineError::Io)?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        summary.lines += 1;

        match expand_line(token, filter, out) {
            Ok(result) => {
                summary.emitted += result.emitted;
                if result.clamped {
                    summary.clamped += 1;
                    log::warn!(
                        "Reached maximum number of addresses ({ENUMERATION_CAP}), stopping: {token}",
                        token = token.on_blue()
                    );
                }
            }
            Err(LineError::Token(e)) => {
                summary.skipped += 1;
                report_token_error(&e);
            }
            Err(e @ LineError::Io(_)) => return Err(e),
        }
    }

    out.flush().map_err(LineError::Io)?;
    log::info!(
        "#Done lines={lines} emitted={emitted} skipped={skipped} clamped={clamped}",
        lines = summary.lines,
        emitted = summary.emitted,
        skipped = summary.skipped,
        clamped = summary.clamped,
    );

    Ok(summary)
}

fn report_token_error(e: &TokenError) {
    log::error!("{skipped} {e}", skipped = "skipped".on_red());
}
