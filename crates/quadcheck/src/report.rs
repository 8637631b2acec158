//! Plain-text rendering of verification outcomes.

use std::fmt::Write;

use quadcheck_mem::WordState;

use crate::{Corruption, Mismatch, VerifyOutcome};

/// Mismatches shown in detail by default.
pub const DEFAULT_SHOWN_MISMATCHES: usize = 10;

const RULE_WIDTH: usize = 70;

fn hex(value: Option<u64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| format!("0x{v:016X}"))
}

fn rule(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

fn write_mismatch(out: &mut String, number: usize, mismatch: &Mismatch) {
    let _ = writeln!(out, "  Error #{number} at address {}:", mismatch.address);
    if mismatch.operand_a.is_some() || mismatch.operand_b.is_some() {
        let _ = writeln!(out, "    Operand A: {}", hex(mismatch.operand_a));
        let _ = writeln!(out, "    Operand B: {}", hex(mismatch.operand_b));
        let _ = writeln!(out, "    A + B:     {}", hex(mismatch.operand_sum()));
    }
    let _ = writeln!(out, "    Expected:  {}", hex(Some(mismatch.expected)));
    let _ = writeln!(out, "    Simulated: {}", hex(mismatch.actual));
    let _ = writeln!(
        out,
        "    ** {} ({}) **",
        mismatch.diagnosis.hint(),
        mismatch.diagnosis
    );
}

fn word_pair(words: (WordState, WordState)) -> String {
    hex(WordState::join(words.0, words.1))
}

fn write_corruption(out: &mut String, corruption: &Corruption) {
    let _ = writeln!(
        out,
        "  Address {}: expected {}, got {}",
        corruption.address,
        word_pair(corruption.pre_state),
        word_pair(corruption.actual)
    );
}

/// Render image sizes, the result check, and the integrity check.
///
/// At most `shown` mismatches are listed in detail; the rest are counted.
#[must_use]
pub fn render_verification(outcome: &VerifyOutcome, shown: usize) -> String {
    let mut out = String::new();
    let sizes = &outcome.sizes;

    for (name, (upper, lower)) in [
        ("Pre-state", sizes.pre_state),
        ("Expected", sizes.expected),
        ("Simulated", sizes.actual),
    ] {
        let _ = writeln!(out, "  {name} lower: {lower} words");
        let _ = writeln!(out, "  {name} upper: {upper} words");
    }

    for warning in &outcome.length_warnings {
        let _ = writeln!(out, "\nWARNING: Length mismatch in {} memory!", warning.bank);
        let _ = writeln!(out, "  Expected: {} words", warning.expected);
        let _ = writeln!(out, "  Simulated: {} words", warning.actual);
    }

    if let Some(address) = outcome.out_of_range {
        let _ = writeln!(out, "\nERROR: Address {address} out of range, comparison stopped");
    }

    out.push('\n');
    rule(&mut out, "VERIFICATION RESULTS");
    let _ = writeln!(out, "Total test cases: {}", outcome.total);
    let _ = writeln!(out, "Passed: {}", outcome.passed);
    let _ = writeln!(out, "Failed: {}", outcome.failed);

    if !outcome.mismatches.is_empty() {
        let _ = writeln!(out, "\nShowing first {} errors:", shown.min(outcome.failed));
        for (index, mismatch) in outcome.mismatches.iter().take(shown).enumerate() {
            out.push('\n');
            write_mismatch(&mut out, index + 1, mismatch);
        }
        if outcome.failed > shown {
            let _ = writeln!(out, "\n  ... and {} more errors", outcome.failed - shown);
        }
    }

    out.push('\n');
    rule(&mut out, "INPUT MEMORY INTEGRITY");
    let integrity = &outcome.integrity;
    if integrity.is_clean() {
        let _ = writeln!(out, "Input memory unchanged ({} addresses checked)", integrity.checked);
    } else {
        let _ = writeln!(out, "WARNING: Input memory was modified!");
        for corruption in &integrity.sample {
            write_corruption(&mut out, corruption);
        }
        let _ = writeln!(out, "Total corrupted addresses: {}", integrity.corrupted);
    }

    out
}
