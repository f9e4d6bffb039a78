use std::fmt::Write;

use crate::models::SortOutcome;

/// Render a completed sort session as plain text for manual handoff
///
/// One block per pair (tag, criteria, score, recipient, address), followed by
/// the unmatched boxes and invoices listed by identifier. Nothing is ever
/// silently dropped from the rendering.
pub fn render_sort_report(outcome: &SortOutcome) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SORT SESSION");
    let _ = writeln!(
        out,
        "{} paired | {} boxes left | {} invoices left",
        outcome.pairs.len(),
        outcome.unmatched_boxes.len(),
        outcome.unmatched_invoices.len()
    );

    for pair in &outcome.pairs {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "[{}] score {} via {}",
            pair.visual_tag,
            pair.match_score,
            pair.matched_by.join("+")
        );
        let _ = writeln!(out, "  box {} / invoice {}", pair.box_item.id, pair.invoice.id);

        let fields = &pair.invoice.recognized_fields;
        if let Some(recipient) = fields.recipient.as_deref() {
            let _ = writeln!(out, "  recipient: {}", recipient);
        }
        if let Some(address) = fields.address.as_deref() {
            let _ = writeln!(out, "  address:   {}", address);
        }
    }

    if !outcome.unmatched_boxes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unmatched boxes:");
        for item in &outcome.unmatched_boxes {
            let _ = writeln!(out, "  - {}", item.id);
        }
    }

    if !outcome.unmatched_invoices.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unmatched invoices:");
        for item in &outcome.unmatched_invoices {
            let _ = writeln!(out, "  - {}", item.id);
        }
    }

    out
}
