use crate::models::{MatchedPair, RecognizedFields, ScanItem, SortOutcome};

/// Sticker colors cycled by pair assignment order
const TAG_PALETTE: [&str; 8] = [
    "#E53935", "#1E88E5", "#43A047", "#FB8C00", "#8E24AA", "#00ACC1", "#FDD835", "#6D4C41",
];

/// A matching criterion, listed in decreasing confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criterion {
    OrderCode,
    ShipmentCode,
    SubRouteCode,
    PostalCode,
}

impl Criterion {
    /// Pass order: order code, shipment code, sub-route, postal code
    const ALL: [Criterion; 4] = [
        Criterion::OrderCode,
        Criterion::ShipmentCode,
        Criterion::SubRouteCode,
        Criterion::PostalCode,
    ];

    fn label(self) -> &'static str {
        match self {
            Criterion::OrderCode => "PED",
            Criterion::ShipmentCode => "REM",
            Criterion::SubRouteCode => "ROTA",
            Criterion::PostalCode => "CEP",
        }
    }

    fn score(self) -> u32 {
        match self {
            Criterion::OrderCode | Criterion::ShipmentCode => 50,
            Criterion::SubRouteCode => 40,
            Criterion::PostalCode => 30,
        }
    }

    /// Comparable key for this criterion, or None when the field cannot match
    ///
    /// Sub-route codes compare case-insensitively; postal codes compare on
    /// their digits only. An absent or empty field disables the criterion
    /// for that item — partial recognition is never an error.
    fn key_for(self, fields: &RecognizedFields) -> Option<String> {
        match self {
            Criterion::OrderCode => non_empty(fields.order_code.as_deref()),
            Criterion::ShipmentCode => non_empty(fields.shipment_code.as_deref()),
            Criterion::SubRouteCode => {
                non_empty(fields.sub_route_code.as_deref()).map(|code| code.to_lowercase())
            }
            Criterion::PostalCode => {
                let digits: String = fields
                    .postal_code
                    .as_deref()
                    .unwrap_or("")
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                if digits.is_empty() {
                    None
                } else {
                    Some(digits)
                }
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

/// Multi-pass box/invoice pairing engine
///
/// Runs the criteria of decreasing confidence as strict passes: within a
/// pass, boxes are walked in input order and each takes the first unmatched
/// invoice with an equal key. Consumed items are never reconsidered, and no
/// attempt is made at a globally optimal assignment — greedy in-order pairing
/// is what the sorters on the floor expect to follow along with.
#[derive(Debug, Clone, Default)]
pub struct SortMatcher;

impl SortMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Pair scanned boxes with scanned invoices
    ///
    /// Every input item ends up in exactly one of: a pair, the unmatched
    /// boxes list, or the unmatched invoices list. Items that have not
    /// reached READY are reported unmatched without participating.
    pub fn pair(&self, boxes: Vec<ScanItem>, invoices: Vec<ScanItem>) -> SortOutcome {
        let mut box_used = vec![false; boxes.len()];
        let mut invoice_used = vec![false; invoices.len()];
        let mut pairs: Vec<MatchedPair> = Vec::new();

        for criterion in Criterion::ALL {
            for (box_index, box_item) in boxes.iter().enumerate() {
                if box_used[box_index] || !box_item.ready() {
                    continue;
                }
                let box_key = match criterion.key_for(&box_item.recognized_fields) {
                    Some(key) => key,
                    None => continue,
                };

                for (invoice_index, invoice) in invoices.iter().enumerate() {
                    if invoice_used[invoice_index] || !invoice.ready() {
                        continue;
                    }
                    let invoice_key = match criterion.key_for(&invoice.recognized_fields) {
                        Some(key) => key,
                        None => continue,
                    };

                    if invoice_key == box_key {
                        box_used[box_index] = true;
                        invoice_used[invoice_index] = true;
                        let sequence = pairs.len() + 1;
                        pairs.push(build_pair(box_item.clone(), invoice.clone(), criterion, sequence));
                        break;
                    }
                }
            }
        }

        let unmatched_boxes = boxes
            .into_iter()
            .zip(box_used)
            .filter(|(_, used)| !used)
            .map(|(item, _)| item)
            .collect();
        let unmatched_invoices = invoices
            .into_iter()
            .zip(invoice_used)
            .filter(|(_, used)| !used)
            .map(|(item, _)| item)
            .collect();

        SortOutcome {
            pairs,
            unmatched_boxes,
            unmatched_invoices,
        }
    }
}

fn build_pair(
    box_item: ScanItem,
    invoice: ScanItem,
    criterion: Criterion,
    sequence: usize,
) -> MatchedPair {
    // The invoice is the document side; it usually carries the recipient
    // and postal code, so it feeds the tag with the box as fallback
    let recipient = invoice
        .recognized_fields
        .recipient
        .as_deref()
        .or(box_item.recognized_fields.recipient.as_deref());
    let postal_code = invoice
        .recognized_fields
        .postal_code
        .as_deref()
        .or(box_item.recognized_fields.postal_code.as_deref());

    let visual_tag = visual_tag(recipient, postal_code, sequence);
    let tag_color = TAG_PALETTE[(sequence - 1) % TAG_PALETTE.len()].to_string();

    MatchedPair {
        id: uuid::Uuid::new_v4(),
        box_item,
        invoice,
        match_score: criterion.score(),
        matched_by: vec![criterion.label().to_string()],
        visual_tag,
        tag_color,
    }
}

/// Sticker tag written on the matched box for manual handoff
///
/// `<3 recipient letters, X-padded>-<last 3 postal digits, 0-padded>-<2-digit
/// pair sequence>`
fn visual_tag(recipient: Option<&str>, postal_code: Option<&str>, sequence: usize) -> String {
    let mut letters: String = recipient
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect();
    for _ in letters.chars().count()..3 {
        letters.push('X');
    }

    let digits: Vec<char> = postal_code
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let mut tail: String = digits[digits.len().saturating_sub(3)..].iter().collect();
    while tail.len() < 3 {
        tail.insert(0, '0');
    }

    format!("{}-{}-{:02}", letters, tail, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanStatus;

    fn item(id: &str, fields: RecognizedFields) -> ScanItem {
        ScanItem {
            id: id.to_string(),
            recognized_fields: fields,
            status: ScanStatus::Ready,
        }
    }

    fn with_order(code: &str) -> RecognizedFields {
        RecognizedFields {
            order_code: Some(code.to_string()),
            ..Default::default()
        }
    }

    fn with_postal(code: &str) -> RecognizedFields {
        RecognizedFields {
            postal_code: Some(code.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_order_code_pass_pairs_with_full_score() {
        let matcher = SortMatcher::new();
        let boxes = vec![item("box-1", with_order("PED1"))];
        let invoices = vec![item("inv-1", with_order("PED1"))];

        let outcome = matcher.pair(boxes, invoices);

        assert_eq!(outcome.pairs.len(), 1);
        let pair = &outcome.pairs[0];
        assert_eq!(pair.match_score, 50);
        assert_eq!(pair.matched_by, vec!["PED".to_string()]);
        assert_eq!(pair.box_item.id, "box-1");
        assert_eq!(pair.invoice.id, "inv-1");
        assert!(outcome.unmatched_boxes.is_empty());
        assert!(outcome.unmatched_invoices.is_empty());
    }

    #[test]
    fn test_pass_priority_order() {
        let matcher = SortMatcher::new();

        // The box could pair with inv-postal via CEP, but the order-code
        // pass runs first and claims it for inv-order
        let boxes = vec![item(
            "box-1",
            RecognizedFields {
                order_code: Some("PED7".to_string()),
                postal_code: Some("01310-100".to_string()),
                ..Default::default()
            },
        )];
        let invoices = vec![
            item("inv-postal", with_postal("01310-100")),
            item("inv-order", with_order("PED7")),
        ];

        let outcome = matcher.pair(boxes, invoices);

        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].invoice.id, "inv-order");
        assert_eq!(outcome.pairs[0].matched_by, vec!["PED".to_string()]);
        assert_eq!(outcome.unmatched_invoices.len(), 1);
        assert_eq!(outcome.unmatched_invoices[0].id, "inv-postal");
    }

    #[test]
    fn test_sub_route_matches_case_insensitively() {
        let matcher = SortMatcher::new();
        let boxes = vec![item(
            "box-1",
            RecognizedFields {
                sub_route_code: Some("Rota-A3".to_string()),
                ..Default::default()
            },
        )];
        let invoices = vec![item(
            "inv-1",
            RecognizedFields {
                sub_route_code: Some("ROTA-a3".to_string()),
                ..Default::default()
            },
        )];

        let outcome = matcher.pair(boxes, invoices);

        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].match_score, 40);
        assert_eq!(outcome.pairs[0].matched_by, vec!["ROTA".to_string()]);
    }

    #[test]
    fn test_postal_code_matches_on_digits_only() {
        let matcher = SortMatcher::new();
        let boxes = vec![item("box-1", with_postal("01310-100"))];
        let invoices = vec![item("inv-1", with_postal("01310100"))];

        let outcome = matcher.pair(boxes, invoices);

        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].match_score, 30);
        assert_eq!(outcome.pairs[0].matched_by, vec!["CEP".to_string()]);
    }

    #[test]
    fn test_postal_pass_is_greedy_in_input_order() {
        let matcher = SortMatcher::new();
        let boxes = vec![
            item("box-1", with_postal("04038-001")),
            item("box-2", with_postal("04038-001")),
        ];
        let invoices = vec![
            item("inv-1", with_postal("04038-001")),
            item("inv-2", with_postal("04038-001")),
        ];

        let outcome = matcher.pair(boxes, invoices);

        assert_eq!(outcome.pairs.len(), 2);
        assert_eq!(outcome.pairs[0].box_item.id, "box-1");
        assert_eq!(outcome.pairs[0].invoice.id, "inv-1");
        assert_eq!(outcome.pairs[1].box_item.id, "box-2");
        assert_eq!(outcome.pairs[1].invoice.id, "inv-2");
    }

    #[test]
    fn test_empty_fields_never_match() {
        let matcher = SortMatcher::new();
        let boxes = vec![item(
            "box-1",
            RecognizedFields {
                order_code: Some("  ".to_string()),
                ..Default::default()
            },
        )];
        let invoices = vec![item(
            "inv-1",
            RecognizedFields {
                order_code: Some("".to_string()),
                ..Default::default()
            },
        )];

        let outcome = matcher.pair(boxes, invoices);

        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.unmatched_boxes.len(), 1);
        assert_eq!(outcome.unmatched_invoices.len(), 1);
    }

    #[test]
    fn test_items_not_ready_are_reported_unmatched() {
        let matcher = SortMatcher::new();
        let mut pending = item("box-1", with_order("PED1"));
        pending.status = ScanStatus::Processing;
        let invoices = vec![item("inv-1", with_order("PED1"))];

        let outcome = matcher.pair(vec![pending], invoices);

        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.unmatched_boxes.len(), 1);
        assert_eq!(outcome.unmatched_invoices.len(), 1);
    }

    #[test]
    fn test_every_item_appears_exactly_once() {
        let matcher = SortMatcher::new();
        let boxes = vec![
            item("box-1", with_order("PED1")),
            item("box-2", with_postal("01310-100")),
            item("box-3", RecognizedFields::default()),
        ];
        let invoices = vec![
            item("inv-1", with_postal("01310100")),
            item("inv-2", with_order("PED1")),
        ];

        let outcome = matcher.pair(boxes, invoices);

        let mut box_ids: Vec<String> = outcome
            .pairs
            .iter()
            .map(|p| p.box_item.id.clone())
            .chain(outcome.unmatched_boxes.iter().map(|b| b.id.clone()))
            .collect();
        let mut invoice_ids: Vec<String> = outcome
            .pairs
            .iter()
            .map(|p| p.invoice.id.clone())
            .chain(outcome.unmatched_invoices.iter().map(|i| i.id.clone()))
            .collect();

        box_ids.sort();
        invoice_ids.sort();
        assert_eq!(box_ids, vec!["box-1", "box-2", "box-3"]);
        assert_eq!(invoice_ids, vec!["inv-1", "inv-2"]);
    }

    #[test]
    fn test_empty_inputs_are_a_no_op() {
        let matcher = SortMatcher::new();
        let outcome = matcher.pair(vec![], vec![]);

        assert!(outcome.pairs.is_empty());
        assert!(outcome.unmatched_boxes.is_empty());
        assert!(outcome.unmatched_invoices.is_empty());
    }

    #[test]
    fn test_visual_tag_composition() {
        assert_eq!(visual_tag(Some("Maria Silva"), Some("01310-100"), 1), "MAR-100-01");
        // Short name padded with X, short postal padded with 0
        assert_eq!(visual_tag(Some("Jo"), Some("7"), 3), "JOX-007-03");
        assert_eq!(visual_tag(None, None, 12), "XXX-000-12");
    }

    #[test]
    fn test_tag_colors_cycle_through_palette() {
        let matcher = SortMatcher::new();
        let boxes: Vec<ScanItem> = (0..10)
            .map(|i| item(&format!("box-{}", i), with_order(&format!("PED{}", i))))
            .collect();
        let invoices: Vec<ScanItem> = (0..10)
            .map(|i| item(&format!("inv-{}", i), with_order(&format!("PED{}", i))))
            .collect();

        let outcome = matcher.pair(boxes, invoices);

        assert_eq!(outcome.pairs.len(), 10);
        assert_eq!(outcome.pairs[0].tag_color, outcome.pairs[8].tag_color);
        assert_ne!(outcome.pairs[0].tag_color, outcome.pairs[1].tag_color);
    }
}
