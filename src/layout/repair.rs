use std::collections::HashSet;

use crate::document::{Document, DocumentGraph};
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// A buffer view as seen by the placement pass.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    view: usize,
    capacity: u64,
    claimed: u64,
}

impl Candidate {
    fn remaining(&self) -> u64 {
        self.capacity.saturating_sub(self.claimed)
    }
}

/// Make every accessor's `count × bytesPerElement` fit its buffer view.
///
/// Placement pass: accessors that already fit keep their view and claim its
/// capacity. Each overflowing accessor, in index order, moves to the first
/// view (largest byteLength first) with enough unclaimed capacity.
///
/// Clamp pass: any accessor still too large for its view has its count cut to
/// `floor(byteLength / bytesPerElement)`.
///
/// Views in `skipped_views` were emptied by reallocation and are never
/// placement targets. Running the repair on its own output changes nothing.
pub fn repair_accessors(document: &mut Document, skipped_views: &[usize]) -> ChangeLog {
    let mut log = ChangeLog::new();
    let skipped: HashSet<usize> = skipped_views.iter().copied().collect();
    let view_lengths: Vec<u64> = document.buffer_views.iter().map(|v| v.byte_length).collect();

    let mut candidates: Vec<Candidate> = view_lengths
        .iter()
        .enumerate()
        .filter(|(i, _)| !skipped.contains(i))
        .map(|(view, &capacity)| Candidate {
            view,
            capacity,
            claimed: 0,
        })
        .collect();
    // Stable, so equal lengths stay in index order
    candidates.sort_by(|a, b| b.capacity.cmp(&a.capacity));

    // (accessor, required bytes) for accessors that do not fit their view
    let mut overflowing = Vec::new();

    for (i, accessor) in document.accessors.iter().enumerate() {
        let Some(view) = accessor.buffer_view.filter(|&v| v < view_lengths.len()) else {
            continue;
        };
        let required = DocumentGraph::byte_requirement(accessor);
        if required <= view_lengths[view] {
            if let Some(candidate) = candidates.iter_mut().find(|c| c.view == view) {
                candidate.claimed = candidate.claimed.saturating_add(required);
            }
        } else {
            overflowing.push((i, required));
        }
    }

    let mut unplaced = HashSet::new();
    for (i, required) in overflowing {
        match candidates.iter_mut().find(|c| c.remaining() >= required) {
            Some(candidate) => {
                let accessor = &mut document.accessors[i];
                let from = accessor.buffer_view.unwrap_or_default();
                accessor.buffer_view = Some(candidate.view);
                candidate.claimed += required;
                log.add(ChangeItem::info(
                    ChangeCode::AccessorReassigned,
                    ChangeCategory::Accessor,
                    format!(
                        "Moved Accessor {i} from BufferView {from} to BufferView {} (requires {required} bytes)",
                        candidate.view
                    ),
                ));
            }
            None => {
                unplaced.insert(i);
            }
        }
    }

    for (i, accessor) in document.accessors.iter_mut().enumerate() {
        let Some(view) = accessor.buffer_view.filter(|&v| v < view_lengths.len()) else {
            continue;
        };
        let available = view_lengths[view];
        let per_element = DocumentGraph::bytes_per_element(accessor);
        let required = accessor.count.saturating_mul(per_element);
        if required <= available {
            continue;
        }

        let original = accessor.count;
        accessor.count = available / per_element;

        let mut context = String::new();
        if unplaced.contains(&i) {
            context.push_str(", no buffer view had room for it");
        }
        if skipped.contains(&view) {
            context.push_str(", its view was dropped during reallocation");
        }

        let (code, verb) = if accessor.count == 0 {
            (ChangeCode::AccessorEmptied, "emptied")
        } else {
            (ChangeCode::AccessorOverflowWarning, "clamped")
        };
        log.add(ChangeItem::warning(
            code,
            ChangeCategory::Accessor,
            format!(
                "Accessor {i} {verb}: count {original} -> {} ({required} bytes needed, BufferView {view} holds {available}{context})",
                accessor.count
            ),
        ));
    }

    log
}

/// Whether every accessor with a valid view satisfies the byte-fit invariant.
pub fn is_consistent(document: &Document) -> bool {
    let graph = document.graph();
    document.accessors.iter().all(|accessor| match graph.accessor_view(accessor) {
        Some(view) => DocumentGraph::byte_requirement(accessor) <= view.byte_length,
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        Document::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn consistent_document_is_untouched() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 120}, {"byteLength": 72}],
                "accessors": [
                    {"bufferView": 0, "count": 10, "type": "VEC3", "componentType": 5126},
                    {"bufferView": 1, "count": 36, "type": "SCALAR", "componentType": 5123}
                ]
            }"#,
        );
        let before = d.clone();
        let log = repair_accessors(&mut d, &[]);
        assert!(log.is_empty());
        assert_eq!(d, before);
    }

    #[test]
    fn ten_bytes_short_is_clamped_with_one_diagnostic() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 110}],
                "accessors": [{"bufferView": 0, "count": 10, "type": "VEC3", "componentType": 5126}]
            }"#,
        );
        let log = repair_accessors(&mut d, &[]);
        assert_eq!(d.accessors[0].count, 9);
        assert_eq!(log.len(), 1);
        assert_eq!(log.items[0].code, ChangeCode::AccessorOverflowWarning);
        assert!(is_consistent(&d));
    }

    #[test]
    fn overflowing_accessor_moves_to_largest_free_view() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 48}, {"byteLength": 200}, {"byteLength": 24}],
                "accessors": [
                    {"bufferView": 0, "count": 10, "type": "VEC3", "componentType": 5126},
                    {"bufferView": 2, "count": 2, "type": "VEC3", "componentType": 5126}
                ]
            }"#,
        );
        let log = repair_accessors(&mut d, &[]);
        assert_eq!(d.accessors[0].buffer_view, Some(1));
        assert_eq!(d.accessors[0].count, 10);
        assert_eq!(d.accessors[1].buffer_view, Some(2));
        assert_eq!(log.count(ChangeCode::AccessorReassigned), 1);
        assert_eq!(log.warning_count, 0);
    }

    #[test]
    fn claimed_capacity_blocks_placement() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 100}, {"byteLength": 40}],
                "accessors": [
                    {"bufferView": 0, "count": 20, "type": "SCALAR", "componentType": 5126},
                    {"bufferView": 1, "count": 15, "type": "SCALAR", "componentType": 5126}
                ]
            }"#,
        );
        // Accessor 0 claims 80 of view 0, leaving 20; accessor 1 needs 60
        let log = repair_accessors(&mut d, &[]);
        assert_eq!(d.accessors[1].buffer_view, Some(1));
        assert_eq!(d.accessors[1].count, 10);
        assert_eq!(log.len(), 1);
        assert!(log.items[0].message.contains("no buffer view had room"));
    }

    #[test]
    fn skipped_view_empties_its_accessors() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 0}],
                "accessors": [{"bufferView": 0, "count": 4, "type": "VEC2", "componentType": 5126}]
            }"#,
        );
        let log = repair_accessors(&mut d, &[0]);
        assert_eq!(d.accessors[0].count, 0);
        assert_eq!(log.count(ChangeCode::AccessorEmptied), 1);
        assert!(log.items[0].message.contains("dropped during reallocation"));
    }

    #[test]
    fn dangling_and_unbound_accessors_are_ignored() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 4}],
                "accessors": [
                    {"count": 100, "type": "VEC3", "componentType": 5126},
                    {"bufferView": 5, "count": 100, "type": "VEC3", "componentType": 5126}
                ]
            }"#,
        );
        let before = d.clone();
        let log = repair_accessors(&mut d, &[]);
        assert!(log.is_empty());
        assert_eq!(d, before);
    }

    #[test]
    fn repair_is_idempotent() {
        let mut d = doc(
            r#"{
                "bufferViews": [{"byteLength": 200}, {"byteLength": 90}],
                "accessors": [
                    {"bufferView": 0, "count": 105, "type": "SCALAR", "componentType": 5123},
                    {"bufferView": 1, "count": 25, "type": "SCALAR", "componentType": 5126},
                    {"bufferView": 1, "count": 7, "type": "VEC3", "componentType": 5126}
                ]
            }"#,
        );
        repair_accessors(&mut d, &[]);
        let once = d.clone();
        let second = repair_accessors(&mut d, &[]);
        assert!(second.is_empty());
        assert_eq!(d, once);
        assert!(is_consistent(&d));
    }
}
