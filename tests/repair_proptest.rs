// Property tests for accessor repair over random layouts

use proptest::prelude::*;
use voxbridge::document::{Accessor, BufferView, Document};
use voxbridge::layout::{is_consistent, repair_accessors};
use voxbridge::DocumentGraph;

const TYPES: [&str; 7] = ["SCALAR", "VEC2", "VEC3", "VEC4", "MAT2", "MAT3", "MAT4"];
const COMPONENTS: [u32; 6] = [5120, 5121, 5122, 5123, 5125, 5126];

fn layout() -> impl Strategy<Value = (Document, Vec<usize>)> {
    (
        prop::collection::vec(0u64..600, 1..6),
        prop::collection::vec((0usize..7, 0u64..120, 0usize..7, 0usize..6), 0..12),
        prop::collection::vec(any::<bool>(), 6),
    )
        .prop_map(|(views, accessors, skip)| {
            let view_count = views.len();
            let document = Document {
                buffer_views: views
                    .into_iter()
                    .map(|byte_length| BufferView {
                        byte_length,
                        ..BufferView::default()
                    })
                    .collect(),
                accessors: accessors
                    .into_iter()
                    .map(|(view, count, ty, component)| Accessor {
                        // One past the end leaves some accessors dangling
                        buffer_view: Some(view % (view_count + 1)),
                        count,
                        accessor_type: TYPES[ty].to_string(),
                        component_type: COMPONENTS[component],
                        ..Accessor::default()
                    })
                    .collect(),
                ..Document::default()
            };
            let skipped = (0..view_count).filter(|&i| skip[i]).collect();
            (document, skipped)
        })
}

proptest! {
    #[test]
    fn every_bound_accessor_fits_after_repair((mut doc, skipped) in layout()) {
        repair_accessors(&mut doc, &skipped);
        prop_assert!(is_consistent(&doc));
        for accessor in &doc.accessors {
            if let Some(view) = doc.graph().accessor_view(accessor) {
                prop_assert!(DocumentGraph::byte_requirement(accessor) <= view.byte_length);
            }
        }
    }

    #[test]
    fn repair_is_idempotent((mut doc, skipped) in layout()) {
        repair_accessors(&mut doc, &skipped);
        let once = doc.clone();
        let log = repair_accessors(&mut doc, &skipped);
        prop_assert!(log.is_empty());
        prop_assert_eq!(doc, once);
    }

    #[test]
    fn repair_never_grows_counts((doc, skipped) in layout()) {
        let mut repaired = doc.clone();
        repair_accessors(&mut repaired, &skipped);
        for (before, after) in doc.accessors.iter().zip(&repaired.accessors) {
            prop_assert!(after.count <= before.count);
        }
    }
}
