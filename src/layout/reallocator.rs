use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use serde_json::Map;

use crate::document::{Buffer, Document};
use crate::error::{ConvertError, Result};
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// Index of the buffer an embedded payload backs.
pub const EMBEDDED_BUFFER: usize = 0;

/// Result of re-homing the embedded payload.
#[derive(Debug, Clone, Default)]
pub struct Reallocation {
    /// Bytes to write to the sidecar file, views packed back to back.
    pub sidecar: Vec<u8>,
    /// Views that could not be copied. Their byteLength is now 0.
    pub skipped_views: Vec<usize>,
    pub changes: ChangeLog,
}

/// Locate the embedded binary payload of a document.
///
/// The GLB BIN chunk wins. Without one, a base64 `data:` URI on buffer 0
/// is decoded and treated the same way.
pub fn embedded_payload(
    document: &Document,
    glb_binary: Option<Vec<u8>>,
) -> Result<Option<Vec<u8>>> {
    if glb_binary.is_some() {
        return Ok(glb_binary);
    }

    let Some(uri) = document
        .buffers
        .get(EMBEDDED_BUFFER)
        .and_then(|b| b.uri.as_deref())
    else {
        return Ok(None);
    };
    let Some(rest) = uri.strip_prefix("data:") else {
        return Ok(None);
    };
    let (_, encoded) = rest.split_once(";base64,").ok_or_else(|| {
        ConvertError::malformed("buffer 0 has a data URI that is not base64 encoded")
    })?;
    let bytes = BASE64_STANDARD
        .decode(encoded)
        .map_err(|e| ConvertError::malformed(format!("buffer 0 data URI is not valid base64: {e}")))?;
    Ok(Some(bytes))
}

/// Copy every buffer view out of `blob` into one tightly packed buffer and
/// point the document at `sidecar_name`.
///
/// Views are visited in index order. The new offset of view *i* is the sum
/// of the lengths of the views copied before it. A view whose range falls
/// outside `blob`, or that lives in another buffer, is skipped: it keeps its
/// slot with a zero length and is reported for the accessor repair pass.
pub fn reallocate(document: &mut Document, blob: &[u8], sidecar_name: &str) -> Reallocation {
    let mut result = Reallocation::default();

    if document.buffer_views.is_empty() {
        if !document.buffers.is_empty() {
            document.buffers.clear();
            result.changes.add(ChangeItem::info(
                ChangeCode::BuffersReallocated,
                ChangeCategory::Layout,
                "Document has no buffer views, dropped the unused embedded buffer",
            ));
        }
        return result;
    }

    let mut sidecar = Vec::new();

    for (i, view) in document.buffer_views.iter_mut().enumerate() {
        let new_offset = sidecar.len() as u64;

        let range = if view.buffer == EMBEDDED_BUFFER {
            slice_range(view.byte_offset, view.byte_length, blob.len())
        } else {
            None
        };

        match range {
            Some(range) => {
                sidecar.extend_from_slice(&blob[range]);
            }
            None => {
                let reason = if view.buffer != EMBEDDED_BUFFER {
                    format!("it lives in external buffer {}", view.buffer)
                } else {
                    format!(
                        "bytes {}..{} exceed the {}-byte payload",
                        view.byte_offset,
                        view.end(),
                        blob.len()
                    )
                };
                result.changes.add(ChangeItem::warning(
                    ChangeCode::ViewSkipped,
                    ChangeCategory::Layout,
                    format!("BufferView {i} was not copied to the sidecar: {reason}"),
                ));
                view.byte_length = 0;
                result.skipped_views.push(i);
            }
        }

        view.buffer = EMBEDDED_BUFFER;
        view.byte_offset = new_offset;
    }

    let total = sidecar.len() as u64;
    document.buffers = vec![Buffer {
        uri: Some(sidecar_name.to_string()),
        byte_length: total,
        extra: Map::new(),
    }];

    result.changes.add(ChangeItem::info(
        ChangeCode::BuffersReallocated,
        ChangeCategory::Layout,
        format!(
            "Re-homed {} buffer views into {sidecar_name} ({total} bytes)",
            document.buffer_views.len() - result.skipped_views.len()
        ),
    ));
    result.sidecar = sidecar;
    result
}

fn slice_range(offset: u64, length: u64, available: usize) -> Option<std::ops::Range<usize>> {
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(usize::try_from(length).ok()?)?;
    (end <= available).then_some(start..end)
}
