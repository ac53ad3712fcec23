use crate::document::Document;
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// Restrict the document-level extension lists to `allowed`.
///
/// `extensionsUsed` is always written, possibly empty. `extensionsRequired`
/// is removed once nothing in it is allowed.
pub fn restrict_extensions(document: &mut Document, allowed: &[&str]) -> ChangeLog {
    let is_allowed = |name: &String| allowed.contains(&name.as_str());

    let mut removed: Vec<String> = Vec::new();
    let mut used = document.extensions_used.take().unwrap_or_default();
    removed.extend(used.iter().filter(|n| !is_allowed(*n)).cloned());
    used.retain(is_allowed);
    document.extensions_used = Some(used);

    let mut required = document.extensions_required.take().unwrap_or_default();
    for name in required.iter().filter(|n| !is_allowed(*n)) {
        if !removed.contains(name) {
            removed.push(name.clone());
        }
    }
    required.retain(is_allowed);
    document.extensions_required = (!required.is_empty()).then_some(required);

    let mut log = ChangeLog::new();
    if !removed.is_empty() {
        log.add(ChangeItem::info(
            ChangeCode::ExtensionsFiltered,
            ChangeCategory::Extension,
            format!("Removed extensions: {}", removed.join(", ")),
        ));
    }
    log
}
