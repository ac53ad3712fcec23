/// Fallback name for materials whose name cleans down to nothing.
pub const DEFAULT_MATERIAL_NAME: &str = "Material";

/// Clean a material name to `[A-Za-z0-9_]+`.
///
/// Every other character becomes `_`, runs of `_` collapse to one, and
/// leading/trailing `_` are trimmed. An empty result becomes `Material`.
pub fn clean_material_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && (cleaned.is_empty() || cleaned.ends_with('_')) {
            continue;
        }
        cleaned.push(c);
    }
    while cleaned.ends_with('_') {
        cleaned.pop();
    }

    if cleaned.is_empty() {
        DEFAULT_MATERIAL_NAME.to_string()
    } else {
        cleaned
    }
}

/// Truncate `name` to at most `max_chars` characters.
pub fn truncate_chars(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &name[..byte_index],
        None => name,
    }
}

/// Reduce an absolute or nested image URI to its bare file name.
///
/// `data:` URIs and URIs without separators are returned unchanged.
pub fn clean_image_uri(uri: &str) -> Option<String> {
    if uri.starts_with("data:") || !(uri.contains('\\') || uri.contains('/')) {
        return None;
    }
    let normalized = uri.replace("\\\\", "\\").replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
    if file_name.is_empty() || file_name == uri {
        return None;
    }
    Some(file_name.to_string())
}

/// Whether a material name is already in its cleaned form.
pub fn is_clean_material_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with('_')
        && !name.ends_with('_')
        && !name.contains("__")
}
