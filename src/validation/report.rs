use serde::{Deserialize, Serialize};

/// Severity level for a change item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSeverity {
    Warning,
    Info,
}

/// Part of the document a change item concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Reference,
    Layout,
    Accessor,
    Material,
    Texture,
    Mesh,
    Node,
    Extension,
    Tooling,
}

/// Stable code for every kind of non-fatal finding or rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeCode {
    /// An index points outside its target array.
    ReferentialIntegrityWarning,
    /// A buffer view extends past the end of its buffer.
    ViewOutOfBuffer,
    /// A buffer view could not be copied into the sidecar.
    ViewSkipped,
    /// Buffer views were re-homed into the sidecar buffer.
    BuffersReallocated,
    /// The placement pass moved an accessor to another buffer view.
    AccessorReassigned,
    /// An accessor's count was reduced to fit its buffer view.
    AccessorOverflowWarning,
    /// An accessor's count was reduced all the way to zero.
    AccessorEmptied,
    ImagePathCleaned,
    ImageMissing,
    MaterialRenamed,
    MetallicClamped,
    MetallicRemoved,
    MaterialExtensionsRemoved,
    ExtensionsFiltered,
    NodeRenamed,
    TextureResized,
    TextureAlphaAdded,
    MissingTangent,
    MissingTexcoord,
    HighVertexCount,
    /// An optional step could not run and was skipped.
    OptionalToolUnavailable,
    ExternalValidationFailed,
}

/// A single change or finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeItem {
    pub code: ChangeCode,
    /// Human-readable description.
    pub message: String,
    pub severity: ChangeSeverity,
    pub category: ChangeCategory,
}

impl ChangeItem {
    pub fn warning(code: ChangeCode, category: ChangeCategory, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: ChangeSeverity::Warning,
            category,
        }
    }

    pub fn info(code: ChangeCode, category: ChangeCategory, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: ChangeSeverity::Info,
            category,
        }
    }
}

/// Ordered record of everything a pipeline stage changed or noticed.
///
/// Stages return their own log; the conversion context merges them in
/// pipeline order. Every entry is mirrored to `tracing` as it is added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeLog {
    pub items: Vec<ChangeItem>,
    pub warning_count: u32,
    pub info_count: u32,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item and update counts.
    pub fn add(&mut self, item: ChangeItem) {
        match item.severity {
            ChangeSeverity::Warning => {
                tracing::warn!(code = ?item.code, category = ?item.category, "{}", item.message);
                self.warning_count += 1;
            }
            ChangeSeverity::Info => {
                tracing::debug!(code = ?item.code, category = ?item.category, "{}", item.message);
                self.info_count += 1;
            }
        }
        self.items.push(item);
    }

    /// Merge another log into this one, keeping its order.
    pub fn merge(&mut self, other: ChangeLog) {
        self.items.extend(other.items);
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeItem> {
        self.items.iter()
    }

    /// Number of items carrying `code`.
    pub fn count(&self, code: ChangeCode) -> usize {
        self.items.iter().filter(|item| item.code == code).count()
    }

    pub fn contains(&self, code: ChangeCode) -> bool {
        self.items.iter().any(|item| item.code == code)
    }
}

impl Extend<ChangeItem> for ChangeLog {
    fn extend<I: IntoIterator<Item = ChangeItem>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }
}
