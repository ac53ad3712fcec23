/// Accessor component types, with their glTF numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ComponentType {
    Byte = 5120,
    UnsignedByte = 5121,
    Short = 5122,
    UnsignedShort = 5123,
    UnsignedInt = 5125,
    Float = 5126,
}

impl ComponentType {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            5120 => Some(Self::Byte),
            5121 => Some(Self::UnsignedByte),
            5122 => Some(Self::Short),
            5123 => Some(Self::UnsignedShort),
            5125 => Some(Self::UnsignedInt),
            5126 => Some(Self::Float),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Size of one component in bytes.
    pub fn size(self) -> u64 {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::UnsignedInt | Self::Float => 4,
        }
    }
}

/// Number of components per element for an accessor `type`.
///
/// Returns `None` for strings outside SCALAR/VECn/MATn.
pub fn known_component_count(accessor_type: &str) -> Option<u64> {
    match accessor_type {
        "SCALAR" => Some(1),
        "VEC2" => Some(2),
        "VEC3" => Some(3),
        "VEC4" => Some(4),
        "MAT2" => Some(4),
        "MAT3" => Some(9),
        "MAT4" => Some(16),
        _ => None,
    }
}

/// Component count with the unknown-type fallback of 1.
pub fn component_count(accessor_type: &str) -> u64 {
    known_component_count(accessor_type).unwrap_or(1)
}

/// Component byte size with the unknown-code fallback of 4.
pub fn component_size(component_type: u32) -> u64 {
    ComponentType::from_code(component_type).map_or(4, ComponentType::size)
}

/// Bytes occupied by one element (tightly packed).
pub fn bytes_per_element(accessor_type: &str, component_type: u32) -> u64 {
    component_count(accessor_type) * component_size(component_type)
}
