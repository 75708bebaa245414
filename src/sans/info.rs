//! Type descriptors.

/// The shape of a type, selecting its wire sub-grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A sequence, encoded as an array.
    List,
    /// Key-value pairs, encoded as a map.
    Dictionary,
    /// A fieldless enumeration, encoded as its member's ordinal.
    Enum,
    /// A record, encoded as a map of field names to values.
    CustomType,
}

/// Static description of a type's shape.
///
/// Descriptors are built once per type, usually as a constant inside the
/// type's field-routing code, and never change.
///
/// ```
/// const INFO: &TypeInfo = &TypeInfo::record("Point", &["X", "Y"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    name: &'static str,
    kind: Kind,
    members: &'static [&'static str],
}

impl TypeInfo {
    /// Describe a sequence type.
    pub const fn list(name: &'static str) -> Self {
        Self {
            name,
            kind: Kind::List,
            members: &[],
        }
    }

    /// Describe a key-value collection type.
    pub const fn dictionary(name: &'static str) -> Self {
        Self {
            name,
            kind: Kind::Dictionary,
            members: &[],
        }
    }

    /// Describe an enumeration by its member names, in declaration order.
    pub const fn enumeration(name: &'static str, members: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: Kind::Enum,
            members,
        }
    }

    /// Describe a record by the wire names of its fields, in declaration
    /// order.
    pub const fn record(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: Kind::CustomType,
            members: fields,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Number of fields (records) or members (enums).
    pub const fn field_count(&self) -> usize {
        self.members.len()
    }

    /// Name of the field or member at an index.
    pub fn field_name(&self, index: usize) -> Option<&'static str> {
        self.members.get(index).copied()
    }

    /// Index of the field or member with a name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| *m == name)
    }

    /// Fail unless this descriptor has the expected kind.
    pub(crate) fn expect(&self, expected: Kind) -> Result<(), super::Error> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(super::Error::KindMismatch {
                ty: self.name,
                expected,
                found: self.kind,
            })
        }
    }
}
