//! Data model for parsed documentation comments.
//!
//! Member identifiers follow the `Kind:Fully.Qualified.Name[(params)]` convention
//! used by compiler-generated XML documentation exports.

/// The kind of a documented member, taken from its identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// `T:` — class, struct, interface, enum, delegate
    Type,
    /// `M:` — method or constructor
    Method,
    /// `P:` — property or indexer
    Property,
    /// `F:` — field or enum value
    Field,
    /// `E:` — event
    Event,
}

impl MemberKind {
    /// Classify an identifier by its one-letter prefix. Unknown prefixes yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        let (prefix, _) = id.split_once(':')?;
        match prefix {
            "T" => Some(Self::Type),
            "M" => Some(Self::Method),
            "P" => Some(Self::Property),
            "F" => Some(Self::Field),
            "E" => Some(Self::Event),
            _ => None,
        }
    }

    pub fn prefix(self) -> char {
        match self {
            Self::Type => 'T',
            Self::Method => 'M',
            Self::Property => 'P',
            Self::Field => 'F',
            Self::Event => 'E',
        }
    }
}

/// Strip the `Kind:` prefix from an identifier.
///
/// `"T:NS.Widget"` → `"NS.Widget"`
pub fn full_name(id: &str) -> &str {
    id.split_once(':').map_or(id, |(_, rest)| rest)
}

/// Drop a trailing parenthesized parameter signature, if any.
///
/// `"NS.Widget.Run(System.String)"` → `"NS.Widget.Run"`
pub fn strip_signature(name: &str) -> &str {
    name.split_once('(').map_or(name, |(head, _)| head)
}

/// Display name of a member: the last dotted segment once the signature is gone.
///
/// `"M:NS.Widget.Run(System.String)"` → `"Run"`, `"NS.List`1"` → `"List`1"`
pub fn simple_name(id: &str) -> &str {
    let name = strip_signature(full_name(id));
    name.rsplit('.').next().unwrap_or(name)
}

/// Normalized documentation for one member.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemberDoc {
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub returns: Option<String>,
    /// `<param name>` → description, in source order
    pub params: Vec<(String, String)>,
    /// `<typeparam name>` → description, in source order
    pub type_params: Vec<(String, String)>,
    /// `<exception cref>` → description, in source order
    pub exceptions: Vec<(String, String)>,
    pub examples: Vec<String>,
}

/// Member identifiers owned by a single type, partitioned by kind.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TypeMembers {
    pub methods: Vec<String>,
    pub properties: Vec<String>,
    pub fields: Vec<String>,
    pub events: Vec<String>,
}

impl TypeMembers {
    /// The bucket a member of `kind` belongs in; types have none.
    pub fn bucket_mut(&mut self, kind: MemberKind) -> Option<&mut Vec<String>> {
        match kind {
            MemberKind::Type => None,
            MemberKind::Method => Some(&mut self.methods),
            MemberKind::Property => Some(&mut self.properties),
            MemberKind::Field => Some(&mut self.fields),
            MemberKind::Event => Some(&mut self.events),
        }
    }
}

/// Insert into an ordered name → description list.
///
/// A repeated name replaces the earlier description but keeps its original position.
pub fn insert_ordered(entries: &mut Vec<(String, String)>, key: String, value: String) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}
