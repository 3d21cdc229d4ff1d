/// The source-side reference entities the mapper resolves by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Tracker,
    Status,
    Priority,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ReferenceKind::Tracker => "tracker",
            ReferenceKind::Status => "status",
            ReferenceKind::Priority => "priority",
        }
    }

    /// Stand-in record for an entity that could not be fetched; keeps the
    /// mapping pipeline total.
    pub fn placeholder_name(&self, id: u64) -> String {
        format!("{} #{}", self.as_str(), id)
    }
}
