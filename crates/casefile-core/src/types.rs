use std::collections::BTreeMap;

/// Field-addressable validation details, keyed by the offending request
/// field (`"__all__"` for record-level rules).
pub type FieldErrors = BTreeMap<String, String>;

/// Record-level detail key for rules that are not tied to a single field.
pub const ALL_FIELDS_KEY: &str = "__all__";

/// Reference catalog kinds without database dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Status,
    Language,
    Pronoun,
    Sex,
}

impl CatalogKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Language => "language",
            Self::Pronoun => "pronoun",
            Self::Sex => "sex",
        }
    }

    /// Request field carrying codes for this catalog.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Status => "status_code",
            Self::Language => "primary_language_code",
            Self::Pronoun => "pronoun_code",
            Self::Sex => "sex_code",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
