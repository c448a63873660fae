//! Lookup-table ("meta data") domain types.
//!
//! The editable lookup tables form a closed set: every variant of
//! [`LookupKind`] maps onto a fixed table name, so no runtime-supplied
//! string ever reaches SQL.

use chrono::{DateTime, Utc};

use couplet_core::{AdminId, BanId, LookupId};

/// The closed set of editable lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Education,
    Height,
    Hobby,
    Religion,
    Race,
    Occupation,
    Personality,
}

impl LookupKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 7] = [
        Self::Education,
        Self::Height,
        Self::Hobby,
        Self::Religion,
        Self::Race,
        Self::Occupation,
        Self::Personality,
    ];

    /// Fixed table name. Never derived from user input.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Height => "height",
            Self::Hobby => "hobby",
            Self::Religion => "religion",
            Self::Race => "race",
            Self::Occupation => "occupation",
            Self::Personality => "personality",
        }
    }

    /// URL slug for the metadata page tabs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        self.table()
    }

    /// Human-readable tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Height => "Height",
            Self::Hobby => "Hobbies",
            Self::Religion => "Religions",
            Self::Race => "Races",
            Self::Occupation => "Occupations",
            Self::Personality => "Personality",
        }
    }
}

impl std::str::FromStr for LookupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("unknown lookup table: {s}"))
    }
}

/// A row in any of the lookup tables (they share one shape).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LookupEntry {
    /// Unique row ID.
    pub id: LookupId,
    /// Display value.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Sort position in member-facing dropdowns.
    pub display_order: Option<i32>,
    /// Whether the value is selectable by members.
    pub is_active: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// A blocked country.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BannedCountry {
    pub id: BanId,
    /// Two-letter country code.
    pub country_code: String,
    pub country_name: String,
    pub reason: Option<String>,
    pub is_active: bool,
    pub created_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
}

/// A blocked IP address.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BannedIp {
    pub id: BanId,
    pub ip_address: String,
    pub reason: Option<String>,
    pub is_active: bool,
    /// When the ban lapses (None = permanent).
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_parses_from_its_slug() {
        for kind in LookupKind::ALL {
            let parsed: LookupKind = kind.slug().parse().expect("slug roundtrip");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        assert!("member".parse::<LookupKind>().is_err());
        assert!("education; DROP TABLE member".parse::<LookupKind>().is_err());
    }

    #[test]
    fn test_table_names_are_distinct() {
        let mut names: Vec<_> = LookupKind::ALL.iter().map(|k| k.table()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LookupKind::ALL.len());
    }
}
