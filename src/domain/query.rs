//! Translation of browse filters into a structured listing query.
//!
//! [`build_query`] is a pure function: it turns the optional filters of a
//! request into a [`ListingQuery`] made of conjunctive [`Predicate`]s and a
//! sort order. The record store executes the query; [`ListingQuery::matches`]
//! and [`ListingQuery::compare`] define its semantics for in-process stores.

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::entities::{DoctorField, DoctorRecord};
use crate::domain::pagination::PageRequest;

/// User-selectable listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Experience,
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            "experience" => Ok(Self::Experience),
            _ => Err(()),
        }
    }
}

impl SortKey {
    /// Parses a raw `sortBy` value; unknown values are treated as absent.
    pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|v| v.parse().ok())
    }
}

/// Optional filters of a single browse request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub specialty_slug: Option<String>,
    pub location: Option<String>,
    pub hospital: Option<String>,
    /// Slug of a doctor to leave out of the result.
    pub exclude: Option<String>,
    pub sort_key: Option<SortKey>,
    pub page: PageRequest,
}

/// A single constraint on a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match.
    Contains { field: DoctorField, needle: String },
    /// Case-insensitive whole-value match.
    EqualsIgnoreCase { field: DoctorField, value: String },
    /// Exact match.
    Equals { field: DoctorField, value: String },
    /// Field is absent or differs from `value`.
    NotEquals { field: DoctorField, value: String },
}

impl Predicate {
    pub fn field(&self) -> DoctorField {
        match self {
            Self::Contains { field, .. }
            | Self::EqualsIgnoreCase { field, .. }
            | Self::Equals { field, .. }
            | Self::NotEquals { field, .. } => *field,
        }
    }

    /// Evaluates the predicate against a record.
    pub fn matches(&self, record: &DoctorRecord) -> bool {
        let actual = record.field(self.field());
        match self {
            Self::Contains { needle, .. } => {
                actual.is_some_and(|v| v.to_lowercase().contains(&needle.to_lowercase()))
            }
            Self::EqualsIgnoreCase { value, .. } => {
                actual.is_some_and(|v| v.to_lowercase() == value.to_lowercase())
            }
            Self::Equals { value, .. } => actual == Some(value.as_str()),
            Self::NotEquals { value, .. } => actual != Some(value.as_str()),
        }
    }
}

/// Fields a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Rating,
    Experience,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::Experience => "experience_years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    pub const NAME_ASC: Self = Self {
        field: SortField::Name,
        direction: Direction::Ascending,
    };
    pub const RATING_DESC: Self = Self {
        field: SortField::Rating,
        direction: Direction::Descending,
    };
    pub const EXPERIENCE_DESC: Self = Self {
        field: SortField::Experience,
        direction: Direction::Descending,
    };

    /// Compares two records on this field.
    ///
    /// Missing ratings and experience sort after present values in either direction.
    fn compare(self, a: &DoctorRecord, b: &DoctorRecord) -> Ordering {
        let ordering = match self.field {
            SortField::Name => Some(a.name.as_bytes().cmp(b.name.as_bytes())),
            SortField::Rating => compare_present(a.rating, b.rating, f64::total_cmp),
            SortField::Experience => {
                compare_present(a.experience_years, b.experience_years, |x, y| x.cmp(y))
            }
        };

        match (ordering, self.direction) {
            (Some(o), Direction::Ascending) => o,
            (Some(o), Direction::Descending) => o.reverse(),
            (None, _) => match self.field {
                SortField::Rating => nulls_last(a.rating.is_none(), b.rating.is_none()),
                SortField::Experience => {
                    nulls_last(a.experience_years.is_none(), b.experience_years.is_none())
                }
                SortField::Name => Ordering::Equal,
            },
        }
    }
}

fn compare_present<T: Copy>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Option<Ordering> {
    match (a, b) {
        (Some(x), Some(y)) => Some(cmp(&x, &y)),
        _ => None,
    }
}

fn nulls_last(a_missing: bool, b_missing: bool) -> Ordering {
    a_missing.cmp(&b_missing)
}

/// A structured, store-independent listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub predicates: Vec<Predicate>,
    pub order: Vec<SortOrder>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            order: vec![SortOrder::NAME_ASC],
        }
    }
}

impl ListingQuery {
    /// Doctors at one hospital, identified by its persisted slug, in one location.
    pub fn for_hospital(location: &str, hospital_slug: &str) -> Self {
        Self {
            predicates: vec![
                Predicate::EqualsIgnoreCase {
                    field: DoctorField::Location,
                    value: location.to_string(),
                },
                Predicate::Equals {
                    field: DoctorField::HospitalSlug,
                    value: hospital_slug.to_string(),
                },
            ],
            order: vec![SortOrder::NAME_ASC],
        }
    }

    /// Returns true if the record satisfies every predicate.
    pub fn matches(&self, record: &DoctorRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Orders two records by the query's sort fields, then by slug.
    ///
    /// The slug comparison only breaks ties so that pages are stable.
    pub fn compare(&self, a: &DoctorRecord, b: &DoctorRecord) -> Ordering {
        self.order
            .iter()
            .map(|order| order.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.slug.cmp(&b.slug))
    }

    /// Filters and orders records in memory.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a DoctorRecord>) -> Vec<DoctorRecord> {
        let mut matched: Vec<DoctorRecord> =
            records.into_iter().filter(|r| self.matches(r)).cloned().collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Translates browse filters into a [`ListingQuery`].
///
/// # Rules
///
/// - name, specialty, location and hospital become case-insensitive substring
///   predicates when present and non-empty; absent filters add nothing
/// - a specialty slug matches the persisted slug exactly and replaces the
///   substring specialty filter
/// - specialty slug together with location is the specialty-page mode: the
///   location must match as a whole (ignoring case) and, without an explicit
///   sort key, results are ordered by rating then experience, both descending
/// - otherwise exactly one sort field is used: `rating` and `experience`
///   descending, `name` (the default) ascending
pub fn build_query(criteria: &FilterCriteria) -> ListingQuery {
    let mut predicates = Vec::new();

    let specialty_slug = non_empty(&criteria.specialty_slug);
    let location = non_empty(&criteria.location);
    let specialty_page = specialty_slug.is_some() && location.is_some();

    if let Some(name) = non_empty(&criteria.name) {
        predicates.push(Predicate::Contains {
            field: DoctorField::Name,
            needle: name.to_string(),
        });
    }

    if let Some(slug) = specialty_slug {
        predicates.push(Predicate::Equals {
            field: DoctorField::SpecialtySlug,
            value: slug.to_string(),
        });
    } else if let Some(specialty) = non_empty(&criteria.specialty) {
        predicates.push(Predicate::Contains {
            field: DoctorField::Specialty,
            needle: specialty.to_string(),
        });
    }

    if let Some(location) = location {
        predicates.push(if specialty_page {
            Predicate::EqualsIgnoreCase {
                field: DoctorField::Location,
                value: location.to_string(),
            }
        } else {
            Predicate::Contains {
                field: DoctorField::Location,
                needle: location.to_string(),
            }
        });
    }

    if let Some(hospital) = non_empty(&criteria.hospital) {
        predicates.push(Predicate::Contains {
            field: DoctorField::Hospital,
            needle: hospital.to_string(),
        });
    }

    if let Some(exclude) = non_empty(&criteria.exclude) {
        predicates.push(Predicate::NotEquals {
            field: DoctorField::Slug,
            value: exclude.to_string(),
        });
    }

    let order = match (criteria.sort_key, specialty_page) {
        (None, true) => vec![SortOrder::RATING_DESC, SortOrder::EXPERIENCE_DESC],
        (Some(SortKey::Rating), _) => vec![SortOrder::RATING_DESC],
        (Some(SortKey::Experience), _) => vec![SortOrder::EXPERIENCE_DESC],
        (Some(SortKey::Name) | None, _) => vec![SortOrder::NAME_ASC],
    };

    ListingQuery { predicates, order }
}
