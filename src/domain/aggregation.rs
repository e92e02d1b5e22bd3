//! Grouped counts for navigation and sitemap generation.

use std::collections::HashMap;

use crate::domain::entities::{AggregatePair, DoctorField, DoctorRecord, GroupKey, SpecialtyCount};

/// Number of popular specialties shown per location.
pub const POPULAR_SPECIALTIES_LIMIT: usize = 10;

/// Number of related specialties shown on a specialty page.
pub const RELATED_SPECIALTIES_LIMIT: usize = 5;

/// Counts records per distinct (location, specialty-or-hospital) pair.
///
/// Records missing either grouping field are skipped. Each pair carries the
/// first persisted slug seen in its group. Pairs come back in first-seen order,
/// which callers must not rely on.
pub fn aggregate_pairs<'a>(
    records: impl IntoIterator<Item = &'a DoctorRecord>,
    key: GroupKey,
) -> Vec<AggregatePair> {
    let mut index: HashMap<(&'a str, &'a str), usize> = HashMap::new();
    let mut pairs: Vec<AggregatePair> = Vec::new();

    for record in records {
        let (Some(location), Some(value)) = (
            record.field(DoctorField::Location),
            record.field(key.value_field()),
        ) else {
            continue;
        };
        let slug = record.field(key.slug_field());

        match index.get(&(location, value)) {
            Some(&at) => {
                let pair = &mut pairs[at];
                pair.count += 1;
                if pair.slug.is_none() {
                    pair.slug = slug.map(str::to_string);
                }
            }
            None => {
                index.insert((location, value), pairs.len());
                pairs.push(AggregatePair::new(location, value, slug.map(str::to_string), 1));
            }
        }
    }

    pairs.retain(|pair| pair.count > 0);
    pairs
}

fn same_location(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn rank_by_count(specialties: &mut [SpecialtyCount]) {
    specialties.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
}

/// Most common specialties in a location, by doctor count.
pub fn popular_specialties(
    pairs: Vec<AggregatePair>,
    location: &str,
    limit: usize,
) -> Vec<SpecialtyCount> {
    let mut specialties: Vec<SpecialtyCount> = pairs
        .into_iter()
        .filter(|pair| same_location(&pair.location, location))
        .map(SpecialtyCount::from)
        .collect();

    rank_by_count(&mut specialties);
    specialties.truncate(limit);
    specialties
}

/// Other specialties in a location, for the "related" block of a specialty page.
///
/// Only specialties with a persisted slug are linkable, so others are skipped.
pub fn related_specialties(
    pairs: Vec<AggregatePair>,
    location: &str,
    current_slug: &str,
    limit: usize,
) -> Vec<SpecialtyCount> {
    let mut specialties: Vec<SpecialtyCount> = pairs
        .into_iter()
        .filter(|pair| same_location(&pair.location, location))
        .filter(|pair| pair.slug.as_deref().is_some_and(|slug| slug != current_slug))
        .map(SpecialtyCount::from)
        .collect();

    rank_by_count(&mut specialties);
    specialties.truncate(limit);
    specialties
}

/// Hospitals of one location, alphabetically, optionally leaving one out by slug.
pub fn hospitals_in_location(
    pairs: Vec<AggregatePair>,
    location: &str,
    exclude_slug: Option<&str>,
) -> Vec<AggregatePair> {
    let mut hospitals: Vec<AggregatePair> = pairs
        .into_iter()
        .filter(|pair| same_location(&pair.location, location))
        .filter(|pair| exclude_slug.is_none() || pair.slug.as_deref() != exclude_slug)
        .collect();

    hospitals.sort_by(|a, b| a.value.cmp(&b.value));
    hospitals
}
