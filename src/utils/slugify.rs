//! URL slug generation for doctor, hospital, and specialty names.
//!
//! Every slug in the service is produced here so that the same text always
//! maps to the same path segment, whether it is derived for a sitemap entry,
//! a hospital link, or an admin audit.

use regex::Regex;
use std::sync::LazyLock;

/// Default upper bound for slug length.
pub const DEFAULT_MAX_LENGTH: usize = 120;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("separator pattern is valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_-]+").expect("non-word pattern is valid"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen pattern is valid"));

/// Converts free text into a URL-safe slug of at most [`DEFAULT_MAX_LENGTH`] characters.
///
/// See [`slugify_bounded`] for the normalization rules.
pub fn slugify(text: &str) -> String {
    slugify_bounded(text, DEFAULT_MAX_LENGTH)
}

/// Converts free text into a URL-safe slug of at most `max_length` characters.
///
/// # Normalization Rules
///
/// 1. **Case**: Lower-cased, surrounding whitespace trimmed
/// 2. **Separators**: Runs of whitespace, `_` and `-` become a single `-`
/// 3. **Symbols**: Anything outside `[a-z0-9-]` is removed
/// 4. **Hyphens**: Repeats collapsed, leading/trailing hyphens trimmed
/// 5. **Length**: Cut back to the last word boundary that fits `max_length`
///
/// A single word longer than `max_length` has no boundary to fall back to and
/// is cut at `max_length` so the result stays non-empty.
///
/// The output only contains `[a-z0-9-]`, never starts or ends with a hyphen,
/// and `slugify_bounded(slugify_bounded(x, n), n) == slugify_bounded(x, n)`.
///
/// # Examples
///
/// ```
/// use doctor_directory::utils::slugify::{slugify, slugify_bounded};
///
/// assert_eq!(slugify("Dr. John A. Smith, MD"), "dr-john-a-smith-md");
/// assert_eq!(slugify_bounded("Square Hospital Ltd", 10), "square");
/// assert_eq!(slugify("   "), "");
/// ```
pub fn slugify_bounded(text: &str, max_length: usize) -> String {
    let lowered = text.to_lowercase();
    let separated = SEPARATOR_RUN.replace_all(lowered.trim(), "-");
    let stripped = NON_WORD.replace_all(&separated, "");
    let collapsed = HYPHEN_RUN.replace_all(&stripped, "-");
    let slug = collapsed.trim_matches('-');

    truncate_at_boundary(slug, max_length).to_string()
}

/// Shortens an already-normalized slug without splitting a word.
fn truncate_at_boundary(slug: &str, max_length: usize) -> &str {
    if slug.len() <= max_length {
        return slug;
    }

    // Normalized slugs are ASCII, so every byte offset is a char boundary.
    if slug.as_bytes()[max_length] == b'-' {
        return slug[..max_length].trim_end_matches('-');
    }

    let head = &slug[..max_length];
    match head.rfind('-') {
        Some(boundary) => head[..boundary].trim_end_matches('-'),
        None => head,
    }
}

/// Returns true if `candidate` is already in canonical slug form.
pub fn is_canonical(candidate: &str) -> bool {
    !candidate.is_empty() && slugify_bounded(candidate, candidate.len()) == candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_slug_shaped(slug: &str) -> bool {
        static SHAPE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());
        slug.is_empty() || SHAPE.is_match(slug)
    }

    const SAMPLES: &[&str] = &[
        "Dr. John A. Smith, MD",
        "  Prof. Dr. Md. Abdur Rahman  ",
        "Square Hospitals Ltd.",
        "Ear, Nose & Throat (ENT)",
        "Child_Health -- Pediatrics",
        "---leading and trailing---",
        "Gynecology & Obstetrics / Infertility",
        "ডাক্তার Rahim",
        "MBBS, FCPS (Medicine), MD (Cardiology)",
        "tab\tand\nnewline",
        "",
        "!!!",
    ];

    #[test]
    fn test_doctor_name_with_punctuation() {
        assert_eq!(slugify("Dr. John A. Smith, MD"), "dr-john-a-smith-md");
    }

    #[test]
    fn test_specialty_with_ampersand() {
        assert_eq!(slugify("Ear, Nose & Throat (ENT)"), "ear-nose-throat-ent");
    }

    #[test]
    fn test_underscores_and_hyphen_runs_collapse() {
        assert_eq!(slugify("Child_Health -- Pediatrics"), "child-health-pediatrics");
    }

    #[test]
    fn test_leading_and_trailing_hyphens_trimmed() {
        assert_eq!(slugify("---leading and trailing---"), "leading-and-trailing");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(slugify("ডাক্তার Rahim"), "rahim");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_whitespace_kinds() {
        assert_eq!(slugify("tab\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn test_output_shape() {
        for sample in SAMPLES {
            let slug = slugify(sample);
            assert!(is_slug_shaped(&slug), "{sample:?} produced {slug:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_idempotent_when_bounded() {
        for sample in SAMPLES {
            let once = slugify_bounded(sample, 10);
            assert_eq!(slugify_bounded(&once, 10), once);
        }
    }

    #[test]
    fn test_truncation_respects_word_boundary() {
        let full = slugify("Bangabandhu Sheikh Mujib Medical University Hospital");
        let first_word = full.find('-').unwrap();
        for max in first_word..full.len() {
            let bounded = slugify_bounded(&full, max);
            assert!(bounded.len() <= max);
            assert!(is_slug_shaped(&bounded));
            assert!(full.starts_with(&bounded));
            if !bounded.is_empty() {
                let next = full.as_bytes().get(bounded.len()).copied();
                assert!(
                    next.is_none() || next == Some(b'-'),
                    "{bounded:?} cuts a word of {full:?}"
                );
            }
        }
    }

    #[test]
    fn test_truncation_to_ten() {
        assert_eq!(slugify_bounded("Dr. John A. Smith, MD", 10), "dr-john-a");
        assert_eq!(slugify_bounded("Square Hospital Ltd", 10), "square");
    }

    #[test]
    fn test_truncation_exactly_on_boundary_keeps_word() {
        // "dr-john" is 7 characters and followed by a hyphen.
        assert_eq!(slugify_bounded("Dr John Smith", 7), "dr-john");
    }

    #[test]
    fn test_single_long_word_is_cut() {
        assert_eq!(slugify_bounded("Otorhinolaryngology", 5), "otorh");
    }

    #[test]
    fn test_zero_length_bound() {
        assert_eq!(slugify_bounded("Cardiology", 0), "");
    }

    #[test]
    fn test_default_bound() {
        let long = "word ".repeat(60);
        let slug = slugify(&long);
        assert!(slug.len() <= DEFAULT_MAX_LENGTH);
        assert!(slug.ends_with("word"));
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("cardiology"));
        assert!(is_canonical("ear-nose-throat"));
        assert!(!is_canonical("Cardiology"));
        assert!(!is_canonical("ear nose"));
        assert!(!is_canonical("-ent"));
        assert!(!is_canonical(""));
    }
}
