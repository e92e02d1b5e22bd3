//! Search-engine metadata for doctor pages.
//!
//! Builds the page title, description, canonical and Open Graph data, the
//! breadcrumb trail and the schema.org `Physician` JSON-LD document for a
//! single doctor. All links are absolute and derived from
//! [`SiteSettings::base_url`]; path segments are percent-encoded.

use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

use crate::config::SiteSettings;
use crate::domain::entities::DoctorRecord;

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Builds an absolute URL from the site base and raw path segments.
///
/// Each segment is percent-encoded, so locations containing spaces or
/// slashes stay a single segment.
pub fn page_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub images: Vec<OgImage>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locale: &'static str,
}

/// Head metadata of a doctor profile page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Link to the generated Open Graph image for a doctor.
pub fn og_image_url(doctor: &DoctorRecord, site: &SiteSettings) -> Url {
    let mut url = page_url(&site.base_url, &["api", "og"]);
    url.query_pairs_mut()
        .append_pair("name", &doctor.name)
        .append_pair("specialty", or_empty(&doctor.specialty))
        .append_pair("hospital", or_empty(&doctor.hospital));
    url
}

/// Builds the metadata of a doctor profile page.
pub fn page_metadata(doctor: &DoctorRecord, site: &SiteSettings) -> PageMetadata {
    let specialty = or_empty(&doctor.specialty);
    let hospital = or_empty(&doctor.hospital);

    let title = format!("{} - {} | {}", doctor.name, specialty, site.site_name);
    let description = format!(
        "Book an appointment with {}, a {} at {}. View qualifications, experience, location, and contact details.",
        doctor.name, specialty, hospital
    );

    let mut keywords = vec![doctor.name.clone()];
    keywords.extend(doctor.specialty.clone());
    keywords.push("doctor appointment".to_string());
    keywords.push("medical specialist".to_string());
    keywords.extend(doctor.location.clone());
    keywords.push("healthcare".to_string());

    let canonical_url = page_url(&site.base_url, &[&doctor.slug]).to_string();

    let open_graph = OpenGraph {
        title: title.clone(),
        description: description.clone(),
        url: canonical_url.clone(),
        site_name: site.site_name.clone(),
        images: vec![OgImage {
            url: og_image_url(doctor, site).to_string(),
            width: OG_IMAGE_WIDTH,
            height: OG_IMAGE_HEIGHT,
            alt: format!("Book an appointment with {}", doctor.name),
        }],
        kind: "profile",
        locale: "en_US",
    };

    PageMetadata {
        title,
        description,
        keywords,
        canonical_url,
        open_graph,
    }
}

/// Navigation trail: home, location, hospital, specialty, doctor.
///
/// Hospital and specialty crumbs link only when the record carries the
/// persisted slug for them.
pub fn breadcrumbs(doctor: &DoctorRecord, site: &SiteSettings) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb {
        label: "Home".to_string(),
        href: Some(page_url(&site.base_url, &[]).to_string()),
    }];

    if let Some(location) = doctor.location.as_deref() {
        trail.push(Breadcrumb {
            label: location.to_string(),
            href: Some(page_url(&site.base_url, &["hospitals", location]).to_string()),
        });

        if let Some(hospital) = doctor.hospital.as_deref() {
            trail.push(Breadcrumb {
                label: hospital.to_string(),
                href: doctor.hospital_slug.as_deref().map(|slug| {
                    page_url(&site.base_url, &["hospitals", location, slug]).to_string()
                }),
            });
        }

        if let Some(specialty) = doctor.specialty.as_deref() {
            trail.push(Breadcrumb {
                label: specialty.to_string(),
                href: doctor.specialty_slug.as_deref().map(|slug| {
                    page_url(&site.base_url, &["specialists", location, slug]).to_string()
                }),
            });
        }
    }

    trail.push(Breadcrumb {
        label: doctor.name.clone(),
        href: None,
    });
    trail
}

/// schema.org `Physician` document for a doctor page.
pub fn physician_schema(doctor: &DoctorRecord, site: &SiteSettings) -> Value {
    let image = doctor
        .photo_url
        .clone()
        .unwrap_or_else(|| page_url(&site.base_url, &["placeholder-image.png"]).to_string());
    let specialty = or_empty(&doctor.specialty);

    json!({
        "@context": "https://schema.org",
        "@type": "Physician",
        "name": doctor.name,
        "image": image,
        "description": doctor.about,
        "medicalSpecialty": doctor.specialty,
        "qualification": doctor.degree,
        "jobTitle": doctor.designation,
        "worksFor": {
            "@type": "Hospital",
            "name": doctor.hospital,
            "address": {
                "@type": "PostalAddress",
                "streetAddress": doctor.address,
                "addressLocality": doctor.location,
                "addressCountry": site.address_country,
            }
        },
        "availableService": {
            "@type": "MedicalProcedure",
            "name": format!("{} Consultation", specialty),
        },
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": doctor.appointment_number,
            "contactType": "appointment",
            "availableLanguage": ["en", "bn"],
        },
        "url": page_url(&site.base_url, &[&doctor.slug]).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> DoctorRecord {
        let mut doctor = DoctorRecord::new("dr-rahim-uddin", "Dr. Rahim Uddin")
            .with_specialty("Cardiology", "cardiology")
            .with_hospital("Square Hospital", "square-hospital")
            .with_location("Dhaka");
        doctor.appointment_number = Some("+880 1234".to_string());
        doctor
    }

    #[test]
    fn test_page_url_encodes_segments() {
        let base = Url::parse("https://topdoctorlist.com").unwrap();
        assert_eq!(
            page_url(&base, &["hospitals", "Cox's Bazar/North"]).as_str(),
            "https://topdoctorlist.com/hospitals/Cox's%20Bazar%2FNorth"
        );
        assert_eq!(page_url(&base, &[]).as_str(), "https://topdoctorlist.com/");
    }

    #[test]
    fn test_metadata_title_and_description() {
        let metadata = page_metadata(&doctor(), &SiteSettings::default());

        assert_eq!(
            metadata.title,
            "Dr. Rahim Uddin - Cardiology | TopDoctorList"
        );
        assert!(
            metadata
                .description
                .starts_with("Book an appointment with Dr. Rahim Uddin, a Cardiology at Square Hospital.")
        );
        assert_eq!(
            metadata.canonical_url,
            "https://topdoctorlist.com/dr-rahim-uddin"
        );
        assert!(metadata.keywords.contains(&"Dhaka".to_string()));
    }

    #[test]
    fn test_og_image_query() {
        let metadata = page_metadata(&doctor(), &SiteSettings::default());
        let image = &metadata.open_graph.images[0];

        assert_eq!(image.width, 1200);
        assert_eq!(image.height, 630);
        let url = Url::parse(&image.url).unwrap();
        assert_eq!(url.path(), "/api/og");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs[0].1, "Dr. Rahim Uddin");
        assert_eq!(pairs[2].1, "Square Hospital");
    }

    #[test]
    fn test_physician_schema() {
        let schema = physician_schema(&doctor(), &SiteSettings::default());

        assert_eq!(schema["@type"], "Physician");
        assert_eq!(schema["worksFor"]["address"]["addressCountry"], "BD");
        assert_eq!(schema["contactPoint"]["telephone"], "+880 1234");
        assert_eq!(schema["availableService"]["name"], "Cardiology Consultation");
        assert_eq!(
            schema["image"],
            "https://topdoctorlist.com/placeholder-image.png"
        );
    }

    #[test]
    fn test_breadcrumbs_link_persisted_slugs() {
        let mut record = doctor();
        record.hospital_slug = None;

        let trail = breadcrumbs(&record, &SiteSettings::default());
        let labels: Vec<_> = trail.iter().map(|b| b.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["Home", "Dhaka", "Square Hospital", "Cardiology", "Dr. Rahim Uddin"]
        );
        assert!(trail[2].href.is_none());
        assert_eq!(
            trail[3].href.as_deref(),
            Some("https://topdoctorlist.com/specialists/Dhaka/cardiology")
        );
        assert!(trail[4].href.is_none());
    }
}
