mod common;

use doctor_directory::domain::entities::{DoctorField, DoctorRecord, GroupKey};
use doctor_directory::domain::pagination::PageRequest;
use doctor_directory::domain::query::{FilterCriteria, SortKey, build_query};
use doctor_directory::domain::repositories::DoctorRepository;
use doctor_directory::infrastructure::persistence::PgDoctorRepository;
use sqlx::PgPool;
use std::sync::Arc;

async fn seeded_repo(pool: PgPool) -> PgDoctorRepository {
    common::insert_doctors(&pool, &common::sample_doctors()).await;
    PgDoctorRepository::new(Arc::new(pool))
}

fn slugs(records: &[DoctorRecord]) -> Vec<&str> {
    records.iter().map(|r| r.slug.as_str()).collect()
}

#[sqlx::test]
async fn test_find_orders_by_name(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let query = build_query(&FilterCriteria::default());
    let records = repo.find(&query, PageRequest::new(1, 3)).await.unwrap();

    assert_eq!(
        slugs(&records),
        vec!["dr-anwar-hossain", "dr-ayesha-siddiqua", "dr-farhana-akter"]
    );
}

#[sqlx::test]
async fn test_find_second_page(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let query = build_query(&FilterCriteria::default());
    let records = repo.find(&query, PageRequest::new(2, 4)).await.unwrap();

    assert_eq!(slugs(&records), vec!["dr-nusrat-jahan", "dr-rahim-uddin"]);
}

#[sqlx::test]
async fn test_find_and_count_with_filters(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let query = build_query(&FilterCriteria {
        location: Some("DHAKA".into()),
        specialty: Some("cardio".into()),
        ..FilterCriteria::default()
    });

    let records = repo.find(&query, PageRequest::new(1, 24)).await.unwrap();
    let total = repo.count(&query).await.unwrap();

    assert_eq!(slugs(&records), vec!["dr-karim-hasan", "dr-rahim-uddin"]);
    assert_eq!(total, 2);
}

#[sqlx::test]
async fn test_like_wildcards_are_literal(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let query = build_query(&FilterCriteria {
        name: Some("%".into()),
        ..FilterCriteria::default()
    });

    assert_eq!(repo.count(&query).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_rating_sort_puts_missing_last(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let query = build_query(&FilterCriteria {
        sort_key: Some(SortKey::Rating),
        ..FilterCriteria::default()
    });
    let records = repo.find_all(&query).await.unwrap();

    assert_eq!(
        slugs(&records),
        vec![
            "dr-nusrat-jahan",
            "dr-rahim-uddin",
            "dr-karim-hasan",
            "dr-farhana-akter",
            "dr-anwar-hossain",
            "dr-ayesha-siddiqua",
        ]
    );
}

#[sqlx::test]
async fn test_exclude_slug(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let query = build_query(&FilterCriteria {
        specialty_slug: Some("cardiology".into()),
        exclude: Some("dr-rahim-uddin".into()),
        ..FilterCriteria::default()
    });

    assert_eq!(repo.count(&query).await.unwrap(), 2);
}

#[sqlx::test]
async fn test_find_by_slug(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let found = repo.find_by_slug("dr-nusrat-jahan").await.unwrap().unwrap();
    assert_eq!(found.name, "Dr. Nusrat Jahan");
    assert_eq!(found.rating, Some(4.9));

    assert!(repo.find_by_slug("dr-nobody").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_distinct_values(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let locations = repo
        .distinct_values(DoctorField::Location, None)
        .await
        .unwrap();
    assert_eq!(locations, vec!["Chittagong", "Cox's Bazar", "Dhaka"]);

    let specialties = repo
        .distinct_values(DoctorField::Specialty, Some("dhaka".into()))
        .await
        .unwrap();
    assert_eq!(specialties, vec!["Cardiology", "ENT"]);
}

#[sqlx::test]
async fn test_aggregate_pairs(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    let pairs = repo
        .aggregate_pairs(GroupKey::LocationSpecialty)
        .await
        .unwrap();

    assert_eq!(pairs.len(), 4);
    let dhaka_cardiology = pairs
        .iter()
        .find(|p| p.location == "Dhaka" && p.value == "Cardiology")
        .unwrap();
    assert_eq!(dhaka_cardiology.count, 2);
    assert_eq!(dhaka_cardiology.slug.as_deref(), Some("cardiology"));
    assert!(pairs.iter().all(|p| p.count > 0));
    assert!(pairs.iter().all(|p| p.value != "Neurology"));
}

#[sqlx::test]
async fn test_find_specialty_name(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    assert_eq!(
        repo.find_specialty_name("ent").await.unwrap().as_deref(),
        Some("ENT")
    );
    assert!(repo.find_specialty_name("astrology").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_sitemap_entries_and_ping(pool: PgPool) {
    let repo = seeded_repo(pool).await;

    repo.ping().await.unwrap();

    let entries = repo.sitemap_entries().await.unwrap();
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|e| e.updated_at.is_none()));
}
