mod common;

use axum_test::TestServer;
use chrono::TimeZone;
use doctor_directory::domain::entities::DoctorRecord;

fn server(records: Vec<DoctorRecord>) -> TestServer {
    let state = common::create_test_state(records);
    TestServer::new(common::create_test_app(state)).unwrap()
}

#[tokio::test]
async fn test_sitemap_content_type() {
    let server = server(common::sample_doctors());

    let response = server.get("/sitemap.xml").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type"),
        "application/xml; charset=utf-8"
    );
    assert!(response.text().starts_with("<?xml"));
}

#[tokio::test]
async fn test_sitemap_lists_every_page_kind() {
    let server = server(common::sample_doctors());

    let xml = server.get("/sitemap.xml").await.text();

    assert!(xml.contains("<loc>https://topdoctorlist.com/</loc>"));
    assert!(xml.contains("<loc>https://topdoctorlist.com/privacy-policy</loc>"));
    assert!(xml.contains("<loc>https://topdoctorlist.com/dr-rahim-uddin</loc>"));
    assert!(xml.contains("<loc>https://topdoctorlist.com/specialists/Dhaka/cardiology</loc>"));
    assert!(xml.contains("<loc>https://topdoctorlist.com/hospitals/Dhaka</loc>"));
    assert!(xml.contains("<loc>https://topdoctorlist.com/hospitals/Dhaka/square-hospital</loc>"));
}

#[tokio::test]
async fn test_sitemap_has_no_duplicates() {
    let server = server(common::sample_doctors());

    let xml = server.get("/sitemap.xml").await.text();

    assert_eq!(
        xml.matches("<loc>https://topdoctorlist.com/hospitals/Dhaka</loc>")
            .count(),
        1
    );
    // 5 static pages, 6 doctors, 4 specialty pages, 3 locations, 4 hospitals
    assert_eq!(xml.matches("<url>").count(), 22);
}

#[tokio::test]
async fn test_sitemap_escapes_and_encodes_locations() {
    let server = server(common::sample_doctors());

    let xml = server.get("/sitemap.xml").await.text();

    assert!(xml.contains("s%20Bazar/sea-view-hospital</loc>"));
    assert!(!xml.contains("Cox's"));
}

#[tokio::test]
async fn test_sitemap_uses_record_modification_time() {
    let mut doctor = DoctorRecord::new("dr-dated", "Dr. Dated");
    doctor.updated_at = Some(chrono::Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
    let server = server(vec![doctor]);

    let xml = server.get("/sitemap.xml").await.text();

    assert!(xml.contains(
        "<loc>https://topdoctorlist.com/dr-dated</loc>\n    <lastmod>2024-05-06T07:08:09Z</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>0.8</priority>"
    ));
}
