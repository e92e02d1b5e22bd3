//! PostgreSQL implementation of the doctor repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{AggregatePair, DoctorField, DoctorRecord, GroupKey};
use crate::domain::pagination::PageRequest;
use crate::domain::query::{Direction, ListingQuery, Predicate, SortField, SortOrder};
use crate::domain::repositories::{DoctorRepository, DoctorSitemapEntry};
use crate::error::AppError;

const DOCTOR_COLUMNS: &str = "slug, name, photo_url, degree, specialty, specialty_slug, \
     designation, workplace, about, hospital, hospital_slug, address, location, \
     visiting_hours, appointment_number, rating, experience_years, updated_at";

/// PostgreSQL repository over the `doctors` table.
///
/// Listing queries are translated with [`QueryBuilder`]; every user-supplied
/// value is bound, only column names from [`DoctorField::column`] are spliced
/// into the SQL text.
pub struct PgDoctorRepository {
    pool: Arc<PgPool>,
}

impl PgDoctorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
        for (i, predicate) in predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            let column = predicate.field().column();

            match predicate {
                Predicate::Contains { needle, .. } => {
                    builder.push(column);
                    builder.push(" ILIKE ");
                    builder.push_bind(format!("%{}%", escape_like(needle)));
                }
                Predicate::EqualsIgnoreCase { value, .. } => {
                    builder.push(format!("LOWER({}) = LOWER(", column));
                    builder.push_bind(value.clone());
                    builder.push(")");
                }
                Predicate::Equals { value, .. } => {
                    builder.push(column);
                    builder.push(" = ");
                    builder.push_bind(value.clone());
                }
                Predicate::NotEquals { value, .. } => {
                    builder.push(column);
                    builder.push(" IS DISTINCT FROM ");
                    builder.push_bind(value.clone());
                }
            }
        }
    }

    fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, order: &[SortOrder]) {
        builder.push(" ORDER BY ");
        for sort in order {
            builder.push(sort.field.column());
            if sort.field == SortField::Name {
                builder.push(r#" COLLATE "C""#);
            }
            builder.push(match sort.direction {
                Direction::Ascending => " ASC NULLS LAST, ",
                Direction::Descending => " DESC NULLS LAST, ",
            });
        }
        builder.push(r#"slug COLLATE "C" ASC"#);
    }

    fn select(query: &ListingQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM doctors", DOCTOR_COLUMNS));
        Self::push_conditions(&mut builder, &query.predicates);
        Self::push_ordering(&mut builder, &query.order);
        builder
    }
}

/// Escapes `%`, `_` and the escape character itself for use in a LIKE pattern.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[async_trait]
impl DoctorRepository for PgDoctorRepository {
    async fn find(
        &self,
        query: &ListingQuery,
        page: PageRequest,
    ) -> Result<Vec<DoctorRecord>, AppError> {
        let mut builder = Self::select(query);
        builder.push(" LIMIT ");
        builder.push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX));
        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let doctors = builder
            .build_query_as::<DoctorRecord>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(doctors)
    }

    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<DoctorRecord>, AppError> {
        let doctors = Self::select(query)
            .build_query_as::<DoctorRecord>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(doctors)
    }

    async fn count(&self, query: &ListingQuery) -> Result<u64, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM doctors");
        Self::push_conditions(&mut builder, &query.predicates);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(to_count(count))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DoctorRecord>, AppError> {
        let doctor = sqlx::query_as::<_, DoctorRecord>(&format!(
            "SELECT {} FROM doctors WHERE slug = $1",
            DOCTOR_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(doctor)
    }

    async fn distinct_values(
        &self,
        field: DoctorField,
        location: Option<String>,
    ) -> Result<Vec<String>, AppError> {
        let column = field.column();
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            r#"SELECT DISTINCT {column} COLLATE "C" AS value FROM doctors WHERE {column} IS NOT NULL"#
        ));

        if let Some(location) = location {
            builder.push(" AND LOWER(location) = LOWER(");
            builder.push_bind(location);
            builder.push(")");
        }
        builder.push(" ORDER BY value");

        let values = builder
            .build_query_scalar::<String>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(values)
    }

    async fn aggregate_pairs(&self, key: GroupKey) -> Result<Vec<AggregatePair>, AppError> {
        let value = key.value_field().column();
        let slug = key.slug_field().column();

        let rows: Vec<(String, String, Option<String>, i64)> = sqlx::query_as(&format!(
            r#"
            SELECT location,
                   {value},
                   (ARRAY_AGG({slug} ORDER BY id) FILTER (WHERE {slug} IS NOT NULL))[1],
                   COUNT(*)
            FROM doctors
            WHERE location IS NOT NULL AND {value} IS NOT NULL
            GROUP BY location, {value}
            HAVING COUNT(*) > 0
            ORDER BY MIN(id)
            "#
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(location, value, slug, count)| {
                AggregatePair::new(location, value, slug, to_count(count))
            })
            .collect())
    }

    async fn find_specialty_name(&self, specialty_slug: &str) -> Result<Option<String>, AppError> {
        let name = sqlx::query_scalar::<_, String>(
            r#"
            SELECT specialty
            FROM doctors
            WHERE specialty_slug = $1 AND specialty IS NOT NULL
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(specialty_slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(name)
    }

    async fn sitemap_entries(&self) -> Result<Vec<DoctorSitemapEntry>, AppError> {
        let rows: Vec<(String, Option<chrono::DateTime<chrono::Utc>>)> =
            sqlx::query_as(r#"SELECT slug, updated_at FROM doctors ORDER BY slug COLLATE "C""#)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows
            .into_iter()
            .map(|(slug, updated_at)| DoctorSitemapEntry { slug, updated_at })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
