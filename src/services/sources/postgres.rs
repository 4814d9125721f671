//! PostgreSQL movie source
//!
//! Reads the application's relational schema:
//! - `movie` with the OMDb metadata columns (`imdb_rating`, `rated`,
//!   `runtime_minutes`, `meta_score`, `box_office`)
//! - `genre` and the `movie_genre` association table
//! - `rating` (one row per user and movie)
//! - `seen_list`, returned in insertion order (`id` ascending)
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{CatalogItem, RatingSignal, SeenSignal, UserId},
    services::sources::MovieSource,
};

const CATALOG_SELECT: &str = r#"
    SELECT
        m.id,
        m.title,
        m.description,
        m.imdb_rating::text AS imdb_rating,
        m.runtime_minutes::int4 AS runtime_minutes,
        m.meta_score::int4 AS meta_score,
        m.box_office::int8 AS box_office,
        m.rated::text AS rated,
        COALESCE(
            array_agg(g.name::text ORDER BY g.name) FILTER (WHERE g.name IS NOT NULL),
            '{}'
        ) AS genres
    FROM movie m
    LEFT JOIN movie_genre mg ON mg.movie_id = m.id
    LEFT JOIN genre g ON g.id = mg.genre_id
    GROUP BY m.id
"#;

#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: i32,
    title: String,
    description: Option<String>,
    imdb_rating: Option<String>,
    runtime_minutes: Option<i32>,
    meta_score: Option<i32>,
    box_office: Option<i64>,
    rated: Option<String>,
    genres: Vec<String>,
}

impl From<MovieRow> for CatalogItem {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            genres: row.genres,
            imdb_rating: row.imdb_rating,
            runtime_minutes: row.runtime_minutes,
            meta_score: row.meta_score,
            box_office: row.box_office,
            rated: row.rated,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SeenRow {
    user_id: i32,
    movie_id: i32,
    date_added: NaiveDateTime,
}

impl From<SeenRow> for SeenSignal {
    fn from(row: SeenRow) -> Self {
        Self {
            user_id: row.user_id,
            movie_id: row.movie_id,
            added_at: row.date_added.and_utc(),
        }
    }
}

#[derive(Clone)]
pub struct PgMovieSource {
    pool: PgPool,
}

impl PgMovieSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MovieSource for PgMovieSource {
    async fn list_catalog_items(&self) -> AppResult<Vec<CatalogItem>> {
        let query = format!("{} ORDER BY m.id", CATALOG_SELECT);
        let rows: Vec<MovieRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        tracing::debug!(items = rows.len(), "Loaded catalog snapshot");

        Ok(rows.into_iter().map(CatalogItem::from).collect())
    }

    async fn list_user_ratings(
        &self,
        user_id: UserId,
        min_score: Option<i32>,
    ) -> AppResult<Vec<RatingSignal>> {
        let rows: Vec<(i32, i32, i32)> = sqlx::query_as(
            r#"
            SELECT user_id, movie_id, score
            FROM rating
            WHERE user_id = $1 AND ($2::int4 IS NULL OR score >= $2)
            ORDER BY movie_id
            "#,
        )
        .bind(user_id)
        .bind(min_score)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, movie_id, score)| RatingSignal::new(user_id, movie_id, score))
            .collect())
    }

    async fn list_user_seen(
        &self,
        user_id: UserId,
        limit: Option<usize>,
    ) -> AppResult<Vec<SeenSignal>> {
        // LIMIT NULL is no limit in PostgreSQL
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));

        let rows: Vec<SeenRow> = sqlx::query_as(
            r#"
            SELECT user_id, movie_id, date_added
            FROM seen_list
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SeenSignal::from).collect())
    }

    async fn sample_catalog_items(&self, count: usize) -> AppResult<Vec<CatalogItem>> {
        let query = format!("{} ORDER BY random() LIMIT $1", CATALOG_SELECT);
        let rows: Vec<MovieRow> = sqlx::query_as(&query)
            .bind(i64::try_from(count).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CatalogItem::from).collect())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
