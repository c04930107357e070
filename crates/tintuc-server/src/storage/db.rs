//! SQLite database layer

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tintuc_core::ports::{ArticleStore, CategoryStore};
use tintuc_core::{Article, Category, NewArticle, Page, TinTucError};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database behind `database_url`
    /// and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        // Create parent directory if needed
        if let Some(parent) = database_file(database_url).as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                tracing::info!("Creating parent directory: {}", parent.display());
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", database_url))?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// Private in-memory database. A single connection that never expires,
    /// since every new SQLite memory connection would be a fresh database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self { pool })
    }

    /// Open a transaction for multi-statement writes
    pub async fn begin(&self) -> sqlx::Result<Transaction<'static, Sqlite>> {
        self.pool.begin().await
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Categories table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS danh_muc (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ten TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Articles table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bai_viet (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tieu_de TEXT NOT NULL,
                mo_ta TEXT,
                noi_dung TEXT NOT NULL,
                hinh_anh TEXT,
                ngay_dang DATETIME NOT NULL,
                luot_xem INTEGER NOT NULL DEFAULT 0 CHECK (luot_xem >= 0),
                la_tin_hot BOOLEAN NOT NULL DEFAULT 0,
                danh_muc_id INTEGER NOT NULL REFERENCES danh_muc (id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bai_viet_ngay_dang ON bai_viet (ngay_dang DESC, id DESC)
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bai_viet_danh_muc ON bai_viet (danh_muc_id, ngay_dang DESC)
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bai_viet_tieu_de ON bai_viet (tieu_de)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CategoryStore for Database {
    async fn create_category(&self, name: &str) -> tintuc_core::Result<Category> {
        let row: CategoryRow = sqlx::query_as(
            r#"
            INSERT INTO danh_muc (ten) VALUES (?1)
            RETURNING id, ten
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                TinTucError::Conflict(format!("category '{}' already exists", name))
            } else {
                map_db_error(e)
            }
        })?;

        Ok(row.into())
    }

    async fn list_categories(&self) -> tintuc_core::Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, ten FROM danh_muc ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn count_categories(&self) -> tintuc_core::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM danh_muc")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}

#[async_trait]
impl ArticleStore for Database {
    async fn list_featured(&self, page: Page) -> tintuc_core::Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, tieu_de, mo_ta, noi_dung, hinh_anh,
                   ngay_dang, luot_xem, la_tin_hot, danh_muc_id
            FROM bai_viet
            WHERE la_tin_hot = 1
            ORDER BY ngay_dang DESC, id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(i64::from(page.limit))
        .bind(i64::from(page.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_latest(&self, page: Page) -> tintuc_core::Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, tieu_de, mo_ta, noi_dung, hinh_anh,
                   ngay_dang, luot_xem, la_tin_hot, danh_muc_id
            FROM bai_viet
            ORDER BY ngay_dang DESC, id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(i64::from(page.limit))
        .bind(i64::from(page.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_by_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> tintuc_core::Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, tieu_de, mo_ta, noi_dung, hinh_anh,
                   ngay_dang, luot_xem, la_tin_hot, danh_muc_id
            FROM bai_viet
            WHERE danh_muc_id = ?1
            ORDER BY ngay_dang DESC, id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(category_id)
        .bind(i64::from(page.limit))
        .bind(i64::from(page.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_article(&self, id: i64) -> tintuc_core::Result<Option<Article>> {
        let row: Option<ArticleRow> = sqlx::query_as(
            r#"
            SELECT id, tieu_de, mo_ta, noi_dung, hinh_anh,
                   ngay_dang, luot_xem, la_tin_hot, danh_muc_id
            FROM bai_viet WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_article(&self, article: &NewArticle) -> tintuc_core::Result<Article> {
        let row: ArticleRow = sqlx::query_as(
            r#"
            INSERT INTO bai_viet (tieu_de, mo_ta, noi_dung, hinh_anh, ngay_dang, la_tin_hot, danh_muc_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, tieu_de, mo_ta, noi_dung, hinh_anh,
                      ngay_dang, luot_xem, la_tin_hot, danh_muc_id
            "#,
        )
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(&article.image_url)
        .bind(Utc::now())
        .bind(article.is_featured.unwrap_or(false))
        .bind(article.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                TinTucError::CategoryNotFound(article.category_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(row.into())
    }

    async fn record_view(&self, id: i64) -> tintuc_core::Result<Option<Article>> {
        // One statement: concurrent viewers cannot lose each other's increment
        let row: Option<ArticleRow> = sqlx::query_as(
            r#"
            UPDATE bai_viet SET luot_xem = luot_xem + 1
            WHERE id = ?1
            RETURNING id, tieu_de, mo_ta, noi_dung, hinh_anh,
                      ngay_dang, luot_xem, la_tin_hot, danh_muc_id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(|r| r.into()))
    }
}

/// File path inside a `sqlite:` URL, `None` for in-memory databases
fn database_file(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

pub(super) fn map_db_error(err: sqlx::Error) -> TinTucError {
    TinTucError::Database(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.code().as_deref() == Some("2067")
    )
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.is_foreign_key_violation() || db_err.code().as_deref() == Some("787")
    )
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    ten: String,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category { id: r.id, name: r.ten }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    tieu_de: String,
    mo_ta: Option<String>,
    noi_dung: String,
    hinh_anh: Option<String>,
    ngay_dang: DateTime<Utc>,
    luot_xem: i64,
    la_tin_hot: bool,
    danh_muc_id: i64,
}

impl From<ArticleRow> for Article {
    fn from(r: ArticleRow) -> Self {
        Article {
            id: r.id,
            title: r.tieu_de,
            description: r.mo_ta,
            body: r.noi_dung,
            image_url: r.hinh_anh,
            published_at: r.ngay_dang,
            view_count: r.luot_xem,
            is_featured: r.la_tin_hot,
            category_id: r.danh_muc_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn setup() -> (Database, Category) {
        let db = Database::in_memory().await.unwrap();
        let category = db.create_category("Kinh doanh").await.unwrap();
        (db, category)
    }

    async fn backdate(db: &Database, id: i64, published_at: DateTime<Utc>) {
        sqlx::query("UPDATE bai_viet SET ngay_dang = ?1 WHERE id = ?2")
            .bind(published_at)
            .bind(id)
            .execute(&db.pool)
            .await
            .unwrap();
    }

    #[test]
    fn test_database_file_from_url() {
        assert_eq!(
            database_file("sqlite://data/tintuc.db"),
            Some(PathBuf::from("data/tintuc.db"))
        );
        assert_eq!(
            database_file("sqlite:/var/lib/tintuc.db?mode=rwc"),
            Some(PathBuf::from("/var/lib/tintuc.db"))
        );
        assert_eq!(database_file("sqlite::memory:"), None);
        assert_eq!(database_file("postgres://localhost/newsdb"), None);
    }

    #[tokio::test]
    async fn test_create_article_assigns_defaults() {
        let (db, category) = setup().await;
        let before = Utc::now();

        let article = db
            .create_article(&NewArticle::new("X", "Y", category.id))
            .await
            .unwrap();

        assert_eq!(article.id, 1);
        assert_eq!(article.view_count, 0);
        assert!(!article.is_featured);
        assert!(article.published_at >= before);
        assert_eq!(article.category_id, category.id);

        let second = db
            .create_article(&NewArticle::new("X2", "Y2", category.id))
            .await
            .unwrap();
        assert!(second.id > article.id);
    }

    #[tokio::test]
    async fn test_create_article_unknown_category() {
        let (db, _) = setup().await;

        let err = db
            .create_article(&NewArticle::new("X", "Y", 999))
            .await
            .unwrap_err();

        assert!(matches!(err, TinTucError::CategoryNotFound(999)));
    }

    #[tokio::test]
    async fn test_duplicate_category_name_conflicts() {
        let (db, _) = setup().await;

        let err = db.create_category("Kinh doanh").await.unwrap_err();
        assert!(matches!(err, TinTucError::Conflict(_)));
        assert_eq!(db.count_categories().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_record_view_increments_once_per_call() {
        let (db, category) = setup().await;
        let created = db
            .create_article(&NewArticle::new("X", "Y", category.id))
            .await
            .unwrap();

        let first = db.record_view(created.id).await.unwrap().unwrap();
        let second = db.record_view(created.id).await.unwrap().unwrap();

        assert_eq!(first.view_count, 1);
        assert_eq!(second.view_count, 2);
        assert_eq!(second.title, created.title);
        assert_eq!(second.published_at, created.published_at);
        assert!(db.record_view(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_article_does_not_count_a_view() {
        let (db, category) = setup().await;
        let created = db
            .create_article(&NewArticle::new("X", "Y", category.id))
            .await
            .unwrap();

        let fetched = db.get_article(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(db.get_article(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_every_field_survives_a_view() {
        let (db, _) = setup().await;
        let sport = db.create_category("Thể thao").await.unwrap();

        let created = db
            .create_article(
                &NewArticle::new("Kết quả bóng đá", "Nội dung chi tiết", sport.id)
                    .with_description("Cập nhật kết quả các trận đấu")
                    .with_image_url("https://via.placeholder.com/600x400?text=The+Thao")
                    .featured(true),
            )
            .await
            .unwrap();
        assert_eq!(created.view_count, 0);

        let viewed = db.record_view(created.id).await.unwrap().unwrap();
        assert_eq!(
            viewed,
            Article {
                view_count: 1,
                ..created.clone()
            }
        );
        assert_eq!(db.get_article(created.id).await.unwrap(), Some(viewed));
    }

    #[tokio::test]
    async fn test_repeated_list_queries_are_identical() {
        let (db, category) = setup().await;
        for i in 0..30 {
            db.create_article(
                &NewArticle::new(format!("Tin {}", i), "Noi dung", category.id)
                    .with_description(format!("Mo ta {}", i))
                    .with_image_url(format!("https://img.example.vn/{}.jpg", i))
                    .featured(i % 3 == 0),
            )
            .await
            .unwrap();
        }

        let page = Page::new(5, 10);
        let first = db.list_latest(page).await.unwrap();
        let second = db.list_latest(page).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first, second);

        let all = db.list_latest(Page::new(0, 100)).await.unwrap();
        assert_eq!(all.len(), 30);
        assert!(all
            .windows(2)
            .all(|w| (w[0].published_at, w[0].id) > (w[1].published_at, w[1].id)));
        assert_eq!(first, all[5..15].to_vec());

        assert_eq!(
            db.list_featured(page).await.unwrap(),
            db.list_featured(page).await.unwrap()
        );
        assert_eq!(
            db.list_by_category(category.id, page).await.unwrap(),
            db.list_by_category(category.id, page).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_lists_are_newest_first_and_paginated() {
        let (db, category) = setup().await;
        let now = Utc::now();

        let mut ids = Vec::new();
        for (i, hours_ago) in [5, 1, 3, 2, 4].iter().enumerate() {
            let article = db
                .create_article(
                    &NewArticle::new(format!("Tin {}", i), "Noi dung", category.id)
                        .featured(i % 2 == 0),
                )
                .await
                .unwrap();
            backdate(&db, article.id, now - Duration::hours(*hours_ago)).await;
            ids.push(article.id);
        }

        let all = db.list_latest(Page::new(0, 100)).await.unwrap();
        let order: Vec<i64> = all.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[2], ids[4], ids[0]]);

        let window = db.list_latest(Page::new(1, 2)).await.unwrap();
        assert_eq!(window, all[1..3].to_vec());

        let featured = db.list_featured(Page::default()).await.unwrap();
        assert!(featured.iter().all(|a| a.is_featured));
        let featured_ids: Vec<i64> = featured.iter().map(|a| a.id).collect();
        assert_eq!(featured_ids, vec![ids[2], ids[4], ids[0]]);

        assert!(db.list_latest(Page::new(10, 10)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_category_filters() {
        let (db, business) = setup().await;
        let sport = db.create_category("Thể thao").await.unwrap();

        db.create_article(&NewArticle::new("A", "a", business.id))
            .await
            .unwrap();
        db.create_article(&NewArticle::new("B", "b", sport.id))
            .await
            .unwrap();

        let sport_articles = db.list_by_category(sport.id, Page::default()).await.unwrap();
        assert_eq!(sport_articles.len(), 1);
        assert_eq!(sport_articles[0].title, "B");

        assert!(db
            .list_by_category(42, Page::default())
            .await
            .unwrap()
            .is_empty());
    }
}
