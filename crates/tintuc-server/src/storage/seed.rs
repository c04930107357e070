//! Demo categories and articles for a fresh database

use super::db::{map_db_error, Database};
use chrono::Utc;
use tintuc_core::Result;
use tracing::info;

const CATEGORIES: [&str; 4] = ["Thời sự", "Thể thao", "Giải trí", "Kinh doanh"];

struct SeedArticle {
    title: &'static str,
    description: &'static str,
    body: &'static str,
    image: &'static str,
    featured: bool,
    /// Index into `CATEGORIES`
    category: usize,
}

const ARTICLES: [SeedArticle; 5] = [
    SeedArticle {
        title: "Tin tức thời sự mới nhất",
        description: "Cập nhật tin tức thời sự mới nhất trong ngày",
        body: "Đây là nội dung chi tiết về tin tức thời sự mới nhất. Nội dung này sẽ được hiển thị khi người dùng xem chi tiết bài viết.",
        image: "https://via.placeholder.com/600x400?text=Thoi+Su",
        featured: true,
        category: 0,
    },
    SeedArticle {
        title: "Kết quả bóng đá mới nhất",
        description: "Cập nhật kết quả các trận đấu bóng đá",
        body: "Đây là nội dung chi tiết về kết quả các trận đấu bóng đá. Nội dung này sẽ được hiển thị khi người dùng xem chi tiết bài viết.",
        image: "https://via.placeholder.com/600x400?text=The+Thao",
        featured: true,
        category: 1,
    },
    SeedArticle {
        title: "Tin tức giải trí hôm nay",
        description: "Cập nhật tin tức về các nghệ sĩ nổi tiếng",
        body: "Đây là nội dung chi tiết về tin tức giải trí và các nghệ sĩ nổi tiếng. Nội dung này sẽ được hiển thị khi người dùng xem chi tiết bài viết.",
        image: "https://via.placeholder.com/600x400?text=Giai+Tri",
        featured: false,
        category: 2,
    },
    SeedArticle {
        title: "Tin tức kinh doanh mới nhất",
        description: "Cập nhật tin tức về thị trường tài chính",
        body: "Đây là nội dung chi tiết về tin tức kinh doanh và thị trường tài chính. Nội dung này sẽ được hiển thị khi người dùng xem chi tiết bài viết.",
        image: "https://via.placeholder.com/600x400?text=Kinh+Doanh",
        featured: false,
        category: 3,
    },
    SeedArticle {
        title: "Tin nóng: Sự kiện quan trọng",
        description: "Thông tin mới nhất về sự kiện đang diễn ra",
        body: "Đây là nội dung chi tiết về sự kiện quan trọng đang diễn ra. Nội dung này sẽ được hiển thị khi người dùng xem chi tiết bài viết.",
        image: "https://via.placeholder.com/600x400?text=Su+Kien",
        featured: true,
        category: 0,
    },
];

/// Insert the demo data unless categories already exist.
/// Runs in one transaction, so a failed seed leaves the database empty.
/// Returns whether anything was written.
pub async fn seed_if_empty(db: &Database) -> Result<bool> {
    let mut tx = db.begin().await.map_err(map_db_error)?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM danh_muc")
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
    if count > 0 {
        info!("Seed data already present, skipping");
        return Ok(false);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let (id,): (i64,) = sqlx::query_as("INSERT INTO danh_muc (ten) VALUES (?1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
        category_ids.push(id);
    }

    for seed in &ARTICLES {
        sqlx::query(
            r#"
            INSERT INTO bai_viet (tieu_de, mo_ta, noi_dung, hinh_anh, ngay_dang, la_tin_hot, danh_muc_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(seed.title)
        .bind(seed.description)
        .bind(seed.body)
        .bind(seed.image)
        .bind(Utc::now())
        .bind(seed.featured)
        .bind(category_ids[seed.category])
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;
    }

    tx.commit().await.map_err(map_db_error)?;

    info!(
        "Seeded {} categories and {} articles",
        CATEGORIES.len(),
        ARTICLES.len()
    );
    Ok(true)
}
