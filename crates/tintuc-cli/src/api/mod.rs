//! API client for the Tin Tuc server

use anyhow::{Context, Result};
use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use tintuc_types::{
    Article, Category, ErrorBody, NewArticle, Page, SummarizeRequest, SummarizeResponse,
};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

pub struct Client {
    http: ReqwestClient,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: ReqwestClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn hot(&self, page: Page) -> Result<Vec<Article>> {
        self.get_page("/tintuc/hot", page).await
    }

    pub async fn latest(&self, page: Page) -> Result<Vec<Article>> {
        self.get_page("/tintuc/moinhat", page).await
    }

    /// Fetching an article counts as a view on the server
    pub async fn article(&self, id: i64) -> Result<Article> {
        let response = self
            .http
            .get(format!("{}/tintuc/{}", self.base_url, id))
            .send()
            .await
            .context("Failed to fetch article")?;

        read_json(response).await
    }

    pub async fn by_category(&self, category_id: i64, page: Page) -> Result<Vec<Article>> {
        self.get_page(&format!("/danhmuc/{}/tintuc", category_id), page)
            .await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        let response = self
            .http
            .get(format!("{}/danhmuc", self.base_url))
            .send()
            .await
            .context("Failed to fetch categories")?;

        read_json(response).await
    }

    pub async fn create(&self, article: &NewArticle) -> Result<Article> {
        let response = self
            .http
            .post(format!("{}/tintuc/", self.base_url))
            .json(article)
            .send()
            .await
            .context("Failed to send create request")?;

        read_json(response).await
    }

    pub async fn summarize(&self, text: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/summarize/", self.base_url))
            .json(&SummarizeRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .context("Failed to send summarize request")?;

        let summary: SummarizeResponse = read_json(response).await?;
        Ok(summary.summary)
    }

    async fn get_page<T: DeserializeOwned>(&self, path: &str, page: Page) -> Result<T> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("skip", page.skip), ("limit", page.limit)])
            .send()
            .await
            .with_context(|| format!("Failed to request {}", path))?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        anyhow::bail!("Server returned {}: {}", status, error_detail(&body));
    }

    serde_json::from_str(&body).context("Failed to parse server response")
}

/// `detail` of an error body, or the raw body when it is not one
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => error.detail,
        Err(_) if body.trim().is_empty() => "no details".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/", addr)
    }

    fn article_json(id: i64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "tieu_de": title,
            "mo_ta": null,
            "noi_dung": "body",
            "hinh_anh": null,
            "ngay_dang": "2024-05-01T08:30:00Z",
            "luot_xem": 3,
            "la_tin_hot": true,
            "danh_muc_id": 1
        })
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail": "article not found"}"#), "article not found");
        assert_eq!(error_detail("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_detail(""), "no details");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        assert_eq!(Client::new("http://host/api/").base_url(), "http://host/api");
        assert_eq!(Client::new(DEFAULT_API_BASE).base_url(), DEFAULT_API_BASE);
    }

    #[tokio::test]
    async fn test_list_sends_page_window() {
        let app = Router::new().route(
            "/api/tintuc/hot",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["skip"], "5");
                assert_eq!(params["limit"], "2");
                Json(json!([article_json(7, "Tin nóng")]))
            }),
        );
        let client = Client::new(&serve(app).await);

        let articles = client.hot(Page::new(5, 2)).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Tin nóng");
        assert!(articles[0].is_featured);
    }

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let app = Router::new().route(
            "/api/tintuc/:id",
            get(|Path(id): Path<i64>| async move {
                if id == 1 {
                    Ok(Json(article_json(1, "X")))
                } else {
                    Err((
                        StatusCode::NOT_FOUND,
                        Json(json!({"detail": "article not found"})),
                    ))
                }
            }),
        );
        let client = Client::new(&serve(app).await);

        assert_eq!(client.article(1).await.unwrap().view_count, 3);

        let err = client.article(9999).await.unwrap_err();
        assert!(err.to_string().contains("article not found"));
        assert!(err.to_string().contains("404"));
    }
}
