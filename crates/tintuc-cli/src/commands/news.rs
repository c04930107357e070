//! Article and category views

use crate::api::Client;
use anyhow::{Context, Result};
use colored::Colorize;
use tintuc_types::{Article, Category, NewArticle, Page};

pub async fn latest(client: &Client, page: Page) -> Result<()> {
    let articles = client.latest(page).await?;
    print_list("🕒 Tin mới nhất", &articles);
    Ok(())
}

pub async fn hot(client: &Client, page: Page) -> Result<()> {
    let articles = client.hot(page).await?;
    print_list("🔥 Tin nổi bật", &articles);
    Ok(())
}

pub async fn show(client: &Client, id: i64) -> Result<()> {
    let article = client.article(id).await?;
    println!("{}", render_detail(&article));
    Ok(())
}

pub async fn category(client: &Client, category_id: i64, page: Page) -> Result<()> {
    let articles = client.by_category(category_id, page).await?;
    print_list(&format!("📂 Danh mục #{}", category_id), &articles);
    Ok(())
}

pub async fn categories(client: &Client) -> Result<()> {
    let categories = client.categories().await?;

    println!("{}", "📂 Danh mục".blue().bold());
    if categories.is_empty() {
        println!("   {}", "No categories".dimmed());
    }
    for category in &categories {
        println!("{}", render_category(category));
    }
    Ok(())
}

pub async fn create(client: &Client, article: NewArticle) -> Result<()> {
    let created = client
        .create(&article)
        .await
        .context("Failed to create article")?;

    println!("{} Created article #{}", "✓".green(), created.id);
    println!();
    println!("{}", render_summary(&created));
    Ok(())
}

fn print_list(heading: &str, articles: &[Article]) {
    println!("{}", heading.blue().bold());
    println!();

    if articles.is_empty() {
        println!("   {}", "No articles".dimmed());
        return;
    }

    for article in articles {
        println!("{}", render_summary(article));
        println!();
    }
}

/// Card shown in lists: title, date, views, description
pub fn render_summary(article: &Article) -> String {
    let mut out = format!(
        "{} {}{}\n   {}  {}",
        format!("#{}", article.id).dimmed(),
        article.title.bold(),
        if article.is_featured {
            format!(" {}", "HOT".red().bold())
        } else {
            String::new()
        },
        article
            .published_at
            .format("%d/%m/%Y %H:%M")
            .to_string()
            .cyan(),
        format!("👁 {}", article.view_count).yellow(),
    );

    if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n   {}", description));
    }
    out
}

/// Full view: the card plus image and body
pub fn render_detail(article: &Article) -> String {
    let mut out = render_summary(article);
    if let Some(image) = article.image_url.as_deref().filter(|i| !i.is_empty()) {
        out.push_str(&format!("\n   {} {}", "🖼".dimmed(), image.underline()));
    }
    out.push_str(&format!("\n\n{}", article.body));
    out
}

fn render_category(category: &Category) -> String {
    format!("   {} {}", format!("#{}", category.id).dimmed(), category.name)
}
