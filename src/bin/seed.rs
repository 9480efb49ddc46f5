//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use edutrack::models::video::{VideoFilter, VideoInput};
use edutrack::services::catalog;
use edutrack::store::{PgStore, RecordStore};

/// (title, category id, duration, difficulty)
const SAMPLE_VIDEOS: [(&str, &str, &str, &str); 6] = [
    ("Introducción al mercado inmobiliario", "1", "18:20", "Básico"),
    ("Captación de propiedades exclusivas", "2", "24:05", "Intermedio"),
    ("Contratos de compraventa", "3", "31:40", "Intermedio"),
    ("Créditos hipotecarios explicados", "4", "27:15", "Básico"),
    ("Técnicas de cierre efectivas", "6", "22:50", "Avanzado"),
    ("Valuación comparativa de mercado", "8", "35:10", "Avanzado"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = edutrack::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    edutrack::db::run_migrations(&pool).await?;

    println!("=== Training Platform Seed Script ===");

    let store = PgStore::new(pool);
    seed_categories(&store).await?;
    seed_videos(&store).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn seed_categories(store: &PgStore) -> anyhow::Result<()> {
    if !store.find_categories().await?.is_empty() {
        println!("[skip] Categories already present");
        return Ok(());
    }
    let count = catalog::seed_default_categories(store).await?;
    println!("[done] Seeded {count} default categories");
    Ok(())
}

async fn seed_videos(store: &PgStore) -> anyhow::Result<()> {
    if !store.find_videos(&VideoFilter::default()).await?.is_empty() {
        println!("[skip] Videos already present");
        return Ok(());
    }

    for (title, category_id, duration, difficulty) in SAMPLE_VIDEOS {
        let input = VideoInput {
            title: title.to_string(),
            description: format!("Curso: {title}"),
            thumbnail: String::new(),
            duration: duration.to_string(),
            youtube_id: String::new(),
            match_label: "95%".to_string(),
            difficulty: difficulty.to_string(),
            rating: 4.5,
            views: 0,
            release_date: "2024".to_string(),
            category_id: category_id.to_string(),
        };
        catalog::create_video(store, input)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed video '{title}': {e}"))?;
    }
    println!("[done] Seeded {} sample videos", SAMPLE_VIDEOS.len());
    Ok(())
}
