//! Seed Tool
//!
//! Inserts the sample blog set into the configured database and prints the
//! resulting statistics.
//!
//! Run with: cargo run --bin seed -- [--reset]

use bloglist::domain::NewBlog;
use bloglist::store::{BlogStore, PgStore};
use bloglist::{db, BlogStats, Config};

/// (title, author, url, likes)
const SAMPLE_BLOGS: &[(&str, &str, &str, i64)] = &[
    (
        "Go To Statement Considered Harmful",
        "Edsger W. Dijkstra",
        "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf",
        5,
    ),
    (
        "Canonical string reduction",
        "Edsger W. Dijkstra",
        "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
        7,
    ),
    (
        "First class tests",
        "Robert C. Martin",
        "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll",
        12,
    ),
    (
        "TDD harms architecture",
        "Robert C. Martin",
        "http://blog.cleancoder.com/uncle-bob/2017/03/03/TDD-Harms-Architecture.html",
        0,
    ),
    (
        "Type wars",
        "Robert C. Martin",
        "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html",
        0,
    ),
    ("React patterns", "Michael Chan", "https://reactpatterns.com/", 12),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let reset = std::env::args().any(|a| a == "--reset");

    let config = Config::from_env()?;
    println!("Connecting to database...");

    let pool = db::connect(&config).await?;
    if !db::check_schema(&pool).await? {
        anyhow::bail!("Database schema incomplete. Please run migrations.");
    }

    let store = PgStore::new(pool);
    if reset {
        println!("Removing existing data");
        store.reset().await?;
    }

    for &(title, author, url, likes) in SAMPLE_BLOGS {
        let blog = NewBlog::new(
            Some(title.to_string()),
            Some(author.to_string()),
            Some(url.to_string()),
            Some(likes),
        )?;
        let created = store.insert_blog(blog).await?;
        println!("Inserted {} ({})", created.title, created.id);
    }

    let blogs = store.list_blogs().await?;
    let stats = BlogStats::compute(&blogs);

    println!();
    println!("=== Stats over {} blogs ===", blogs.len());
    println!("Total likes:  {}", stats.total_likes);
    if let Some(favorite) = &stats.favorite_blog {
        println!("Favorite:     {} by {} ({} likes)", favorite.title, favorite.author, favorite.likes);
    }
    if let Some(most) = &stats.most_blogs {
        println!("Most blogs:   {} ({})", most.author, most.blogs);
    }
    if let Some(most) = &stats.most_likes {
        println!("Most likes:   {} ({})", most.author, most.likes);
    }

    store.pool().close().await;
    Ok(())
}
