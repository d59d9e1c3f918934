use {
    anyhow::Context,
    sqlx::{
        postgres::PgPoolOptions,
        Pool,
        Postgres,
    },
};

pub type DB = Pool<Postgres>;

/// Opens the connection pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<DB> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to the database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}
