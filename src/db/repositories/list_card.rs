//! List card repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{CardUpdate, ListCard};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// List card repository trait
#[async_trait]
pub trait ListCardRepository: Send + Sync {
    /// Create a new card
    async fn create(&self, card: &ListCard) -> Result<ListCard>;

    /// All cards belonging to a list
    async fn list_by_list(&self, list_id: i64) -> Result<Vec<ListCard>>;

    /// Every card in the system
    async fn list_all(&self) -> Result<Vec<ListCard>>;

    /// Apply an update to a card; `None` if no card matched
    async fn update(&self, id: i64, update: &CardUpdate) -> Result<Option<ListCard>>;
}

/// SQLx-based list card repository supporting SQLite and MySQL
pub struct SqlxListCardRepository {
    pool: DynDatabasePool,
}

impl SqlxListCardRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ListCardRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ListCardRepository for SqlxListCardRepository {
    async fn create(&self, card: &ListCard) -> Result<ListCard> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_card_sqlite(self.pool.as_sqlite().unwrap(), card).await,
            DatabaseDriver::Mysql => create_card_mysql(self.pool.as_mysql().unwrap(), card).await,
        }
    }

    async fn list_by_list(&self, list_id: i64) -> Result<Vec<ListCard>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_by_list_sqlite(self.pool.as_sqlite().unwrap(), list_id).await
            }
            DatabaseDriver::Mysql => {
                list_by_list_mysql(self.pool.as_mysql().unwrap(), list_id).await
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<ListCard>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_all_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_all_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn update(&self, id: i64, update: &CardUpdate) -> Result<Option<ListCard>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_card_sqlite(self.pool.as_sqlite().unwrap(), id, update).await
            }
            DatabaseDriver::Mysql => {
                update_card_mysql(self.pool.as_mysql().unwrap(), id, update).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_card_sqlite(pool: &SqlitePool, card: &ListCard) -> Result<ListCard> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO list_cards (title, list_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(&card.title)
    .bind(card.list_id)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create card")?;

    Ok(ListCard {
        id: result.last_insert_rowid(),
        title: card.title.clone(),
        list_id: card.list_id,
        created_at: now,
    })
}

async fn list_by_list_sqlite(pool: &SqlitePool, list_id: i64) -> Result<Vec<ListCard>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, list_id, created_at
        FROM list_cards
        WHERE list_id = ?
        ORDER BY id
        "#,
    )
    .bind(list_id)
    .fetch_all(pool)
    .await
    .context("Failed to list cards")?;

    Ok(rows.iter().map(row_to_card_sqlite).collect())
}

async fn list_all_sqlite(pool: &SqlitePool) -> Result<Vec<ListCard>> {
    let rows = sqlx::query("SELECT id, title, list_id, created_at FROM list_cards ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list cards")?;

    Ok(rows.iter().map(row_to_card_sqlite).collect())
}

async fn update_card_sqlite(
    pool: &SqlitePool,
    id: i64,
    update: &CardUpdate,
) -> Result<Option<ListCard>> {
    let result = match update {
        CardUpdate::Move { list_id } => {
            sqlx::query("UPDATE list_cards SET list_id = ? WHERE id = ?")
                .bind(list_id)
                .bind(id)
                .execute(pool)
                .await
        }
        CardUpdate::Rename { title } => {
            sqlx::query("UPDATE list_cards SET title = ? WHERE id = ?")
                .bind(title)
                .bind(id)
                .execute(pool)
                .await
        }
    }
    .context("Failed to update card")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let row = sqlx::query("SELECT id, title, list_id, created_at FROM list_cards WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get card")?;

    Ok(row.map(|row| row_to_card_sqlite(&row)))
}

fn row_to_card_sqlite(row: &sqlx::sqlite::SqliteRow) -> ListCard {
    ListCard {
        id: row.get("id"),
        title: row.get("title"),
        list_id: row.get("list_id"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_card_mysql(pool: &MySqlPool, card: &ListCard) -> Result<ListCard> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO list_cards (title, list_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(&card.title)
    .bind(card.list_id)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create card")?;

    Ok(ListCard {
        id: result.last_insert_id() as i64,
        title: card.title.clone(),
        list_id: card.list_id,
        created_at: now,
    })
}

async fn list_by_list_mysql(pool: &MySqlPool, list_id: i64) -> Result<Vec<ListCard>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, list_id, created_at
        FROM list_cards
        WHERE list_id = ?
        ORDER BY id
        "#,
    )
    .bind(list_id)
    .fetch_all(pool)
    .await
    .context("Failed to list cards")?;

    Ok(rows.iter().map(row_to_card_mysql).collect())
}

async fn list_all_mysql(pool: &MySqlPool) -> Result<Vec<ListCard>> {
    let rows = sqlx::query("SELECT id, title, list_id, created_at FROM list_cards ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list cards")?;

    Ok(rows.iter().map(row_to_card_mysql).collect())
}

async fn update_card_mysql(
    pool: &MySqlPool,
    id: i64,
    update: &CardUpdate,
) -> Result<Option<ListCard>> {
    let result = match update {
        CardUpdate::Move { list_id } => {
            sqlx::query("UPDATE list_cards SET list_id = ? WHERE id = ?")
                .bind(list_id)
                .bind(id)
                .execute(pool)
                .await
        }
        CardUpdate::Rename { title } => {
            sqlx::query("UPDATE list_cards SET title = ? WHERE id = ?")
                .bind(title)
                .bind(id)
                .execute(pool)
                .await
        }
    }
    .context("Failed to update card")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let row = sqlx::query("SELECT id, title, list_id, created_at FROM list_cards WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get card")?;

    Ok(row.map(|row| row_to_card_mysql(&row)))
}

fn row_to_card_mysql(row: &sqlx::mysql::MySqlRow) -> ListCard {
    ListCard {
        id: row.get("id"),
        title: row.get("title"),
        list_id: row.get("list_id"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxListCardRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxListCardRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_list_by_list() {
        let repo = setup_test_repo().await;

        repo.create(&ListCard::new("Card A".to_string(), 1))
            .await
            .expect("create");
        repo.create(&ListCard::new("Card B".to_string(), 1))
            .await
            .expect("create");
        repo.create(&ListCard::new("Card C".to_string(), 2))
            .await
            .expect("create");

        let cards = repo.list_by_list(1).await.expect("list");
        assert_eq!(cards.len(), 2);

        let all = repo.list_all().await.expect("list all");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_rename() {
        let repo = setup_test_repo().await;
        let card = repo
            .create(&ListCard::new("Old".to_string(), 1))
            .await
            .expect("create");

        let updated = repo
            .update(
                card.id,
                &CardUpdate::Rename {
                    title: "New".to_string(),
                },
            )
            .await
            .expect("update")
            .expect("card should match");
        assert_eq!(updated.title, "New");
        assert_eq!(updated.list_id, 1);
    }

    #[tokio::test]
    async fn test_update_move() {
        let repo = setup_test_repo().await;
        let card = repo
            .create(&ListCard::new("Movable".to_string(), 1))
            .await
            .expect("create");

        let updated = repo
            .update(card.id, &CardUpdate::Move { list_id: 9 })
            .await
            .expect("update")
            .expect("card should match");
        assert_eq!(updated.list_id, 9);
        assert_eq!(updated.title, "Movable");
    }

    #[tokio::test]
    async fn test_update_missing_card() {
        let repo = setup_test_repo().await;
        let result = repo
            .update(
                999,
                &CardUpdate::Rename {
                    title: "Nope".to_string(),
                },
            )
            .await
            .expect("update");
        assert!(result.is_none());
    }
}
