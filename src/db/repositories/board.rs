//! Board repository
//!
//! Every read and write beyond `create` is keyed on `(id, created_by)` so
//! ownership scoping happens in the query itself, never in later filtering.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Board;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Board repository trait
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Create a new board
    async fn create(&self, board: &Board) -> Result<Board>;

    /// List all boards owned by a user
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Board>>;

    /// Get a board only if it is owned by the given user
    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Board>>;

    /// Rename a board scoped to its owner; `None` if no owned board matched
    async fn rename_owned(&self, id: i64, user_id: i64, title: &str) -> Result<Option<Board>>;

    /// Delete a board scoped to its owner; `false` if no owned board matched.
    /// Child lists and cards are left untouched.
    async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool>;
}

/// SQLx-based board repository supporting SQLite and MySQL
pub struct SqlxBoardRepository {
    pool: DynDatabasePool,
}

impl SqlxBoardRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BoardRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BoardRepository for SqlxBoardRepository {
    async fn create(&self, board: &Board) -> Result<Board> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_board_sqlite(self.pool.as_sqlite().unwrap(), board).await
            }
            DatabaseDriver::Mysql => create_board_mysql(self.pool.as_mysql().unwrap(), board).await,
        }
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Board>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_boards_sqlite(self.pool.as_sqlite().unwrap(), user_id).await
            }
            DatabaseDriver::Mysql => list_boards_mysql(self.pool.as_mysql().unwrap(), user_id).await,
        }
    }

    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Board>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                find_owned_sqlite(self.pool.as_sqlite().unwrap(), id, user_id).await
            }
            DatabaseDriver::Mysql => {
                find_owned_mysql(self.pool.as_mysql().unwrap(), id, user_id).await
            }
        }
    }

    async fn rename_owned(&self, id: i64, user_id: i64, title: &str) -> Result<Option<Board>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                rename_owned_sqlite(self.pool.as_sqlite().unwrap(), id, user_id, title).await
            }
            DatabaseDriver::Mysql => {
                rename_owned_mysql(self.pool.as_mysql().unwrap(), id, user_id, title).await
            }
        }
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_owned_sqlite(self.pool.as_sqlite().unwrap(), id, user_id).await
            }
            DatabaseDriver::Mysql => {
                delete_owned_mysql(self.pool.as_mysql().unwrap(), id, user_id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_board_sqlite(pool: &SqlitePool, board: &Board) -> Result<Board> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO boards (title, created_by, created_at) VALUES (?, ?, ?)",
    )
    .bind(&board.title)
    .bind(board.created_by)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create board")?;

    Ok(Board {
        id: result.last_insert_rowid(),
        title: board.title.clone(),
        created_by: board.created_by,
        created_at: now,
    })
}

async fn list_boards_sqlite(pool: &SqlitePool, user_id: i64) -> Result<Vec<Board>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, created_by, created_at
        FROM boards
        WHERE created_by = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("Failed to list boards")?;

    Ok(rows.iter().map(row_to_board_sqlite).collect())
}

async fn find_owned_sqlite(pool: &SqlitePool, id: i64, user_id: i64) -> Result<Option<Board>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, created_by, created_at
        FROM boards
        WHERE id = ? AND created_by = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get board")?;

    Ok(row.map(|row| row_to_board_sqlite(&row)))
}

async fn rename_owned_sqlite(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    title: &str,
) -> Result<Option<Board>> {
    let result = sqlx::query("UPDATE boards SET title = ? WHERE id = ? AND created_by = ?")
        .bind(title)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to update board")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_owned_sqlite(pool, id, user_id).await
}

async fn delete_owned_sqlite(pool: &SqlitePool, id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM boards WHERE id = ? AND created_by = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete board")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_board_sqlite(row: &sqlx::sqlite::SqliteRow) -> Board {
    Board {
        id: row.get("id"),
        title: row.get("title"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_board_mysql(pool: &MySqlPool, board: &Board) -> Result<Board> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO boards (title, created_by, created_at) VALUES (?, ?, ?)",
    )
    .bind(&board.title)
    .bind(board.created_by)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create board")?;

    Ok(Board {
        id: result.last_insert_id() as i64,
        title: board.title.clone(),
        created_by: board.created_by,
        created_at: now,
    })
}

async fn list_boards_mysql(pool: &MySqlPool, user_id: i64) -> Result<Vec<Board>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, created_by, created_at
        FROM boards
        WHERE created_by = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("Failed to list boards")?;

    Ok(rows.iter().map(row_to_board_mysql).collect())
}

async fn find_owned_mysql(pool: &MySqlPool, id: i64, user_id: i64) -> Result<Option<Board>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, created_by, created_at
        FROM boards
        WHERE id = ? AND created_by = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get board")?;

    Ok(row.map(|row| row_to_board_mysql(&row)))
}

async fn rename_owned_mysql(
    pool: &MySqlPool,
    id: i64,
    user_id: i64,
    title: &str,
) -> Result<Option<Board>> {
    let result = sqlx::query("UPDATE boards SET title = ? WHERE id = ? AND created_by = ?")
        .bind(title)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to update board")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_owned_mysql(pool, id, user_id).await
}

async fn delete_owned_mysql(pool: &MySqlPool, id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM boards WHERE id = ? AND created_by = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete board")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_board_mysql(row: &sqlx::mysql::MySqlRow) -> Board {
    Board {
        id: row.get("id"),
        title: row.get("title"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    }
}
