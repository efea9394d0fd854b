//! Board list repository
//!
//! Lists carry no owner of their own; ownership checks go through the
//! parent board. Rename and delete are keyed by list id alone, matching
//! the handler contract that validates board ownership separately.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::BoardList;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Board list repository trait
#[async_trait]
pub trait BoardListRepository: Send + Sync {
    /// Create a new list
    async fn create(&self, list: &BoardList) -> Result<BoardList>;

    /// All lists belonging to a board
    async fn list_by_board(&self, board_id: i64) -> Result<Vec<BoardList>>;

    /// Get a list by id
    async fn get_by_id(&self, id: i64) -> Result<Option<BoardList>>;

    /// Get a list only if it belongs to the given board
    async fn find_in_board(&self, id: i64, board_id: i64) -> Result<Option<BoardList>>;

    /// Rename a list by id alone; `None` if no list matched
    async fn rename(&self, id: i64, title: &str) -> Result<Option<BoardList>>;

    /// Delete a list by id alone; `false` if no list matched.
    /// Child cards are left untouched.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based board list repository supporting SQLite and MySQL
pub struct SqlxBoardListRepository {
    pool: DynDatabasePool,
}

impl SqlxBoardListRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BoardListRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BoardListRepository for SqlxBoardListRepository {
    async fn create(&self, list: &BoardList) -> Result<BoardList> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_list_sqlite(self.pool.as_sqlite().unwrap(), list).await,
            DatabaseDriver::Mysql => create_list_mysql(self.pool.as_mysql().unwrap(), list).await,
        }
    }

    async fn list_by_board(&self, board_id: i64) -> Result<Vec<BoardList>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_by_board_sqlite(self.pool.as_sqlite().unwrap(), board_id).await
            }
            DatabaseDriver::Mysql => {
                list_by_board_mysql(self.pool.as_mysql().unwrap(), board_id).await
            }
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<BoardList>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_list_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_list_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn find_in_board(&self, id: i64, board_id: i64) -> Result<Option<BoardList>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                find_in_board_sqlite(self.pool.as_sqlite().unwrap(), id, board_id).await
            }
            DatabaseDriver::Mysql => {
                find_in_board_mysql(self.pool.as_mysql().unwrap(), id, board_id).await
            }
        }
    }

    async fn rename(&self, id: i64, title: &str) -> Result<Option<BoardList>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                rename_list_sqlite(self.pool.as_sqlite().unwrap(), id, title).await
            }
            DatabaseDriver::Mysql => {
                rename_list_mysql(self.pool.as_mysql().unwrap(), id, title).await
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_list_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_list_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_list_sqlite(pool: &SqlitePool, list: &BoardList) -> Result<BoardList> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO board_lists (title, board_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(&list.title)
    .bind(list.board_id)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create list")?;

    Ok(BoardList {
        id: result.last_insert_rowid(),
        title: list.title.clone(),
        board_id: list.board_id,
        created_at: now,
    })
}

async fn list_by_board_sqlite(pool: &SqlitePool, board_id: i64) -> Result<Vec<BoardList>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, board_id, created_at
        FROM board_lists
        WHERE board_id = ?
        ORDER BY id
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await
    .context("Failed to list board lists")?;

    Ok(rows.iter().map(row_to_list_sqlite).collect())
}

async fn get_list_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<BoardList>> {
    let row = sqlx::query("SELECT id, title, board_id, created_at FROM board_lists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get list")?;

    Ok(row.map(|row| row_to_list_sqlite(&row)))
}

async fn find_in_board_sqlite(
    pool: &SqlitePool,
    id: i64,
    board_id: i64,
) -> Result<Option<BoardList>> {
    let row = sqlx::query(
        "SELECT id, title, board_id, created_at FROM board_lists WHERE id = ? AND board_id = ?",
    )
    .bind(id)
    .bind(board_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get list")?;

    Ok(row.map(|row| row_to_list_sqlite(&row)))
}

async fn rename_list_sqlite(pool: &SqlitePool, id: i64, title: &str) -> Result<Option<BoardList>> {
    let result = sqlx::query("UPDATE board_lists SET title = ? WHERE id = ?")
        .bind(title)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update list")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_list_sqlite(pool, id).await
}

async fn delete_list_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM board_lists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete list")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_list_sqlite(row: &sqlx::sqlite::SqliteRow) -> BoardList {
    BoardList {
        id: row.get("id"),
        title: row.get("title"),
        board_id: row.get("board_id"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_list_mysql(pool: &MySqlPool, list: &BoardList) -> Result<BoardList> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO board_lists (title, board_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(&list.title)
    .bind(list.board_id)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create list")?;

    Ok(BoardList {
        id: result.last_insert_id() as i64,
        title: list.title.clone(),
        board_id: list.board_id,
        created_at: now,
    })
}

async fn list_by_board_mysql(pool: &MySqlPool, board_id: i64) -> Result<Vec<BoardList>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, board_id, created_at
        FROM board_lists
        WHERE board_id = ?
        ORDER BY id
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await
    .context("Failed to list board lists")?;

    Ok(rows.iter().map(row_to_list_mysql).collect())
}

async fn get_list_mysql(pool: &MySqlPool, id: i64) -> Result<Option<BoardList>> {
    let row = sqlx::query("SELECT id, title, board_id, created_at FROM board_lists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get list")?;

    Ok(row.map(|row| row_to_list_mysql(&row)))
}

async fn find_in_board_mysql(
    pool: &MySqlPool,
    id: i64,
    board_id: i64,
) -> Result<Option<BoardList>> {
    let row = sqlx::query(
        "SELECT id, title, board_id, created_at FROM board_lists WHERE id = ? AND board_id = ?",
    )
    .bind(id)
    .bind(board_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get list")?;

    Ok(row.map(|row| row_to_list_mysql(&row)))
}

async fn rename_list_mysql(pool: &MySqlPool, id: i64, title: &str) -> Result<Option<BoardList>> {
    let result = sqlx::query("UPDATE board_lists SET title = ? WHERE id = ?")
        .bind(title)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update list")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_list_mysql(pool, id).await
}

async fn delete_list_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM board_lists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete list")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_list_mysql(row: &sqlx::mysql::MySqlRow) -> BoardList {
    BoardList {
        id: row.get("id"),
        title: row.get("title"),
        board_id: row.get("board_id"),
        created_at: row.get("created_at"),
    }
}
