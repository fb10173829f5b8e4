//! # TodoRepository
//!
//! `todo` テーブルへの CRUD を担当するリポジトリ。
//!
//! 各メソッドは 1 文の SQL を発行するだけで、トランザクションは張らない。
//! 更新・削除は対象行の存在確認をせず、影響行数をそのまま返す。

use async_trait::async_trait;
use sqlx::PgPool;
use todolist_domain::todo::{Todo, TodoContent, TodoId};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 全件を ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// 挿入し、採番された ID を含む Todo を返す
    async fn insert(&self, content: &TodoContent) -> Result<Todo, InfraError>;

    /// ID に一致する行の内容を置き換え、影響行数を返す
    async fn update(&self, id: TodoId, content: &TodoContent) -> Result<u64, InfraError>;

    /// ID に一致する行を削除し、影響行数を返す
    async fn delete(&self, id: TodoId) -> Result<u64, InfraError>;
}

/// `todo` テーブルの行
///
/// `title` / `completed` は NULL 許容カラムのため `Option` で受ける。
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:        i32,
    title:     Option<String>,
    completed: Option<bool>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(
            TodoId::new(row.id),
            TodoContent::new(row.title.unwrap_or_default(), row.completed.unwrap_or_default()),
        )
    }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, completed
            FROM todo
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, content: &TodoContent) -> Result<Todo, InfraError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO todo (title, completed)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(content.title())
        .bind(content.completed())
        .fetch_one(&self.pool)
        .await?;

        Ok(Todo::from_db(TodoId::new(id), content.clone()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: TodoId, content: &TodoContent) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE todo
            SET title = $1, completed = $2
            WHERE id = $3
            "#,
        )
        .bind(content.title())
        .bind(content.completed())
        .bind(id.as_i32())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TodoId) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresTodoRepository>();
        assert_send_sync::<Box<dyn TodoRepository>>();
    }

    #[test]
    fn test_null_カラムはゼロ値に変換される() {
        let row = TodoRow {
            id:        5,
            title:     None,
            completed: None,
        };

        let todo = Todo::from(row);

        assert_eq!(todo.id(), TodoId::new(5));
        assert_eq!(todo.title(), "");
        assert!(!todo.completed());
    }
}
