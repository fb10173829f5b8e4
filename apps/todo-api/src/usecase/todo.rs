//! Todo 管理ユースケース

use std::sync::Arc;

use todolist_domain::todo::{Todo, TodoContent, TodoId};
use todolist_infra::repository::TodoRepository;

use crate::error::TodoApiError;

/// Todo 管理ユースケース
///
/// リポジトリは起動時に組み立てて注入する。
pub struct TodoUseCaseImpl {
    todo_repository: Arc<dyn TodoRepository>,
}

impl TodoUseCaseImpl {
    pub fn new(todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repository }
    }

    /// 全件を取得する
    pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoApiError> {
        let todos = self.todo_repository.find_all().await?;
        Ok(todos)
    }

    /// Todo を作成する
    pub async fn create_todo(&self, content: TodoContent) -> Result<Todo, TodoApiError> {
        let todo = self.todo_repository.insert(&content).await?;
        tracing::info!(todo_id = %todo.id(), "Todo を作成しました");
        Ok(todo)
    }

    /// Todo を更新する
    ///
    /// 存在確認はしない。該当行が無くても成功として扱い、警告ログだけ残す。
    pub async fn update_todo(
        &self,
        id: TodoId,
        content: TodoContent,
    ) -> Result<TodoContent, TodoApiError> {
        let affected = self.todo_repository.update(id, &content).await?;
        if affected == 0 {
            tracing::warn!(todo_id = %id, "更新対象の Todo が存在しません");
        }
        Ok(content)
    }

    /// Todo を削除する
    ///
    /// 存在確認はしない。該当行が無くても成功として扱い、警告ログだけ残す。
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), TodoApiError> {
        let affected = self.todo_repository.delete(id).await?;
        if affected == 0 {
            tracing::warn!(todo_id = %id, "削除対象の Todo が存在しません");
        }
        Ok(())
    }
}
