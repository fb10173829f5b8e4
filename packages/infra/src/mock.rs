//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todolist-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todolist_domain::todo::{Todo, TodoContent, TodoId};

use crate::{error::InfraError, repository::TodoRepository};

/// インメモリの TodoRepository
///
/// ID は `serial` と同じく 1 から採番し、削除しても再利用しない。
/// `Clone` したインスタンスは同じストアを共有する。
#[derive(Clone)]
pub struct MockTodoRepository {
    store: Arc<Mutex<MockStore>>,
}

struct MockStore {
    todos:   Vec<Todo>,
    next_id: i32,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(MockStore {
                todos:   Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// 現在の内容のスナップショットを返す
    pub fn snapshot(&self) -> Vec<Todo> {
        self.store.lock().unwrap().todos.clone()
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Ok(self.snapshot())
    }

    async fn insert(&self, content: &TodoContent) -> Result<Todo, InfraError> {
        let mut store = self.store.lock().unwrap();
        let todo = Todo::from_db(TodoId::new(store.next_id), content.clone());
        store.next_id += 1;
        store.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: TodoId, content: &TodoContent) -> Result<u64, InfraError> {
        let mut store = self.store.lock().unwrap();
        let Some(pos) = store.todos.iter().position(|t| t.id() == id) else {
            return Ok(0);
        };
        let current = store.todos.remove(pos);
        store.todos.insert(pos, current.with_content(content.clone()));
        Ok(1)
    }

    async fn delete(&self, id: TodoId) -> Result<u64, InfraError> {
        let mut store = self.store.lock().unwrap();
        let before = store.todos.len();
        store.todos.retain(|t| t.id() != id);
        Ok((before - store.todos.len()) as u64)
    }
}
