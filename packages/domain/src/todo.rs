//! # Todo
//!
//! Todo リストの唯一のエンティティ。
//!
//! - `id` はストレージが挿入時に採番する（`serial`）。以後変更されない
//! - `title` / `completed` は利用者が指定する。長さや内容の制約は無い
//!
//! 採番前の内容は [`TodoContent`]、採番済みの行は [`Todo`] として区別する。
//!
//! ```rust
//! use todolist_domain::todo::{Todo, TodoContent, TodoId};
//!
//! let content = TodoContent::new("buy milk", false);
//! let todo = Todo::from_db(TodoId::new(1), content);
//!
//! assert_eq!(todo.title(), "buy milk");
//! assert!(!todo.completed());
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Todo の識別子
///
/// PostgreSQL の `serial`（INT4）に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
#[display("{_0}")]
pub struct TodoId(i32);

impl TodoId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

/// Todo の内容（タイトルと完了フラグ）
///
/// 作成・更新リクエストの入力であり、ID を持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoContent {
    title:     String,
    completed: bool,
}

impl TodoContent {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// 永続化済みの Todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:      TodoId,
    content: TodoContent,
}

impl Todo {
    /// データベースから読み出した値で復元する
    pub fn from_db(id: TodoId, content: TodoContent) -> Self {
        Self { id, content }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.content.title()
    }

    pub fn completed(&self) -> bool {
        self.content.completed()
    }

    pub fn content(&self) -> &TodoContent {
        &self.content
    }

    /// 内容を置き換えた新しい Todo を返す（ID は不変）
    pub fn with_content(self, content: TodoContent) -> Self {
        Self {
            id: self.id,
            content,
        }
    }
}
