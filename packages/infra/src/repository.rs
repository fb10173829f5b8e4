//! # リポジトリ実装
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを使う
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
