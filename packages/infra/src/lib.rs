//! # todolist インフラ層
//!
//! PostgreSQL との接続と、`todo` テーブルへのアクセスを担当する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続オプションと接続プールの作成
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - `mock` - インメモリモック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todolist_infra::{db, repository::PostgresTodoRepository};
//!
//! let options = db::connect_options("todo", "secret", "todos");
//! let pool = db::create_pool(options).await?;
//! let repository = PostgresTodoRepository::new(pool);
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
