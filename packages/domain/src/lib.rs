//! # todolist ドメイン層
//!
//! Todo リストのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo エンティティと識別子

pub mod todo;
