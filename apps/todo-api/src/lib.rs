//! # todolist API ライブラリ
//!
//! ハンドラ・ユースケース・ルーター構築を公開する。
//! バイナリ（`main.rs`）と結合テストの両方から使用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
