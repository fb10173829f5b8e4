//! # PostgreSQL データベース接続管理
//!
//! 接続オプションの組み立てと接続プールの作成を行う。
//!
//! 接続先ホスト・ポート・SSL モードは固定値で、環境ごとに変わるのは
//! ユーザー名・パスワード・データベース名の 3 つだけである。
//!
//! ```rust,ignore
//! use todolist_infra::db;
//!
//! let pool = db::create_pool(db::connect_options("todo", "secret", "todos")).await?;
//!
//! // クエリ実行（接続はプールから自動取得・返却）
//! db::ping(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};

use crate::error::InfraError;

/// 接続先ホスト
pub const DB_HOST: &str = "localhost";

/// 接続先ポート
pub const DB_PORT: u16 = 5432;

/// 接続オプションを組み立てる
///
/// SSL は無効化する（`sslmode=disable`）。
pub fn connect_options(username: &str, password: &str, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(DB_HOST)
        .port(DB_PORT)
        .username(username)
        .password(password)
        .database(database)
        .ssl_mode(PgSslMode::Disable)
}

/// PostgreSQL 接続プールを作成する
///
/// 起動時に一度だけ呼び出し、作成したプールをリポジトリに渡す。
///
/// - `max_connections(10)`: 最大接続数
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
///
/// 起動時に接続を確立するため、DB に到達できない場合はここで失敗する。
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// `SELECT 1` で疎通確認する
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
