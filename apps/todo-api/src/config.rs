//! # アプリケーション設定
//!
//! 環境変数から設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `DB_USER` | **Yes** | - | PostgreSQL ユーザー名 |
//! | `DB_PASSWORD` | **Yes** | - | PostgreSQL パスワード |
//! | `DB_NAME` | **Yes** | - | データベース名 |
//! | `TODO_API_HOST` | No | `127.0.0.1` | バインドアドレス |
//! | `TODO_API_PORT` | No | `8080` | ポート番号 |
//!
//! DB の接続先ホスト・ポート・SSL モードは固定値（[`todolist_infra::db`] を参照）。

use std::{env, fmt};

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} は有効なポート番号である必要があります: {value}")]
    InvalidPort { name: &'static str, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// データベース接続設定
///
/// パスワードは `Debug` 出力に含めない。
#[derive(Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub name:     String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、各コンポーネントに渡す。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server:   ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `from_env` の実体。テストではプロセス環境を汚さずに値を差し込む。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let port = match lookup("TODO_API_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: "TODO_API_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            server:   ServerConfig {
                host: lookup("TODO_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            database: DatabaseConfig {
                username: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                name:     required("DB_NAME")?,
            },
        })
    }
}
