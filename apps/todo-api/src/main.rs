//! # todo-api サーバー
//!
//! `todo` テーブルに対する CRUD を提供する HTTP API サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |----------|------|------|
//! | GET | `/api/` | Todo 一覧 |
//! | POST | `/api/new` | Todo 作成 |
//! | PUT | `/api/update/{id}` | Todo 更新 |
//! | DELETE | `/api/delete/{id}` | Todo 削除 |
//! | GET | `/health` | 生存確認 |
//! | GET | `/health/ready` | DB 疎通確認 |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DB_USER` | **Yes** | PostgreSQL ユーザー名 |
//! | `DB_PASSWORD` | **Yes** | PostgreSQL パスワード |
//! | `DB_NAME` | **Yes** | データベース名 |
//! | `TODO_API_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
//! | `TODO_API_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DB_USER=todo DB_PASSWORD=secret DB_NAME=todos cargo run -p todolist-api
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use todolist_api::{app_builder::build_app, config::AppConfig};
use todolist_infra::db;
use todolist_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("todo-api"));

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "todo-api サーバーを起動します: {}:{}",
        config.server.host,
        config.server.port
    );

    let options = db::connect_options(
        &config.database.username,
        &config.database.password,
        &config.database.name,
    );
    let pool = db::create_pool(options)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!(database = %config.database.name, "データベースに接続しました");

    let app = build_app(pool.clone());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
    tracing::info!("todo-api サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("todo-api サーバーを停止しました");

    Ok(())
}

/// SIGINT / SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
