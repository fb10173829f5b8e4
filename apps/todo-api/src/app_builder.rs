//! # アプリケーション構築
//!
//! State の組み立てとルーター構築を担当する。
//! `main.rs` は設定読み込み・DB 接続・サーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, header},
    routing::{delete, get, post, put},
};
use sqlx::PgPool;
use todolist_infra::repository::PostgresTodoRepository;
use todolist_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ReadinessState,
        TodoState,
        create_todo,
        delete_todo,
        health_check,
        list_todos,
        readiness_check,
        update_todo,
    },
    usecase::TodoUseCaseImpl,
};

/// 接続プールから本番構成のルーターを組み立てる
pub fn build_app(pool: PgPool) -> Router {
    let todo_repository = Arc::new(PostgresTodoRepository::new(pool.clone()));
    let todo_state = Arc::new(TodoState {
        usecase: TodoUseCaseImpl::new(todo_repository),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    with_layers(
        Router::new()
            .merge(health_routes(readiness_state))
            .merge(todo_routes(todo_state)),
    )
}

/// ヘルスチェック系のルート
pub fn health_routes(state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(state)
}

/// Todo API のルート
pub fn todo_routes(state: Arc<TodoState>) -> Router {
    Router::new()
        .route("/api/", get(list_todos))
        .route("/api/new", post(create_todo))
        .route("/api/update/{id}", put(update_todo))
        .route("/api/delete/{id}", delete(delete_todo))
        .with_state(state)
}

/// 全ルート共通のレイヤーを適用する
///
/// 外側から順に: Request ID 採番 → トレーシング → Request ID 伝播 → CORS
pub fn with_layers(router: Router) -> Router {
    router
        .layer(cors_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// CORS 設定
///
/// 全オリジンを許可する。資格情報付きリクエストも許可するため、
/// ワイルドカードではなくリクエストの `Origin` をそのまま返す。
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::PUT,
            Method::PATCH,
            Method::GET,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::ORIGIN])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
}
