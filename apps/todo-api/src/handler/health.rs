//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health        - プロセスの生存確認（I/O なし）
//! GET /health/ready  - データベース疎通を含む準備完了確認
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use todolist_infra::db;
use todolist_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// 疎通確認のタイムアウト
const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Readiness Check 用の共有状態
pub struct ReadinessState {
    pub pool: PgPool,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/ready
///
/// データベースに `SELECT 1` を投げ、成功すれば 200、失敗またはタイムアウトなら 503 を返す。
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(&state.pool).await;

    let response =
        ReadinessResponse::from_checks(HashMap::from([("database".to_string(), database)]));
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(READINESS_TIMEOUT, db::ping(pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database ping timed out");
            CheckStatus::Error
        }
    }
}
