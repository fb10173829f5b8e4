//! # API エラー定義
//!
//! リクエスト単位のエラーと、RFC 9457 Problem Details レスポンスへの変換を定義する。
//!
//! ストレージ障害はそのリクエストだけを 500 で失敗させ、プロセスは稼働し続ける。
//!
//! ```text
//! InfraError (sqlx::Error + SpanTrace)
//!        ↓ From
//! TodoApiError
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + ErrorResponse)
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todolist_infra::InfraError;
use todolist_shared::ErrorResponse;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum TodoApiError {
    /// 不正なリクエスト（ボディやパスパラメータが解釈できない）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<JsonRejection> for TodoApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for TodoApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for TodoApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            TodoApiError::BadRequest(detail) => {
                tracing::debug!(%detail, "不正なリクエストを拒否しました");
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(detail))
            }
            TodoApiError::Database(e) => {
                // 内部エラー詳細はログのみ
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
