//! # Todo ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/` - Todo 一覧
//! - `POST /api/new` - Todo 作成
//! - `PUT /api/update/{id}` - Todo 更新
//! - `DELETE /api/delete/{id}` - Todo 削除
//!
//! 作成・更新・削除のレスポンスは `status`（HTTP ステータスの数値）と
//! `message` を含む。ボディやパスパラメータが解釈できない場合は 400 を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todolist_domain::todo::{Todo, TodoContent, TodoId};

use crate::{error::TodoApiError, usecase::TodoUseCaseImpl};

/// Todo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 作成・更新リクエスト
///
/// どちらのフィールドも省略・`null` を許し、`""` / `false` として扱う。
/// キーは先頭大文字（`Title` / `Completed`）も受け付ける。
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    #[serde(default, alias = "Title")]
    pub title:     Option<String>,
    #[serde(default, alias = "Completed")]
    pub completed: Option<bool>,
}

impl From<TodoRequest> for TodoContent {
    fn from(req: TodoRequest) -> Self {
        TodoContent::new(
            req.title.unwrap_or_default(),
            req.completed.unwrap_or_default(),
        )
    }
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    pub id:        i32,
    pub title:     String,
    pub completed: bool,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id:        todo.id().as_i32(),
            title:     todo.title().to_string(),
            completed: todo.completed(),
        }
    }
}

/// 作成・更新のレスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoWriteResponse {
    pub status:    u16,
    pub message:   String,
    pub title:     String,
    pub completed: bool,
}

impl TodoWriteResponse {
    fn new(status: StatusCode, message: &str, content: &TodoContent) -> Self {
        Self {
            status:    status.as_u16(),
            message:   message.to_string(),
            title:     content.title().to_string(),
            completed: content.completed(),
        }
    }
}

/// 削除のレスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDeleteResponse {
    pub status:  u16,
    pub message: String,
}

// --- ハンドラ ---

/// GET /api/
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, TodoApiError> {
    let todos = state.usecase.list_todos().await?;

    let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// POST /api/new
///
/// ## レスポンス
///
/// - `201 Created`: 作成した内容
/// - `400 Bad Request`: ボディが不正
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TodoApiError> {
    let Json(req) = body?;

    let todo = state.usecase.create_todo(req.into()).await?;

    let response = TodoWriteResponse::new(
        StatusCode::CREATED,
        "Todo created successfully!",
        todo.content(),
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/update/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の内容（該当行が無くても 200）
/// - `400 Bad Request`: ID またはボディが不正
#[tracing::instrument(skip_all)]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TodoApiError> {
    let Path(id) = id?;
    let Json(req) = body?;

    let content = state
        .usecase
        .update_todo(TodoId::new(id), req.into())
        .await?;

    let response =
        TodoWriteResponse::new(StatusCode::OK, "Todo updated successfully!", &content);
    Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/delete/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 削除成功（該当行が無くても 200）
/// - `400 Bad Request`: ID が不正
#[tracing::instrument(skip_all)]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, TodoApiError> {
    let Path(id) = id?;

    state.usecase.delete_todo(TodoId::new(id)).await?;

    let response = TodoDeleteResponse {
        status:  StatusCode::OK.as_u16(),
        message: "Todo deleted successfully!".to_string(),
    };
    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, header},
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use todolist_infra::{InfraError, mock::MockTodoRepository, repository::TodoRepository};
    use todolist_shared::ErrorResponse;
    use tower::ServiceExt;

    use super::*;
    use crate::app_builder::todo_routes;

    // --- スタブ ---

    /// 最初の 1 回だけ失敗し、以降は内側のリポジトリに委譲するスタブ
    struct FailOnceTodoRepository {
        failed: AtomicBool,
        inner:  MockTodoRepository,
    }

    impl FailOnceTodoRepository {
        fn new() -> Self {
            Self {
                failed: AtomicBool::new(false),
                inner:  MockTodoRepository::new(),
            }
        }

        fn fail_first(&self) -> Result<(), InfraError> {
            if self.failed.swap(true, Ordering::SeqCst) {
                Ok(())
            } else {
                Err(InfraError::unexpected("connection reset by peer"))
            }
        }
    }

    #[async_trait]
    impl TodoRepository for FailOnceTodoRepository {
        async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
            self.fail_first()?;
            self.inner.find_all().await
        }

        async fn insert(&self, content: &TodoContent) -> Result<Todo, InfraError> {
            self.fail_first()?;
            self.inner.insert(content).await
        }

        async fn update(&self, id: TodoId, content: &TodoContent) -> Result<u64, InfraError> {
            self.fail_first()?;
            self.inner.update(id, content).await
        }

        async fn delete(&self, id: TodoId) -> Result<u64, InfraError> {
            self.fail_first()?;
            self.inner.delete(id).await
        }
    }

    // --- ヘルパー ---

    fn create_test_app(repo: Arc<dyn TodoRepository>) -> Router {
        let state = Arc::new(TodoState {
            usecase: TodoUseCaseImpl::new(repo),
        });
        todo_routes(state)
    }

    fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // --- テストケース ---

    #[tokio::test]
    async fn test_post_completedを省略するとfalseで作成される() {
        // Given
        let repo = MockTodoRepository::new();
        let sut = create_test_app(Arc::new(repo.clone()));

        // When
        let response = sut
            .oneshot(json_request(Method::POST, "/api/new", r#"{"title":"buy milk"}"#))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: TodoWriteResponse = response_body(response).await;
        assert!(!body.completed);
        assert!(!repo.snapshot()[0].completed());
    }

    #[tokio::test]
    async fn test_post_不正なjsonは400を返し書き込まない() {
        // Given
        let repo = MockTodoRepository::new();
        let sut = create_test_app(Arc::new(repo.clone()));

        // When
        let response = sut
            .oneshot(json_request(Method::POST, "/api/new", r#"{"title": "#))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.status, 400);
        assert!(repo.snapshot().is_empty());
    }

    #[rstest]
    #[case::空オブジェクト(r#"{}"#, "", false)]
    #[case::titleなし(r#"{"completed":true}"#, "", true)]
    #[case::titleがnull(r#"{"title":null,"completed":false}"#, "", false)]
    #[case::completedがnull(r#"{"title":"x","completed":null}"#, "x", false)]
    #[case::先頭大文字のキー(r#"{"Title":"x","Completed":true}"#, "x", true)]
    #[tokio::test]
    async fn test_post_省略やnullのフィールドはゼロ値で作成される(
        #[case] body: &str,
        #[case] expected_title: &str,
        #[case] expected_completed: bool,
    ) {
        // Given
        let repo = MockTodoRepository::new();
        let sut = create_test_app(Arc::new(repo.clone()));

        // When
        let response = sut
            .oneshot(json_request(Method::POST, "/api/new", body))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let snapshot = repo.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title(), expected_title);
        assert_eq!(snapshot[0].completed(), expected_completed);
    }

    #[tokio::test]
    async fn test_put_空オブジェクトで内容がゼロ値に置き換わる() {
        // Given
        let repo = MockTodoRepository::new();
        let existing = repo
            .insert(&TodoContent::new("buy milk", true))
            .await
            .unwrap();
        let sut = create_test_app(Arc::new(repo.clone()));

        // When
        let response = sut
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/update/{}", existing.id()),
                "{}",
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: TodoWriteResponse = response_body(response).await;
        assert_eq!(body.title, "");
        assert!(!body.completed);
        let updated = &repo.snapshot()[0];
        assert_eq!(updated.id(), existing.id());
        assert_eq!(updated.title(), "");
        assert!(!updated.completed());
    }

    #[tokio::test]
    async fn test_put_不正なjsonは400を返し書き込まない() {
        // Given
        let repo = MockTodoRepository::new();
        let existing = repo
            .insert(&TodoContent::new("buy milk", false))
            .await
            .unwrap();
        let sut = create_test_app(Arc::new(repo.clone()));

        // When
        let response = sut
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/update/{}", existing.id()),
                r#"{"title": "#,
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.status, 400);
        assert_eq!(repo.snapshot(), vec![existing]);
    }

    #[tokio::test]
    async fn test_post_content_typeが無いと400を返す() {
        // Given
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/new")
            .body(Body::from(r#"{"title":"buy milk"}"#))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_数値でないidは400を返す() {
        // Given
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        // When
        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/abc",
                r#"{"title":"buy milk","completed":true}"#,
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_数値でないidは400を返す() {
        // Given
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/delete/abc")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_存在しないidでも200を返す() {
        // Given
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        // When
        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/999",
                r#"{"title":"ghost","completed":true}"#,
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: TodoWriteResponse = response_body(response).await;
        assert_eq!(
            body,
            TodoWriteResponse {
                status:    200,
                message:   "Todo updated successfully!".to_string(),
                title:     "ghost".to_string(),
                completed: true,
            }
        );
    }

    #[tokio::test]
    async fn test_ストレージ障害は500を返し次のリクエストは処理される() {
        // Given
        let sut = create_test_app(Arc::new(FailOnceTodoRepository::new()));

        // When: 1 回目はストレージ障害
        let first = sut
            .clone()
            .oneshot(Request::get("/api/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Then
        assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response_body(first).await;
        assert_eq!(body, ErrorResponse::internal_error());

        // When: 同じルーターへの 2 回目
        let second = sut
            .oneshot(Request::get("/api/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Then
        assert_eq!(second.status(), StatusCode::OK);
        let todos: Vec<TodoDto> = response_body(second).await;
        assert!(todos.is_empty());
    }
}
