use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::interfaces::common::ins_repo;
use crate::interfaces::frame::http::account_controller;
use crate::interfaces::frame::http::status_controller;

/// HTTP 服务器启动器
pub struct HttpServer {}

impl HttpServer {
    pub async fn start() -> Result<(), Box<dyn std::error::Error>> {
        // 使用 ins_repo 中的单例服务
        let account_service = ins_repo::get_account_service();
        let status_catalog = ins_repo::get_status_catalog();

        // 创建路由，注入服务依赖。
        // 静态段 /my 优先于动态段 /{id} 匹配
        let account_routes = Router::new()
            .route(
                "/api/accounts",
                get(account_controller::list_accounts).post(account_controller::create_account),
            )
            .route(
                "/api/accounts/my",
                get(account_controller::get_my_account)
                    .put(account_controller::update_my_account),
            )
            .route(
                "/api/accounts/{id}",
                get(account_controller::get_account)
                    .put(account_controller::update_account)
                    .delete(account_controller::delete_account),
            )
            .route(
                "/api/accounts/{id}/user",
                put(account_controller::link_user).delete(account_controller::unlink_user),
            )
            .route("/api/accounts/{id}/notes", post(account_controller::add_note))
            .route("/api/accounts/{id}/status", post(account_controller::set_status))
            .with_state(account_service);

        let status_routes = Router::new()
            .route(
                "/api/statuses",
                get(status_controller::list_statuses).post(status_controller::create_status),
            )
            .route("/api/statuses/{id}", get(status_controller::get_status))
            .with_state(status_catalog);

        let http_app = Router::new()
            .route("/api/health", get(Self::health_check))
            .merge(account_routes)
            .merge(status_routes);

        // 启动 HTTP 服务器（在后台运行）
        let addr =
            std::env::var("FRAME_HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let http_listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("🚀 Frame HTTP server started at http://{}", addr);
        tracing::info!("📒 Accounts API: /api/accounts (admin scope)");
        tracing::info!("👤 My account: GET/PUT /api/accounts/my (account scope)");
        tracing::info!("🏷️  Status catalog: /api/statuses (admin scope)");
        tracing::info!("💚 Health check: GET /api/health");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(http_listener, http_app.into_make_service()).await {
                tracing::error!("HTTP server exited: {}", e);
            }
        });

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({ "status": "ok" }))
    }
}
