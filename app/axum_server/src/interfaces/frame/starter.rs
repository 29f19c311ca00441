use crate::interfaces::frame::http_server::HttpServer;

/// Frame 模块启动器
pub struct FrameStarter;

impl FrameStarter {
    /// 启动 Frame 模块的 HTTP 服务器
    pub async fn start() -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!("🚀 Starting Frame module...");
        tracing::warn!("⚠️  Running with the in-memory document store (no external database)");

        // ==================== HTTP 服务器启动 ====================
        tracing::info!("📡 Starting Frame HTTP API server...");
        HttpServer::start().await?;

        tracing::info!("✅ Frame module started successfully");

        Ok(())
    }
}

/// 便捷函数：启动 Frame 模块
pub async fn start_frame_module() -> Result<(), Box<dyn std::error::Error>> {
    FrameStarter::start().await
}
