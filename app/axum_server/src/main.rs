// HTTP 接口层
pub mod interfaces {

    pub mod common {
        pub mod credentials;
        pub mod http_handler_util;
        pub mod ins_repo;
    }

    pub mod frame {

        pub mod http {
            pub mod account_controller;
            pub mod status_controller;
        }

        pub mod http_server;
        pub mod starter;
    }
}

use interfaces::frame;

#[tokio::main]
async fn main() {
    // 初始化日志（只在主线程中执行一次）
    tracing_subscriber::fmt::init();

    // 启动 Frame 模块
    if let Err(e) = frame::starter::start_frame_module().await {
        eprintln!("❌ Failed to start Frame module: {}", e);
    }

    // 保持主线程运行
    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl-c");
    println!("✅ Shutdown signal received. Exiting...");
}
