//! # 剪贴板监控器 — 应用入口
//!
//! 本文件仅负责初始化与组件装配：加载配置、构建监控核心与同步服务器、
//! 按配置自动启动，并在收到退出信号时先通知两个循环停止再退出进程。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::Path;

use clipboard_monitor::clipboard::ArboardClipboard;
use clipboard_monitor::config::{AppConfig, DEFAULT_CONFIG_FILE};
use clipboard_monitor::monitor::Monitor;
use clipboard_monitor::netinfo;
use clipboard_monitor::server::SyncServer;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load(Path::new(DEFAULT_CONFIG_FILE));
    let monitor = Monitor::new(Box::new(ArboardClipboard), &config);
    let server = SyncServer::new(monitor.clone(), config.server_port);
    log::info!("剪贴板监控器初始化完成");

    if config.auto_start_monitoring {
        monitor.start();
    }

    if config.enable_server && config.auto_start_server {
        match server.start().await {
            Ok(addr) => {
                let url = netinfo::server_url(&netinfo::local_ip(), addr.port());
                log::info!("手机访问地址: {}", url);
            }
            Err(e) => {
                log::error!("启动服务器失败，服务器保持停止状态: {}", e);
            }
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("等待退出信号失败: {}", e);
    }

    // 退出前先通知监控循环与服务器循环停止
    monitor.stop();
    server.stop();
    log::info!("剪贴板监控器已退出");
}
