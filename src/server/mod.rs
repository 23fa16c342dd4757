//! 手机同步 HTTP 服务模块
//!
//! # 设计思路
//!
//! 把历史记录与 `set_clipboard` 能力通过一个小型 HTTP 接口暴露给同一
//! 局域网内的手机：
//! - `GET /` 手机端页面（嵌入本机 IP 与端口）
//! - `GET /test` 界面兼容性测试页面
//! - `GET /api/history` 历史记录 JSON 数组，最新在前
//! - `POST /api/set_clipboard` 手机推送文本到电脑剪贴板
//! - 其余路径一律 404
//!
//! # 实现思路
//!
//! - 路由采用显式依赖注入：`Router` 持有 `ServerState`（内含 `Monitor`
//!   句柄），各处理函数按路由分发，不依赖任何全局状态。
//! - 请求校验失败返回 400 与具体原因；剪贴板写入失败返回 500，历史
//!   记录保持未修改（`Monitor::set_clipboard` 先写剪贴板后记历史）。
//! - 启动失败（如端口被占用）以 `AppError::Server` 报告给调用方，
//!   服务器停留在停止状态，绝不让进程崩溃。
//! - 停止通过取消令牌触发优雅关闭，处理中的请求做完后退出。

pub mod page;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::monitor::Monitor;
use crate::netinfo;

/// 注入给各路由处理函数的共享状态
#[derive(Clone)]
struct ServerState {
    monitor: Monitor,
    port: u16,
}

/// 手机同步服务器
pub struct SyncServer {
    monitor: Monitor,
    port: u16,
    running: Arc<AtomicBool>,
    cancel: Mutex<Option<CancellationToken>>,
    bound_addr: Mutex<Option<SocketAddr>>,
}

impl SyncServer {
    pub fn new(monitor: Monitor, port: u16) -> Self {
        Self {
            monitor,
            port,
            running: Arc::new(AtomicBool::new(false)),
            cancel: Mutex::new(None),
            bound_addr: Mutex::new(None),
        }
    }

    /// 启动服务器并返回实际监听地址
    ///
    /// 已在运行时为空操作，直接返回当前地址。绑定失败（典型情况是
    /// 端口被占用）返回 `AppError::Server`，运行标志保持未设置。
    pub async fn start(&self) -> Result<SocketAddr, AppError> {
        if self.running.load(Ordering::SeqCst) {
            if let Some(addr) = *lock_or_recover(&self.bound_addr, "监听地址") {
                return Ok(addr);
            }
        }

        let bind_addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("端口 {} 绑定失败: {}", self.port, e)))?;
        let local = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("获取监听地址失败: {}", e)))?;

        self.running.store(true, Ordering::SeqCst);
        *lock_or_recover(&self.bound_addr, "监听地址") = Some(local);
        let token = CancellationToken::new();
        *lock_or_recover(&self.cancel, "取消令牌") = Some(token.clone());

        let router = router(self.monitor.clone(), local.port());
        let running = Arc::clone(&self.running);
        tokio::spawn(async move {
            log::info!("HTTP服务器启动在端口 {}", local.port());
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await
            {
                log::error!("HTTP服务器异常退出: {}", e);
            }
            running.store(false, Ordering::SeqCst);
            log::info!("HTTP服务器已停止");
        });

        Ok(local)
    }

    /// 停止服务器，幂等
    pub fn stop(&self) {
        if let Some(token) = lock_or_recover(&self.cancel, "取消令牌").take() {
            token.cancel();
        }
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("{}锁中毒，继续使用恢复数据", what);
            poisoned.into_inner()
        }
    }
}

fn router(monitor: Monitor, port: u16) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/test", get(serve_test_page))
        .route("/api/history", get(serve_history))
        .route("/api/set_clipboard", post(set_clipboard_from_mobile))
        .fallback(not_found)
        .with_state(ServerState { monitor, port })
}

// ============================================================================
// 路由处理函数
// ============================================================================

async fn serve_index(State(state): State<ServerState>) -> Html<String> {
    Html(page::render_index_page(&netinfo::local_ip(), state.port))
}

async fn serve_test_page() -> Html<String> {
    Html(page::render_test_page())
}

async fn serve_history(State(state): State<ServerState>) -> Response {
    json_response(StatusCode::OK, &state.monitor.history_snapshot())
}

/// 处理手机发送的剪贴板内容
///
/// 校验顺序与错误消息是接口契约的一部分：空请求体、非法 JSON、缺少
/// `text` 字段、内容去除首尾空白后为空，各自对应一个 400 响应。
async fn set_clipboard_from_mobile(State(state): State<ServerState>, body: Bytes) -> Response {
    if body.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "no content provided");
    }
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => return reject(StatusCode::BAD_REQUEST, "invalid JSON format"),
    };
    let Some(text) = payload.get("text").and_then(|v| v.as_str()) else {
        return reject(StatusCode::BAD_REQUEST, "missing text field");
    };
    let text = text.trim();
    if text.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "text content is empty");
    }

    match state.monitor.set_clipboard(text) {
        Ok(()) => json_response(
            StatusCode::OK,
            &json!({ "success": true, "message": "剪贴板内容设置成功" }),
        ),
        Err(e) => {
            log::error!("处理手机剪贴板请求失败: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "success": false, "message": "设置剪贴板内容失败" }),
            )
        }
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

// ============================================================================
// 响应构造
// ============================================================================

/// 序列化为 JSON 响应，UTF-8 不做 ASCII 转义，显式标注字符集
fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_string(payload) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("序列化响应失败: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    json_response(status, &json!({ "success": false, "message": message }))
}
