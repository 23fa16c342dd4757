//! # 剪贴板监控器 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                手机浏览器 (HTML + fetch)                  │
//! │                                                          │
//! │   GET /  ·  GET /api/history  ·  POST /api/set_clipboard │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ HTTP (axum, 单配对设备)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            桌面进程 (Rust)                        │
//! │                                                          │
//! │  ┌─ server ───── SyncServer 路由 + 请求校验               │
//! │  │                  │ Monitor 句柄 (显式注入)             │
//! │  ├─ monitor ──── 轮询循环 · 变化检测 · set_clipboard      │
//! │  │   ├─ history     有界去重历史 HistoryStore             │
//! │  │   └─ clipboard   SystemClipboard trait (arboard 实现)  │
//! │  ├─ config ───── AppConfig 类型化配置 (JSON 文件)         │
//! │  ├─ netinfo ──── 本机 IP / 手机访问地址                   │
//! │  └─ error ────── AppError 统一错误类型                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有可失败路径的返回类型 |
//! | [`config`] | 类型化配置的加载、校验与保存，损坏时静默回退默认值 |
//! | [`history`] | 有界、保序、按内容去重的剪贴板历史列表 |
//! | [`clipboard`] | 系统剪贴板读写抽象与 `arboard` 生产实现 |
//! | [`monitor`] | 轮询监控循环、变化检测、历史记录与日志持久化 |
//! | [`server`] | 手机同步 HTTP 接口与页面渲染 |
//! | [`netinfo`] | 本机局域网 IP 与访问地址 |

pub mod clipboard;
pub mod config;
pub mod error;
pub mod history;
pub mod monitor;
pub mod netinfo;
pub mod server;
