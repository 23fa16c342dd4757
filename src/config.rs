//! 应用配置模块
//!
//! # 设计思路
//!
//! 将原本散落的选项集中为类型化的 `AppConfig` 结构体，字段带有文档化的
//! 默认值，启动时加载一次后按引用传给各组件。
//!
//! # 实现思路
//!
//! - 配置文件为 JSON 对象，缺失文件或解析失败时静默回退默认值，
//!   只记录日志，绝不让启动失败。
//! - `#[serde(default)]` 让部分缺失的字段各自取默认值。
//! - 加载后统一经过 `normalized()` 校验取值范围，非法值回退默认并告警。

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 默认配置文件名（位于工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

const DEFAULT_SAVE_PATH: &str = "clipboard_history.txt";
const DEFAULT_CHECK_INTERVAL: f64 = 1.0;
const MAX_CHECK_INTERVAL: f64 = 3600.0;
const DEFAULT_MAX_HISTORY: usize = 100;
const DEFAULT_SERVER_PORT: u16 = 9999;

/// 应用配置
///
/// | 字段 | 默认值 | 说明 |
/// |------|--------|------|
/// | `save_path` | `clipboard_history.txt` | 变化日志文件路径 |
/// | `check_interval` | `1.0` | 轮询周期（秒，须大于 0） |
/// | `auto_save` | `true` | 检测到变化时是否追加写日志文件 |
/// | `max_history` | `100` | 历史记录上限（至少 1） |
/// | `server_port` | `9999` | HTTP 服务器端口（1–65535） |
/// | `enable_server` | `true` | 是否允许启动 HTTP 服务器 |
/// | `auto_start_monitoring` | `true` | 启动时自动开始监控 |
/// | `auto_start_server` | `true` | 启动时自动启动服务器 |
/// | `auto_show_qr_code` | `true` | 启动时自动显示二维码（仅 GUI 前端消费） |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub save_path: String,
    pub check_interval: f64,
    pub auto_save: bool,
    pub max_history: usize,
    pub server_port: u16,
    pub enable_server: bool,
    pub auto_start_monitoring: bool,
    pub auto_start_server: bool,
    pub auto_show_qr_code: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_path: DEFAULT_SAVE_PATH.to_string(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            auto_save: true,
            max_history: DEFAULT_MAX_HISTORY,
            server_port: DEFAULT_SERVER_PORT,
            enable_server: true,
            auto_start_monitoring: true,
            auto_start_server: true,
            auto_show_qr_code: true,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置并校验取值
    ///
    /// 文件不存在或内容损坏时回退为默认配置，不向调用者抛错。
    pub fn load(path: &Path) -> AppConfig {
        load_from_path(path).normalized()
    }

    /// 将配置以带缩进的 JSON 写回文件
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("序列化配置失败: {}", e)))?;
        fs::write(path, content)?;
        log::info!("配置已保存到 {}", path.display());
        Ok(())
    }

    /// 校验字段取值，非法值回退为对应默认值并记录告警
    fn normalized(mut self) -> Self {
        if !(self.check_interval > 0.0) || self.check_interval > MAX_CHECK_INTERVAL {
            log::warn!(
                "check_interval 取值无效 ({})，回退为默认值 {}",
                self.check_interval,
                DEFAULT_CHECK_INTERVAL
            );
            self.check_interval = DEFAULT_CHECK_INTERVAL;
        }
        if self.max_history == 0 {
            log::warn!("max_history 取值无效 (0)，回退为默认值 {}", DEFAULT_MAX_HISTORY);
            self.max_history = DEFAULT_MAX_HISTORY;
        }
        if self.server_port == 0 {
            log::warn!("server_port 取值无效 (0)，回退为默认值 {}", DEFAULT_SERVER_PORT);
            self.server_port = DEFAULT_SERVER_PORT;
        }
        self
    }
}

fn load_from_path(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                log::info!("配置文件 {} 加载成功", path.display());
                config
            }
            Err(e) => {
                log::error!("配置文件 {} 解析失败，使用默认配置: {}", path.display(), e);
                AppConfig::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("配置文件 {} 不存在，使用默认配置", path.display());
            AppConfig::default()
        }
        Err(e) => {
            log::error!("配置文件 {} 读取失败，使用默认配置: {}", path.display(), e);
            AppConfig::default()
        }
    }
}
