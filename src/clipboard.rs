//! 系统剪贴板访问模块
//!
//! # 设计思路
//!
//! 用 `SystemClipboard` trait 抽象操作系统剪贴板的读写，监控核心只依赖
//! 该 trait：生产环境注入 `arboard` 实现，测试注入内存假实现。
//! 读写失败以 `Err` 返回给调用方处理，绝不 panic。

use crate::error::AppError;

/// 操作系统剪贴板的读写抽象
pub trait SystemClipboard: Send + Sync {
    /// 读取当前剪贴板文本，剪贴板为空时返回空字符串
    fn get_text(&self) -> Result<String, AppError>;

    /// 将文本写入剪贴板
    fn set_text(&self, text: &str) -> Result<(), AppError>;
}

/// 基于 `arboard` 的生产实现
///
/// 每次操作新建一个 `arboard::Clipboard` 句柄，避免长期持有
/// 平台剪贴板连接。
pub struct ArboardClipboard;

impl SystemClipboard for ArboardClipboard {
    fn get_text(&self) -> Result<String, AppError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| AppError::Clipboard(e.to_string()))?;
        match clipboard.get_text() {
            Ok(text) => Ok(text),
            // 剪贴板为空或没有文本格式时按空文本处理，不算读取失败
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(AppError::Clipboard(e.to_string())),
        }
    }

    fn set_text(&self, text: &str) -> Result<(), AppError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| AppError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}
