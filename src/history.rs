//! 剪贴板历史记录模块
//!
//! # 设计思路
//!
//! `HistoryStore` 是一个有界、保序、按内容去重的历史列表：
//! - 新条目插入头部，最新的记录永远排在最前。
//! - 相同 `(content, kind)` 的条目只保留第一次插入，重复插入是完全的
//!   空操作，连时间戳都不刷新。
//! - 超出 `max_history` 上限时丢弃尾部最旧的条目。
//!
//! 本模块只是纯数据结构，不做任何加锁。并发访问由 `monitor` 模块的
//! 共享状态锁统一串行化。

use chrono::Local;
use serde::{Deserialize, Serialize};

/// 历史记录与日志文件共用的时间戳格式（秒级精度）
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 条目内容类型
///
/// `Image` 只存在于数据形态与接口字段中，当前没有任何代码路径会产生
/// 图片条目。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Text,
    Image,
}

/// 一条剪贴板历史记录
///
/// 创建后不再修改，只会随清空或容量截断被移除。
/// 序列化字段名与手机端接口约定一致：`content` / `type` / `timestamp`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub timestamp: String,
}

impl ClipboardEntry {
    /// 以当前本地时间创建一条文本记录
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: EntryKind::Text,
            timestamp: Local::now().format(TIME_FORMAT).to_string(),
        }
    }
}

/// 有界去重的历史列表，最新条目在头部
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<ClipboardEntry>,
    max_history: usize,
}

impl HistoryStore {
    /// 创建历史列表，容量至少为 1
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_history: max_history.max(1),
        }
    }

    /// 插入一条记录
    ///
    /// 空内容或 `(content, kind)` 重复时不做任何修改，返回 `false`。
    /// 插入成功后若超出容量，从尾部丢弃最旧的条目。
    /// 去重检查与插入、截断在一次 `&mut self` 调用内完成，调用方持锁
    /// 期间不会有其他写入穿插。
    pub fn insert(&mut self, entry: ClipboardEntry) -> bool {
        if entry.content.is_empty() {
            return false;
        }
        let duplicate = self
            .entries
            .iter()
            .any(|e| e.content == entry.content && e.kind == entry.kind);
        if duplicate {
            return false;
        }
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_history);
        true
    }

    /// 当前历史的一份拷贝，顺序为最新在前
    pub fn snapshot(&self) -> Vec<ClipboardEntry> {
        self.entries.clone()
    }

    /// 清空全部历史
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
