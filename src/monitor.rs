//! 剪贴板监控核心模块
//!
//! # 设计思路
//!
//! `Monitor` 负责让桌面剪贴板与历史记录保持一致：
//! - **轮询**：按固定周期读取剪贴板文本，与上次所见内容比较检测变化。
//! - **记录**：变化写入 `HistoryStore`，可选地追加到日志文件。
//! - **回写**：`set_clipboard` 同时服务本地操作与手机端远程推送，写入
//!   成功后把 `last_seen` 同步为新内容，避免下一次轮询把自己的写入又
//!   当作新变化记录一遍。
//!
//! # 实现思路
//!
//! - 轮询循环是一个可取消的周期任务：`tokio::time::interval` 驱动，
//!   `CancellationToken` 负责停止，循环里唯一的阻塞点是两次 tick 之间
//!   的等待。
//! - 历史与 `last_seen` 是轮询任务和请求处理共享的可变状态，统一放进
//!   一个 `Mutex` 保护的 `SharedState`，去重、插入、截断在一次持锁内
//!   完成。
//! - 剪贴板读取失败只记日志并当作"本轮无变化"，不向上抛、不中断循环。
//! - 对外暴露的 `Monitor` 是 `Arc` 内部状态的轻量句柄，可随意克隆给
//!   服务器持有。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Local;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::clipboard::SystemClipboard;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::history::{ClipboardEntry, HistoryStore, TIME_FORMAT};

/// 日志文件中每条记录后的分隔线长度
const LOG_SEPARATOR_LEN: usize = 50;
/// 日志消息里内容预览的最大字符数
const PREVIEW_CHARS: usize = 50;

/// 剪贴板监控核心，可克隆的共享句柄
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    clipboard: Box<dyn SystemClipboard>,
    shared: Mutex<SharedState>,
    running: AtomicBool,
    cancel: Mutex<Option<CancellationToken>>,
    check_interval: Duration,
    auto_save: bool,
    save_path: PathBuf,
}

/// 轮询任务与请求处理共享的可变状态
struct SharedState {
    history: HistoryStore,
    last_seen: String,
}

impl Monitor {
    /// 创建监控核心
    ///
    /// `config` 提供轮询周期、历史容量与日志持久化选项，
    /// `clipboard` 是注入的系统剪贴板实现。
    pub fn new(clipboard: Box<dyn SystemClipboard>, config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                clipboard,
                shared: Mutex::new(SharedState {
                    history: HistoryStore::new(config.max_history),
                    last_seen: String::new(),
                }),
                running: AtomicBool::new(false),
                cancel: Mutex::new(None),
                check_interval: Duration::from_secs_f64(config.check_interval),
                auto_save: config.auto_save,
                save_path: PathBuf::from(&config.save_path),
            }),
        }
    }

    /// 开始监控剪贴板
    ///
    /// 已在运行时为空操作。需要在 Tokio 运行时内调用：轮询循环作为
    /// 后台任务被 spawn 出去。
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let token = CancellationToken::new();
        *lock_cancel(&self.inner) = Some(token.clone());

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            log::info!("开始监控剪贴板");
            let mut ticker = tokio::time::interval(inner.check_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if !inner.running.load(Ordering::SeqCst) {
                            break;
                        }
                        poll_once(&inner);
                    }
                }
            }
            log::info!("停止监控剪贴板");
        });
    }

    /// 停止监控剪贴板，幂等
    ///
    /// 只清除运行标志并取消令牌，循环在当前 tick 结束后自行退出。
    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
        if let Some(token) = lock_cancel(&self.inner).take() {
            token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// 执行一次轮询，返回本轮是否检测到变化
    pub fn poll_once(&self) -> bool {
        poll_once(&self.inner)
    }

    /// 写入系统剪贴板并记录历史
    ///
    /// 本地"推送到剪贴板"与手机端远程推送共用此路径。写入失败时不碰
    /// 历史记录，直接返回错误。
    pub fn set_clipboard(&self, content: &str) -> Result<(), AppError> {
        set_clipboard(&self.inner, content)
    }

    /// 当前历史的一份拷贝，最新在前
    pub fn history_snapshot(&self) -> Vec<ClipboardEntry> {
        lock_shared(&self.inner).history.snapshot()
    }

    pub fn history_len(&self) -> usize {
        lock_shared(&self.inner).history.len()
    }

    /// 清空全部历史记录
    pub fn clear_history(&self) {
        lock_shared(&self.inner).history.clear();
        log::info!("历史记录已清空");
    }
}

fn lock_shared(inner: &MonitorInner) -> MutexGuard<'_, SharedState> {
    match inner.shared.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("监控共享状态锁中毒，继续使用恢复数据");
            poisoned.into_inner()
        }
    }
}

fn lock_cancel(inner: &MonitorInner) -> MutexGuard<'_, Option<CancellationToken>> {
    match inner.cancel.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("取消令牌锁中毒，继续使用恢复数据");
            poisoned.into_inner()
        }
    }
}

fn poll_once(inner: &MonitorInner) -> bool {
    let current = match inner.clipboard.get_text() {
        Ok(text) => text,
        Err(e) => {
            log::error!("检查剪贴板时发生错误: {}", e);
            return false;
        }
    };
    // 空内容不算变化，剪贴板被清空时不会产生空条目
    if current.is_empty() {
        return false;
    }
    {
        let mut shared = lock_shared(inner);
        if current == shared.last_seen {
            return false;
        }
        shared.last_seen = current.clone();
        shared.history.insert(ClipboardEntry::text(current.clone()));
    }
    persist_change(inner, &current);
    log::info!("检测到新剪贴板文本: {}", preview(&current));
    true
}

fn set_clipboard(inner: &MonitorInner, content: &str) -> Result<(), AppError> {
    inner.clipboard.set_text(content).map_err(|e| {
        log::error!("设置剪贴板失败: {}", e);
        e
    })?;
    {
        let mut shared = lock_shared(inner);
        shared.history.insert(ClipboardEntry::text(content));
        // 同步 last_seen，下一次轮询不会把这次写入再记一遍
        shared.last_seen = content.to_string();
    }
    persist_change(inner, content);
    log::info!("已设置剪贴板内容: {}", preview(content));
    Ok(())
}

fn persist_change(inner: &MonitorInner, content: &str) {
    if !inner.auto_save {
        return;
    }
    if let Err(e) = append_log_entry(&inner.save_path, content) {
        log::error!("保存文件失败: {}", e);
    }
}

/// 单条日志块：时间戳行加 50 字符分隔线
fn format_log_block(timestamp: &str, content: &str) -> String {
    format!(
        "[{}] 文本: {}\n{}\n",
        timestamp,
        content,
        "-".repeat(LOG_SEPARATOR_LEN)
    )
}

fn append_log_entry(path: &Path, content: &str) -> Result<(), AppError> {
    let timestamp = Local::now().format(TIME_FORMAT).to_string();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_log_block(&timestamp, content).as_bytes())?;
    Ok(())
}

fn preview(content: &str) -> String {
    let truncated: String = content.chars().take(PREVIEW_CHARS).collect();
    if truncated.len() < content.len() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Monitor, format_log_block, preview};
    use crate::clipboard::SystemClipboard;
    use crate::config::AppConfig;
    use crate::error::AppError;

    /// 可共享的内存假剪贴板，测试里用克隆句柄改写内容模拟外部变化
    #[derive(Clone, Default)]
    struct FakeClipboard {
        text: Arc<Mutex<String>>,
        fail_reads: Arc<AtomicBool>,
        fail_writes: Arc<AtomicBool>,
    }

    impl FakeClipboard {
        fn put(&self, text: &str) {
            *self.text.lock().expect("lock fake clipboard") = text.to_string();
        }

        fn current(&self) -> String {
            self.text.lock().expect("lock fake clipboard").clone()
        }
    }

    impl SystemClipboard for FakeClipboard {
        fn get_text(&self) -> Result<String, AppError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(AppError::Clipboard("模拟读取失败".to_string()));
            }
            Ok(self.current())
        }

        fn set_text(&self, text: &str) -> Result<(), AppError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(AppError::Clipboard("模拟写入失败".to_string()));
            }
            self.put(text);
            Ok(())
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            auto_save: false,
            ..AppConfig::default()
        }
    }

    fn make_monitor() -> (Monitor, FakeClipboard) {
        let fake = FakeClipboard::default();
        let monitor = Monitor::new(Box::new(fake.clone()), &test_config());
        (monitor, fake)
    }

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("clipboard-monitor-test-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn poll_detects_change_only_once() {
        let (monitor, fake) = make_monitor();
        fake.put("hello");

        assert!(monitor.poll_once());
        assert!(!monitor.poll_once());
        assert_eq!(monitor.history_len(), 1);
    }

    #[test]
    fn empty_clipboard_never_counts_as_change() {
        let (monitor, fake) = make_monitor();

        assert!(!monitor.poll_once());

        fake.put("hello");
        assert!(monitor.poll_once());

        // 清空剪贴板不产生空条目
        fake.put("");
        assert!(!monitor.poll_once());
        assert_eq!(monitor.history_len(), 1);
    }

    #[test]
    fn read_failure_is_treated_as_no_change() {
        let (monitor, fake) = make_monitor();
        fake.fail_reads.store(true, Ordering::SeqCst);

        assert!(!monitor.poll_once());
        assert!(monitor.history_snapshot().is_empty());

        // 故障恢复后照常检测
        fake.fail_reads.store(false, Ordering::SeqCst);
        fake.put("recovered");
        assert!(monitor.poll_once());
    }

    #[test]
    fn set_clipboard_does_not_retrigger_next_poll() {
        let (monitor, fake) = make_monitor();

        monitor.set_clipboard("pushed").expect("set clipboard");
        assert_eq!(fake.current(), "pushed");
        assert_eq!(monitor.history_len(), 1);

        // 下一次轮询读回自己的写入，不应产生第二条记录
        assert!(!monitor.poll_once());
        assert_eq!(monitor.history_len(), 1);
    }

    #[test]
    fn set_clipboard_failure_leaves_history_untouched() {
        let (monitor, fake) = make_monitor();
        fake.fail_writes.store(true, Ordering::SeqCst);

        assert!(monitor.set_clipboard("doomed").is_err());
        assert!(monitor.history_snapshot().is_empty());
    }

    #[test]
    fn history_order_and_clear() {
        let (monitor, fake) = make_monitor();
        for content in ["a", "b", "c"] {
            fake.put(content);
            monitor.poll_once();
        }

        let contents: Vec<_> = monitor
            .history_snapshot()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(contents, vec!["c", "b", "a"]);

        monitor.clear_history();
        assert_eq!(monitor.history_len(), 0);
    }

    #[test]
    fn auto_save_appends_formatted_log_blocks() {
        let dir = unique_temp_dir();
        let save_path = dir.join("history.log");
        let config = AppConfig {
            save_path: save_path.to_string_lossy().to_string(),
            ..AppConfig::default()
        };
        let fake = FakeClipboard::default();
        let monitor = Monitor::new(Box::new(fake.clone()), &config);

        fake.put("第一条");
        monitor.poll_once();
        fake.put("second");
        monitor.poll_once();

        let logged = std::fs::read_to_string(&save_path).expect("read log file");
        assert!(logged.contains("] 文本: 第一条\n"));
        assert!(logged.contains("] 文本: second\n"));
        assert_eq!(logged.matches(&"-".repeat(50)).count(), 2);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn log_block_has_timestamp_and_separator() {
        let block = format_log_block("2024-01-01 00:00:00", "hello");
        assert_eq!(
            block,
            format!("[2024-01-01 00:00:00] 文本: hello\n{}\n", "-".repeat(50))
        );
    }

    #[test]
    fn preview_truncates_long_content() {
        assert_eq!(preview("short"), "short");
        let long = "x".repeat(80);
        let shown = preview(&long);
        assert_eq!(shown, format!("{}...", "x".repeat(50)));
    }

    #[tokio::test]
    async fn start_is_idempotent_and_stop_clears_running() {
        let (monitor, _fake) = make_monitor();

        assert!(!monitor.is_running());
        monitor.start();
        assert!(monitor.is_running());
        monitor.start();
        assert!(monitor.is_running());

        monitor.stop();
        assert!(!monitor.is_running());
        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[tokio::test]
    async fn background_loop_records_changes() {
        let fake = FakeClipboard::default();
        let config = AppConfig {
            check_interval: 0.01,
            auto_save: false,
            ..AppConfig::default()
        };
        let monitor = Monitor::new(Box::new(fake.clone()), &config);

        fake.put("background");
        monitor.start();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        monitor.stop();

        let contents: Vec<_> = monitor
            .history_snapshot()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(contents, vec!["background"]);
    }
}
