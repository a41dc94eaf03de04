//! # 打字机动画服务
//!
//! 把一段文本按固定间隔逐字推送到目标渲染面，已显示前缀后追加光标标记；
//! 播完后推送纯文本完成帧并触发可选的完成回调。
//!
//! ## 运行模型
//! 协作式单活：`start` 在异步任务中逐字循环，每步之间 `tokio::time::sleep` 让出；
//! 运行标志是一个共享的 `AtomicBool`：
//! - `start` 对运行中的实例是空操作（swap 抢占标志失败即返回）
//! - `stop` 清除标志，下一步醒来时发现标志已清即停止（不撕裂当前帧）
//! - 完成或停止后再次 `start` 会从头重播

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 默认逐字间隔（毫秒）：欢迎语等常规文本
pub const DEFAULT_INTERVAL_MS: u64 = 120;

/// AI 回复正文的逐字间隔（毫秒）：内容较长，加快播放
pub const AI_MESSAGE_INTERVAL_MS: u64 = 10;

/// 光标标记：追加在已显示前缀之后，渲染层以闪烁样式呈现
pub const CURSOR_MARKUP: &str = r#"<span class="typing-cursor"></span>"#;

/// 完成回调类型
type OnComplete = Box<dyn Fn() + Send + Sync>;

/// 生成第 `shown` 帧：前 `shown` 个字符 + 光标标记
///
/// 按 `char` 截取，中文文本同样逐字显示。
pub fn frame(text: &str, shown: usize) -> String {
    let prefix: String = text.chars().take(shown).collect();
    format!("{}{}", prefix, CURSOR_MARKUP)
}

/// 打字机动画器
///
/// 一个实例绑定一段文本；同一目标渲染面同一时刻只应有一个运行中的实例
/// （由调用方以 `is_running` 保证，引擎按消息 id 维护实例表）。
pub struct Typewriter {
    /// 完整文本
    text: String,

    /// 逐字间隔
    interval: Duration,

    /// 运行标志：`start` 置位，`stop`/完成清除
    running: Arc<AtomicBool>,

    /// 完成回调：完成帧推送后调用（停止中断不调用）
    on_complete: Mutex<Option<OnComplete>>,
}

impl Typewriter {
    /// 创建绑定指定文本和间隔的动画器
    pub fn new(text: impl Into<String>, interval_ms: u64) -> Self {
        Self {
            text: text.into(),
            interval: Duration::from_millis(interval_ms),
            running: Arc::new(AtomicBool::new(false)),
            on_complete: Mutex::new(None),
        }
    }

    /// 注册完成回调
    pub fn set_on_complete<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut slot) = self.on_complete.lock() {
            *slot = Some(Box::new(callback));
        }
    }

    /// 是否正在播放
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 停止播放
    ///
    /// 协作式：仅清除运行标志，运行中的任务在下一步检查时退出。
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// 从头播放文本
    ///
    /// 每一帧（含最终完成帧）通过 `emit(帧内容, 是否完成)` 推送。
    /// 已在播放中时为空操作；完成或停止后可重新调用重播。
    pub async fn start<F>(&self, mut emit: F)
    where
        F: FnMut(&str, bool),
    {
        // 抢占运行标志；已在运行说明目标面上有动画，保持不打断
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let total = self.text.chars().count();
        for shown in 1..=total {
            // stop() 之后醒来：放弃后续帧
            if !self.running.load(Ordering::SeqCst) {
                return;
            }
            emit(&frame(&self.text, shown), false);
            tokio::time::sleep(self.interval).await;
        }

        // 完成帧：纯文本替换（去掉光标标记）
        emit(&self.text, true);
        self.running.store(false, Ordering::SeqCst);

        if let Ok(slot) = self.on_complete.lock() {
            if let Some(callback) = slot.as_ref() {
                callback();
            }
        }
    }
}
