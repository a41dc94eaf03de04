//! # 尾沿防抖器
//!
//! 把密集触发的事件合并为静默期后的一次执行。
//! 编排层用它吸收窗口 resize 事件的连续风暴（250ms 窗口），
//! 只有最后一次宽度值会真正驱动布局状态机。
//!
//! 实现为"代次计数"方案：每次调用递增代次并派生一个延时任务，
//! 任务醒来后发现代次已前进就直接放弃，无需取消句柄。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 防抖器
///
/// 线程安全，可被多个 command 调用共享。每个实例独立计代，
/// 不同关注点（如 resize 与其他事件）应各持有自己的实例。
pub struct Debouncer {
    /// 静默窗口
    wait: Duration,
    /// 当前代次：每次 `call` 递增，旧代次的延时任务被作废
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// 创建指定静默窗口的防抖器
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait: Duration::from_millis(wait_ms),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 调度一次防抖执行
    ///
    /// 若在静默窗口内再次调用，先前的闭包被作废，只有最后一次执行。
    /// 必须在 tokio 运行时上下文中调用（Tauri 异步 command 内天然满足）。
    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let wait = self.wait;

        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            // 静默期内没有新的调用才真正执行
            if generation.load(Ordering::SeqCst) == my_generation {
                f();
            }
        });
    }
}
