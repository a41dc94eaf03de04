//! # 测试辅助模块
//!
//! 提供 [`RecordingRenderer`]：把核心服务发出的全部渲染指令按顺序
//! 录制下来的 [`Renderer`] 实现，测试据此断言完整的指令序列。
//! 剪贴板写入同样被录制，可注入失败以覆盖降级路径。

use std::sync::Mutex;

use crate::models::chat::Message;
use crate::models::layout::LayoutSnapshot;
use crate::models::state::Page;
use crate::services::modal::ModalKind;
use crate::services::render::{HistoryItem, Renderer, ToastKind};

/// 录制下来的单条渲染指令
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    AppendMessage(Message),
    ShowThinkingIndicator(String),
    RemoveThinkingIndicator,
    ClearMessages,
    HistoryChanged(Vec<(String, String, bool)>),
    SetSendEnabled(bool),
    SetInput(String),
    TypewriterFrame {
        target_id: String,
        frame: String,
        done: bool,
    },
    ShowToast(String, ToastKind),
    LayoutChanged(LayoutSnapshot),
    PageChanged(Page),
    ModalOpened(ModalKind),
    ModalClosed,
    LoginPending(String, bool),
    FallbackCopy(String),
}

/// 录制渲染指令的测试替身
#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
    /// 成功写入剪贴板的文本记录
    clipboard: Mutex<Vec<String>>,
    /// 置为 true 时剪贴板写入返回错误（触发降级路径）
    clipboard_fails: std::sync::atomic::AtomicBool,
}

impl RecordingRenderer {
    /// 取出已录制的指令序列快照
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    /// 取出剪贴板写入记录
    pub fn clipboard_writes(&self) -> Vec<String> {
        self.clipboard.lock().unwrap().clone()
    }

    /// 注入剪贴板失败
    pub fn fail_clipboard(&self) {
        self.clipboard_fails
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }

    fn record(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn append_message(&self, message: &Message) {
        self.record(RenderEvent::AppendMessage(message.clone()));
    }

    fn show_thinking_indicator(&self, indicator_id: &str) {
        self.record(RenderEvent::ShowThinkingIndicator(indicator_id.to_string()));
    }

    fn remove_thinking_indicator(&self) {
        self.record(RenderEvent::RemoveThinkingIndicator);
    }

    fn clear_messages(&self) {
        self.record(RenderEvent::ClearMessages);
    }

    fn history_changed(&self, items: &[HistoryItem]) {
        self.record(RenderEvent::HistoryChanged(
            items
                .iter()
                .map(|item| (item.id.clone(), item.title.clone(), item.active))
                .collect(),
        ));
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.record(RenderEvent::SetSendEnabled(enabled));
    }

    fn set_input(&self, text: &str) {
        self.record(RenderEvent::SetInput(text.to_string()));
    }

    fn typewriter_frame(&self, target_id: &str, frame: &str, done: bool) {
        self.record(RenderEvent::TypewriterFrame {
            target_id: target_id.to_string(),
            frame: frame.to_string(),
            done,
        });
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        self.record(RenderEvent::ShowToast(message.to_string(), kind));
    }

    fn layout_changed(&self, snapshot: &LayoutSnapshot) {
        self.record(RenderEvent::LayoutChanged(*snapshot));
    }

    fn page_changed(&self, page: Page) {
        self.record(RenderEvent::PageChanged(page));
    }

    fn modal_opened(&self, kind: ModalKind) {
        self.record(RenderEvent::ModalOpened(kind));
    }

    fn modal_closed(&self) {
        self.record(RenderEvent::ModalClosed);
    }

    fn login_pending(&self, provider: &str, pending: bool) {
        self.record(RenderEvent::LoginPending(provider.to_string(), pending));
    }

    fn write_clipboard(&self, text: &str) -> Result<(), String> {
        if self
            .clipboard_fails
            .load(std::sync::atomic::Ordering::SeqCst)
        {
            return Err("剪贴板不可用".to_string());
        }
        self.clipboard.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn fallback_copy(&self, text: &str) {
        self.record(RenderEvent::FallbackCopy(text.to_string()));
    }
}
