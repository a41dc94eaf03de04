//! # 渲染指令边界
//!
//! 聊天引擎、布局状态机等核心服务不直接操作任何 UI，
//! 而是通过 [`Renderer`] trait 发出渲染指令（追加消息、切换布局、弹 Toast 等），
//! 由 UI 适配器消费。生产实现 [`TauriRenderer`] 把每条指令翻译为
//! 一个命名空间化的 Tauri 事件（`chat:*` / `ui:*` / `layout:*` / `app:*`），
//! 渲染层 WebView 监听这些事件并更新 DOM。
//!
//! 这样核心逻辑与具体 UI 工具链解耦，测试时换用录制实现即可断言
//! 完整的指令序列。

use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tauri_plugin_clipboard_manager::ClipboardExt;

use crate::models::chat::Message;
use crate::models::layout::LayoutSnapshot;
use crate::models::state::Page;
use crate::services::modal::ModalKind;

// ======== 事件名 ========

/// 追加一条消息到聊天面板
pub const EVENT_MESSAGE: &str = "chat:message";
/// 思考指示器显示/移除
pub const EVENT_THINKING: &str = "chat:thinking";
/// 清空聊天面板
pub const EVENT_MESSAGES_CLEARED: &str = "chat:messages-cleared";
/// 侧边栏历史列表变更
pub const EVENT_HISTORY: &str = "chat:history";
/// 发送控件可用状态
pub const EVENT_SEND_ENABLED: &str = "chat:send-enabled";
/// 设置输入框内容
pub const EVENT_INPUT: &str = "chat:input";
/// 打字机帧
pub const EVENT_TYPEWRITER: &str = "chat:typewriter";
/// Toast 通知
pub const EVENT_TOAST: &str = "ui:toast";
/// 模态框打开/关闭
pub const EVENT_MODAL: &str = "ui:modal";
/// 剪贴板降级复制（渲染层执行选中-复制回退路径）
pub const EVENT_COPY_FALLBACK: &str = "ui:copy-fallback";
/// 布局快照变更
pub const EVENT_LAYOUT: &str = "layout:state";
/// 页面切换
pub const EVENT_PAGE: &str = "app:page";
/// 登录按钮进行中状态
pub const EVENT_LOGIN_PENDING: &str = "auth:pending";

// ======== 事件负载 ========

/// Toast 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// 侧边栏历史条目
///
/// 由引擎从 `chat_history` 派生：标题、中文相对时间标签、是否为当前会话。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// 会话 id
    pub id: String,
    /// 会话标题
    pub title: String,
    /// 创建时间的中文相对描述（"刚刚" / "5分钟前" / 日期）
    pub time_label: String,
    /// 是否为当前激活会话（渲染层高亮）
    pub active: bool,
}

/// 思考指示器负载
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingPayload<'a> {
    shown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    indicator_id: Option<&'a str>,
}

/// 打字机帧负载
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TypewriterPayload<'a> {
    /// 目标渲染面：消息 id 或 "welcome"
    target_id: &'a str,
    /// 当前应显示的 HTML 片段（完成帧为纯文本）
    frame: &'a str,
    /// 是否为完成帧
    done: bool,
}

/// Toast 负载
#[derive(Debug, Clone, Serialize)]
struct ToastPayload<'a> {
    message: &'a str,
    kind: ToastKind,
}

/// 模态框负载
#[derive(Debug, Clone, Serialize)]
struct ModalPayload {
    open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ModalKind>,
}

/// 登录进行中负载
#[derive(Debug, Clone, Serialize)]
struct LoginPendingPayload<'a> {
    provider: &'a str,
    pending: bool,
}

// ======== Renderer trait ========

/// 渲染指令接收方
///
/// 核心服务发出的全部渲染指令。实现方负责把指令落到具体 UI 上；
/// 指令本身不关心 DOM 结构，只描述"发生了什么"。
pub trait Renderer: Send + Sync {
    /// 追加一条消息（用户或 AI）到聊天面板
    fn append_message(&self, message: &Message);

    /// 显示思考指示器（临时占位，非持久化消息）
    fn show_thinking_indicator(&self, indicator_id: &str);

    /// 移除思考指示器
    fn remove_thinking_indicator(&self);

    /// 清空聊天面板
    fn clear_messages(&self);

    /// 推送最新的侧边栏历史列表
    fn history_changed(&self, items: &[HistoryItem]);

    /// 设置发送控件可用状态
    fn set_send_enabled(&self, enabled: bool);

    /// 设置输入框内容（空字符串即清空）
    fn set_input(&self, text: &str);

    /// 推送一帧打字机内容
    fn typewriter_frame(&self, target_id: &str, frame: &str, done: bool);

    /// 显示 Toast 通知
    fn show_toast(&self, message: &str, kind: ToastKind);

    /// 推送布局快照
    fn layout_changed(&self, snapshot: &LayoutSnapshot);

    /// 切换页面
    fn page_changed(&self, page: Page);

    /// 打开模态框（替换当前已打开的）
    fn modal_opened(&self, kind: ModalKind);

    /// 关闭模态框
    fn modal_closed(&self);

    /// 登录按钮进行中状态（禁用 + 加载动画）
    fn login_pending(&self, provider: &str, pending: bool);

    /// 写入系统剪贴板
    ///
    /// # 错误
    /// 剪贴板不可用时返回错误，调用方走降级路径
    fn write_clipboard(&self, text: &str) -> Result<(), String>;

    /// 剪贴板降级：让渲染层执行选中-复制的回退方案
    fn fallback_copy(&self, text: &str);
}

// ======== Tauri 实现 ========

/// 基于 Tauri 事件总线的渲染指令实现
///
/// 每条指令对应一次 `app.emit`。事件发送失败（如窗口尚未就绪）
/// 不影响核心逻辑，静默忽略。
pub struct TauriRenderer {
    app: AppHandle,
}

impl TauriRenderer {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Renderer for TauriRenderer {
    fn append_message(&self, message: &Message) {
        let _ = self.app.emit(EVENT_MESSAGE, message);
    }

    fn show_thinking_indicator(&self, indicator_id: &str) {
        let _ = self.app.emit(
            EVENT_THINKING,
            ThinkingPayload {
                shown: true,
                indicator_id: Some(indicator_id),
            },
        );
    }

    fn remove_thinking_indicator(&self) {
        let _ = self.app.emit(
            EVENT_THINKING,
            ThinkingPayload {
                shown: false,
                indicator_id: None,
            },
        );
    }

    fn clear_messages(&self) {
        let _ = self.app.emit(EVENT_MESSAGES_CLEARED, ());
    }

    fn history_changed(&self, items: &[HistoryItem]) {
        let _ = self.app.emit(EVENT_HISTORY, items);
    }

    fn set_send_enabled(&self, enabled: bool) {
        let _ = self.app.emit(EVENT_SEND_ENABLED, enabled);
    }

    fn set_input(&self, text: &str) {
        let _ = self.app.emit(EVENT_INPUT, text);
    }

    fn typewriter_frame(&self, target_id: &str, frame: &str, done: bool) {
        let _ = self.app.emit(
            EVENT_TYPEWRITER,
            TypewriterPayload {
                target_id,
                frame,
                done,
            },
        );
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        let _ = self.app.emit(EVENT_TOAST, ToastPayload { message, kind });
    }

    fn layout_changed(&self, snapshot: &LayoutSnapshot) {
        let _ = self.app.emit(EVENT_LAYOUT, snapshot);
    }

    fn page_changed(&self, page: Page) {
        let _ = self.app.emit(EVENT_PAGE, page);
    }

    fn modal_opened(&self, kind: ModalKind) {
        let _ = self.app.emit(
            EVENT_MODAL,
            ModalPayload {
                open: true,
                kind: Some(kind),
            },
        );
    }

    fn modal_closed(&self) {
        let _ = self.app.emit(EVENT_MODAL, ModalPayload { open: false, kind: None });
    }

    fn login_pending(&self, provider: &str, pending: bool) {
        let _ = self
            .app
            .emit(EVENT_LOGIN_PENDING, LoginPendingPayload { provider, pending });
    }

    fn write_clipboard(&self, text: &str) -> Result<(), String> {
        self.app
            .clipboard()
            .write_text(text.to_string())
            .map_err(|e| format!("写入剪贴板失败: {}", e))
    }

    fn fallback_copy(&self, text: &str) {
        let _ = self.app.emit(EVENT_COPY_FALLBACK, text);
    }
}
