//! # 聊天会话引擎
//!
//! 应用的核心编排服务：会话创建、消息生命周期、模拟回复请求、
//! 渲染指令编排、复制/导出动作。
//!
//! ## 单轮对话状态机
//! ```text
//! 空闲 → 用户消息已提交 → 思考指示器显示 → 回复已生成
//!      → 思考指示器移除 → AI 消息已渲染（打字机播放）→ 空闲
//! ```
//!
//! ## 并发护栏
//! - 回复在途标志（`response_pending`）：一条回复生成期间，新的提交
//!   被确定性拒绝（空操作 + 调试日志），即使渲染层绕过了禁用的发送按钮
//! - 打字机按消息 id 维护实例表，运行中的动画不被重复启动打断
//!
//! 状态锁（`RwLock`）只在同步代码块内短暂持有，绝不跨 await 点。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::models::chat::{ChatSession, Message, Role};
use crate::models::state::AppState;
use crate::services::export;
use crate::services::render::{HistoryItem, Renderer, ToastKind};
use crate::services::responder::ResponseProvider;
use crate::services::store::StateStore;
use crate::services::typewriter::{Typewriter, AI_MESSAGE_INTERVAL_MS};
use crate::utils::id;
use crate::utils::time;


/// 聊天会话引擎
///
/// 可廉价克隆（内部 `Arc`），回复生成等后台任务持有克隆继续工作。
#[derive(Clone)]
pub struct ChatEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    /// 应用状态：编排层注入的共享实例
    state: Arc<RwLock<AppState>>,

    /// 持久化存储：每个完成的动作之后保存
    store: Arc<StateStore>,

    /// 回复提供者：演示实现为固定模板，可替换为真实推理客户端
    responder: Arc<dyn ResponseProvider>,

    /// 渲染指令出口
    renderer: Arc<dyn Renderer>,

    /// 回复在途标志：提交时置位，回复落地后清除
    response_pending: AtomicBool,

    /// 打字机实例表：消息 id → 动画器
    animations: Mutex<HashMap<String, Arc<Typewriter>>>,

    /// 导出目录覆盖：`None` 时使用系统下载目录
    export_dir: Option<PathBuf>,
}

impl ChatEngine {
    /// 创建引擎
    ///
    /// # 参数
    /// - `export_dir` - 导出 HTML 的目标目录；`None` 使用系统下载目录
    pub fn new(
        state: Arc<RwLock<AppState>>,
        store: Arc<StateStore>,
        responder: Arc<dyn ResponseProvider>,
        renderer: Arc<dyn Renderer>,
        export_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                state,
                store,
                responder,
                renderer,
                response_pending: AtomicBool::new(false),
                animations: Mutex::new(HashMap::new()),
                export_dir,
            }),
        }
    }

    /// 回复是否在途
    pub fn is_response_pending(&self) -> bool {
        self.inner.response_pending.load(Ordering::SeqCst)
    }

    // ======== 消息提交与回复 ========

    /// 提交一条用户消息
    ///
    /// 空白输入静默忽略。没有激活会话时先创建会话并派生标题。
    /// 用户消息立即渲染并持久化，随后显示思考指示器并派生回复任务；
    /// 回复在途期间的重复提交被拒绝。
    pub async fn submit(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        // 在途护栏：抢占失败说明上一条回复还没落地
        if self.inner.response_pending.swap(true, Ordering::SeqCst) {
            log::debug!("回复生成中，忽略新的提交");
            return;
        }

        let mut created_session = false;
        let (user_message, chat_id) = {
            let mut state = self.state_write();
            let chat_id = match state.current_chat_id.clone() {
                Some(chat_id) => chat_id,
                None => {
                    let chat_id = id::generate_id();
                    state.current_chat_id = Some(chat_id.clone());
                    state
                        .chat_history
                        .insert(0, ChatSession::new(chat_id.clone(), trimmed));
                    created_session = true;
                    chat_id
                }
            };

            let message = Message::user(trimmed);
            if let Some(chat) = state.current_chat_mut() {
                chat.messages.push(message.clone());
            }
            (message, chat_id)
        };

        if created_session {
            self.push_history();
        }

        let renderer = &self.inner.renderer;
        renderer.append_message(&user_message);
        self.persist();

        // 清空输入面并禁用发送控件，直到回复落地
        renderer.set_input("");
        renderer.set_send_enabled(false);

        let indicator_id = format!("thinking-{}", Utc::now().timestamp_millis());
        renderer.show_thinking_indicator(&indicator_id);

        let engine = self.clone();
        let user_text = trimmed.to_string();
        tokio::spawn(async move {
            engine.complete_response(chat_id, user_text).await;
        });
    }

    /// 回复任务：等待提供者产出，移除指示器并落地 AI 消息
    async fn complete_response(&self, chat_id: String, user_text: String) {
        let deep_thinking = self.state_read().deep_thinking_enabled;
        let reply = self
            .inner
            .responder
            .generate(&user_text, deep_thinking)
            .await;

        // 指示器移除与回复渲染连续发出：指示器绝不与回复共存
        let renderer = &self.inner.renderer;
        renderer.remove_thinking_indicator();

        let message = Message::ai(reply.content, reply.process_nodes, reply.thinking);
        let appended = {
            let mut state = self.state_write();
            match state.chat_history.iter_mut().find(|chat| chat.id == chat_id) {
                Some(chat) => {
                    chat.messages.push(message.clone());
                    true
                }
                None => false,
            }
        };

        if appended {
            renderer.append_message(&message);
            self.persist();
            self.animate_message(&message.id, &message.content);
        } else {
            // 会话在等待期间被清除（如退出登录）
            log::debug!("目标会话已不存在，丢弃生成的回复");
        }

        renderer.set_send_enabled(true);
        self.inner.response_pending.store(false, Ordering::SeqCst);
    }

    // ======== 会话切换 ========

    /// 新建对话：清空激活会话，回到欢迎屏
    ///
    /// 真正的会话对象在下一条消息提交时才创建。
    pub fn new_chat(&self) {
        {
            self.state_write().current_chat_id = None;
        }
        self.inner.renderer.clear_messages();
        self.push_history();
        self.inner.renderer.show_toast("新对话已创建", ToastKind::Success);
    }

    /// 切换到历史会话
    ///
    /// id 不存在时为空操作。重新渲染该会话的全部消息，
    /// AI 消息照常走打字机动画。
    pub fn select_chat(&self, chat_id: &str) {
        let messages = {
            let mut state = self.state_write();
            let Some(messages) = state
                .chat_history
                .iter()
                .find(|chat| chat.id == chat_id)
                .map(|chat| chat.messages.clone())
            else {
                return;
            };
            state.current_chat_id = Some(chat_id.to_string());
            messages
        };

        let renderer = &self.inner.renderer;
        renderer.clear_messages();
        for message in &messages {
            renderer.append_message(message);
        }
        self.push_history();

        for message in messages.iter().filter(|m| m.role == Role::Ai) {
            self.animate_message(&message.id, &message.content);
        }
    }

    /// 设置深度思考模式开关
    pub fn set_deep_thinking(&self, enabled: bool) {
        self.state_write().deep_thinking_enabled = enabled;
    }

    // ======== 复制与导出 ========

    /// 复制消息原文到剪贴板
    ///
    /// 消息不存在时静默空操作。剪贴板写入失败走渲染层的
    /// 选中-复制降级路径，结果按乐观策略统一报成功。
    pub fn copy_message(&self, message_id: &str) {
        let Some(content) = self.find_message_content(message_id) else {
            log::debug!("复制目标消息不存在: {}", message_id);
            return;
        };

        let renderer = &self.inner.renderer;
        if let Err(e) = renderer.write_clipboard(&content) {
            log::warn!("{}，改用降级复制方案", e);
            renderer.fallback_copy(&content);
        }
        renderer.show_toast("复制成功", ToastKind::Success);
    }

    /// 导出消息为独立 HTML 文档
    ///
    /// 写入 `ai-response-<消息ID>.html` 到导出目录（默认系统下载目录）。
    ///
    /// # 返回值
    /// - `Ok(Some(path))` - 导出成功，返回生成文件的路径
    /// - `Ok(None)` - 消息不存在，空操作
    ///
    /// # 错误
    /// 导出目录不可用或文件写入失败
    pub async fn export_message(&self, message_id: &str) -> Result<Option<String>, String> {
        let Some(content) = self.find_message_content(message_id) else {
            log::debug!("导出目标消息不存在: {}", message_id);
            return Ok(None);
        };

        let document = export::render_document(&content);
        let dir = self
            .inner
            .export_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .ok_or_else(|| "无法确定导出目录".to_string())?;

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| format!("创建导出目录失败: {}", e))?;

        let path = dir.join(export::export_file_name(message_id));
        tokio::fs::write(&path, document)
            .await
            .map_err(|e| format!("写入导出文件失败: {}", e))?;

        self.inner
            .renderer
            .show_toast("HTML文件已生成", ToastKind::Success);
        Ok(Some(path.to_string_lossy().to_string()))
    }

    // ======== 历史列表 ========

    /// 派生侧边栏历史列表
    pub fn history_items(&self) -> Vec<HistoryItem> {
        let state = self.state_read();
        state
            .chat_history
            .iter()
            .map(|chat| HistoryItem {
                id: chat.id.clone(),
                title: chat.title.clone(),
                time_label: time::format_time(chat.created_at),
                active: state.current_chat_id.as_deref() == Some(chat.id.as_str()),
            })
            .collect()
    }

    /// 推送最新历史列表
    pub fn push_history(&self) {
        let items = self.history_items();
        self.inner.renderer.history_changed(&items);
    }

    // ======== 内部辅助 ========

    /// 启动一条消息的打字机动画
    ///
    /// 同一消息已有运行中的动画时为空操作（不打断）。
    fn animate_message(&self, message_id: &str, content: &str) {
        let typewriter = {
            let mut animations = self
                .inner
                .animations
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if let Some(existing) = animations.get(message_id) {
                if existing.is_running() {
                    return;
                }
            }

            let typewriter = Arc::new(Typewriter::new(content, AI_MESSAGE_INTERVAL_MS));
            animations.insert(message_id.to_string(), Arc::clone(&typewriter));
            typewriter
        };

        let renderer = Arc::clone(&self.inner.renderer);
        let target = message_id.to_string();
        tokio::spawn(async move {
            typewriter
                .start(move |frame, done| renderer.typewriter_frame(&target, frame, done))
                .await;
        });
    }

    /// 按 id 查找消息并克隆其内容
    fn find_message_content(&self, message_id: &str) -> Option<String> {
        self.state_read()
            .find_message(message_id)
            .map(|message| message.content.clone())
    }

    /// 保存持久化子集
    fn persist(&self) {
        let snapshot = self.state_read().snapshot();
        self.inner.store.save(&snapshot);
    }

    fn state_read(&self) -> RwLockReadGuard<'_, AppState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_write(&self) -> RwLockWriteGuard<'_, AppState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
