//! # 应用全局状态数据模型
//!
//! 定义了应用全局状态（AppState）和持久化子集（PersistedState）。
//!
//! AppState 由编排层（`lib.rs`）在启动时构造并以 `Arc<RwLock<AppState>>`
//! 注入各服务，全程不存在环境全局变量。持久化时仅序列化
//! `{userName, isLoggedIn, chatHistory, currentChatId}` 四个字段，
//! 其余字段（侧边栏折叠、深度思考开关、当前页面）只在会话内存中存活。

use serde::{Deserialize, Serialize};

use crate::models::chat::{ChatSession, Message};

/// 默认用户名
pub const DEFAULT_USER_NAME: &str = "Simon";

/// 当前激活页面
///
/// 应用只有两个页面，任意时刻恰好一个处于激活状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// 登录页
    Login,
    /// 主界面（侧边栏 + 欢迎屏/聊天面板）
    Main,
}

/// 应用全局状态
///
/// 进程内单例，生命周期：启动加载 → 每次用户/AI 动作后变更 →
/// 每次变更后序列化持久化子集 → 退出登录时清除。
///
/// 不变量：`current_chat_id` 非空时，`chat_history` 中恰好存在一个
/// 具有该 id 的会话（[`AppState::restore`] 在加载时强制修复违例数据）。
#[derive(Debug, Clone)]
pub struct AppState {
    /// 用户名：演示实现固定为默认值，真实登录接入后由登录提供方填充
    pub user_name: String,

    /// 是否已登录
    pub is_logged_in: bool,

    /// 当前激活会话的 id：`None` 表示处于欢迎屏/空白新对话
    pub current_chat_id: Option<String>,

    /// 会话历史：最新会话在前
    pub chat_history: Vec<ChatSession>,

    /// 侧边栏是否折叠（仅桌面端语义，移动端的展开状态是瞬态的）
    pub sidebar_collapsed: bool,

    /// 深度思考模式开关：决定 AI 回复是否生成思考过程文本
    pub deep_thinking_enabled: bool,

    /// 当前激活页面
    pub current_page: Page,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            is_logged_in: false,
            current_chat_id: None,
            chat_history: Vec::new(),
            sidebar_collapsed: false,
            deep_thinking_enabled: false,
            current_page: Page::Login,
        }
    }
}

impl AppState {
    /// 提取持久化子集
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            user_name: self.user_name.clone(),
            is_logged_in: self.is_logged_in,
            chat_history: self.chat_history.clone(),
            current_chat_id: self.current_chat_id.clone(),
        }
    }

    /// 将持久化记录合并回内存状态
    ///
    /// 非持久化字段保持当前值。若 `currentChatId` 指向的会话不存在
    /// （文件被外部篡改等情况），重置为 `None` 以维持不变量。
    pub fn restore(&mut self, persisted: PersistedState) {
        self.user_name = persisted.user_name;
        self.is_logged_in = persisted.is_logged_in;
        self.chat_history = persisted.chat_history;
        self.current_chat_id = persisted.current_chat_id;

        if let Some(id) = &self.current_chat_id {
            if !self.chat_history.iter().any(|chat| &chat.id == id) {
                log::warn!("持久化记录中 currentChatId 指向不存在的会话，已重置");
                self.current_chat_id = None;
            }
        }
    }

    /// 重置为默认值（退出登录）
    ///
    /// 与初始默认值一致：默认用户名、未登录、无历史会话。
    /// 侧边栏折叠和深度思考开关保持当前值（与持久化子集一样不参与清除）。
    pub fn reset(&mut self) {
        self.user_name = DEFAULT_USER_NAME.to_string();
        self.is_logged_in = false;
        self.current_chat_id = None;
        self.chat_history.clear();
    }

    /// 获取当前激活会话的可变引用
    pub fn current_chat_mut(&mut self) -> Option<&mut ChatSession> {
        let id = self.current_chat_id.clone()?;
        self.chat_history.iter_mut().find(|chat| chat.id == id)
    }

    /// 按消息 id 在所有会话中线性查找消息
    ///
    /// 复制/导出操作的定位入口。消息 id 在创建时保证全局唯一，
    /// 因此首个匹配即唯一匹配。
    pub fn find_message(&self, message_id: &str) -> Option<&Message> {
        self.chat_history
            .iter()
            .flat_map(|chat| chat.messages.iter())
            .find(|msg| msg.id == message_id)
    }
}

/// 持久化状态记录
///
/// 单键值存储的唯一 JSON 记录，camelCase 字段与原始格式保持一致：
/// `{userName, isLoggedIn, chatHistory, currentChatId}`。
/// 无 schema 版本字段，缺失或损坏的记录按"无已存状态"处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// 用户名
    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// 是否已登录
    #[serde(default)]
    pub is_logged_in: bool,

    /// 会话历史（最新在前）
    #[serde(default)]
    pub chat_history: Vec<ChatSession>,

    /// 当前激活会话 id
    #[serde(default)]
    pub current_chat_id: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            is_logged_in: false,
            chat_history: Vec::new(),
            current_chat_id: None,
        }
    }
}

fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatSession;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.user_name, "Simon");
        assert!(!state.is_logged_in);
        assert!(state.current_chat_id.is_none());
        assert!(state.chat_history.is_empty());
        assert_eq!(state.current_page, Page::Login);
    }

    #[test]
    fn test_restore_resets_dangling_current_chat_id() {
        let mut state = AppState::default();
        state.restore(PersistedState {
            user_name: "Simon".to_string(),
            is_logged_in: true,
            chat_history: vec![ChatSession::new("chat-1", "第一条消息")],
            current_chat_id: Some("chat-不存在".to_string()),
        });
        assert!(state.current_chat_id.is_none());
        assert!(state.is_logged_in);
        assert_eq!(state.chat_history.len(), 1);
    }

    #[test]
    fn test_restore_keeps_valid_current_chat_id() {
        let mut state = AppState::default();
        state.restore(PersistedState {
            user_name: "Simon".to_string(),
            is_logged_in: true,
            chat_history: vec![ChatSession::new("chat-1", "第一条消息")],
            current_chat_id: Some("chat-1".to_string()),
        });
        assert_eq!(state.current_chat_id.as_deref(), Some("chat-1"));
        assert!(state.current_chat_mut().is_some());
    }

    #[test]
    fn test_reset_clears_persisted_fields_only() {
        let mut state = AppState {
            user_name: "另一个用户".to_string(),
            is_logged_in: true,
            current_chat_id: Some("chat-1".to_string()),
            chat_history: vec![ChatSession::new("chat-1", "消息")],
            sidebar_collapsed: true,
            deep_thinking_enabled: true,
            current_page: Page::Main,
        };
        state.reset();
        assert_eq!(state.user_name, "Simon");
        assert!(!state.is_logged_in);
        assert!(state.current_chat_id.is_none());
        assert!(state.chat_history.is_empty());
        // 非持久化字段不受清除影响
        assert!(state.sidebar_collapsed);
        assert!(state.deep_thinking_enabled);
    }

    #[test]
    fn test_persisted_state_camel_case_fields() {
        let persisted = AppState::default().snapshot();
        let value = serde_json::to_value(&persisted).unwrap();
        assert!(value.get("userName").is_some());
        assert!(value.get("isLoggedIn").is_some());
        assert!(value.get("chatHistory").is_some());
        assert!(value.get("currentChatId").is_some());
    }

    #[test]
    fn test_persisted_state_missing_fields_fall_back_to_defaults() {
        let persisted: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(persisted.user_name, "Simon");
        assert!(!persisted.is_logged_in);
        assert!(persisted.chat_history.is_empty());
        assert!(persisted.current_chat_id.is_none());
    }
}
