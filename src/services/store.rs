//! # 持久化状态存储服务
//!
//! 把应用状态的持久化子集（`{userName, isLoggedIn, chatHistory, currentChatId}`）
//! 作为单条 JSON 记录读写到固定的状态文件。
//!
//! ## 失败策略
//! 存储不可用或记录损坏时，降级为本会话内的内存影子副本：
//! - `save` 写文件失败 → 记录保存在影子副本中，仅 `log::warn!`
//! - `load` 文件缺失/损坏 → 优先返回影子副本，否则返回默认值
//!
//! 三个操作对调用方都是不抛错的；持久化失败绝不中断聊天流程。

use std::path::PathBuf;
use std::sync::RwLock;

use crate::models::state::PersistedState;

/// 状态文件名
const STATE_FILE_NAME: &str = "ai-product-expert-state.json";

/// 持久化状态存储
///
/// 通过 `Arc` 注入各服务共享。内部的影子副本用 `RwLock` 保护，
/// Tauri command 可能在不同线程上并发触发保存。
pub struct StateStore {
    /// 状态文件的绝对路径
    path: PathBuf,

    /// 内存影子副本：仅在文件读写失败后启用
    shadow: RwLock<Option<PersistedState>>,
}

impl StateStore {
    /// 创建指向默认状态文件位置的存储
    ///
    /// 状态文件独立存放在 `~/.tongyi/anan/` 目录下，
    /// 与其他应用数据分离。无法确定主目录时回退到当前工作目录
    /// （极端情况，后续写入多半失败并走影子副本）。
    pub fn new() -> Self {
        let base = dirs::home_dir()
            .map(|home| home.join(".tongyi").join("anan"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::at_path(base.join(STATE_FILE_NAME))
    }

    /// 创建指向指定文件路径的存储（测试注入临时目录）
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            shadow: RwLock::new(None),
        }
    }

    /// 保存持久化记录
    ///
    /// 序列化为 JSON 并整体覆盖状态文件。任何失败都降级为影子副本，
    /// 不向调用方抛错。
    pub fn save(&self, state: &PersistedState) {
        let content = match serde_json::to_string(state) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("序列化应用状态失败: {}", e);
                self.remember_shadow(state);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("创建状态目录失败: {}", e);
                self.remember_shadow(state);
                return;
            }
        }

        if let Err(e) = std::fs::write(&self.path, content) {
            log::warn!("写入状态文件失败: {}", e);
            self.remember_shadow(state);
        }
    }

    /// 加载持久化记录
    ///
    /// 文件缺失或损坏时按"无已存状态"处理：优先返回影子副本
    /// （本会话内有过保存失败），否则返回默认值。
    pub fn load(&self) -> PersistedState {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("解析状态文件失败，按无已存状态处理: {}", e);
                    self.shadow_or_default()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("读取状态文件失败: {}", e);
                }
                self.shadow_or_default()
            }
        }
    }

    /// 清除持久化记录
    ///
    /// 删除状态文件并丢弃影子副本。文件本就不存在视为成功。
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("删除状态文件失败: {}", e);
            }
        }
        if let Ok(mut shadow) = self.shadow.write() {
            *shadow = None;
        }
    }

    /// 把记录存入影子副本
    fn remember_shadow(&self, state: &PersistedState) {
        if let Ok(mut shadow) = self.shadow.write() {
            *shadow = Some(state.clone());
        }
    }

    /// 取出影子副本，没有则返回默认值
    fn shadow_or_default(&self) -> PersistedState {
        self.shadow
            .read()
            .ok()
            .and_then(|shadow| shadow.clone())
            .unwrap_or_default()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::{ChatSession, Message};

    fn sample_state() -> PersistedState {
        let mut chat = ChatSession::new("chat-1", "查询统一钛粒王T10的全部参数");
        chat.messages.push(Message::user("查询统一钛粒王T10的全部参数"));
        PersistedState {
            user_name: "Simon".to_string(),
            is_logged_in: true,
            chat_history: vec![chat],
            current_chat_id: Some("chat-1".to_string()),
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::at_path(dir.path().join("state.json"));

        let state = sample_state();
        store.save(&state);
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::at_path(dir.path().join("state.json"));
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_load_corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let store = StateStore::at_path(path);
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_unwritable_path_falls_back_to_shadow() {
        let dir = tempfile::tempdir().unwrap();
        // 让父"目录"是一个普通文件，create_dir_all 必然失败
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = StateStore::at_path(blocker.join("state.json"));
        let state = sample_state();
        store.save(&state);
        // 落盘失败，但影子副本仍可恢复完整记录
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_clear_removes_file_and_shadow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::at_path(path.clone());

        store.save(&sample_state());
        assert!(path.exists());

        store.clear();
        assert!(!path.exists());
        assert_eq!(store.load(), PersistedState::default());

        // 再次清除等价于一次（幂等）
        store.clear();
    }
}
