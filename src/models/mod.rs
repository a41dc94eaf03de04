//! # 数据模型模块
//!
//! 定义了与前端渲染层一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize`（部分加 `Deserialize`），用于 Tauri IPC 传输和状态文件读写。
//! - `chat` - 会话和消息的数据结构（ChatSession、Message、ProcessNode）
//! - `state` - 应用全局状态和持久化子集（AppState、PersistedState）
//! - `layout` - 侧边栏响应式布局状态（LayoutState、LayoutSnapshot）

pub mod chat;
pub mod layout;
pub mod state;
