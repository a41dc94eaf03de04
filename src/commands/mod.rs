//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `auth` - 启动快照、模拟登录和退出登录 commands
//! - `chat` - 消息提交、会话切换、复制/导出相关 commands
//! - `layout` - 侧边栏切换和视口变化相关 commands
//! - `welcome` - 欢迎屏打招呼、任务卡片表单和反馈 commands

pub mod auth;
pub mod chat;
pub mod layout;
pub mod welcome;
