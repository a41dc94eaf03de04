//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层解耦：
//! - `engine` - 聊天会话引擎：会话/消息生命周期、回复编排、复制导出
//! - `responder` - 回复提供者接口和固定模板演示实现
//! - `typewriter` - 打字机动画：逐字推送 + 光标标记
//! - `layout` - 侧边栏响应式布局状态机
//! - `modal` - 全局唯一模态框管理
//! - `tasks` - 欢迎屏任务卡片的表单校验和消息拼装
//! - `store` - 持久化状态存储（单 JSON 记录 + 内存影子降级）
//! - `export` - 回复导出：轻量 Markdown 转 HTML 文档
//! - `render` - 渲染指令边界（Renderer trait + Tauri 事件实现）

pub mod engine;
pub mod export;
pub mod layout;
pub mod modal;
pub mod render;
pub mod responder;
pub mod store;
pub mod tasks;
pub mod typewriter;
