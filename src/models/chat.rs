//! # 会话和消息数据模型
//!
//! 定义了聊天会话（ChatSession）、消息（Message）和流程节点（ProcessNode）等结构体。
//! 这是整个应用最核心的数据结构，表示用户与 AI 之间的交互记录。
//!
//! 所有结构体通过 `serde` 的 Serialize/Deserialize 特征实现：
//! - Tauri IPC 序列化（Rust → JS）：render 事件携带消息数据传输到渲染层
//! - 状态文件读写：整个 `chatHistory` 随持久化记录一起落盘
//!
//! 时间戳统一使用 `chrono::DateTime<Utc>`，serde 序列化为 ISO 8601 字符串，
//! 渲染层接收后可直接 `new Date(timestamp)` 还原。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::id;

/// 会话标题的最大字符数
///
/// 标题取自会话的第一条用户消息，超过该长度时截断并追加省略号。
/// 按字符（而非字节）计数，中文内容下同样成立。
pub const TITLE_MAX_CHARS: usize = 20;

/// 消息角色
///
/// 区分用户消息和 AI 回复消息。序列化为小写字符串（"user" / "ai"），
/// 与持久化记录中的 `role` 字段保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 用户发送的消息
    User,
    /// AI 生成的回复消息
    Ai,
}

/// 流程节点状态
///
/// 表示 AI 回复"处理流程"清单中单个步骤的执行状态。
/// 演示实现中模板节点均为 `Completed`，其余状态为真实推理接入预留。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// 等待执行
    Pending,
    /// 执行中
    Processing,
    /// 已完成
    Completed,
    /// 执行出错
    Error,
}

/// 流程节点
///
/// AI 回复消息附带的处理步骤摘要条目，渲染层以可折叠清单展示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessNode {
    /// 步骤名称（如 "检索产品数据库"）
    pub name: String,

    /// 步骤状态
    pub status: NodeStatus,
}

/// 消息数据结构
///
/// 一条持久化消息，按 `role` 区分两种形态：
/// - 用户消息：仅有 `content`（原始文本）
/// - AI 消息：`content` 为 Markdown 风格文本，附带 `process_nodes`，
///   以及深度思考模式下的 `thinking` 理由文本
///
/// "正在思考"指示器是纯渲染层的临时占位，不构造 Message，也绝不落盘。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// 消息唯一标识符：由时间戳和随机后缀组合生成（全局唯一）
    pub id: String,

    /// 消息角色：user 或 ai
    pub role: Role,

    /// 消息内容：用户消息为原始文本，AI 消息为 Markdown 风格文本
    pub content: String,

    /// 处理流程节点列表（仅 AI 消息）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_nodes: Option<Vec<ProcessNode>>,

    /// 思考过程文本（仅 AI 消息，且仅在生成时深度思考模式开启）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,

    /// 消息创建时间
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// 构造一条用户消息
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: id::generate_id(),
            role: Role::User,
            content: content.into(),
            process_nodes: None,
            thinking: None,
            timestamp: Utc::now(),
        }
    }

    /// 构造一条 AI 回复消息
    ///
    /// # 参数
    /// - `content` - 回复正文
    /// - `process_nodes` - 处理流程清单
    /// - `thinking` - 思考过程文本；`None` 表示生成时未开启深度思考
    pub fn ai(
        content: impl Into<String>,
        process_nodes: Vec<ProcessNode>,
        thinking: Option<String>,
    ) -> Self {
        Self {
            id: id::generate_id(),
            role: Role::Ai,
            content: content.into(),
            process_nodes: Some(process_nodes),
            thinking,
            timestamp: Utc::now(),
        }
    }
}

/// 会话数据结构
///
/// 表示一个独立的对话线程。在用户发送新对话的第一条消息时创建，
/// 核心逻辑从不删除会话（仅全量清除状态时一并清除）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// 会话唯一标识符
    pub id: String,

    /// 会话标题：派生自第一条用户消息（见 [`derive_title`]）
    pub title: String,

    /// 消息列表：按时间追加顺序排列
    pub messages: Vec<Message>,

    /// 会话创建时间
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// 以给定 id 和首条消息文本创建空会话
    pub fn new(id: impl Into<String>, first_message: &str) -> Self {
        Self {
            id: id.into(),
            title: derive_title(first_message),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// 从第一条用户消息派生会话标题
///
/// 超过 [`TITLE_MAX_CHARS`] 个字符时截取前 20 个字符并追加 "..."。
/// 按 `char` 截取，避免在多字节中文字符中间截断。
pub fn derive_title(first_message: &str) -> String {
    let char_count = first_message.chars().count();
    if char_count > TITLE_MAX_CHARS {
        let truncated: String = first_message.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        first_message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_short_input_unchanged() {
        assert_eq!(derive_title("查询产品参数"), "查询产品参数");
    }

    #[test]
    fn test_derive_title_exactly_20_chars_unchanged() {
        let text = "一二三四五六七八九十一二三四五六七八九十";
        assert_eq!(text.chars().count(), 20);
        assert_eq!(derive_title(text), text);
    }

    #[test]
    fn test_derive_title_long_input_truncated_with_ellipsis() {
        let text = "查询统一钛粒王T10全合成柴油机油的全部技术参数和包装规格";
        let title = derive_title(text);
        assert!(title.ends_with("..."));
        // 前 20 个字符 + 3 个省略点
        assert_eq!(title.chars().count(), 23);
        assert!(text.starts_with(&title[..title.len() - 3]));
    }

    #[test]
    fn test_message_roles_and_optional_fields() {
        let user = Message::user("你好");
        assert_eq!(user.role, Role::User);
        assert!(user.process_nodes.is_none());
        assert!(user.thinking.is_none());

        let ai = Message::ai(
            "回复内容",
            vec![ProcessNode {
                name: "生成回复内容".to_string(),
                status: NodeStatus::Completed,
            }],
            Some("思考".to_string()),
        );
        assert_eq!(ai.role, Role::Ai);
        assert_eq!(ai.process_nodes.as_ref().map(|n| n.len()), Some(1));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("a");
        let b = Message::user("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let user = serde_json::to_value(Role::User).unwrap();
        let ai = serde_json::to_value(Role::Ai).unwrap();
        assert_eq!(user, serde_json::json!("user"));
        assert_eq!(ai, serde_json::json!("ai"));

        let status = serde_json::to_value(NodeStatus::Completed).unwrap();
        assert_eq!(status, serde_json::json!("completed"));
    }
}
