//! # 聊天 Tauri Commands
//!
//! 提供消息和会话相关的 command 处理函数，全部是聊天引擎之上的
//! 薄 IPC 层：
//! - `submit_message` - 提交用户消息（Enter/发送按钮）
//! - `new_chat` - 新建对话（侧边栏按钮或 Ctrl/Cmd+N 快捷键）
//! - `select_chat` - 切换到历史会话
//! - `copy_message` / `export_message` - 复制和导出消息
//! - `reveal_exported_file` - 在文件管理器中定位导出的 HTML
//! - `set_deep_thinking` - 深度思考开关

use tauri::State;
use tauri_plugin_opener::OpenerExt;

use crate::AppContext;

/// 提交一条用户消息
///
/// 空白输入由引擎静默忽略；回复在途时的重复提交同样被引擎拒绝。
#[tauri::command]
pub async fn submit_message(text: String, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.engine.submit(&text).await;
    Ok(())
}

/// 新建对话
///
/// 移动端抽屉打开时先关闭抽屉（等待关闭动画）再清空激活会话。
/// 渲染层把全局快捷键 Ctrl/Cmd+N 也转发到此 command。
#[tauri::command]
pub async fn new_chat(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.close_for_action().await;
    ctx.engine.new_chat();
    Ok(())
}

/// 切换到指定历史会话
///
/// id 不存在时为空操作。移动端抽屉打开时先关闭抽屉再切换。
#[tauri::command]
pub async fn select_chat(chat_id: String, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.close_for_action().await;
    ctx.engine.select_chat(&chat_id);
    Ok(())
}

/// 复制消息原文到剪贴板
#[tauri::command]
pub async fn copy_message(message_id: String, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.engine.copy_message(&message_id);
    Ok(())
}

/// 导出消息为独立 HTML 文档
///
/// # 返回值
/// 生成文件的路径；消息不存在时为 `None`
#[tauri::command]
pub async fn export_message(
    message_id: String,
    ctx: State<'_, AppContext>,
) -> Result<Option<String>, String> {
    ctx.engine.export_message(&message_id).await
}

/// 在系统文件管理器中定位导出的 HTML 文件
#[tauri::command]
pub async fn reveal_exported_file(path: String, app: tauri::AppHandle) -> Result<(), String> {
    app.opener()
        .reveal_item_in_dir(&path)
        .map_err(|e| format!("定位导出文件失败: {}", e))
}

/// 设置深度思考模式开关
#[tauri::command]
pub async fn set_deep_thinking(enabled: bool, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.engine.set_deep_thinking(enabled);
    Ok(())
}
