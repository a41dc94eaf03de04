//! # 布局 Tauri Commands
//!
//! 提供侧边栏切换和视口变化相关的 command 处理函数：
//! - `toggle_sidebar` / `expand_sidebar` - 侧边栏切换与展开
//! - `open_sidebar` / `close_sidebar` - 移动端抽屉的显式开合
//! - `viewport_resized` - 窗口宽度变化（250ms 防抖）
//! - `orientation_changed` - 屏幕方向变化
//!
//! 渲染层负责把 window 的 resize/orientationchange 事件连同
//! 最新宽度转发到这里，状态机推导后通过 `layout:state` 事件回推。

use std::sync::Arc;

use tauri::State;

use crate::AppContext;

/// 切换侧边栏
///
/// 桌面端翻转折叠/展开并保存；移动端开合抽屉。
#[tauri::command]
pub async fn toggle_sidebar(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.toggle();
    Ok(())
}

/// 展开侧边栏（桌面端折叠条上的展开按钮）
#[tauri::command]
pub async fn expand_sidebar(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.expand();
    Ok(())
}

/// 打开移动端抽屉
#[tauri::command]
pub async fn open_sidebar(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.open_mobile();
    Ok(())
}

/// 关闭移动端抽屉（遮罩点击等）
#[tauri::command]
pub async fn close_sidebar(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.close_mobile();
    Ok(())
}

/// 处理窗口宽度变化
///
/// resize 事件风暴经防抖器合并，只有静默期后的最后一次宽度
/// 驱动状态机。
#[tauri::command]
pub async fn viewport_resized(width: u32, ctx: State<'_, AppContext>) -> Result<(), String> {
    let layout = Arc::clone(&ctx.layout);
    ctx.resize_debouncer.call(move || {
        layout.handle_resize(width);
    });
    Ok(())
}

/// 处理屏幕方向变化
///
/// 不防抖：方向变化是离散事件，立即重新推导归类并重排遮罩层。
#[tauri::command]
pub async fn orientation_changed(width: u32, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.handle_orientation_change(width);
    Ok(())
}
