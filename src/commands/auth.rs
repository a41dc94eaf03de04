//! # 启动和登录 Tauri Commands
//!
//! 提供页面编排相关的 command 处理函数：
//! - `bootstrap` - 渲染层启动时拉取完整的界面快照
//! - `login` - 模拟第三方登录（微信/钉钉）
//! - `logout` - 退出登录并清除持久化状态
//!
//! 登录是模拟的提供方调用：禁用按钮 + 加载动画、固定延时后标记登录、
//! 持久化、成功 Toast，再延时切换到主界面。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tauri::State;

use crate::models::chat::Message;
use crate::models::layout::LayoutSnapshot;
use crate::models::state::Page;
use crate::services::render::{HistoryItem, ToastKind};
use crate::AppContext;

/// 模拟登录提供方调用的延时（毫秒）
const LOGIN_DELAY_MS: u64 = 1500;

/// 登录成功 Toast 之后切换页面的延时（毫秒）
const PAGE_SWITCH_DELAY_MS: u64 = 1000;

/// 登录提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Wechat,
    Dingtalk,
}

impl Provider {
    /// 事件负载中使用的标识符
    fn as_str(self) -> &'static str {
        match self {
            Provider::Wechat => "wechat",
            Provider::Dingtalk => "dingtalk",
        }
    }

    /// Toast 文案中的中文名称
    fn label(self) -> &'static str {
        match self {
            Provider::Wechat => "微信",
            Provider::Dingtalk => "钉钉",
        }
    }
}

/// 启动界面快照
///
/// 渲染层启动时一次性拉取，据此绘制初始界面；
/// 之后的全部变化通过 render 事件增量推送。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapSnapshot {
    /// 应显示的页面（已登录为 main，否则 login）
    pub page: Page,

    /// 用户名
    pub user_name: String,

    /// 深度思考开关状态
    pub deep_thinking_enabled: bool,

    /// 侧边栏历史列表
    pub history: Vec<HistoryItem>,

    /// 布局快照
    pub layout: LayoutSnapshot,

    /// 当前激活会话的消息（无激活会话时为空，显示欢迎屏）
    pub current_messages: Vec<Message>,
}

/// 拉取启动界面快照
///
/// 持久化状态已在应用 setup 阶段加载完成，这里只做只读汇总。
#[tauri::command]
pub async fn bootstrap(ctx: State<'_, AppContext>) -> Result<BootstrapSnapshot, String> {
    let history = ctx.engine.history_items();
    let layout = ctx.layout.snapshot();

    let state = ctx.state_read();
    let current_messages = state
        .current_chat_id
        .as_ref()
        .and_then(|id| state.chat_history.iter().find(|chat| &chat.id == id))
        .map(|chat| chat.messages.clone())
        .unwrap_or_default();

    Ok(BootstrapSnapshot {
        page: state.current_page,
        user_name: state.user_name.clone(),
        deep_thinking_enabled: state.deep_thinking_enabled,
        history,
        layout,
        current_messages,
    })
}

/// 模拟第三方登录
///
/// 流程：按钮进入进行中状态 → 固定延时 → 标记已登录并持久化 →
/// 成功 Toast → 再延时切换到主界面。
#[tauri::command]
pub async fn login(provider: Provider, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.renderer.login_pending(provider.as_str(), true);

    // 模拟提供方调用耗时
    tokio::time::sleep(Duration::from_millis(LOGIN_DELAY_MS)).await;

    let snapshot = {
        let mut state = ctx.state_write();
        state.is_logged_in = true;
        state.snapshot()
    };
    ctx.store.save(&snapshot);

    ctx.renderer.show_toast(
        &format!("使用{}登录成功", provider.label()),
        ToastKind::Success,
    );

    tokio::time::sleep(Duration::from_millis(PAGE_SWITCH_DELAY_MS)).await;

    {
        let mut state = ctx.state_write();
        state.current_page = Page::Main;
    }
    ctx.renderer.page_changed(Page::Main);
    ctx.renderer.login_pending(provider.as_str(), false);

    Ok(())
}

/// 退出登录
///
/// 确认对话由渲染层负责，到达这里即执行。移动端抽屉打开时
/// 先关闭抽屉再退出。清除持久化记录并回到登录页。
#[tauri::command]
pub async fn logout(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.close_for_action().await;

    ctx.store.clear();
    {
        let mut state = ctx.state_write();
        state.reset();
        state.current_page = Page::Login;
    }

    ctx.renderer.clear_messages();
    ctx.engine.push_history();
    ctx.renderer.page_changed(Page::Login);
    ctx.renderer.show_toast("已退出登录", ToastKind::Info);

    Ok(())
}
