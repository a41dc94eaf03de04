//! # AI产品专家 - Tauri 应用核心初始化模块
//!
//! 本模块负责 Tauri 应用的完整初始化流程，包括：
//! - 注册 Tauri 官方插件（文件定位、剪贴板、日志）
//! - 加载持久化状态并决定启动页面（已登录 → 主界面，否则登录页）
//! - 构造核心服务并显式注入共享状态（无环境全局变量）
//! - 注册自定义 Tauri commands（登录、聊天、布局、欢迎屏）
//! - 生成应用上下文并启动事件循环
//!
//! ## 架构说明
//! 通过将核心逻辑放在 `lib.rs` 而非 `main.rs` 中，
//! Tauri 可以在桌面端（`main.rs`）和移动端入口之间共享此初始化代码。
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层）
//! - `models/` - 数据模型（会话、消息、状态、布局）
//! - `services/` - 核心业务逻辑（聊天引擎、布局状态机、打字机等）
//! - `utils/` - 通用工具函数
//!
//! ## 渲染层约定
//! 渲染层 WebView 是薄适配器：启动时调用 `bootstrap` 拉取快照，
//! 随后监听 `chat:*` / `ui:*` / `layout:*` / `app:*` 事件增量更新界面，
//! 并把用户输入（含全局快捷键 Ctrl/Cmd+N → `new_chat`）转发为 command 调用。

mod commands;
mod models;
mod services;
#[cfg(test)]
mod test_support;
mod utils;

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tauri::Manager;

use models::state::{AppState, Page};
use services::engine::ChatEngine;
use services::layout::LayoutService;
use services::modal::ModalService;
use services::render::{Renderer, TauriRenderer};
use services::responder::CannedResponder;
use services::store::StateStore;
use services::typewriter::Typewriter;
use utils::debounce::Debouncer;

/// 启动时的视口宽度（与主窗口初始宽度一致）
const INITIAL_VIEWPORT_WIDTH: u32 = 1200;

/// resize 事件的防抖窗口（毫秒）
const RESIZE_DEBOUNCE_MS: u64 = 250;

/// 应用上下文
///
/// 注册为 Tauri managed state，所有 command 函数通过
/// `State<'_, AppContext>` 参数注入访问。共享状态由编排层在此构造
/// 并显式传入各服务，组件之间不存在环境全局变量。
pub(crate) struct AppContext {
    /// 应用全局状态
    pub state: Arc<RwLock<AppState>>,

    /// 持久化状态存储
    pub store: Arc<StateStore>,

    /// 渲染指令出口
    pub renderer: Arc<dyn Renderer>,

    /// 聊天会话引擎
    pub engine: ChatEngine,

    /// 侧边栏布局状态机
    pub layout: Arc<LayoutService>,

    /// 模态框服务
    pub modal: Arc<ModalService>,

    /// resize 事件防抖器
    pub resize_debouncer: Debouncer,

    /// 欢迎面打字机：保留实例用于运行中判重
    pub welcome_animation: Mutex<Option<Arc<Typewriter>>>,
}

impl AppContext {
    /// 读取应用状态（锁中毒时恢复内部数据）
    pub fn state_read(&self) -> RwLockReadGuard<'_, AppState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 写入应用状态（锁中毒时恢复内部数据）
    pub fn state_write(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// `#[cfg_attr(mobile, tauri::mobile_entry_point)]`：条件编译属性
// 当目标平台为移动端（Android/iOS）时，此属性将 `run()` 函数标记为
// Tauri 移动端入口点；在桌面端编译时不生效，`run()` 由 `main.rs` 直接调用。
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 构建并运行 Tauri 应用实例。该函数完成以下工作：
/// 1. 创建 `tauri::Builder` 默认实例并注册所需插件
/// 2. 注册所有自定义 Tauri commands
/// 3. 在 `setup` 钩子中加载持久化状态、构造核心服务并注册应用上下文
/// 4. 生成应用上下文并启动主事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件缺失或窗口创建失败），
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
pub fn run() {
    tauri::Builder::default()
        // === 官方插件注册 ===
        // Opener 插件：在系统文件管理器中定位导出的 HTML 文件
        .plugin(tauri_plugin_opener::init())
        // 剪贴板插件：后端直接写入"复制消息"的文本
        .plugin(tauri_plugin_clipboard_manager::init())
        // === 自定义 Tauri Commands 注册 ===
        // 所有 command 函数通过 `invoke_handler` 注册，前端通过 `invoke()` 调用
        .invoke_handler(tauri::generate_handler![
            // 启动和登录 commands
            commands::auth::bootstrap,
            commands::auth::login,
            commands::auth::logout,
            // 聊天 commands
            commands::chat::submit_message,
            commands::chat::new_chat,
            commands::chat::select_chat,
            commands::chat::copy_message,
            commands::chat::export_message,
            commands::chat::reveal_exported_file,
            commands::chat::set_deep_thinking,
            // 布局 commands
            commands::layout::toggle_sidebar,
            commands::layout::expand_sidebar,
            commands::layout::open_sidebar,
            commands::layout::close_sidebar,
            commands::layout::viewport_resized,
            commands::layout::orientation_changed,
            // 欢迎屏和任务卡片 commands
            commands::welcome::welcome_greeting,
            commands::welcome::open_task_modal,
            commands::welcome::dismiss_modal,
            commands::welcome::submit_product_query,
            commands::welcome::submit_comparison,
            commands::welcome::submit_solution,
            commands::welcome::submit_feedback,
        ])
        // `setup` 闭包：在应用窗口创建之前执行的初始化钩子
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // === 核心服务构造与状态注入 ===
            let renderer: Arc<dyn Renderer> =
                Arc::new(TauriRenderer::new(app.handle().clone()));
            let store = Arc::new(StateStore::new());

            // 加载持久化状态并决定启动页面
            let mut initial = AppState::default();
            initial.restore(store.load());
            initial.current_page = if initial.is_logged_in {
                Page::Main
            } else {
                Page::Login
            };
            let state = Arc::new(RwLock::new(initial));

            let layout = Arc::new(LayoutService::new(
                Arc::clone(&state),
                Arc::clone(&store),
                Arc::clone(&renderer),
                INITIAL_VIEWPORT_WIDTH,
            ));
            let engine = ChatEngine::new(
                Arc::clone(&state),
                Arc::clone(&store),
                // 演示用固定模板提供者；真实推理客户端实现同一 trait 即可替换
                Arc::new(CannedResponder::new()),
                Arc::clone(&renderer),
                None,
            );
            let modal = Arc::new(ModalService::new(Arc::clone(&renderer)));

            app.manage(AppContext {
                state,
                store,
                renderer,
                engine,
                layout,
                modal,
                resize_debouncer: Debouncer::new(RESIZE_DEBOUNCE_MS),
                welcome_animation: Mutex::new(None),
            });

            Ok(())
        })
        // `tauri::generate_context!()` 宏：在编译时读取 `tauri.conf.json` 配置文件，
        // 生成包含应用名称、窗口配置、安全策略等信息的上下文对象。
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
