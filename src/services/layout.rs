//! # 侧边栏响应式布局状态机服务
//!
//! 管理侧边栏在桌面/移动两个状态族之间的切换：
//! - 桌面端（宽度 > 768px）：折叠/展开，折叠标记存活在应用状态中
//! - 移动端（宽度 ≤ 768px）：抽屉式打开/关闭，打开标记纯瞬态，
//!   伴随遮罩层可见和背景滚动锁定两个标志
//!
//! ## 断点穿越规则
//! - 桌面 → 移动：强制进入 `mobile-closed`（抽屉不会凭空打开）
//! - 移动 → 桌面：恢复折叠标记决定的桌面状态
//!
//! ## 先关抽屉再行动
//! 移动端抽屉打开时，新建对话/切换历史/反馈/退出登录等动作
//! 先关闭抽屉并等待关闭动画时长，再执行各自的效果，
//! 保证内容变化发生在关闭过渡完成之后。

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::models::layout::{is_mobile_width, LayoutSnapshot, LayoutState};
use crate::models::state::AppState;
use crate::services::render::Renderer;
use crate::services::store::StateStore;

/// 移动端抽屉关闭动画时长（毫秒）
///
/// 先关抽屉再行动的动作在关闭后等待该时长。
pub const SIDEBAR_CLOSE_DELAY_MS: u64 = 300;

/// 侧边栏布局状态机
pub struct LayoutService {
    /// 应用状态：读写桌面端折叠标记
    state: Arc<RwLock<AppState>>,

    /// 持久化存储：桌面端切换后保存
    store: Arc<StateStore>,

    /// 渲染指令出口
    renderer: Arc<dyn Renderer>,

    /// 最近一次上报的视口宽度（px）
    viewport_width: AtomicU32,

    /// 移动端抽屉打开标记：瞬态，从不持久化
    mobile_open: AtomicBool,
}

impl LayoutService {
    /// 创建状态机
    ///
    /// # 参数
    /// - `initial_width` - 启动时的视口宽度（主窗口初始宽度）
    pub fn new(
        state: Arc<RwLock<AppState>>,
        store: Arc<StateStore>,
        renderer: Arc<dyn Renderer>,
        initial_width: u32,
    ) -> Self {
        Self {
            state,
            store,
            renderer,
            viewport_width: AtomicU32::new(initial_width),
            mobile_open: AtomicBool::new(false),
        }
    }

    /// 推导当前布局状态
    pub fn layout_state(&self) -> LayoutState {
        let width = self.viewport_width.load(Ordering::SeqCst);
        if is_mobile_width(width) {
            if self.mobile_open.load(Ordering::SeqCst) {
                LayoutState::MobileOpen
            } else {
                LayoutState::MobileClosed
            }
        } else {
            let collapsed = self
                .state
                .read()
                .map(|state| state.sidebar_collapsed)
                .unwrap_or(false);
            if collapsed {
                LayoutState::DesktopCollapsed
            } else {
                LayoutState::DesktopExpanded
            }
        }
    }

    /// 生成当前布局快照
    pub fn snapshot(&self) -> LayoutSnapshot {
        let state = self.layout_state();
        let drawer_open = state == LayoutState::MobileOpen;
        LayoutSnapshot {
            state,
            overlay_visible: drawer_open,
            scroll_locked: drawer_open,
        }
    }

    /// 切换侧边栏
    ///
    /// 移动端在打开/关闭之间切换抽屉；桌面端翻转折叠标记并触发保存。
    pub fn toggle(&self) {
        if self.layout_state().is_mobile() {
            if self.mobile_open.load(Ordering::SeqCst) {
                self.close_mobile();
            } else {
                self.open_mobile();
            }
        } else {
            self.set_desktop_collapsed(|collapsed| !collapsed);
        }
    }

    /// 展开侧边栏（桌面端折叠条上的展开按钮）
    pub fn expand(&self) {
        if !self.layout_state().is_mobile() {
            self.set_desktop_collapsed(|_| false);
        }
    }

    /// 打开移动端抽屉
    pub fn open_mobile(&self) {
        self.mobile_open.store(true, Ordering::SeqCst);
        self.push();
    }

    /// 关闭移动端抽屉
    pub fn close_mobile(&self) {
        self.mobile_open.store(false, Ordering::SeqCst);
        self.push();
    }

    /// 处理视口宽度变化
    ///
    /// 桌面 → 移动的穿越强制关闭抽屉；移动 → 桌面由折叠标记
    /// 自然恢复桌面状态，折叠标记本身不受视口变化影响。
    pub fn handle_resize(&self, width: u32) {
        let was_mobile = is_mobile_width(self.viewport_width.load(Ordering::SeqCst));
        self.viewport_width.store(width, Ordering::SeqCst);
        let now_mobile = is_mobile_width(width);

        if !was_mobile && now_mobile {
            self.mobile_open.store(false, Ordering::SeqCst);
        }
        self.push();
    }

    /// 处理屏幕方向变化
    ///
    /// 重新推导移动/桌面归类；移动端强制回到关闭状态，
    /// 并推送新快照让渲染层重排遮罩层。
    pub fn handle_orientation_change(&self, width: u32) {
        self.viewport_width.store(width, Ordering::SeqCst);
        if is_mobile_width(width) {
            self.mobile_open.store(false, Ordering::SeqCst);
        }
        self.push();
    }

    /// 抽屉打开时先关闭并等待动画完成
    ///
    /// 供"先关抽屉再行动"的动作在自身效果之前调用；
    /// 抽屉未打开（含桌面端）时立即返回。
    pub async fn close_for_action(&self) {
        if self.layout_state() == LayoutState::MobileOpen {
            self.close_mobile();
            tokio::time::sleep(Duration::from_millis(SIDEBAR_CLOSE_DELAY_MS)).await;
        }
    }

    /// 修改桌面端折叠标记并保存、推送
    fn set_desktop_collapsed(&self, update: impl FnOnce(bool) -> bool) {
        let snapshot = {
            let mut state = match self.state.write() {
                Ok(state) => state,
                Err(_) => return,
            };
            state.sidebar_collapsed = update(state.sidebar_collapsed);
            state.snapshot()
        };
        self.store.save(&snapshot);
        self.push();
    }

    /// 推送当前布局快照
    fn push(&self) {
        self.renderer.layout_changed(&self.snapshot());
    }
}
