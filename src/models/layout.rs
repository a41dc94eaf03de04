//! # 侧边栏响应式布局数据模型
//!
//! 定义了侧边栏布局状态机的状态枚举和推送给渲染层的布局快照。
//! 布局状态不持久化（桌面端折叠标记除外，它存活在 `AppState` 中），
//! 每次视口变化或用户切换时由运行时重新推导。

use serde::Serialize;

/// 移动端断点（px）
///
/// 视口宽度小于等于该值时进入移动端状态族，大于该值为桌面端。
pub const MOBILE_BREAKPOINT: u32 = 768;

/// 侧边栏布局状态
///
/// 四个状态分属两个状态族：
/// - 桌面端：折叠/展开，由持久化的折叠标记决定
/// - 移动端：关闭/打开（抽屉式），打开标记是瞬态的，从不持久化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutState {
    /// 桌面端，侧边栏折叠为窄条
    DesktopCollapsed,
    /// 桌面端，侧边栏完整展开
    DesktopExpanded,
    /// 移动端，侧边栏滑出屏幕外
    MobileClosed,
    /// 移动端，侧边栏以抽屉形式覆盖在内容上方
    MobileOpen,
}

impl LayoutState {
    /// 是否属于移动端状态族
    pub fn is_mobile(self) -> bool {
        matches!(self, LayoutState::MobileClosed | LayoutState::MobileOpen)
    }
}

/// 判断视口宽度是否属于移动端
pub fn is_mobile_width(width: u32) -> bool {
    width <= MOBILE_BREAKPOINT
}

/// 布局快照
///
/// 推送给渲染层的完整布局描述。遮罩层和背景滚动锁定只在
/// 移动端抽屉打开时生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// 当前布局状态
    pub state: LayoutState,

    /// 遮罩层是否可见
    pub overlay_visible: bool,

    /// 背景内容是否锁定滚动
    pub scroll_locked: bool,
}
