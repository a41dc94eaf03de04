//! # 模态框服务
//!
//! 管理全局唯一的覆盖层对话框：任意时刻至多一个模态框打开。
//! `show` 静默替换已打开的模态框（不堆叠），`close` 幂等。
//!
//! 关闭触发源（遮罩点击、Escape、关闭按钮、取消按钮）由渲染层
//! 以关闭原因上报，统一路由到 `close`。

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::services::render::Renderer;

/// 模态框种类
///
/// 应用内的全部对话框：三个任务卡片表单 + 反馈表单。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalKind {
    /// 产品参数速查表单
    ProductQuery,
    /// 竞品对比表单
    CompetitorComparison,
    /// 场景方案表单
    ScenarioSolution,
    /// 反馈与帮助表单
    Feedback,
}

/// 模态框关闭原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DismissReason {
    /// 点击遮罩层（模态框主体之外）
    Backdrop,
    /// 按下 Escape 键
    Escape,
    /// 点击关闭按钮
    CloseButton,
    /// 点击取消类按钮
    Cancel,
}

/// 模态框服务
///
/// 只持有"当前打开的模态框"这一项状态；对话框内容和表单
/// 由渲染层按种类绘制。
pub struct ModalService {
    /// 当前打开的模态框：`None` 表示没有模态框
    current: RwLock<Option<ModalKind>>,

    /// 渲染指令出口
    renderer: Arc<dyn Renderer>,
}

impl ModalService {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            current: RwLock::new(None),
            renderer,
        }
    }

    /// 打开模态框
    ///
    /// 已有打开的模态框时静默替换（不堆叠、不报错）。
    pub fn show(&self, kind: ModalKind) {
        if let Ok(mut current) = self.current.write() {
            *current = Some(kind);
        }
        self.renderer.modal_opened(kind);
    }

    /// 关闭模态框
    ///
    /// 幂等：没有模态框打开时为空操作，连续调用等价于一次。
    pub fn close(&self) {
        let was_open = self
            .current
            .write()
            .map(|mut current| current.take().is_some())
            .unwrap_or(false);

        if was_open {
            self.renderer.modal_closed();
        }
    }

    /// 按关闭原因关闭模态框
    ///
    /// 所有触发源行为一致，原因仅用于调试日志。
    pub fn dismiss(&self, reason: DismissReason) {
        log::debug!("模态框关闭: {:?}", reason);
        self.close();
    }

    /// 当前是否有模态框打开
    pub fn is_open(&self) -> bool {
        self.current
            .read()
            .map(|current| current.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingRenderer, RenderEvent};

    fn service() -> (Arc<RecordingRenderer>, ModalService) {
        let renderer = Arc::new(RecordingRenderer::default());
        let modal = ModalService::new(renderer.clone());
        (renderer, modal)
    }

    #[test]
    fn test_show_then_close() {
        let (renderer, modal) = service();

        modal.show(ModalKind::ProductQuery);
        assert!(modal.is_open());

        modal.close();
        assert!(!modal.is_open());

        let events = renderer.events();
        assert_eq!(
            events,
            vec![
                RenderEvent::ModalOpened(ModalKind::ProductQuery),
                RenderEvent::ModalClosed,
            ]
        );
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let (renderer, modal) = service();
        modal.close();
        assert!(renderer.events().is_empty());
    }

    #[test]
    fn test_double_close_equivalent_to_single() {
        let (renderer, modal) = service();
        modal.show(ModalKind::Feedback);
        modal.close();
        modal.close();

        let closed_count = renderer
            .events()
            .iter()
            .filter(|event| matches!(event, RenderEvent::ModalClosed))
            .count();
        assert_eq!(closed_count, 1);
    }

    #[test]
    fn test_show_replaces_without_stacking() {
        let (renderer, modal) = service();
        modal.show(ModalKind::ProductQuery);
        modal.show(ModalKind::ScenarioSolution);

        assert!(modal.is_open());
        // 替换只产生两次打开指令，没有中间关闭
        assert_eq!(
            renderer.events(),
            vec![
                RenderEvent::ModalOpened(ModalKind::ProductQuery),
                RenderEvent::ModalOpened(ModalKind::ScenarioSolution),
            ]
        );

        // 单次关闭即可回到无模态框状态
        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn test_dismiss_reasons_all_route_to_close() {
        let (_, modal) = service();
        for reason in [
            DismissReason::Backdrop,
            DismissReason::Escape,
            DismissReason::CloseButton,
            DismissReason::Cancel,
        ] {
            modal.show(ModalKind::Feedback);
            modal.dismiss(reason);
            assert!(!modal.is_open());
        }
    }
}
