//! # 欢迎屏 Tauri Commands
//!
//! 提供欢迎屏和任务卡片相关的 command 处理函数：
//! - `welcome_greeting` - 打招呼文案（打字机在欢迎面上播放）
//! - `open_task_modal` / `dismiss_modal` - 任务卡片模态框的开合
//! - `submit_product_query` / `submit_comparison` / `submit_solution` -
//!   三张任务卡片的表单提交（校验失败 → 错误 Toast，不提交）
//! - `submit_feedback` - 反馈表单提交
//!
//! 表单校验通过后：按复选框设置深度思考开关、拼装消息写入输入框、
//! 关闭模态框、调用聊天引擎提交。

use std::sync::Arc;

use tauri::State;

use crate::services::modal::{DismissReason, ModalKind};
use crate::services::render::ToastKind;
use crate::services::tasks::{
    self, ComparisonForm, ProductQueryForm, SolutionForm,
};
use crate::services::typewriter::{Typewriter, DEFAULT_INTERVAL_MS};
use crate::AppContext;

/// 欢迎面打字机的目标渲染面标识
const WELCOME_TARGET: &str = "welcome";

/// 拉取打招呼文案并在欢迎面上播放打字机动画
///
/// 动画已在播放时不重复启动，直接返回文案。
#[tauri::command]
pub async fn welcome_greeting(ctx: State<'_, AppContext>) -> Result<String, String> {
    let greeting = tasks::welcome_greeting(&ctx.state_read().user_name);

    let typewriter = {
        let mut slot = ctx
            .welcome_animation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(existing) = slot.as_ref() {
            if existing.is_running() {
                return Ok(greeting);
            }
        }

        let typewriter = Arc::new(Typewriter::new(greeting.clone(), DEFAULT_INTERVAL_MS));
        *slot = Some(Arc::clone(&typewriter));
        typewriter
    };

    let renderer = Arc::clone(&ctx.renderer);
    tokio::spawn(async move {
        typewriter
            .start(move |frame, done| renderer.typewriter_frame(WELCOME_TARGET, frame, done))
            .await;
    });

    Ok(greeting)
}

/// 打开任务卡片对应的模态框
#[tauri::command]
pub async fn open_task_modal(kind: ModalKind, ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.modal.show(kind);
    Ok(())
}

/// 按关闭原因关闭模态框（遮罩点击、Escape、关闭/取消按钮）
#[tauri::command]
pub async fn dismiss_modal(
    reason: DismissReason,
    ctx: State<'_, AppContext>,
) -> Result<(), String> {
    ctx.modal.dismiss(reason);
    Ok(())
}

/// 提交"产品参数速查"表单
#[tauri::command]
pub async fn submit_product_query(
    form: ProductQueryForm,
    ctx: State<'_, AppContext>,
) -> Result<(), String> {
    submit_composed(&ctx, form.deep_thinking, tasks::compose_product_query(&form)).await;
    Ok(())
}

/// 提交"生成竞品对比表"表单
#[tauri::command]
pub async fn submit_comparison(
    form: ComparisonForm,
    ctx: State<'_, AppContext>,
) -> Result<(), String> {
    submit_composed(&ctx, form.deep_thinking, tasks::compose_comparison(&form)).await;
    Ok(())
}

/// 提交"创建场景方案"表单
#[tauri::command]
pub async fn submit_solution(
    form: SolutionForm,
    ctx: State<'_, AppContext>,
) -> Result<(), String> {
    submit_composed(&ctx, form.deep_thinking, tasks::compose_solution(&form)).await;
    Ok(())
}

/// 提交"反馈与帮助"表单
///
/// 演示实现不落地反馈内容，仅致谢。移动端抽屉打开时先关闭抽屉。
#[tauri::command]
pub async fn submit_feedback(ctx: State<'_, AppContext>) -> Result<(), String> {
    ctx.layout.close_for_action().await;
    ctx.renderer
        .show_toast("反馈已提交，感谢您的宝贵意见！", ToastKind::Success);
    ctx.modal.close();
    Ok(())
}

/// 任务表单的统一提交路径
///
/// 校验失败：错误 Toast，模态框保持打开，不产生提交。
/// 校验通过：设置深度思考开关 → 拼装消息写入输入框 → 关闭模态框 →
/// 调用引擎提交。
async fn submit_composed(
    ctx: &AppContext,
    deep_thinking: bool,
    composed: Result<String, String>,
) {
    match composed {
        Err(message) => {
            ctx.renderer.show_toast(&message, ToastKind::Error);
        }
        Ok(message) => {
            ctx.engine.set_deep_thinking(deep_thinking);
            ctx.renderer.set_input(&message);
            ctx.modal.close();
            ctx.engine.submit(&message).await;
        }
    }
}
