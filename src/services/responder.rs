//! # 模拟回复提供者服务
//!
//! 定义了回复提供者接口（[`ResponseProvider`]）和演示用的固定模板实现
//! （[`CannedResponder`]）。
//!
//! 接口契约对真实推理客户端同样成立：给定用户文本和深度思考开关，
//! 产出一条 AI 回复（正文 + 流程节点 + 可选思考文本）。演示实现以
//! 随机延时模拟推理耗时，并从两套固定模板中随机选择，替换实现时
//! 只需保证同样的外部契约（指示器先于回复出现、每条用户消息恰好
//! 对应一条 AI 回复）。

use async_trait::async_trait;
use rand::Rng;

use crate::models::chat::{NodeStatus, ProcessNode};

/// 模拟推理延时下界（毫秒，含）
const RESPONSE_DELAY_MIN_MS: u64 = 1000;
/// 模拟推理延时上界（毫秒，不含）
const RESPONSE_DELAY_MAX_MS: u64 = 3000;

/// 一条生成完成的 AI 回复
#[derive(Debug, Clone)]
pub struct AiReply {
    /// 回复正文（Markdown 风格文本）
    pub content: String,

    /// 处理流程清单
    pub process_nodes: Vec<ProcessNode>,

    /// 思考过程文本：仅在生成时深度思考开启才有值
    pub thinking: Option<String>,
}

/// 回复提供者接口
///
/// 聊天引擎通过该接口请求回复，不感知背后是模板还是真实推理。
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// 针对一条用户消息生成回复
    ///
    /// # 参数
    /// - `user_text` - 用户消息原文
    /// - `deep_thinking` - 生成时深度思考模式是否开启
    async fn generate(&self, user_text: &str, deep_thinking: bool) -> AiReply;
}

/// 固定模板结构
struct Template {
    content: &'static str,
    process_nodes: [&'static str; 4],
    thinking: &'static str,
}

/// 模板一：产品参数查询结果
const PRODUCT_QUERY_TEMPLATE: Template = Template {
    content: r#"# 产品参数查询结果

根据您的查询，我为您找到了相关产品信息：

## 统一钛粒王T10全合成柴油机油

🎯 **核心参数**：
- **API等级**：CK-4
- **SAE粘度**：10W-40 / 5W-30
- **基础油类型**：全合成
- **运动粘度@100℃**：11.75 mm²/s
- **闪点**：228℃
- **倾点**：-45℃

✅ **产品优势**：
- 活塞顶部重积碳为0
- 燃油经济性达1.2%
- 实际道路测试超过12万公里
- 优异的抗磨损性能

📦 **包装规格**：
- 4L装 (4L×4)
- 18L装 (18L×1)
- 170kg装

如需更详细的技术参数，请告诉我具体需要哪项数据。

---

## 参考资料
- [知识图谱] 统一钛粒王T10产品信息
- [文档] 产品资料文档"#,
    process_nodes: ["理解用户查询", "检索产品数据库", "提取技术参数", "生成回复内容"],
    thinking: "用户询问产品参数，我需要提供完整的技术规格信息，包括API等级、粘度、基础油类型等关键参数。",
};

/// 模板二：矿山行业润滑解决方案
const MINING_SOLUTION_TEMPLATE: Template = Template {
    content: r#"# 矿山行业润滑解决方案

🏭 **行业特点分析**：
露天矿业工况特点：极端高低温、低速重载、高粉尘环境，对润滑油品提出严峻挑战。

🔧 **推荐方案**：

**重型设备（220吨级矿卡）**：
- **推荐产品**：统一钛粒王T10全合成柴油机油CK-4 10W-40
- **核心优势**：换油周期延长至400小时
- **经济效益**：年节约成本50万元

**电铲设备**：
- **推荐产品**：统一齿轮油75W-90
- **核心优势**：极端低温工况稳定应用
- **技术特点**：优异的低温流动性

**挖掘设备**：
- **推荐产品**：统一液压油
- **核心优势**：抗磨损性能优异
- **适用范围**：各类液压系统

⚡ **综合优势**：
- 替换进口品牌，大幅降低使用成本
- 极端工况下稳定性能保障
- 专业技术服务支持

💡 **实施建议**：
建议建立设备保养台账，定期监测油品状态，确保设备稳定运行。

---

## 参考资料
- [文档] 矿山行业解决方案
- [知识图谱] 工程设备润滑方案"#,
    process_nodes: ["识别行业场景", "分析工况特点", "匹配产品方案", "生成推荐报告"],
    thinking: "用户询问矿山行业解决方案，我需要根据不同设备类型提供针对性的润滑产品推荐和方案建议。",
};

/// 全部固定模板
const TEMPLATES: [&Template; 2] = [&PRODUCT_QUERY_TEMPLATE, &MINING_SOLUTION_TEMPLATE];

/// 固定模板回复提供者
///
/// 演示实现：随机延时后从固定模板中随机选一套。
/// 延时范围可注入，测试用零延时保持确定性耗时。
pub struct CannedResponder {
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl CannedResponder {
    /// 创建使用默认延时范围（[1000ms, 3000ms)）的提供者
    pub fn new() -> Self {
        Self::with_delay_range(RESPONSE_DELAY_MIN_MS, RESPONSE_DELAY_MAX_MS)
    }

    /// 创建指定延时范围的提供者
    ///
    /// # 参数
    /// - `min_ms` - 延时下界（含）
    /// - `max_ms` - 延时上界（不含），必须大于 `min_ms`
    pub fn with_delay_range(min_ms: u64, max_ms: u64) -> Self {
        Self {
            delay_min_ms: min_ms,
            delay_max_ms: max_ms,
        }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseProvider for CannedResponder {
    async fn generate(&self, _user_text: &str, deep_thinking: bool) -> AiReply {
        // 随机数发生器不跨 await 持有（ThreadRng 非 Send）
        let (delay_ms, pick) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(self.delay_min_ms..self.delay_max_ms),
                rng.gen_range(0..TEMPLATES.len()),
            )
        };

        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;

        let template = TEMPLATES[pick];
        AiReply {
            content: template.content.to_string(),
            process_nodes: template
                .process_nodes
                .iter()
                .map(|name| ProcessNode {
                    name: (*name).to_string(),
                    status: NodeStatus::Completed,
                })
                .collect(),
            // 思考文本在生成时刻按开关裁决，落盘后不再受开关影响
            thinking: deep_thinking.then(|| template.thinking.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_responder() -> CannedResponder {
        CannedResponder::with_delay_range(0, 1)
    }

    #[tokio::test]
    async fn test_generate_picks_a_canned_template() {
        let responder = instant_responder();
        let reply = responder.generate("查询统一钛粒王T10的全部参数", false).await;

        assert!(TEMPLATES.iter().any(|t| t.content == reply.content));
        assert_eq!(reply.process_nodes.len(), 4);
        assert!(reply
            .process_nodes
            .iter()
            .all(|node| node.status == NodeStatus::Completed));
    }

    #[tokio::test]
    async fn test_thinking_absent_when_deep_thinking_disabled() {
        let responder = instant_responder();
        // 模板都定义了思考文本，但开关关闭时不得出现
        let reply = responder.generate("查询统一钛粒王T10的全部参数", false).await;
        assert!(reply.thinking.is_none());
    }

    #[tokio::test]
    async fn test_thinking_present_when_deep_thinking_enabled() {
        let responder = instant_responder();
        let reply = responder.generate("为矿山行业提供润滑方案", true).await;

        let thinking = reply.thinking.expect("深度思考开启时应有思考文本");
        assert!(TEMPLATES.iter().any(|t| t.thinking == thinking));
    }
}
