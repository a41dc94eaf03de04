//! # 欢迎屏任务快捷服务
//!
//! 欢迎屏提供三张固定任务卡片（产品参数速查、竞品对比、场景方案），
//! 每张卡片打开一个表单模态框。本模块负责表单的必填校验和
//! 消息文本的固定格式拼装；校验失败返回错误文案（渲染为 Toast），
//! 不产生任何提交。
//!
//! 另外包含欢迎屏的打招呼文案（由打字机在欢迎面上播放）。

use serde::Deserialize;

/// 欢迎屏打招呼文案
pub fn welcome_greeting(user_name: &str) -> String {
    format!(
        "您好，{}！我是统一安安，有什么润滑油、液冷相关问题我可以帮您解答吗？",
        user_name
    )
}

/// 产品参数速查表单
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQueryForm {
    /// 产品名称/物料号/物料描述（必填）
    pub product_name: String,

    /// 参数名称："all" 表示全部参数，其余为具体参数项
    pub parameter_type: String,

    /// 是否开启深度思考
    #[serde(default)]
    pub deep_thinking: bool,
}

/// 竞品对比表单
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonForm {
    /// 本方产品名称（必填）
    pub first_product: String,

    /// 对比产品名称（必填）
    pub second_product: String,

    /// 是否开启深度思考
    #[serde(default)]
    pub deep_thinking: bool,
}

/// 场景方案表单
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionForm {
    /// 行业/场景（必填，下拉选择）
    pub industry: String,

    /// 设备/型号/润滑部位及工况/排放信息（必填）
    pub equipment: String,

    /// 期望达成的目标（选填，空则使用默认目标）
    #[serde(default)]
    pub goals: String,

    /// 是否开启深度思考
    #[serde(default)]
    pub deep_thinking: bool,
}

/// 拼装产品参数查询消息
///
/// # 错误
/// 产品名称为空（或仅空白）时返回提示文案
pub fn compose_product_query(form: &ProductQueryForm) -> Result<String, String> {
    if form.product_name.trim().is_empty() {
        return Err("请输入产品名称".to_string());
    }

    let parameter_label = if form.parameter_type == "all" {
        "全部参数"
    } else {
        form.parameter_type.as_str()
    };
    Ok(format!("查询{}的{}", form.product_name, parameter_label))
}

/// 拼装竞品对比消息
///
/// # 错误
/// 任一产品名称为空时返回提示文案
pub fn compose_comparison(form: &ComparisonForm) -> Result<String, String> {
    if form.first_product.trim().is_empty() || form.second_product.trim().is_empty() {
        return Err("请输入要对比的产品名称".to_string());
    }

    Ok(format!(
        "对比{}和{}的性能参数和特点",
        form.first_product, form.second_product
    ))
}

/// 拼装场景方案消息
///
/// 目标为空时使用默认目标"优化润滑效果"。
///
/// # 错误
/// 行业未选择或设备信息为空时返回提示文案
pub fn compose_solution(form: &SolutionForm) -> Result<String, String> {
    if form.industry.is_empty() || form.equipment.trim().is_empty() {
        return Err("请填写完整的行业和设备信息".to_string());
    }

    let goals = if form.goals.trim().is_empty() {
        "优化润滑效果"
    } else {
        form.goals.as_str()
    };
    Ok(format!(
        "为{}行业的{}提供润滑方案，目标：{}",
        form.industry, form.equipment, goals
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_greeting_interpolates_user_name() {
        assert_eq!(
            welcome_greeting("Simon"),
            "您好，Simon！我是统一安安，有什么润滑油、液冷相关问题我可以帮您解答吗？"
        );
    }

    #[test]
    fn test_product_query_all_parameters() {
        let form = ProductQueryForm {
            product_name: "统一钛粒王T10".to_string(),
            parameter_type: "all".to_string(),
            deep_thinking: false,
        };
        assert_eq!(
            compose_product_query(&form).unwrap(),
            "查询统一钛粒王T10的全部参数"
        );
    }

    #[test]
    fn test_product_query_specific_parameter() {
        let form = ProductQueryForm {
            product_name: "统一钛粒王T10".to_string(),
            parameter_type: "闪点".to_string(),
            deep_thinking: true,
        };
        assert_eq!(compose_product_query(&form).unwrap(), "查询统一钛粒王T10的闪点");
    }

    #[test]
    fn test_product_query_missing_name_rejected() {
        let form = ProductQueryForm {
            product_name: "   ".to_string(),
            parameter_type: "all".to_string(),
            deep_thinking: false,
        };
        assert_eq!(compose_product_query(&form).unwrap_err(), "请输入产品名称");
    }

    #[test]
    fn test_comparison_message() {
        let form = ComparisonForm {
            first_product: "统一钛粒王T10".to_string(),
            second_product: "壳牌劲霸K10".to_string(),
            deep_thinking: false,
        };
        assert_eq!(
            compose_comparison(&form).unwrap(),
            "对比统一钛粒王T10和壳牌劲霸K10的性能参数和特点"
        );
    }

    #[test]
    fn test_comparison_requires_both_products() {
        let form = ComparisonForm {
            first_product: "统一钛粒王T10".to_string(),
            second_product: "".to_string(),
            deep_thinking: false,
        };
        assert_eq!(
            compose_comparison(&form).unwrap_err(),
            "请输入要对比的产品名称"
        );
    }

    #[test]
    fn test_solution_message_with_goals() {
        let form = SolutionForm {
            industry: "矿山".to_string(),
            equipment: "小松PC850挖掘机，重载工况，国六排放".to_string(),
            goals: "延长换油周期，降低维护成本".to_string(),
            deep_thinking: true,
        };
        assert_eq!(
            compose_solution(&form).unwrap(),
            "为矿山行业的小松PC850挖掘机，重载工况，国六排放提供润滑方案，目标：延长换油周期，降低维护成本"
        );
    }

    #[test]
    fn test_solution_default_goals() {
        let form = SolutionForm {
            industry: "物流".to_string(),
            equipment: "重卡车队".to_string(),
            goals: "".to_string(),
            deep_thinking: false,
        };
        assert_eq!(
            compose_solution(&form).unwrap(),
            "为物流行业的重卡车队提供润滑方案，目标：优化润滑效果"
        );
    }

    #[test]
    fn test_solution_requires_industry_and_equipment() {
        let form = SolutionForm {
            industry: "".to_string(),
            equipment: "重卡车队".to_string(),
            goals: "".to_string(),
            deep_thinking: false,
        };
        assert_eq!(
            compose_solution(&form).unwrap_err(),
            "请填写完整的行业和设备信息"
        );
    }
}
