//! # 中文相对时间格式化
//!
//! 侧边栏历史条目显示会话创建时间的中文相对描述：
//! 一分钟内为"刚刚"，一小时内为"N分钟前"，一天内为"N小时前"，
//! 更早则显示本地日期时间。

use chrono::{DateTime, Local, Utc};

/// 一分钟的毫秒数
const MINUTE_MS: i64 = 60_000;
/// 一小时的毫秒数
const HOUR_MS: i64 = 3_600_000;
/// 一天的毫秒数
const DAY_MS: i64 = 86_400_000;

/// 以当前时刻为基准格式化时间戳
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    format_relative(timestamp, Utc::now())
}

/// 以给定基准时刻格式化时间戳
///
/// 拆出基准参数便于测试注入固定的"现在"。
///
/// # 参数
/// - `timestamp` - 待格式化的时间
/// - `now` - 基准时刻
///
/// # 返回值
/// "刚刚"、"N分钟前"、"N小时前" 或本地日期时间（如 "2026/08/06 14:30"）
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - timestamp).num_milliseconds();

    if diff_ms < MINUTE_MS {
        "刚刚".to_string()
    } else if diff_ms < HOUR_MS {
        format!("{}分钟前", diff_ms / MINUTE_MS)
    } else if diff_ms < DAY_MS {
        format!("{}小时前", diff_ms / HOUR_MS)
    } else {
        timestamp
            .with_timezone(&Local)
            .format("%Y/%m/%d %H:%M")
            .to_string()
    }
}
