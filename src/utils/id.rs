//! # 唯一标识符生成
//!
//! 会话和消息共用同一种 id 格式：`id_<毫秒时间戳>_<9位随机小写字母数字>`。
//! 毫秒时间戳加 9 位随机后缀在单机演示场景下保证全局唯一，
//! 复制/导出等按 id 的查找因此无需处理碰撞。

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// 随机后缀长度
const SUFFIX_LEN: usize = 9;

/// 生成一个新的唯一标识符
///
/// # 返回值
/// 形如 `id_1722945600000_k3x9f2a1b` 的字符串
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect();
    format!("id_{}_{}", millis, suffix)
}
