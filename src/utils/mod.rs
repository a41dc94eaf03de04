//! # 通用工具模块
//!
//! 与业务逻辑无关的小工具函数集合：
//! - `id` - 唯一标识符生成
//! - `time` - 中文相对时间格式化（刚刚/N分钟前/N小时前/日期）
//! - `debounce` - 尾沿防抖器（窗口 resize 事件合并）
//! - `text` - HTML 转义

pub mod debounce;
pub mod id;
pub mod text;
pub mod time;
