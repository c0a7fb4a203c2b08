//! 会话设置
//!
//! 两个数值参数，跨会话以JSON文本持久化。

use serde::{Deserialize, Serialize};

/// 支持的小数精度范围
pub const PRECISION_MIN: i32 = 0;
pub const PRECISION_MAX: i32 = 8;

/// 会话级数值设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 小数精度，同时用于斜率/半径舍入和自由点坐标取整
    pub precision: u32,
    /// 点捕捉的最大距离（世界坐标）
    pub point_snap: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: 5,
            point_snap: 0.1,
        }
    }
}

impl Settings {
    /// 按增量调整精度，夹取到支持范围
    pub fn change_precision(&mut self, amount: i32) {
        let value = (self.precision as i32 + amount).clamp(PRECISION_MIN, PRECISION_MAX);
        self.precision = value as u32;
    }

    /// 序列化为会话存储文本
    pub fn to_session(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// 从会话存储文本恢复；缺失或损坏时回落默认值
    pub fn from_session(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}
