//! 数学基础与精度处理
//!
//! - 基于nalgebra的2D点/向量类型
//! - 欧几里得距离
//! - 定点精度格式化：保留末尾零（`fixed`）与去除末尾零（`to_precision`）两种变体

/// 2D点（f64坐标）
pub type Point2 = nalgebra::Point2<f64>;

/// 2D向量（f64坐标）
pub type Vector2 = nalgebra::Vector2<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-10;

/// 两点间的欧几里得距离
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (a - b).norm()
}

/// 按固定小数位数舍入，保留末尾零
///
/// `fixed(25.0, 5)` → `"25.00000"`
pub fn fixed(value: f64, digits: u32) -> String {
    format!("{:.*}", digits as usize, value)
}

/// 按固定小数位数舍入后去除末尾零与悬空小数点
///
/// `to_precision(1.50, 3)` → `"1.5"`，`to_precision(2.0, 3)` → `"2"`
pub fn to_precision(value: f64, digits: u32) -> String {
    trim_trailing_zeros(fixed(value, digits))
}

/// [`to_precision`]的字符串版本；无法解析为数字时原样返回
pub fn to_precision_str(text: &str, digits: u32) -> String {
    match text.parse::<f64>() {
        Ok(value) => to_precision(value, digits),
        Err(_) => text.to_string(),
    }
}

fn trim_trailing_zeros(mut rounded: String) -> String {
    if rounded.contains('.') {
        while rounded.ends_with('0') {
            rounded.pop();
        }
        if rounded.ends_with('.') {
            rounded.pop();
        }
    }
    rounded
}
