//! 表达式模型
//!
//! 宿主表达式列表的本地快照模型：
//! - `Formula`: 公式表达式（LaTeX文本 + 可选颜色/文件夹回引用）
//! - `Folder`: 文件夹（成员关系 = 列表连续性 + 回引用，不支持嵌套）
//! - `Table`: 数值表
//! - `Note`: 文本备注
//!
//! ID是宿主分配的不透明字符串，进程内单调递增且永不复用。

use serde::{Deserialize, Serialize};

/// 各形状的默认颜色
pub mod colors {
    pub const LINE: &str = "#000000";
    pub const CIRCLE: &str = "#0000FF";
    pub const PARABOLA: &str = "#6042a6";
    pub const ELLIPSE: &str = "#388c46";
    pub const POINT: &str = "#c74440";
}

/// 公式表达式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub id: String,
    pub latex: String,
    #[serde(default)]
    pub color: Option<String>,
    /// 所属文件夹的回引用；与列表位置共同决定成员关系
    #[serde(default)]
    pub folder_id: Option<String>,
}

impl Formula {
    pub fn new(id: &str, latex: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            latex: latex.into(),
            color: color.map(str::to_string),
            folder_id: None,
        }
    }
}

/// 文件夹
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub collapsed: bool,
}

/// 表格列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    pub latex: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
}

/// 数值表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub columns: Vec<TableColumn>,
}

/// 文本备注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub text: String,
}

/// 表达式变体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    #[serde(rename = "expression")]
    Formula(Formula),
    #[serde(rename = "folder")]
    Folder(Folder),
    #[serde(rename = "table")]
    Table(Table),
    #[serde(rename = "text")]
    Note(Note),
}

impl Expression {
    pub fn id(&self) -> &str {
        match self {
            Expression::Formula(f) => &f.id,
            Expression::Folder(f) => &f.id,
            Expression::Table(t) => &t.id,
            Expression::Note(n) => &n.id,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Expression::Folder(_))
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            Expression::Formula(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_formula_mut(&mut self) -> Option<&mut Formula> {
        match self {
            Expression::Formula(f) => Some(f),
            _ => None,
        }
    }
}

/// 视口范围 - 提交时从宿主回读合并的非表达式状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }
}

/// 完整图状态快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    pub expressions: Vec<Expression>,
    #[serde(default)]
    pub viewport: Viewport,
}

impl GraphState {
    /// 按ID查找表达式位置
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.expressions.iter().position(|e| e.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of() {
        let state = GraphState {
            expressions: vec![
                Expression::Formula(Formula::new("1", "(1,2)", None)),
                Expression::Folder(Folder {
                    id: "line".to_string(),
                    title: "Lines".to_string(),
                    collapsed: true,
                }),
            ],
            viewport: Viewport::default(),
        };
        assert_eq!(state.index_of("line"), Some(1));
        assert_eq!(state.index_of("missing"), None);
    }

    #[test]
    fn test_serde_type_tags() {
        let expr = Expression::Note(Note {
            id: "7".to_string(),
            text: "marker".to_string(),
        });
        let json = serde_json::to_string(&expr).unwrap();
        assert!(json.contains("\"type\":\"text\""));

        let back: Expression = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
    }
}
