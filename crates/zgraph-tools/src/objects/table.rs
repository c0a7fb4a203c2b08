//! 数值表构建
//!
//! 开放式点累积：不生成LaTeX公式，显式确认后把全部点
//! 按收集顺序写进一张双隐藏列（`x_{1}`/`y_{1}`）的表格。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{Expression, Table, TableColumn};
use zgraph_core::math::Point2;
use zgraph_core::transaction::Transaction;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 数值表构建状态机
#[derive(Debug, Default)]
pub struct TableObject {
    points: Vec<Point2>,
    armed: bool,
}

impl TableObject {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConstructionObject for TableObject {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Table
    }

    fn add_point(&mut self, _ctx: &mut ToolContext<'_>, point: Point2) {
        self.points.push(point);
    }

    /// 至少一个点时确认才生效
    fn confirm(&mut self, _ctx: &mut ToolContext<'_>) {
        if !self.points.is_empty() {
            self.armed = true;
        }
    }

    fn should_render(&self) -> bool {
        self.armed
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        if self.points.is_empty() {
            return Err(GraphError::NotEnoughPoints {
                shape: "table",
                needed: 1,
                got: 0,
            });
        }

        let xs: Vec<String> = self.points.iter().map(|p| p.x.to_string()).collect();
        let ys: Vec<String> = self.points.iter().map(|p| p.y.to_string()).collect();

        let mut transaction = Transaction::new(ctx.store);
        let x_column = transaction.allocate_id();
        let y_column = transaction.allocate_id();
        transaction
            .expression(
                move |id| {
                    Expression::Table(Table {
                        id: id.to_string(),
                        columns: vec![
                            TableColumn {
                                id: x_column,
                                latex: "x_{1}".to_string(),
                                values: xs,
                                hidden: true,
                            },
                            TableColumn {
                                id: y_column,
                                latex: "y_{1}".to_string(),
                                values: ys,
                                hidden: true,
                            },
                        ],
                    })
                },
                None,
            )
            .commit();
        Ok(())
    }

    fn destroy(&mut self, _ctx: &mut ToolContext<'_>) {}
}
