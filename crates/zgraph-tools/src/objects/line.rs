//! 线段构建
//!
//! 两点完成。输出形式：
//! - 斜线 `y-{y1}={slope}\left(x-{x1}\right)\left\{{minX}\le x\le{maxX}\right\}`
//! - 竖线 `x={x1}\left\{{minY}\le y\le{maxY}\right\}`
//!
//! 两点同x（斜率无定义）或按住修饰键时退化为竖线。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{colors, Expression, Formula};
use zgraph_core::math::{fixed, Point2};
use zgraph_core::transaction::Transaction;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 线段构建状态机
#[derive(Debug, Default)]
pub struct LineObject {
    points: Vec<Point2>,
}

impl LineObject {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConstructionObject for LineObject {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Line
    }

    fn add_point(&mut self, _ctx: &mut ToolContext<'_>, point: Point2) {
        if self.points.len() < 2 {
            self.points.push(point);
        }
    }

    fn should_render(&self) -> bool {
        self.points.len() >= 2
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        if self.points.len() < 2 {
            return Err(GraphError::NotEnoughPoints {
                shape: "line",
                needed: 2,
                got: self.points.len(),
            });
        }
        let (first, second) = (self.points[0], self.points[1]);

        let slope = (second.y - first.y) / (second.x - first.x);
        let latex = if !slope.is_finite() || ctx.modifier_held {
            let min_y = first.y.min(second.y);
            let max_y = first.y.max(second.y);
            format!(
                "x={}\\left\\{{{}\\le y\\le{}\\right\\}}",
                first.x, min_y, max_y
            )
        } else {
            let min_x = first.x.min(second.x);
            let max_x = first.x.max(second.x);
            format!(
                "y-{}={}\\left(x-{}\\right)\\left\\{{{}\\le x\\le{}\\right\\}}",
                first.y,
                fixed(slope, ctx.settings.precision),
                first.x,
                min_x,
                max_x
            )
        };

        Transaction::new(ctx.store)
            .expression(
                |id| Expression::Formula(Formula::new(id, latex, Some(colors::LINE))),
                Some("line"),
            )
            .commit();
        Ok(())
    }

    fn destroy(&mut self, _ctx: &mut ToolContext<'_>) {}
}
