//! 域限制操作
//!
//! 对既有公式追加 `\left\{{min}\le x\le{max}\right\}`（或y形式）
//! 后缀。两点取值区间，端点自动归一化为最小/最大。
//! 单表达式改写，直接写回存储而不开事务。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{Expression, Formula};
use zgraph_core::math::Point2;
use zgraph_core::store::ExpressionStore;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 域限制状态机：目标公式 + 两个区间端点
pub struct RestrictionOp {
    target: Formula,
    using_y: bool,
    points: Vec<Point2>,
}

impl RestrictionOp {
    pub fn new(target: Formula, using_y: bool) -> Self {
        Self {
            target,
            using_y,
            points: Vec::new(),
        }
    }
}

impl ConstructionObject for RestrictionOp {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Restriction
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
                shape: "restriction",
                needed: 2,
                got: self.points.len(),
            });
        }
        let (first, second) = (self.points[0], self.points[1]);

        let (min, max, variable) = if self.using_y {
            (first.y.min(second.y), first.y.max(second.y), 'y')
        } else {
            (first.x.min(second.x), first.x.max(second.x), 'x')
        };

        let mut amended = self.target.clone();
        amended.latex.push_str(&format!(
            "\\left\\{{{}\\le {}\\le{}\\right\\}}",
            min, variable, max
        ));
        ctx.store.upsert_single(Expression::Formula(amended));
        Ok(())
    }

    fn destroy(&mut self, _ctx: &mut ToolContext<'_>) {}
}
