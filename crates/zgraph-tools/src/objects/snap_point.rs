//! 参考点捕捉构建
//!
//! 以既有点为基准，沿位移主导轴偏移出新点：
//! 光标相对基准点横向位移更大时沿x轴偏移，否则沿y轴
//! （相等取y轴）。坐标按当前精度去零舍入，显式确认后提交。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{colors, Expression, Formula};
use zgraph_core::math::{to_precision, Point2};
use zgraph_core::store::ExpressionStore;
use zgraph_core::transaction::Transaction;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 预览表达式的保留ID
const PREVIEW_ID: &str = "point-preview";

/// 偏移轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// 捕捉点构建状态机
pub struct SnapPointOp {
    reference: Point2,
    axis: Axis,
    offset: f64,
    confirmed: bool,
}

impl SnapPointOp {
    pub fn new(reference: Point2) -> Self {
        Self {
            reference,
            axis: Axis::Vertical,
            offset: 0.0,
            confirmed: false,
        }
    }

    fn latex(&self, precision: u32) -> String {
        let (mut x, mut y) = (self.reference.x, self.reference.y);
        match self.axis {
            Axis::Horizontal => x += self.offset,
            Axis::Vertical => y += self.offset,
        }
        format!(
            "({}, {})",
            to_precision(x, precision),
            to_precision(y, precision)
        )
    }
}

impl ConstructionObject for SnapPointOp {
    fn kind(&self) -> ObjectKind {
        ObjectKind::SnapPoint
    }

    /// 点的选取完全由光标跟踪与确认驱动
    fn add_point(&mut self, _ctx: &mut ToolContext<'_>, _point: Point2) {}

    fn cursor_move(&mut self, ctx: &mut ToolContext<'_>, cursor: Point2) {
        if self.confirmed {
            return;
        }
        let resolved = ctx.resolve(cursor);
        let dx = resolved.point.x - self.reference.x;
        let dy = resolved.point.y - self.reference.y;
        // 位移更大的轴胜出，相等取竖直
        if dx.abs() > dy.abs() {
            self.axis = Axis::Horizontal;
            self.offset = dx;
        } else {
            self.axis = Axis::Vertical;
            self.offset = dy;
        }

        ctx.store.upsert_single(Expression::Formula(Formula::new(
            PREVIEW_ID,
            self.latex(ctx.settings.precision),
            Some(colors::POINT),
        )));
    }

    fn confirm(&mut self, _ctx: &mut ToolContext<'_>) {
        self.confirmed = true;
    }

    fn should_render(&self) -> bool {
        self.confirmed
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        let latex = self.latex(ctx.settings.precision);
        Transaction::new(ctx.store)
            .expression(
                |id| Expression::Formula(Formula::new(id, latex, Some(colors::POINT))),
                Some("reference-points"),
            )
            .commit();
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.store.remove_single(PREVIEW_ID);
    }
}
