//! 椭圆构建
//!
//! 中心一击，先拖横半轴，再拖纵半轴，第三击定型。输出形式：
//! `\frac{\left(x-{h}\right)^{2}}{{a}^{2}}+\frac{\left(y-{k}\right)^{2}}{{b}^{2}}=1`
//!
//! 半轴初值0.1，避免退化成点。拖拽时按住Shift可跳过点捕捉。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{colors, Expression, Formula};
use zgraph_core::math::{distance, fixed, Point2};
use zgraph_core::store::ExpressionStore;
use zgraph_core::transaction::Transaction;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 预览表达式的保留ID
const PREVIEW_ID: &str = "ellipse-preview";
const CENTER_ID: &str = "ellipse-center";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    PlotCenter,
    DefineHorizontal,
    DefineVertical,
    Finished,
}

/// 椭圆构建状态机
pub struct EllipseObject {
    state: State,
    center: Option<Point2>,
    x_radius: f64,
    y_radius: f64,
}

impl EllipseObject {
    pub fn new() -> Self {
        Self {
            state: State::PlotCenter,
            center: None,
            x_radius: 0.1,
            y_radius: 0.1,
        }
    }

    fn latex(&self, precision: u32) -> Result<String, GraphError> {
        let Some(center) = self.center else {
            return Err(GraphError::NotEnoughPoints {
                shape: "ellipse",
                needed: 1,
                got: 0,
            });
        };
        Ok(format!(
            "\\frac{{\\left(x-{}\\right)^{{2}}}}{{{}^{{2}}}}+\\frac{{\\left(y-{}\\right)^{{2}}}}{{{}^{{2}}}}=1",
            center.x,
            fixed(self.x_radius, precision),
            center.y,
            fixed(self.y_radius, precision)
        ))
    }

    fn update_preview(&self, ctx: &mut ToolContext<'_>) {
        if let Ok(latex) = self.latex(ctx.settings.precision) {
            ctx.store.upsert_single(Expression::Formula(Formula::new(
                PREVIEW_ID,
                latex,
                Some(colors::ELLIPSE),
            )));
        }
    }
}

impl Default for EllipseObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionObject for EllipseObject {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Ellipse
    }

    fn add_point(&mut self, ctx: &mut ToolContext<'_>, point: Point2) {
        match self.state {
            State::PlotCenter => {
                ctx.store.upsert_single(Expression::Formula(Formula::new(
                    CENTER_ID,
                    format!("({}, {})", point.x, point.y),
                    Some(colors::ELLIPSE),
                )));
                self.center = Some(point);
                self.state = State::DefineHorizontal;
            }
            State::DefineHorizontal => self.state = State::DefineVertical,
            State::DefineVertical => self.state = State::Finished,
            State::Finished => {}
        }
    }

    fn cursor_move(&mut self, ctx: &mut ToolContext<'_>, cursor: Point2) {
        let Some(center) = self.center else { return };
        let resolved = ctx.resolve(cursor);
        // 两条半轴都取中心到光标的距离，而非轴向投影
        let radius = distance(&center, &resolved.point).max(0.1);
        match self.state {
            State::DefineHorizontal => {
                self.x_radius = radius;
                self.update_preview(ctx);
            }
            State::DefineVertical => {
                self.y_radius = radius;
                self.update_preview(ctx);
            }
            State::PlotCenter | State::Finished => {}
        }
    }

    fn should_render(&self) -> bool {
        self.state == State::Finished
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        let latex = self.latex(ctx.settings.precision)?;
        Transaction::new(ctx.store)
            .expression(
                |id| Expression::Formula(Formula::new(id, latex, Some(colors::ELLIPSE))),
                Some("ellipse"),
            )
            .commit();
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.store.remove_many(&[PREVIEW_ID, CENTER_ID]);
    }
}
