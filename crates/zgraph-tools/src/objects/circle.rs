//! 圆构建
//!
//! 圆心一击，半径随光标拖拽，再击定型。输出形式：
//! `\left(x-{cx}\right)^{2}+\left(y-{cy}\right)^{2}={r²}`
//!
//! 拖拽期间通过保留ID维护圆心标记与实时预览。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{colors, Expression, Formula};
use zgraph_core::math::{distance, fixed, Point2};
use zgraph_core::store::ExpressionStore;
use zgraph_core::transaction::Transaction;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 预览表达式的保留ID
const PREVIEW_ID: &str = "circle-preview";
const CENTER_ID: &str = "circle-center";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    PlotCenter,
    DefineRadius,
    Finished,
}

/// 圆构建状态机
pub struct CircleObject {
    state: State,
    center: Option<Point2>,
    radius: f64,
}

impl CircleObject {
    pub fn new() -> Self {
        Self {
            state: State::PlotCenter,
            center: None,
            radius: 0.0,
        }
    }

    fn latex(&self, precision: u32) -> Result<String, GraphError> {
        let Some(center) = self.center else {
            return Err(GraphError::NotEnoughPoints {
                shape: "circle",
                needed: 1,
                got: 0,
            });
        };
        Ok(format!(
            "\\left(x-{}\\right)^{{2}}+\\left(y-{}\\right)^{{2}}={}",
            center.x,
            center.y,
            fixed(self.radius.powi(2), precision)
        ))
    }
}

impl Default for CircleObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionObject for CircleObject {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Circle
    }

    fn add_point(&mut self, ctx: &mut ToolContext<'_>, point: Point2) {
        match self.state {
            State::PlotCenter => {
                // 圆心标记，完成或取消时删除
                ctx.store.upsert_single(Expression::Formula(Formula::new(
                    CENTER_ID,
                    format!("({},{})", point.x, point.y),
                    Some(colors::CIRCLE),
                )));
                self.center = Some(point);
                self.state = State::DefineRadius;
            }
            State::DefineRadius => {
                // 半径由光标跟踪维护，这一击只定型
                self.state = State::Finished;
            }
            State::Finished => {}
        }
    }

    fn cursor_move(&mut self, ctx: &mut ToolContext<'_>, cursor: Point2) {
        if self.state != State::DefineRadius {
            return;
        }
        let Some(center) = self.center else { return };

        let resolved = ctx.resolve_snapped(cursor);
        self.radius = distance(&center, &resolved.point);
        if let Ok(latex) = self.latex(ctx.settings.precision) {
            ctx.store.upsert_single(Expression::Formula(Formula::new(
                PREVIEW_ID,
                latex,
                Some(colors::CIRCLE),
            )));
        }
    }

    fn should_render(&self) -> bool {
        self.state == State::Finished
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        let latex = self.latex(ctx.settings.precision)?;
        Transaction::new(ctx.store)
            .expression(
                |id| Expression::Formula(Formula::new(id, latex, Some(colors::CIRCLE))),
                Some("circle"),
            )
            .commit();
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.store.remove_many(&[PREVIEW_ID, CENTER_ID]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::tests_support::test_env;

    #[test]
    fn test_center_click_places_marker() {
        let (mut store, mut cache, settings) = test_env();
        let mut ctx = ToolContext {
            store: &mut store,
            cache: &mut cache,
            settings: &settings,
            modifier_held: false,
            shift_held: false,
        };

        let mut circle = CircleObject::new();
        circle.add_point(&mut ctx, Point2::new(1.0, 2.0));

        let marker = store.find(CENTER_ID).unwrap().as_formula().unwrap();
        assert_eq!(marker.latex, "(1,2)");
        assert!(!circle.should_render());
    }

    #[test]
    fn test_cursor_move_updates_preview() {
        let (mut store, mut cache, settings) = test_env();
        let mut ctx = ToolContext {
            store: &mut store,
            cache: &mut cache,
            settings: &settings,
            modifier_held: false,
            shift_held: false,
        };

        let mut circle = CircleObject::new();
        circle.add_point(&mut ctx, Point2::new(0.0, 0.0));
        circle.cursor_move(&mut ctx, Point2::new(3.0, 4.0));

        let snapshot = ctx.store.snapshot();
        let index = snapshot.index_of(PREVIEW_ID).unwrap();
        assert_eq!(
            snapshot.expressions[index].as_formula().unwrap().latex,
            "\\left(x-0\\right)^{2}+\\left(y-0\\right)^{2}=25.00000"
        );

        // 定型前的移动持续覆写同一条预览
        circle.cursor_move(&mut ctx, Point2::new(1.0, 0.0));
        let preview = store.find(PREVIEW_ID).unwrap().as_formula().unwrap();
        assert_eq!(
            preview.latex,
            "\\left(x-0\\right)^{2}+\\left(y-0\\right)^{2}=1.00000"
        );
    }

    #[test]
    fn test_destroy_removes_reserved_expressions() {
        let (mut store, mut cache, settings) = test_env();
        let mut ctx = ToolContext {
            store: &mut store,
            cache: &mut cache,
            settings: &settings,
            modifier_held: false,
            shift_held: false,
        };

        let mut circle = CircleObject::new();
        circle.add_point(&mut ctx, Point2::new(0.0, 0.0));
        circle.cursor_move(&mut ctx, Point2::new(1.0, 0.0));
        circle.destroy(&mut ctx);
        // 幂等
        circle.destroy(&mut ctx);

        assert!(store.find(PREVIEW_ID).is_none());
        assert!(store.find(CENTER_ID).is_none());
    }
}
