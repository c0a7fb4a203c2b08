//! 抛物线构建
//!
//! 顶点一击，开口随第二点定型。顶点式 `(x-h)^2=p(y-k)` 中的
//! 尺度参数由第二点闭式解出：`p = (x₂-h)² / (y₂-k)`。
//! 输出附带 `min(x₁,x₂)≤x≤max(x₁,x₂)` 的域限制。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{colors, Expression, Formula};
use zgraph_core::math::{fixed, Point2};
use zgraph_core::store::ExpressionStore;
use zgraph_core::transaction::Transaction;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 预览表达式的保留ID
const PREVIEW_ID: &str = "parabola-preview";
const VERTEX_ID: &str = "parabola-vertex";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    PlotVertex,
    DefineSlope,
    Finished,
}

/// 抛物线构建状态机
pub struct ParabolaObject {
    state: State,
    vertex: Option<Point2>,
    second: Option<Point2>,
}

impl ParabolaObject {
    pub fn new() -> Self {
        Self {
            state: State::PlotVertex,
            vertex: None,
            second: None,
        }
    }

    fn latex(&self, other: Option<Point2>, precision: u32) -> Result<String, GraphError> {
        let Some(vertex) = self.vertex else {
            return Err(GraphError::NotEnoughPoints {
                shape: "parabola",
                needed: 2,
                got: 0,
            });
        };
        let Some(other) = other.or(self.second) else {
            return Err(GraphError::NotEnoughPoints {
                shape: "parabola",
                needed: 2,
                got: 1,
            });
        };

        let dx = other.x - vertex.x;
        let dy = other.y - vertex.y;
        let p = dx * dx / dy;
        if !p.is_finite() {
            return Err(GraphError::Degenerate {
                shape: "parabola",
                reason: "second point lies on the vertex line",
            });
        }

        let min_x = vertex.x.min(other.x);
        let max_x = vertex.x.max(other.x);
        Ok(format!(
            "(x-{})^2={}(y-{})\\left\\{{{}\\le x\\le{}\\right\\}}",
            vertex.x,
            fixed(p, precision),
            vertex.y,
            min_x,
            max_x
        ))
    }
}

impl Default for ParabolaObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionObject for ParabolaObject {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Parabola
    }

    fn add_point(&mut self, ctx: &mut ToolContext<'_>, point: Point2) {
        match self.state {
            State::PlotVertex => {
                ctx.store.upsert_single(Expression::Formula(Formula::new(
                    VERTEX_ID,
                    format!("({},{})", point.x, point.y),
                    Some(colors::PARABOLA),
                )));
                self.vertex = Some(point);
                self.state = State::DefineSlope;
            }
            State::DefineSlope => {
                self.second = Some(point);
                self.state = State::Finished;
            }
            State::Finished => {}
        }
    }

    fn cursor_move(&mut self, ctx: &mut ToolContext<'_>, cursor: Point2) {
        if self.state != State::DefineSlope {
            return;
        }
        let resolved = ctx.resolve_snapped(cursor);
        // 光标落在顶点的水平线上时没有可预览的抛物线
        if let Ok(latex) = self.latex(Some(resolved.point), ctx.settings.precision) {
            ctx.store.upsert_single(Expression::Formula(Formula::new(
                PREVIEW_ID,
                latex,
                Some(colors::PARABOLA),
            )));
        }
    }

    fn should_render(&self) -> bool {
        self.state == State::Finished
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        let latex = self.latex(None, ctx.settings.precision)?;
        Transaction::new(ctx.store)
            .expression(
                |id| Expression::Formula(Formula::new(id, latex, Some(colors::PARABOLA))),
                Some("parabola"),
            )
            .commit();
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.store.remove_many(&[PREVIEW_ID, VERTEX_ID]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::tests_support::test_env;
    use zgraph_core::latex;

    fn ctx<'a>(
        store: &'a mut zgraph_core::store::MemoryStore,
        cache: &'a mut zgraph_core::cache::PointCache,
        settings: &'a zgraph_core::settings::Settings,
    ) -> ToolContext<'a> {
        ToolContext {
            store,
            cache,
            settings,
            modifier_held: false,
            shift_held: false,
        }
    }

    #[test]
    fn test_scale_parameter_round_trip() {
        let (mut store, mut cache, settings) = test_env();
        let mut ctx = ctx(&mut store, &mut cache, &settings);

        let mut parabola = ParabolaObject::new();
        parabola.add_point(&mut ctx, Point2::new(0.0, 0.0));
        parabola.add_point(&mut ctx, Point2::new(2.0, 1.0));
        assert!(parabola.try_render(&mut ctx).unwrap());

        let committed = store
            .expressions()
            .iter()
            .find_map(|e| {
                let f = e.as_formula()?;
                (f.id != VERTEX_ID).then(|| f.latex.clone())
            })
            .unwrap();

        let matched = latex::match_parabola(&committed).unwrap();
        let p: f64 = matched.p.parse().unwrap();
        // 代回第二点：(2-0)² = p·(1-0)
        assert_eq!(p, 4.0);

        let restriction = latex::find_restriction(&committed).unwrap();
        assert_eq!(restriction.min, "0");
        assert_eq!(restriction.max, "2");
    }

    #[test]
    fn test_equal_y_is_degenerate() {
        let (mut store, mut cache, settings) = test_env();
        let mut ctx = ctx(&mut store, &mut cache, &settings);

        let mut parabola = ParabolaObject::new();
        parabola.add_point(&mut ctx, Point2::new(0.0, 1.0));
        parabola.add_point(&mut ctx, Point2::new(2.0, 1.0));

        assert!(matches!(
            parabola.render(&mut ctx),
            Err(GraphError::Degenerate { shape: "parabola", .. })
        ));
    }

    #[test]
    fn test_preview_follows_cursor() {
        let (mut store, mut cache, settings) = test_env();
        let mut ctx = ctx(&mut store, &mut cache, &settings);

        let mut parabola = ParabolaObject::new();
        parabola.add_point(&mut ctx, Point2::new(0.0, 0.0));
        parabola.cursor_move(&mut ctx, Point2::new(2.0, 1.0));

        let snapshot = ctx.store.snapshot();
        let index = snapshot.index_of(PREVIEW_ID).unwrap();
        let preview = snapshot.expressions[index].as_formula().unwrap();
        assert!(preview.latex.starts_with("(x-0)^2=4.00000(y-0)"));

        // 顶点水平线上的光标不更新预览
        parabola.cursor_move(&mut ctx, Point2::new(5.0, 0.0));
        let preview = store.find(PREVIEW_ID).unwrap().as_formula().unwrap();
        assert!(preview.latex.starts_with("(x-0)^2=4.00000(y-0)"));
    }
}
