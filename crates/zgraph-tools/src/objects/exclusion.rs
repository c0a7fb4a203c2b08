//! 域排除操作
//!
//! 对既有公式追加 `\left\{x<{min},x>{max}\right\}` 后缀，
//! 把两点之间的区间从定义域中挖去。只作用于x轴。

use zgraph_core::error::GraphError;
use zgraph_core::expression::{Expression, Formula};
use zgraph_core::math::Point2;
use zgraph_core::store::ExpressionStore;

use crate::object::{ConstructionObject, ObjectKind, ToolContext};

/// 域排除状态机：目标公式 + 两个区间端点
pub struct ExclusionOp {
    target: Formula,
    points: Vec<Point2>,
}

impl ExclusionOp {
    pub fn new(target: Formula) -> Self {
        Self {
            target,
            points: Vec::new(),
        }
    }
}

impl ConstructionObject for ExclusionOp {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Exclusion
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
                shape: "exclusion",
                needed: 2,
                got: self.points.len(),
            });
        }
        let (first, second) = (self.points[0], self.points[1]);
        let min = first.x.min(second.x);
        let max = first.x.max(second.x);

        let mut amended = self.target.clone();
        amended
            .latex
            .push_str(&format!("\\left\\{{x<{},x>{}\\right\\}}", min, max));
        ctx.store.upsert_single(Expression::Formula(amended));
        Ok(())
    }

    fn destroy(&mut self, _ctx: &mut ToolContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::tests_support::test_env;
    use zgraph_core::latex;

    #[test]
    fn test_appends_exclusion_suffix() {
        let (mut store, mut cache, settings) = test_env();
        let target = Formula::new("f", "y-0=2\\left(x-0\\right)", None);
        store.upsert_single(Expression::Formula(target.clone()));
        let mut ctx = ToolContext {
            store: &mut store,
            cache: &mut cache,
            settings: &settings,
            modifier_held: false,
            shift_held: false,
        };

        let mut exclusion = ExclusionOp::new(target);
        exclusion.add_point(&mut ctx, Point2::new(5.0, 0.0));
        exclusion.add_point(&mut ctx, Point2::new(0.5, 0.0));
        assert!(exclusion.try_render(&mut ctx).unwrap());

        let amended = store.find("f").unwrap().as_formula().unwrap();
        let parsed = latex::find_exclusion(&amended.latex).unwrap();
        assert_eq!(parsed.min, "0.5");
        assert_eq!(parsed.max, "5");
    }
}
