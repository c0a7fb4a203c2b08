//! 点缓存与捕捉解析
//!
//! 维护图中已知点的集合，把光标位置解析为附近的缓存点
//! 或按当前精度取整的自由点。缓存通过全量重扫与宿主列表
//! 保持一致，过期条目只会导致多余的捕捉候选。

use crate::expression::Expression;
use crate::latex;
use crate::math::{distance, fixed, Point2};
use crate::settings::Settings;

/// 缓存的点
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPoint {
    /// 世界坐标
    pub point: Point2,
    /// 所属表达式ID；自由点为None
    pub id: Option<String>,
}

/// 已绘制点的缓存
#[derive(Debug, Clone, Default)]
pub struct PointCache {
    points: Vec<CachedPoint>,
}

impl PointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[CachedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// 从表达式列表全量重建缓存
    ///
    /// 只收录文本可解析为点的公式表达式，整体替换现有内容。
    pub fn update_scan(&mut self, expressions: &[Expression]) {
        self.points = expressions
            .iter()
            .filter_map(|expr| {
                let formula = expr.as_formula()?;
                let point = latex::parse_point(&formula.latex)?;
                Some(CachedPoint {
                    point,
                    id: Some(formula.id.clone()),
                })
            })
            .collect();
        tracing::debug!(points = self.points.len(), "point cache rebuilt");
    }

    /// 插入一个点；已有坐标完全相等的条目时跳过
    pub fn cache_point(&mut self, point: Point2, id: &str) {
        let exists = self
            .points
            .iter()
            .any(|p| p.point.x == point.x && p.point.y == point.y);
        if !exists {
            self.points.push(CachedPoint {
                point,
                id: Some(id.to_string()),
            });
        }
    }

    /// 把光标位置解析为一个点
    ///
    /// `consider_others`为真时优先返回捕捉半径内（以及可选的
    /// `max_distance`内）最近的缓存点，距离相等取先扫描到的；
    /// 否则返回按精度取整的自由点（无ID）。
    pub fn resolve(
        &self,
        cursor: Point2,
        consider_others: bool,
        max_distance: Option<f64>,
        settings: &Settings,
    ) -> CachedPoint {
        if consider_others {
            let mut best: Option<(&CachedPoint, f64)> = None;
            for candidate in &self.points {
                let dist = distance(&candidate.point, &cursor);
                if dist > settings.point_snap {
                    continue;
                }
                if let Some(bound) = max_distance {
                    if dist > bound {
                        continue;
                    }
                }
                match best {
                    Some((_, best_dist)) if dist >= best_dist => {}
                    _ => best = Some((candidate, dist)),
                }
            }
            if let Some((closest, _)) = best {
                return closest.clone();
            }
        }

        let digits = settings.precision;
        CachedPoint {
            point: Point2::new(
                round_coordinate(cursor.x, digits),
                round_coordinate(cursor.y, digits),
            ),
            id: None,
        }
    }
}

/// 坐标按小数位取整（经定点格式往返）
fn round_coordinate(value: f64, digits: u32) -> f64 {
    fixed(value, digits).parse().unwrap_or(value)
}
