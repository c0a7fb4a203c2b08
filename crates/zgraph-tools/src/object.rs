//! 构图对象系统
//!
//! 每种形状/操作是一个独立的状态机：随用户输入累积点，
//! 满足条件后通过一次事务把闭式公式提交进宿主列表。
//! 预览通过保留ID的事务外单表达式写入实现。

use zgraph_core::cache::{CachedPoint, PointCache};
use zgraph_core::error::GraphError;
use zgraph_core::math::Point2;
use zgraph_core::settings::Settings;
use zgraph_core::store::ExpressionStore;

/// 构图对象/操作的判别类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Line,
    Circle,
    Parabola,
    Ellipse,
    Restriction,
    Exclusion,
    SnapPoint,
    Table,
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Line => "line",
            ObjectKind::Circle => "circle",
            ObjectKind::Parabola => "parabola",
            ObjectKind::Ellipse => "ellipse",
            ObjectKind::Restriction => "restriction",
            ObjectKind::Exclusion => "exclusion",
            ObjectKind::SnapPoint => "snap_point",
            ObjectKind::Table => "table",
        }
    }
}

/// 传递给构图对象的运行时上下文
pub struct ToolContext<'a> {
    /// 宿主表达式存储
    pub store: &'a mut dyn ExpressionStore,
    /// 已绘制点的缓存
    pub cache: &'a mut PointCache,
    /// 会话设置
    pub settings: &'a Settings,
    /// 修饰键是否按下（线工具强制竖线）
    pub modifier_held: bool,
    /// Shift是否按下（按下时不捕捉已有点）
    pub shift_held: bool,
}

impl ToolContext<'_> {
    /// 解析光标位置；Shift按下时跳过点捕捉
    pub fn resolve(&self, cursor: Point2) -> CachedPoint {
        self.cache
            .resolve(cursor, !self.shift_held, None, self.settings)
    }

    /// 解析光标位置，始终考虑捕捉
    pub fn resolve_snapped(&self, cursor: Point2) -> CachedPoint {
        self.cache.resolve(cursor, true, None, self.settings)
    }
}

/// 协调器对外发布的生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    /// 新对象开始构建
    ObjectStarted(ObjectKind),
    /// 构建被取消
    Cancelled,
    /// 构建完成
    Finished,
}

/// 构图对象 - 所有形状/操作状态机的共同接口
pub trait ConstructionObject {
    /// 对象类型
    fn kind(&self) -> ObjectKind;

    /// 累积一个点并推进状态机
    fn add_point(&mut self, ctx: &mut ToolContext<'_>, point: Point2);

    /// 光标移动，驱动实时预览
    fn cursor_move(&mut self, _ctx: &mut ToolContext<'_>, _cursor: Point2) {}

    /// 显式确认输入；开放式对象（表格、捕捉点）由此进入完成态
    fn confirm(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// 是否已满足渲染条件
    fn should_render(&self) -> bool;

    /// 构建并提交最终事务；前置条件不满足时返回错误
    fn render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError>;

    /// 幂等清理：删除本对象的保留预览表达式
    fn destroy(&mut self, ctx: &mut ToolContext<'_>);

    /// 满足条件时渲染；返回是否完成
    fn try_render(&mut self, ctx: &mut ToolContext<'_>) -> Result<bool, GraphError> {
        if self.should_render() {
            self.render(ctx)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    //! 各对象测试共用的环境构造

    use zgraph_core::cache::PointCache;
    use zgraph_core::settings::Settings;
    use zgraph_core::store::MemoryStore;

    pub fn test_env() -> (MemoryStore, PointCache, Settings) {
        (MemoryStore::new(), PointCache::new(), Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_honors_shift() {
        let mut store = zgraph_core::store::MemoryStore::new();
        let mut cache = PointCache::new();
        cache.cache_point(Point2::new(0.0, 0.0), "p");
        let settings = Settings::default();

        let ctx = ToolContext {
            store: &mut store,
            cache: &mut cache,
            settings: &settings,
            modifier_held: false,
            shift_held: true,
        };
        // Shift按下：不捕捉，返回取整后的自由点
        let free = ctx.resolve(Point2::new(0.02, 0.0));
        assert_eq!(free.id, None);

        // 强制捕捉入口不受Shift影响
        let snapped = ctx.resolve_snapped(Point2::new(0.02, 0.0));
        assert_eq!(snapped.id.as_deref(), Some("p"));
    }
}
