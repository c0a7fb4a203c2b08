//! 构图协调器
//!
//! 持有唯一的活动构图对象并转发输入，保证同一时刻至多一个
//! 构建进行；启动新构建会先强制取消旧的，使其清理路径必然
//! 执行。生命周期事件进入队列供外层轮询。

use std::collections::VecDeque;

use zgraph_core::error::GraphError;
use zgraph_core::expression::Formula;
use zgraph_core::math::Point2;
use zgraph_core::store::ExpressionStore;
use zgraph_core::transaction::new_folder;

use crate::object::{ConstructionObject, GraphEvent, ObjectKind, ToolContext};
use crate::objects::{
    CircleObject, EllipseObject, ExclusionOp, LineObject, ParabolaObject, RestrictionOp,
    SnapPointOp, TableObject,
};

/// 构图协调器
#[derive(Default)]
pub struct Coordinator {
    working: Option<Box<dyn ConstructionObject>>,
    events: VecDeque<GraphEvent>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否有构建进行中
    pub fn is_active(&self) -> bool {
        self.working.is_some()
    }

    /// 活动对象的类型
    pub fn active_kind(&self) -> Option<ObjectKind> {
        self.working.as_ref().map(|object| object.kind())
    }

    /// 取出下一个待处理的生命周期事件
    pub fn poll_event(&mut self) -> Option<GraphEvent> {
        self.events.pop_front()
    }

    pub fn line(&mut self, ctx: &mut ToolContext<'_>) {
        self.start(ctx, Box::new(LineObject::new()));
    }

    pub fn circle(&mut self, ctx: &mut ToolContext<'_>) {
        self.start(ctx, Box::new(CircleObject::new()));
    }

    pub fn parabola(&mut self, ctx: &mut ToolContext<'_>) {
        self.start(ctx, Box::new(ParabolaObject::new()));
    }

    pub fn ellipse(&mut self, ctx: &mut ToolContext<'_>) {
        self.start(ctx, Box::new(EllipseObject::new()));
    }

    pub fn table(&mut self, ctx: &mut ToolContext<'_>) {
        self.start(ctx, Box::new(TableObject::new()));
    }

    pub fn restriction(&mut self, ctx: &mut ToolContext<'_>, target: Formula, using_y: bool) {
        self.start(ctx, Box::new(RestrictionOp::new(target, using_y)));
    }

    pub fn exclusion(&mut self, ctx: &mut ToolContext<'_>, target: Formula) {
        self.start(ctx, Box::new(ExclusionOp::new(target)));
    }

    pub fn snap_point(&mut self, ctx: &mut ToolContext<'_>, reference: Point2) {
        self.start(ctx, Box::new(SnapPointOp::new(reference)));
    }

    fn start(&mut self, ctx: &mut ToolContext<'_>, object: Box<dyn ConstructionObject>) {
        if self.is_active() {
            tracing::warn!(
                kind = object.kind().name(),
                "construction started while another is active, cancelling the old one"
            );
            self.cancel(ctx);
        }
        tracing::info!(kind = object.kind().name(), "construction started");
        self.events.push_back(GraphEvent::ObjectStarted(object.kind()));
        self.working = Some(object);
    }

    /// 向活动对象累积一个点
    pub fn add_point(&mut self, ctx: &mut ToolContext<'_>, point: Point2) {
        if let Some(working) = self.working.as_mut() {
            working.add_point(ctx, point);
        }
    }

    /// 转发光标移动，驱动实时预览
    pub fn cursor_move(&mut self, ctx: &mut ToolContext<'_>, cursor: Point2) {
        if let Some(working) = self.working.as_mut() {
            working.cursor_move(ctx, cursor);
        }
    }

    /// 显式确认输入，随即尝试完成
    pub fn confirm(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        if let Some(working) = self.working.as_mut() {
            working.confirm(ctx);
        }
        self.try_render(ctx)
    }

    /// 活动对象满足条件时渲染并完成构建
    pub fn try_render(&mut self, ctx: &mut ToolContext<'_>) -> Result<(), GraphError> {
        let rendered = match self.working.as_mut() {
            Some(working) => working.try_render(ctx)?,
            None => return Ok(()),
        };
        if rendered {
            self.finish(ctx);
        }
        Ok(())
    }

    /// 取消当前构建（无活动对象时只发布事件）
    pub fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(mut working) = self.working.take() {
            working.destroy(ctx);
            tracing::info!(kind = working.kind().name(), "construction cancelled");
        }
        self.events.push_back(GraphEvent::Cancelled);
    }

    fn finish(&mut self, ctx: &mut ToolContext<'_>) {
        let Some(mut working) = self.working.take() else {
            return;
        };
        working.destroy(ctx);
        tracing::info!(kind = working.kind().name(), "construction finished");
        self.events.push_back(GraphEvent::Finished);
    }

    /// 创建全套标准文件夹（折叠状态）
    pub fn folders(store: &mut dyn ExpressionStore) {
        new_folder(store, "Reference Points", "reference-points", true);
        new_folder(store, "Parabolas", "parabola", true);
        new_folder(store, "Circles", "circle", true);
        new_folder(store, "Ellipses", "ellipse", true);
        new_folder(store, "Hyperbolas", "hyperbola", true);
        new_folder(store, "Lines", "line", true);
    }
}
