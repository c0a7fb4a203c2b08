//! ZGraph 构图工具
//!
//! 逐点累积的构图状态机与协调器。输入路由层把解析后的
//! 点击/光标/按键事件喂给 [`Coordinator`]，由它转发给唯一的
//! 活动 [`ConstructionObject`]，对象完成后通过事务把公式
//! 提交进宿主表达式列表。

pub mod coordinator;
pub mod object;
pub mod objects;

pub use coordinator::Coordinator;
pub use object::{ConstructionObject, GraphEvent, ObjectKind, ToolContext};
pub use objects::{
    CircleObject, EllipseObject, ExclusionOp, LineObject, ParabolaObject, RestrictionOp,
    SnapPointOp, TableObject,
};
