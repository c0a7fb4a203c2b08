//! 具体的构图对象实现
//!
//! 每种形状/操作一个模块，实现 [`crate::object::ConstructionObject`]。

mod circle;
mod ellipse;
mod exclusion;
mod line;
mod parabola;
mod restriction;
mod snap_point;
mod table;

pub use circle::CircleObject;
pub use ellipse::EllipseObject;
pub use exclusion::ExclusionOp;
pub use line::LineObject;
pub use parabola::ParabolaObject;
pub use restriction::RestrictionOp;
pub use snap_point::SnapPointOp;
pub use table::TableObject;
