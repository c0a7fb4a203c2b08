//! ZGraph 核心引擎
//!
//! 把交互式构图动作翻译为宿主表达式列表上的符号公式编辑。
//!
//! # 架构设计
//!
//! - `expression`: 宿主表达式列表的快照模型
//! - `store`: 核心与宿主之间的存储边界
//! - `transaction`: 快照-修改-原子提交的批量编辑
//! - `cache`: 已绘制点的缓存与光标捕捉解析
//! - `latex`: 公式文本的模式匹配层
//! - `simplify`: 基于事务的批量整理
//! - `settings`: 会话级数值设置
//!
//! # 示例
//!
//! ```rust
//! use zgraph_core::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! Transaction::new(&mut store)
//!     .expression(
//!         |id| Expression::Formula(Formula::new(id, "(1,2)", None)),
//!         None,
//!     )
//!     .commit();
//!
//! assert_eq!(store.expressions().len(), 1);
//! ```

pub mod cache;
pub mod error;
pub mod expression;
pub mod latex;
pub mod math;
pub mod settings;
pub mod simplify;
pub mod store;
pub mod transaction;

pub mod prelude {
    //! 常用类型的便捷导入

    pub use crate::cache::{CachedPoint, PointCache};
    pub use crate::error::GraphError;
    pub use crate::expression::{
        colors, Expression, Folder, Formula, GraphState, Note, Table, TableColumn, Viewport,
    };
    pub use crate::math::{
        distance, fixed, to_precision, to_precision_str, Point2, Vector2, EPSILON,
    };
    pub use crate::settings::Settings;
    pub use crate::store::{ExpressionStore, MemoryStore};
    pub use crate::transaction::{new_folder, new_point, Consumer, FormulaPatch, Transaction};
}
