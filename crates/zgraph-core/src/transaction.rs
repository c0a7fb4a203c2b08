//! 事务化批量编辑
//!
//! 快照-修改-原子提交：在构造时取一次完整快照，链式累积
//! 结构性编辑，最后整体提交回宿主存储。一次事务恰好产生
//! 一条撤销记录，中途的编辑对宿主不可见。
//!
//! 事务是一次性的：链式方法消费`self`，`commit`取走所有权。

use crate::cache::PointCache;
use crate::expression::{Expression, Folder, Formula, GraphState};
use crate::math::Point2;
use crate::store::ExpressionStore;

/// 提交后回调，参数为最后创建的表达式ID
pub type Consumer<'a> = Box<dyn FnOnce(&str) + 'a>;

/// 公式表达式的部分更新；`None`字段保持不变
#[derive(Debug, Default, Clone)]
pub struct FormulaPatch {
    pub latex: Option<String>,
    pub color: Option<String>,
}

impl FormulaPatch {
    pub fn latex(latex: impl Into<String>) -> Self {
        Self {
            latex: Some(latex.into()),
            ..Self::default()
        }
    }

    pub fn color(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Self::default()
        }
    }
}

/// 单次使用的批量编辑事务
pub struct Transaction<'a> {
    store: &'a mut dyn ExpressionStore,
    state: GraphState,
    last_id: String,
    consumer: Option<Consumer<'a>>,
}

impl<'a> Transaction<'a> {
    /// 从存储的最新快照创建事务
    pub fn new(store: &'a mut dyn ExpressionStore) -> Self {
        let state = store.snapshot();
        Self {
            store,
            state,
            last_id: String::new(),
            consumer: None,
        }
    }

    /// 附带提交回调的事务
    pub fn with_consumer(store: &'a mut dyn ExpressionStore, consumer: Consumer<'a>) -> Self {
        let mut transaction = Self::new(store);
        transaction.consumer = Some(consumer);
        transaction
    }

    /// 快照中的表达式
    pub fn expressions(&self) -> &[Expression] {
        &self.state.expressions
    }

    /// 快照中表达式的可变访问（批量就地改写用）
    pub fn expressions_mut(&mut self) -> &mut Vec<Expression> {
        &mut self.state.expressions
    }

    /// 最后创建的表达式ID；尚未创建时为空
    pub fn last_id(&self) -> &str {
        &self.last_id
    }

    /// 按ID查找表达式在快照中的位置
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.state.index_of(id)
    }

    /// 分配下一个表达式ID
    ///
    /// 每个新建表达式在插入前恰好调用一次。
    pub fn allocate_id(&mut self) -> String {
        self.store.next_id()
    }

    /// 新建表达式并追加到快照末尾；指定`parent`时随即移入对应文件夹
    pub fn expression<F>(mut self, build: F, parent: Option<&str>) -> Self
    where
        F: FnOnce(&str) -> Expression,
    {
        let id = self.allocate_id();
        self.last_id = id.clone();
        self.state.expressions.push(build(&id));
        if let Some(parent_id) = parent {
            self = self.parent(&id, parent_id);
        }
        self
    }

    /// 合并部分字段到指定公式；目标不存在时为空操作
    ///
    /// 空ID属于调用方契约违规，直接断言失败。
    pub fn update(mut self, id: &str, patch: FormulaPatch) -> Self {
        assert!(!id.is_empty(), "Transaction::update called with an empty id");
        if let Some(index) = self.index_of(id) {
            if let Some(formula) = self.state.expressions[index].as_formula_mut() {
                if let Some(latex) = patch.latex {
                    formula.latex = latex;
                }
                if let Some(color) = patch.color {
                    formula.color = Some(color);
                }
            }
        }
        self
    }

    /// 删除指定表达式；不存在时为空操作
    pub fn remove(mut self, id: &str) -> Self {
        if let Some(index) = self.index_of(id) {
            self.state.expressions.remove(index);
        }
        self
    }

    /// 将公式移入文件夹：设置回引用并重新定位到文件夹之后
    ///
    /// 任一ID不存在时为空操作；只有公式表达式携带文件夹回引用。
    pub fn parent(mut self, id: &str, parent_id: &str) -> Self {
        let (Some(target_index), Some(parent_index)) =
            (self.index_of(id), self.index_of(parent_id))
        else {
            return self;
        };
        if self.state.expressions[target_index].as_formula().is_none() {
            return self;
        }

        let mut target = self.state.expressions.remove(target_index);
        if let Some(formula) = target.as_formula_mut() {
            formula.folder_id = Some(parent_id.to_string());
        }
        // 目标被移出后，位于其后的文件夹整体前移了一位
        let insert_at = if target_index < parent_index {
            parent_index
        } else {
            parent_index + 1
        };
        self.state.expressions.insert(insert_at, target);
        self
    }

    /// 返回`folder_id`之后的连续表达式段
    ///
    /// `include_folders`为假时在下一个文件夹处截断。
    pub fn all_below(&self, folder_id: &str, include_folders: bool) -> Vec<Expression> {
        let Some(start) = self.index_of(folder_id) else {
            return Vec::new();
        };
        let mut run = Vec::new();
        for expr in &self.state.expressions[start + 1..] {
            if !include_folders && expr.is_folder() {
                break;
            }
            run.push(expr.clone());
        }
        run
    }

    /// 条件链式调用；回调额外收到当前的最后创建ID
    pub fn cond<F>(self, condition: bool, callback: F) -> Self
    where
        F: FnOnce(Self, String) -> Self,
    {
        if condition {
            let last_id = self.last_id.clone();
            callback(self, last_id)
        } else {
            self
        }
    }

    /// 提交事务
    ///
    /// 先从宿主回读非表达式状态（视口）合并进快照，再整体
    /// 原子发布（记录撤销），最后调用提交回调。
    pub fn commit(mut self) {
        self.state.viewport = self.store.viewport();
        tracing::debug!(
            expressions = self.state.expressions.len(),
            last_id = %self.last_id,
            "committing transaction"
        );
        self.store.commit(self.state, true);
        if let Some(consumer) = self.consumer.take() {
            consumer(&self.last_id);
        }
    }
}

/// 新建一个点表达式
///
/// 提交后把点写入缓存；`reference`为真时归档到参考点文件夹。
pub fn new_point(
    store: &mut dyn ExpressionStore,
    cache: &mut PointCache,
    point: Point2,
    reference: bool,
) {
    let consumer: Consumer<'_> = Box::new(|id: &str| cache.cache_point(point, id));
    Transaction::with_consumer(store, consumer)
        .expression(
            |id| Expression::Formula(Formula::new(id, format!("({},{})", point.x, point.y), None)),
            None,
        )
        .cond(reference, |t, last_id| {
            t.parent(&last_id, "reference-points")
        })
        .commit();
}

/// 新建文件夹（事务外直接写入，不进撤销历史）
pub fn new_folder(store: &mut dyn ExpressionStore, title: &str, id: &str, collapsed: bool) {
    store.upsert_single(Expression::Folder(Folder {
        id: id.to_string(),
        title: title.to_string(),
        collapsed,
    }));
}
