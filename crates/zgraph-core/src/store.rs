//! 表达式存储接口
//!
//! 核心与宿主表达式列表之间的唯一边界：
//! - 快照读取
//! - 单调ID分配
//! - 整体原子提交（可记录撤销）
//! - 事务外的单表达式写入（预览用，不进撤销历史）

use crate::expression::{Expression, GraphState, Viewport};

/// 宿主表达式存储的抽象
pub trait ExpressionStore {
    /// 当前状态的完整快照
    fn snapshot(&self) -> GraphState;

    /// 分配下一个表达式ID（进程内单调递增，永不复用）
    fn next_id(&mut self) -> String;

    /// 以一次原子操作替换完整状态
    fn commit(&mut self, state: GraphState, allow_undo: bool);

    /// 插入或更新单个表达式（按ID匹配）
    fn upsert_single(&mut self, expr: Expression);

    /// 删除单个表达式；不存在时为空操作
    fn remove_single(&mut self, id: &str);

    /// 批量删除
    fn remove_many(&mut self, ids: &[&str]) {
        for id in ids {
            self.remove_single(id);
        }
    }

    /// 当前实时视口
    fn viewport(&self) -> Viewport;
}

/// 内存存储实现
///
/// 测试与独立运行时使用。撤销栈记录每次可撤销提交之前的完整状态。
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: GraphState,
    id_counter: u64,
    undo_stack: Vec<GraphState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.state.expressions
    }

    pub fn find(&self, id: &str) -> Option<&Expression> {
        self.state.expressions.iter().find(|e| e.id() == id)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.state.viewport = viewport;
    }

    /// 撤销栈深度
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// 回退到上一次可撤销提交之前的状态
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => false,
        }
    }
}

impl ExpressionStore for MemoryStore {
    fn snapshot(&self) -> GraphState {
        self.state.clone()
    }

    fn next_id(&mut self) -> String {
        self.id_counter += 1;
        self.id_counter.to_string()
    }

    fn commit(&mut self, state: GraphState, allow_undo: bool) {
        tracing::debug!(
            expressions = state.expressions.len(),
            allow_undo,
            "committing graph state"
        );
        if allow_undo {
            self.undo_stack.push(std::mem::take(&mut self.state));
        }
        self.state = state;
    }

    fn upsert_single(&mut self, expr: Expression) {
        match self.state.index_of(expr.id()) {
            Some(index) => self.state.expressions[index] = expr,
            None => self.state.expressions.push(expr),
        }
    }

    fn remove_single(&mut self, id: &str) {
        self.state.expressions.retain(|e| e.id() != id);
    }

    fn viewport(&self) -> Viewport {
        self.state.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Formula;

    #[test]
    fn test_next_id_monotonic() {
        let mut store = MemoryStore::new();
        let a = store.next_id();
        let b = store.next_id();
        assert_ne!(a, b);
        assert!(b.parse::<u64>().unwrap() > a.parse::<u64>().unwrap());
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut store = MemoryStore::new();
        store.upsert_single(Expression::Formula(Formula::new("p", "(1,2)", None)));
        store.upsert_single(Expression::Formula(Formula::new("p", "(3,4)", None)));

        assert_eq!(store.expressions().len(), 1);
        assert_eq!(store.find("p").unwrap().as_formula().unwrap().latex, "(3,4)");
    }

    #[test]
    fn test_commit_records_undo() {
        let mut store = MemoryStore::new();
        store.upsert_single(Expression::Formula(Formula::new("a", "(0,0)", None)));

        let mut next = store.snapshot();
        next.expressions.clear();
        store.commit(next, true);
        assert!(store.expressions().is_empty());
        assert_eq!(store.undo_depth(), 1);

        assert!(store.undo());
        assert_eq!(store.expressions().len(), 1);
        assert!(!store.undo());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = MemoryStore::new();
        store.remove_single("ghost");
        store.remove_many(&["a", "b"]);
        assert!(store.expressions().is_empty());
    }
}
