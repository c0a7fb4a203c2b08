//! 批量整理工具
//!
//! 基于事务对整个表达式列表做一次性批量变换：
//! - [`simplify`]: 按当前精度重写所有可识别形状的数值并统一配色
//! - [`combine`]: 把标记之下的同名文件夹合并进首个同名根文件夹
//! - [`relocate_point`]: 把点表达式归档到参考点文件夹并写入缓存

use crate::cache::PointCache;
use crate::expression::{colors, Expression};
use crate::latex;
use crate::math::to_precision_str;
use crate::settings::Settings;
use crate::store::ExpressionStore;
use crate::transaction::{FormulaPatch, Transaction};

/// 合并文件夹的标记备注文本
pub const COMBINE_TEXT: &str = "--- COMBINE BELOW ---";

/// 参考点文件夹的保留ID
pub const REFERENCE_FOLDER: &str = "reference-points";

/// 按当前精度重写所有可识别形状的数值
///
/// 每个匹配的公式重写数字token并染上形状颜色，末尾的域
/// 限制/排除后缀同样重写后再追加。无法识别的表达式跳过，
/// 单条失败不影响整体提交。
pub fn simplify(store: &mut dyn ExpressionStore, settings: &Settings) {
    let digits = settings.precision;
    let mut transaction = Transaction::new(store);

    for expr in transaction.expressions_mut() {
        let Some(formula) = expr.as_formula_mut() else {
            continue;
        };
        let source = formula.latex.clone();

        let (mut rewritten, color) = if let Some(line) = latex::match_sloped_line(&source) {
            (
                format!(
                    "y-{}={}\\left(x-{}\\right)",
                    to_precision_str(line.y1, digits),
                    to_precision_str(line.slope, digits),
                    to_precision_str(line.x1, digits),
                ),
                colors::LINE,
            )
        } else if let Some(line) = latex::match_vertical_line(&source) {
            (
                format!("x={}", to_precision_str(line.x, digits)),
                colors::LINE,
            )
        } else if let Some(parabola) = latex::match_parabola(&source) {
            (
                format!(
                    "(x-{})^{{2}}={}\\left(y-{}\\right)",
                    to_precision_str(parabola.h, digits),
                    to_precision_str(parabola.p, digits),
                    to_precision_str(parabola.k, digits),
                ),
                colors::PARABOLA,
            )
        } else if let Some(ellipse) = latex::match_ellipse(&source) {
            (
                format!(
                    "\\frac{{\\left(x-{}\\right)^{{2}}}}{{{}^{{2}}}}+\\frac{{\\left(y-{}\\right)^{{2}}}}{{{}^{{2}}}}=1",
                    to_precision_str(ellipse.h, digits),
                    to_precision_str(ellipse.a, digits),
                    to_precision_str(ellipse.k, digits),
                    to_precision_str(ellipse.b, digits),
                ),
                colors::ELLIPSE,
            )
        } else {
            continue;
        };

        if let Some(restriction) = latex::find_restriction(&source) {
            rewritten.push_str(&format!(
                "\\left\\{{{}{} {}{}{}\\right\\}}",
                to_precision_str(restriction.min, digits),
                restriction.left_op,
                restriction.variable,
                restriction.right_op,
                to_precision_str(restriction.max, digits),
            ));
        }
        if let Some(exclusion) = latex::find_exclusion(&source) {
            rewritten.push_str(&format!(
                "\\left\\{{x<{},x>{}\\right\\}}",
                to_precision_str(exclusion.min, digits),
                to_precision_str(exclusion.max, digits),
            ));
        }

        formula.latex = rewritten;
        formula.color = Some(color.to_string());
    }

    transaction.commit();
}

/// 把标记之下的文件夹成员并入首个同名根文件夹
///
/// 标记是一条文本为[`COMBINE_TEXT`]的备注；缺失时整体为空
/// 操作。被合并的文件夹和标记本身随后删除，单次提交。
pub fn combine(store: &mut dyn ExpressionStore) {
    let mut transaction = Transaction::new(store);

    let Some(marker_id) = transaction.expressions().iter().find_map(|expr| match expr {
        Expression::Note(note) if note.text == COMBINE_TEXT => Some(note.id.clone()),
        _ => None,
    }) else {
        tracing::warn!("combine marker not found, nothing to do");
        return;
    };

    let folders: Vec<(String, String)> = transaction
        .all_below(&marker_id, true)
        .iter()
        .filter_map(|expr| match expr {
            Expression::Folder(folder) => Some((folder.id.clone(), folder.title.clone())),
            _ => None,
        })
        .collect();

    for (folder_id, title) in &folders {
        let root_id = transaction.expressions().iter().find_map(|expr| match expr {
            Expression::Folder(folder) if folder.title == *title => Some(folder.id.clone()),
            _ => None,
        });
        // 首个同名文件夹就是自己时没有合并目标，原样保留
        let Some(root_id) = root_id else { continue };
        if root_id == *folder_id {
            continue;
        }

        for member in transaction.all_below(folder_id, false) {
            transaction = transaction.parent(member.id(), &root_id);
        }
        transaction = transaction.remove(folder_id);
    }

    transaction.remove(&marker_id).commit();
}

/// 把点表达式归档到参考点文件夹并写入缓存
///
/// 文本不是点、或已在参考点文件夹中时为空操作。
pub fn relocate_point(store: &mut dyn ExpressionStore, cache: &mut PointCache, id: &str) {
    let snapshot = store.snapshot();
    let Some(formula) = snapshot
        .expressions
        .iter()
        .find(|e| e.id() == id)
        .and_then(Expression::as_formula)
    else {
        return;
    };
    if formula.folder_id.as_deref() == Some(REFERENCE_FOLDER) {
        return;
    }
    let Some(point) = latex::parse_point(&formula.latex) else {
        return;
    };

    Transaction::new(store)
        .update(id, FormulaPatch::color(colors::POINT))
        .parent(id, REFERENCE_FOLDER)
        .commit();

    cache.cache_point(point, id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{Formula, Note};
    use crate::store::MemoryStore;
    use crate::transaction::new_folder;

    fn formula(id: &str, latex: &str) -> Expression {
        Expression::Formula(Formula::new(id, latex, None))
    }

    fn latex_of(store: &MemoryStore, id: &str) -> String {
        store.find(id).unwrap().as_formula().unwrap().latex.clone()
    }

    #[test]
    fn test_simplify_rerounds_sloped_line() {
        let mut store = MemoryStore::new();
        store.upsert_single(formula(
            "a",
            "y-1.00000=0.50000\\left(x-0.00000\\right)\\left\\{0.00000\\le x\\le3.00000\\right\\}",
        ));

        simplify(&mut store, &Settings::default());

        assert_eq!(
            latex_of(&store, "a"),
            "y-1=0.5\\left(x-0\\right)\\left\\{0\\le x\\le3\\right\\}"
        );
        let color = store.find("a").unwrap().as_formula().unwrap().color.clone();
        assert_eq!(color.as_deref(), Some(colors::LINE));
    }

    #[test]
    fn test_simplify_rerounds_parabola_and_exclusion() {
        let mut store = MemoryStore::new();
        store.upsert_single(formula(
            "p",
            "(x-0)^2=4.00000(y-0)\\left\\{x<0.50000,x>5.00000\\right\\}",
        ));

        simplify(&mut store, &Settings::default());

        assert_eq!(
            latex_of(&store, "p"),
            "(x-0)^{2}=4\\left(y-0\\right)\\left\\{x<0.5,x>5\\right\\}"
        );
    }

    #[test]
    fn test_simplify_skips_unrecognized() {
        let mut store = MemoryStore::new();
        store.upsert_single(formula("raw", "\\sin(x)"));
        store.upsert_single(formula("pt", "(1.50000,2)"));

        simplify(&mut store, &Settings::default());

        // 未识别的形状原样保留，包括点
        assert_eq!(latex_of(&store, "raw"), "\\sin(x)");
        assert_eq!(latex_of(&store, "pt"), "(1.50000,2)");
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let mut store = MemoryStore::new();
        store.upsert_single(formula("a", "x=3.25000\\left\\{-1\\le y\\le2\\right\\}"));

        simplify(&mut store, &Settings::default());
        let once = latex_of(&store, "a");
        simplify(&mut store, &Settings::default());
        assert_eq!(latex_of(&store, "a"), once);
    }

    #[test]
    fn test_combine_merges_into_root_folder() {
        let mut store = MemoryStore::new();
        new_folder(&mut store, "Lines", "line", true);
        store.upsert_single(Expression::Note(Note {
            id: "m".to_string(),
            text: COMBINE_TEXT.to_string(),
        }));
        new_folder(&mut store, "Lines", "line-2", true);
        let mut member = Formula::new("a", "y-0=1\\left(x-0\\right)", None);
        member.folder_id = Some("line-2".to_string());
        store.upsert_single(Expression::Formula(member));

        combine(&mut store);

        let state = store.snapshot();
        assert_eq!(state.index_of("line-2"), None);
        assert_eq!(state.index_of("m"), None);

        let folder_index = state.index_of("line").unwrap();
        let moved = state.expressions[folder_index + 1].as_formula().unwrap();
        assert_eq!(moved.id, "a");
        assert_eq!(moved.folder_id.as_deref(), Some("line"));
    }

    #[test]
    fn test_combine_without_marker_is_noop() {
        let mut store = MemoryStore::new();
        new_folder(&mut store, "Lines", "line", true);

        combine(&mut store);

        assert_eq!(store.expressions().len(), 1);
        assert_eq!(store.undo_depth(), 0);
    }

    #[test]
    fn test_relocate_point() {
        let mut store = MemoryStore::new();
        new_folder(&mut store, "Reference Points", REFERENCE_FOLDER, true);
        store.upsert_single(formula("p", "(2,3)"));
        let mut cache = PointCache::new();

        relocate_point(&mut store, &mut cache, "p");

        let moved = store.find("p").unwrap().as_formula().unwrap();
        assert_eq!(moved.folder_id.as_deref(), Some(REFERENCE_FOLDER));
        assert_eq!(moved.color.as_deref(), Some(colors::POINT));
        assert_eq!(cache.len(), 1);

        // 再次调用为空操作
        relocate_point(&mut store, &mut cache, "p");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_relocate_non_point_is_noop() {
        let mut store = MemoryStore::new();
        new_folder(&mut store, "Reference Points", REFERENCE_FOLDER, true);
        store.upsert_single(formula("f", "y-0=1\\left(x-0\\right)"));
        let mut cache = PointCache::new();

        relocate_point(&mut store, &mut cache, "f");

        let formula = store.find("f").unwrap().as_formula().unwrap();
        assert_eq!(formula.folder_id, None);
        assert!(cache.is_empty());
    }
}
