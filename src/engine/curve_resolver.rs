// ==========================================
// 新店铺货系统 - 尺码曲线解析器
// ==========================================
// 职责: 按完整五级层级键查找尺码曲线，计算整套件数
// 口径: 不做层级回退；曲线缺失或整套件数为 0 视为无曲线
// ==========================================

use crate::domain::curve::{HierarchyCurve, SizeCurveEntry};
use crate::domain::types::{HierarchyKey, Qty};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CurveResolver {
    curves: HashMap<HierarchyKey, HierarchyCurve>,
}

impl CurveResolver {
    /// 由曲线输入行构建
    ///
    /// 同一层级下重复尺码的数量合计，尺码保持首次出现顺序
    pub fn new(entries: &[SizeCurveEntry]) -> Self {
        let mut curves: HashMap<HierarchyKey, HierarchyCurve> = HashMap::new();

        for entry in entries {
            let curve = curves
                .entry(entry.hierarchy.clone())
                .or_insert_with(|| HierarchyCurve {
                    hierarchy: entry.hierarchy.clone(),
                    sizes: Vec::new(),
                    total_curve: 0,
                });

            match curve.sizes.iter_mut().find(|(size, _)| *size == entry.size) {
                Some((_, qty)) => *qty = qty.saturating_add(entry.curve_qty),
                None => curve.sizes.push((entry.size.clone(), entry.curve_qty)),
            }
            curve.total_curve = curve.total_curve.saturating_add(entry.curve_qty);
        }

        debug!(hierarchies = curves.len(), "尺码曲线加载完成");

        Self { curves }
    }

    /// 可用曲线；曲线缺失或 total_curve = 0 时返回 None
    pub fn resolve(&self, hierarchy: &HierarchyKey) -> Option<&HierarchyCurve> {
        self.curves
            .get(hierarchy)
            .filter(|curve| curve.total_curve > 0)
    }

    /// 指定层级 + 尺码的曲线数量
    pub fn curve_qty(&self, hierarchy: &HierarchyKey, size: &str) -> Option<Qty> {
        self.curves.get(hierarchy).and_then(|curve| curve.qty_for(size))
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mc: &str) -> HierarchyKey {
        HierarchyKey::new("D1", "SD1", "C1", "SC1", mc)
    }

    fn entry(mc: &str, size: &str, qty: Qty) -> SizeCurveEntry {
        SizeCurveEntry {
            hierarchy: key(mc),
            size: size.to_string(),
            curve_qty: qty,
        }
    }

    #[test]
    fn test_total_curve() {
        let resolver = CurveResolver::new(&[
            entry("MC1", "S", 2),
            entry("MC1", "M", 3),
            entry("MC1", "L", 3),
            entry("MC1", "XL", 2),
        ]);

        let curve = resolver.resolve(&key("MC1")).unwrap();
        assert_eq!(curve.total_curve, 10);
        assert_eq!(curve.sizes.len(), 4);
        assert_eq!(resolver.curve_qty(&key("MC1"), "L"), Some(3));
        assert_eq!(resolver.curve_qty(&key("MC1"), "XXL"), None);
    }

    #[test]
    fn test_duplicate_size_rows_are_summed() {
        let resolver = CurveResolver::new(&[entry("MC1", "M", 2), entry("MC1", "M", 1)]);
        let curve = resolver.resolve(&key("MC1")).unwrap();
        assert_eq!(curve.sizes, vec![("M".to_string(), 3)]);
        assert_eq!(curve.total_curve, 3);
    }

    #[test]
    fn test_missing_and_zero_curves_do_not_resolve() {
        let resolver = CurveResolver::new(&[entry("MC1", "S", 0), entry("MC1", "M", 0)]);
        assert!(resolver.resolve(&key("MC1")).is_none());
        assert!(resolver.resolve(&key("MC2")).is_none());
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_no_partial_hierarchy_fallback() {
        let resolver = CurveResolver::new(&[entry("MC1", "S", 1)]);
        let other_class = HierarchyKey::new("D1", "SD1", "C2", "SC1", "MC1");
        assert!(resolver.resolve(&other_class).is_none());
    }
}
