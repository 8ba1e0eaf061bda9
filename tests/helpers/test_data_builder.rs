// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use std::path::Path;
use store_allocation::domain::{
    AllocationInputs, DisplayCapacity, HierarchyKey, Qty, SizeCurveEntry, SizeMasterEntry,
    StyleMasterEntry, WarehouseStock,
};
use store_allocation::importer::InputPaths;

/// 测试用层级键（只变化 MC）
pub fn hierarchy(mc: &str) -> HierarchyKey {
    HierarchyKey::new("WOMEN", "TOPS", "KNIT", "TEE", mc)
}

// ==========================================
// ScenarioBuilder - 五张输入表构建器
// ==========================================

#[derive(Default)]
pub struct ScenarioBuilder {
    inputs: AllocationInputs,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, store: &str, hierarchy: &HierarchyKey, qty: Qty) -> Self {
        self.inputs.display_capacity.push(DisplayCapacity {
            store: store.to_string(),
            hierarchy: hierarchy.clone(),
            display_capacity: qty,
        });
        self
    }

    pub fn curve(mut self, hierarchy: &HierarchyKey, sizes: &[(&str, Qty)]) -> Self {
        for (size, qty) in sizes {
            self.inputs.size_curve.push(SizeCurveEntry {
                hierarchy: hierarchy.clone(),
                size: size.to_string(),
                curve_qty: *qty,
            });
        }
        self
    }

    /// 款式：每个尺码一个 EAN（{style}-{size}）；库存为 0 的尺码不写入库存表
    pub fn style(
        mut self,
        style: &str,
        hierarchy: &HierarchyKey,
        stock: &[(&str, Qty)],
        total_sizes: u32,
    ) -> Self {
        self = self.style_without_master(style, hierarchy, stock);
        self.inputs.size_master.push(SizeMasterEntry {
            style: style.to_string(),
            total_sizes,
        });
        self
    }

    /// 款式（不写尺码主档）
    pub fn style_without_master(
        mut self,
        style: &str,
        hierarchy: &HierarchyKey,
        stock: &[(&str, Qty)],
    ) -> Self {
        for (size, qty) in stock {
            let ean = format!("{}-{}", style, size);
            self.inputs.style_master.push(StyleMasterEntry {
                style: style.to_string(),
                ean: ean.clone(),
                hierarchy: hierarchy.clone(),
                size: size.to_string(),
            });
            if *qty > 0 {
                self.inputs.warehouse_stock.push(WarehouseStock { ean, wh_qty: *qty });
            }
        }
        self
    }

    pub fn build(self) -> AllocationInputs {
        self.inputs
    }

    /// 写出五个 CSV 文件
    pub fn write_csv(&self, dir: &Path) -> InputPaths {
        let paths = InputPaths {
            display_capacity: Some(dir.join("display_capacity.csv")),
            style_master: Some(dir.join("style_master.csv")),
            warehouse_stock: Some(dir.join("warehouse_stock.csv")),
            size_curve: Some(dir.join("size_curve.csv")),
            size_master: Some(dir.join("size_master.csv")),
        };

        let inputs = &self.inputs;
        write_table(
            paths.display_capacity.as_deref().unwrap(),
            &["Store", "Dept", "SubDept", "Class", "SubClass", "MC", "DisplayCapacity"],
            inputs.display_capacity.iter().map(|row| {
                let mut record = vec![row.store.clone()];
                record.extend(hierarchy_fields(&row.hierarchy));
                record.push(row.display_capacity.to_string());
                record
            }),
        );
        write_table(
            paths.style_master.as_deref().unwrap(),
            &["Style", "EAN", "Dept", "SubDept", "Class", "SubClass", "MC", "Size"],
            inputs.style_master.iter().map(|row| {
                let mut record = vec![row.style.clone(), row.ean.clone()];
                record.extend(hierarchy_fields(&row.hierarchy));
                record.push(row.size.clone());
                record
            }),
        );
        write_table(
            paths.warehouse_stock.as_deref().unwrap(),
            &["EAN", "WH_Qty"],
            inputs
                .warehouse_stock
                .iter()
                .map(|row| vec![row.ean.clone(), row.wh_qty.to_string()]),
        );
        write_table(
            paths.size_curve.as_deref().unwrap(),
            &["Dept", "SubDept", "Class", "SubClass", "MC", "Size", "CurveQty"],
            inputs.size_curve.iter().map(|row| {
                let mut record = hierarchy_fields(&row.hierarchy);
                record.push(row.size.clone());
                record.push(row.curve_qty.to_string());
                record
            }),
        );
        write_table(
            paths.size_master.as_deref().unwrap(),
            &["Style", "TotalSizes"],
            inputs
                .size_master
                .iter()
                .map(|row| vec![row.style.clone(), row.total_sizes.to_string()]),
        );

        paths
    }
}

fn hierarchy_fields(key: &HierarchyKey) -> Vec<String> {
    vec![
        key.dept.clone(),
        key.sub_dept.clone(),
        key.class.clone(),
        key.sub_class.clone(),
        key.mc.clone(),
    ]
}

fn write_table<I>(path: &Path, header: &[&str], records: I)
where
    I: Iterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(header).unwrap();
    for record in records {
        writer.write_record(&record).unwrap();
    }
    writer.flush().unwrap();
}
