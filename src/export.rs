// ==========================================
// 铸造生产记录看板 - CSV 导出
// ==========================================
// 用途: 表格视图的导出（当前筛选结果）
// 说明: 未知数值输出为本地化的"未知"标签，不留空
// ==========================================

use crate::domain::record::EnrichedRecord;
use crate::domain::types::TempBucket;
use crate::i18n::t;
use csv::Writer;
use std::io::Write;
use thiserror::Error;

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

// CSV 表头（德文列名）
pub const CSV_HEADER: &[&str] = &[
    "ID",
    "Datum",
    "Monat",
    "Ofen",
    "Temperatur",
    "Legierung",
    "Gewicht kg",
    "Tonnen",
    "Tonnen gerundet",
    "Material",
    "Temperaturbereich",
    "Bemerkung",
];

fn number_cell(value: Option<f64>, unknown: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => unknown.to_string(),
    }
}

fn to_row(record: &EnrichedRecord, unknown: &str, unmatched: &str) -> Vec<String> {
    vec![
        record.raw.id.clone(),
        record.raw.date.clone(),
        record.month_key.clone().unwrap_or_else(|| unknown.to_string()),
        record.raw.furnace.clone(),
        number_cell(record.temperature_c, unknown),
        number_cell(record.alloy_value, unknown),
        number_cell(record.weight_kg, unknown),
        number_cell(record.tonnes, unknown),
        record
            .tonnes_rounded
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| unknown.to_string()),
        record.material.to_string(),
        match record.temp_bucket {
            TempBucket::Target(_) => record.temp_bucket.label(),
            TempBucket::Unmatched => unmatched.to_string(),
        },
        record.raw.remarks.clone(),
    ]
}

/// 写出 CSV（含表头），返回数据行数
pub fn write_csv<W: Write>(writer: W, records: &[EnrichedRecord]) -> Result<usize, ExportError> {
    let unknown = t("common.unknown");
    let unmatched = t("common.unmatched");

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record(to_row(record, &unknown, &unmatched))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// 导出到文件
pub fn export_csv_file(
    path: impl AsRef<std::path::Path>,
    records: &[EnrichedRecord],
) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(file, records)
}
