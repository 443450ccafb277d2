// ==========================================
// 铸造生产记录看板 - 记录领域模型
// ==========================================
// RawRecord: 外部识别服务输出的原始记录（全部为字符串）
// EnrichedRecord: 归一化 + 分类后的派生记录（不落库，随设置重算）
// ==========================================

use crate::domain::types::{MaterialClass, TempBucket};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// RawRecord - 原始记录
// ==========================================
// 用途: 抽取适配器写入，记录仓只追加
// 字段别名: 兼容德文列名（识别结果常直接沿用协议表头）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String, // 记录标识（缺失时由导入器补 UUID）

    #[serde(alias = "datum", deserialize_with = "lenient_string")]
    pub date: String, // 日期（自由格式，通常为 dd.mm.yy）

    #[serde(alias = "ofen", alias = "oven", deserialize_with = "lenient_string")]
    pub furnace: String, // 炉号

    #[serde(alias = "temp", alias = "temperatur", deserialize_with = "lenient_string")]
    pub temperature: String, // 温度（字符串，可含 °C）

    #[serde(alias = "legierung", deserialize_with = "lenient_string")]
    pub alloy: String, // 合金值（字符串，铜含量百分比）

    #[serde(alias = "gewicht", deserialize_with = "lenient_string")]
    pub weight: String, // 重量（字符串，kg，可含千分位/单位）

    #[serde(alias = "bemerkung", alias = "bemerkungen", deserialize_with = "lenient_string")]
    pub remarks: String, // 备注
}

/// 识别结果的字段宽松读取：字符串原样，数字/布尔转文本，null 及其他结构为空串
///
/// 单个字段类型不符不能让整行（乃至整个文档）失败
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => String::new(),
    })
}

// ==========================================
// EnrichedRecord - 派生记录
// ==========================================
// 红线: 纯派生值，同一 (RawRecord, Settings) 永远得到同一结果
// None 表示字段无法解析（"unknown"），向下游传播而不是中断批次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub raw: RawRecord,

    pub temperature_c: Option<f64>, // 解析后的温度（°C）
    pub alloy_value: Option<f64>,   // 解析后的合金值
    pub weight_kg: Option<f64>,     // 解析后的重量（kg）
    pub tonnes: Option<f64>,        // 重量（t）= kg / 1000
    pub tonnes_rounded: Option<f64>, // 按取整模式取整后的吨数（2 位小数）

    pub material: MaterialClass, // 材质分类
    pub temp_bucket: TempBucket, // 温度档位

    pub month_key: Option<String>, // "YYYY-MM"，日期格式不合法时为 None
}

impl EnrichedRecord {
    pub fn id(&self) -> &str {
        &self.raw.id
    }
}

// ==========================================
// DocumentHandle - 上传文档句柄
// ==========================================
// 核心层不解析其内容，只透传给抽取适配器
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentHandle {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// 从本地文件读取文档（按扩展名推断类型）
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let content_type = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
            Some(ext) if ext.eq_ignore_ascii_case("json") => "application/json",
            _ => "application/octet-stream",
        };
        Ok(Self::new(name, content_type, bytes))
    }
}
