// ==========================================
// 铸造生产记录看板 - 命令行入口
// ==========================================
// 用法: foundry-dashboard [--month YYYY-MM]... [--export out.csv] <文档>...
// 文档为识别服务导出的 JSON；设置从本地 SQLite 读取
// 语言: FOUNDRY_LOCALE=de|en（默认 de）
// ==========================================

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use foundry_dashboard::adapters::{JsonDocumentExtractor, SummaryInsightProvider};
use foundry_dashboard::app::{render_report, AppState};
use foundry_dashboard::config::ConfigManager;
use foundry_dashboard::db::get_default_db_path;
use foundry_dashboard::domain::DocumentHandle;
use foundry_dashboard::export::export_csv_file;
use foundry_dashboard::importer::{ImportError, UploadImporter};
use foundry_dashboard::i18n::{set_locale, DEFAULT_LOCALE};
use foundry_dashboard::{logging, APP_NAME, VERSION};

struct CliArgs {
    documents: Vec<String>,
    months: Vec<String>,
    export: Option<String>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        documents: Vec::new(),
        months: Vec::new(),
        export: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--month" => parsed
                .months
                .push(args.next().context("--month 需要一个 YYYY-MM 参数")?),
            "--export" => parsed.export = Some(args.next().context("--export 需要一个文件路径")?),
            _ => parsed.documents.push(arg),
        }
    }

    if parsed.documents.is_empty() {
        bail!("用法: foundry-dashboard [--month YYYY-MM]... [--export out.csv] <文档>...");
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    set_locale(&std::env::var("FOUNDRY_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string()));

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let config = ConfigManager::new(&db_path).context("无法打开设置数据库")?;
    let state = AppState::with_settings_store(Arc::new(config))
        .await
        .context("无法加载设置")?;

    let mut documents = Vec::with_capacity(args.documents.len());
    for path in &args.documents {
        let document = DocumentHandle::from_path(path)
            .await
            .map_err(|e| ImportError::DocumentReadError {
                path: path.clone(),
                message: e.to_string(),
            })?;
        documents.push(document);
    }

    let importer = UploadImporter::new(JsonDocumentExtractor);
    match state.upload(&importer, documents).await {
        Ok(outcome) => println!("{}", outcome.message),
        Err(ImportError::AllFailed { message, .. }) => {
            println!("{}", message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    state.select_months(args.months).await;

    let view = state.view().await;
    let summary = state.summary().await;
    let report = state.validation_report().await;
    let insight = state.refresh_insight(&SummaryInsightProvider).await;

    for line in render_report(&view, &summary, &report, insight.as_deref()) {
        println!("{}", line);
    }

    if let Some(path) = args.export {
        let rows = export_csv_file(&path, &view.filtered).context("CSV 导出失败")?;
        tracing::info!(path = %path, rows, "CSV 导出完成");
    }

    Ok(())
}
