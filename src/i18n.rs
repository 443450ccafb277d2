// ==========================================
// 铸造生产记录看板 - 国际化 (i18n)
// ==========================================
// 使用 rust-i18n 库
// 支持德文（默认）和英文，文案位于 locales/*.yml
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "de";

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"de" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use foundry_dashboard::i18n::t;
/// let msg = t("common.unknown");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数，占位符写作 %{name}）
///
/// # 示例
/// ```no_run
/// use foundry_dashboard::i18n::t_with_args;
/// let msg = t_with_args("upload.all_failed", &[("names", "scan_01.pdf")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// locale 为全局状态，切换语言的测试通过此锁串行执行
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
