// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持印尼语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言代码
pub const SUPPORTED_LOCALES: [&str; 2] = ["id", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言（不支持的代码回落到 "id"）
///
/// # 参数
/// - locale: 语言代码（"id" 或 "en"）
pub fn set_locale(locale: &str) {
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        tracing::warn!(locale = locale, "不支持的语言，回落到 id");
        rust_i18n::set_locale("id");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use inventaris_gudang::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use inventaris_gudang::i18n::t_with_args;
/// let msg = t_with_args("import.summary", &[("count", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且测试默认并行执行，相关测试需串行化
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("fr");
        assert_eq!(current_locale(), "id");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("id");
        assert_eq!(t("import.no_valid_data"), "Tidak ada data valid untuk diimport");

        set_locale("en");
        assert_eq!(t("import.no_valid_data"), "No valid data to import");

        set_locale("id");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("id");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/barang.xlsx")]);
        assert!(msg.contains("/tmp/barang.xlsx"));
        assert!(msg.contains("File tidak ditemukan"));

        set_locale("en");
        let msg = t_with_args("import.summary", &[("count", "3")]);
        assert!(msg.starts_with('3'));

        set_locale("id");
    }
}
