//! macOS 系统主题检测

use std::process::Command;

/// 检测系统主题
///
/// 返回 `true` 表示深色模式，`false` 表示浅色模式。
/// 只有 macOS 提供可靠的查询方式（defaults 读 AppleInterfaceStyle）；
/// 其他平台一律按浅色处理，由用户手动切主题。
pub fn detect_system_theme() -> bool {
    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|output| {
            output.status.success()
                && String::from_utf8_lossy(&output.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_system_theme() {
        // 只是确保函数不会 panic
        let _is_dark = detect_system_theme();
    }
}
