//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 26),           // 深灰背景
        bg_secondary: Color::Rgb(44, 44, 48), // 选中卡片背景
        highlight: Color::Rgb(94, 177, 255),  // 亮蓝色
        text: Color::White,
        muted: Color::Rgb(128, 128, 132), // 灰色
        border: Color::Rgb(64, 64, 70),   // 深灰边框
        col_todo: Color::Rgb(148, 148, 152),
        col_in_progress: Color::Rgb(100, 181, 246), // 蓝色
        col_in_review: Color::Rgb(255, 196, 84),    // 琥珀色
        col_completed: Color::Rgb(98, 211, 130),    // 绿色
        tab_active_fg: Color::Black,
        tab_active_bg: Color::Rgb(94, 177, 255),
        info: Color::Rgb(100, 181, 246),
        warning: Color::Rgb(255, 213, 79),
        error: Color::Rgb(255, 95, 95),
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),           // 浅灰背景
        bg_secondary: Color::Rgb(232, 234, 238), // 选中卡片背景
        highlight: Color::Rgb(28, 100, 210),     // 深蓝色
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(118, 118, 124),
        border: Color::Rgb(202, 204, 210),
        col_todo: Color::Rgb(130, 130, 136),
        col_in_progress: Color::Rgb(33, 120, 220),
        col_in_review: Color::Rgb(196, 130, 0),
        col_completed: Color::Rgb(36, 150, 84),
        tab_active_fg: Color::White,
        tab_active_bg: Color::Rgb(28, 100, 210),
        info: Color::Rgb(33, 120, 220),
        warning: Color::Rgb(222, 148, 0),
        error: Color::Rgb(204, 54, 54),
    }
}

/// Dracula 主题
pub fn dracula_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 42, 54),
        bg_secondary: Color::Rgb(58, 60, 78),
        highlight: Color::Rgb(189, 147, 249), // 紫色
        text: Color::Rgb(248, 248, 242),
        muted: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        col_todo: Color::Rgb(98, 114, 164),
        col_in_progress: Color::Rgb(139, 233, 253), // cyan
        col_in_review: Color::Rgb(241, 250, 140),   // yellow
        col_completed: Color::Rgb(80, 250, 123),    // green
        tab_active_fg: Color::Rgb(40, 42, 54),
        tab_active_bg: Color::Rgb(189, 147, 249),
        info: Color::Rgb(139, 233, 253),
        warning: Color::Rgb(255, 184, 108),
        error: Color::Rgb(255, 85, 85),
    }
}
