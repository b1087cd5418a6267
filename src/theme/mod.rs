mod colors;
mod detect;

use ratatui::style::Color;

pub use colors::*;
pub use detect::detect_system_theme;

use crate::model::ColumnKind;

/// 主题类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
    Dracula,
}

impl Theme {
    /// 主题显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Auto => "Auto",
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Dracula => "Dracula",
        }
    }

    /// 所有主题列表
    pub fn all() -> &'static [Theme] {
        &[Theme::Auto, Theme::Dark, Theme::Light, Theme::Dracula]
    }

    /// 从名称创建主题（用于配置加载）
    pub fn from_name(name: &str) -> Self {
        match name {
            "Auto" => Theme::Auto,
            "Dark" => Theme::Dark,
            "Light" => Theme::Light,
            "Dracula" => Theme::Dracula,
            _ => Theme::Auto, // 默认 Auto
        }
    }
}

/// 主题颜色方案
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// 主背景色
    pub bg: Color,
    /// 次级背景色（选中卡片等）
    pub bg_secondary: Color,
    /// 高亮色（选中项、快捷键等）
    pub highlight: Color,
    /// 普通文字
    pub text: Color,
    /// 次要文字（灰色）
    pub muted: Color,
    /// 边框颜色
    pub border: Color,
    /// 列 - To Do
    pub col_todo: Color,
    /// 列 - In Progress
    pub col_in_progress: Color,
    /// 列 - In Review
    pub col_in_review: Color,
    /// 列 - Completed
    pub col_completed: Color,
    /// Tab 选中前景色
    pub tab_active_fg: Color,
    /// Tab 选中背景色
    pub tab_active_bg: Color,
    /// 信息色 (蓝色)
    pub info: Color,
    /// 警告色 (黄色)
    pub warning: Color,
    /// 错误色 (红色) - 失败 toast
    pub error: Color,
}

impl ThemeColors {
    /// 列颜色
    pub fn column(&self, kind: ColumnKind) -> Color {
        match kind {
            ColumnKind::Todo => self.col_todo,
            ColumnKind::InProgress => self.col_in_progress,
            ColumnKind::InReview => self.col_in_review,
            ColumnKind::Completed => self.col_completed,
        }
    }

    /// 任务标签颜色（后端存颜色名）
    pub fn tag(&self, name: &str) -> Color {
        match name {
            "red" => self.error,
            "blue" => self.info,
            "amber" | "yellow" => self.warning,
            "green" | "accent" => self.col_completed,
            "purple" => Color::Rgb(185, 148, 225),
            _ => self.muted, // "gray" 及未知颜色
        }
    }
}

/// 获取指定主题的颜色方案
pub fn get_theme_colors(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Auto => {
            if detect_system_theme() {
                dark_colors()
            } else {
                light_colors()
            }
        }
        Theme::Dark => dark_colors(),
        Theme::Light => light_colors(),
        Theme::Dracula => dracula_colors(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name_roundtrip() {
        for theme in Theme::all() {
            assert_eq!(Theme::from_name(theme.label()), *theme);
        }
        assert_eq!(Theme::from_name("Nonexistent"), Theme::Auto);
    }
}
