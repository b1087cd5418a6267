//! 对话框通用布局工具

use ratatui::layout::Rect;

/// 居中弹窗区域（宽高不超过屏幕）
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 60, 10);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 10);
        assert_eq!(rect.y, 7);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_screens() {
        let area = Rect::new(0, 0, 20, 6);
        let rect = centered_rect(area, 60, 10);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
