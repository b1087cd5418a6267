//! UI 杂项状态
//!
//! 与业务无关的每帧渲染状态（点击区域缓存等）。

use crate::ui::click_areas::ClickAreas;

/// UI 状态
#[derive(Debug, Default)]
pub struct UiState {
    /// 每帧渲染时登记的可点击区域
    pub click_areas: ClickAreas,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
