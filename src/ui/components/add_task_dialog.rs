//! Add Task 弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::theme::ThemeColors;

/// 弹窗内的输入字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddTaskField {
    #[default]
    Title,
    Description,
    DueDate,
}

impl AddTaskField {
    fn next(&self) -> Self {
        match self {
            AddTaskField::Title => AddTaskField::Description,
            AddTaskField::Description => AddTaskField::DueDate,
            AddTaskField::DueDate => AddTaskField::Title,
        }
    }
}

/// Add Task 弹窗数据
#[derive(Debug, Default)]
pub struct AddTaskData {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub focus: AddTaskField,
}

impl AddTaskData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换到下一个字段（Tab）
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// 输入字符到当前字段
    pub fn input_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    /// 删除当前字段末尾字符
    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            AddTaskField::Title => &mut self.title,
            AddTaskField::Description => &mut self.description,
            AddTaskField::DueDate => &mut self.due_date,
        }
    }
}

/// 渲染 Add Task 弹窗
pub fn render(frame: &mut Frame, data: &AddTaskData, colors: &ThemeColors) {
    let popup_area = centered_rect(frame.area(), 62, 12);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" New Task ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [_, title_area, desc_area, due_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_field(
        frame,
        title_area,
        "Title",
        &data.title,
        data.focus == AddTaskField::Title,
        colors,
    );
    render_field(
        frame,
        desc_area,
        "Description",
        &data.description,
        data.focus == AddTaskField::Description,
        colors,
    );
    render_field(
        frame,
        due_area,
        "Due (YYYY-MM-DD)",
        &data.due_date,
        data.focus == AddTaskField::DueDate,
        colors,
    );

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" create  ", Style::default().fg(colors.muted)),
        Span::styled("Tab", Style::default().fg(colors.highlight)),
        Span::styled(" next field  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// 渲染单个输入字段（label 行 + 输入行）
fn render_field(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    label: &str,
    value: &str,
    focused: bool,
    colors: &ThemeColors,
) {
    let [label_area, input_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("  {}:", label),
            Style::default().fg(colors.muted),
        )),
        label_area,
    );

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(value.to_string(), Style::default().fg(colors.text)),
    ];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), input_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_and_input() {
        let mut data = AddTaskData::new();
        data.input_char('a');
        assert_eq!(data.title, "a");

        data.focus_next();
        data.input_char('b');
        assert_eq!(data.description, "b");

        data.focus_next();
        data.input_char('2');
        data.backspace();
        assert!(data.due_date.is_empty());

        data.focus_next();
        assert_eq!(data.focus, AddTaskField::Title);
    }
}
