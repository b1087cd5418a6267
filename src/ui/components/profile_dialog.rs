//! Edit Profile 弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::model::Profile;
use crate::theme::ThemeColors;

/// 弹窗内的输入字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Username,
    FullName,
    AvatarUrl,
}

impl ProfileField {
    fn next(&self) -> Self {
        match self {
            ProfileField::Username => ProfileField::FullName,
            ProfileField::FullName => ProfileField::AvatarUrl,
            ProfileField::AvatarUrl => ProfileField::Username,
        }
    }
}

/// Edit Profile 弹窗数据
#[derive(Debug, Default)]
pub struct ProfileData {
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
    pub focus: ProfileField,
}

impl ProfileData {
    /// 用当前资料预填
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        match profile {
            Some(p) => Self {
                username: p.username.clone().unwrap_or_default(),
                full_name: p.full_name.clone().unwrap_or_default(),
                avatar_url: p.avatar_url.clone().unwrap_or_default(),
                focus: ProfileField::Username,
            },
            None => Self::default(),
        }
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
            ProfileField::Username => &mut self.username,
            ProfileField::FullName => &mut self.full_name,
            ProfileField::AvatarUrl => &mut self.avatar_url,
        }
    }
}

/// 渲染 Edit Profile 弹窗
pub fn render(frame: &mut Frame, data: &ProfileData, colors: &ThemeColors) {
    let popup_area = centered_rect(frame.area(), 62, 12);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Edit Profile ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [_, username_area, full_name_area, avatar_area, _, hint_area] = Layout::vertical([
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
        username_area,
        "Username",
        &data.username,
        data.focus == ProfileField::Username,
        colors,
    );
    render_field(
        frame,
        full_name_area,
        "Full name",
        &data.full_name,
        data.focus == ProfileField::FullName,
        colors,
    );
    render_field(
        frame,
        avatar_area,
        "Avatar URL",
        &data.avatar_url,
        data.focus == ProfileField::AvatarUrl,
        colors,
    );

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" save  ", Style::default().fg(colors.muted)),
        Span::styled("Tab", Style::default().fg(colors.highlight)),
        Span::styled(" next field  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

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
    use uuid::Uuid;

    #[test]
    fn test_from_profile_prefills() {
        let profile = Profile {
            id: Uuid::new_v4(),
            username: Some("ada".to_string()),
            full_name: None,
            avatar_url: Some("https://x/a.png".to_string()),
        };
        let data = ProfileData::from_profile(Some(&profile));
        assert_eq!(data.username, "ada");
        assert!(data.full_name.is_empty());
        assert_eq!(data.avatar_url, "https://x/a.png");
    }
}
