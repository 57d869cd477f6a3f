use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Terminal background, used to pick a matching syntect theme
    pub background_color: Color,

    // Message chrome
    pub user_label_style: Style,
    pub assistant_label_style: Style,
    pub toggle_style: Style,
    pub placeholder_style: Style,
    pub reasoning_border_style: Style,

    // Markdown
    pub paragraph_style: Style,
    pub heading_color: Color,
    pub inline_code_style: Style,
    pub codeblock_text_style: Style,
    pub codeblock_bg: Option<Color>,
    pub list_marker_style: Style,
    pub blockquote_style: Style,
    pub link_style: Style,
    pub rule_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,

            user_label_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            assistant_label_style: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            toggle_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            placeholder_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            reasoning_border_style: Style::default().fg(Color::DarkGray),

            paragraph_style: Style::default().fg(Color::White),
            heading_color: Color::LightCyan,
            inline_code_style: Style::default().fg(Color::LightYellow),
            codeblock_text_style: Style::default().fg(Color::Gray),
            codeblock_bg: Some(Color::Rgb(30, 30, 30)),
            list_marker_style: Style::default().fg(Color::LightCyan),
            blockquote_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            link_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            rule_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,

            user_label_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            assistant_label_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            toggle_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            placeholder_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            reasoning_border_style: Style::default().fg(Color::Gray),

            paragraph_style: Style::default().fg(Color::Black),
            heading_color: Color::Blue,
            inline_code_style: Style::default().fg(Color::Magenta),
            codeblock_text_style: Style::default().fg(Color::Black),
            codeblock_bg: Some(Color::Rgb(240, 240, 240)),
            list_marker_style: Style::default().fg(Color::Blue),
            blockquote_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            link_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            rule_style: Style::default().fg(Color::Gray),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // "dark", "default" and anything unknown
            _ => Self::dark_default(),
        }
    }

    pub fn md_paragraph_style(&self) -> Style {
        self.paragraph_style
    }

    pub fn md_heading_style(&self, level: u8) -> Style {
        let style = Style::default().fg(self.heading_color);
        match level {
            1 => style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            2 => style.add_modifier(Modifier::BOLD),
            _ => style.add_modifier(Modifier::ITALIC),
        }
    }

    pub fn md_inline_code_style(&self) -> Style {
        self.inline_code_style
    }

    pub fn md_codeblock_text_style(&self) -> Style {
        self.codeblock_text_style
    }

    pub fn md_codeblock_bg_color(&self) -> Option<Color> {
        self.codeblock_bg
    }

    pub fn md_list_marker_style(&self) -> Style {
        self.list_marker_style
    }

    pub fn md_blockquote_style(&self) -> Style {
        self.blockquote_style
    }

    pub fn md_link_style(&self) -> Style {
        self.link_style
    }

    pub fn md_rule_style(&self) -> Style {
        self.rule_style
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("LIGHT").background_color, Color::White);
        assert_eq!(Theme::from_name("dark").background_color, Color::Black);
        assert_eq!(Theme::from_name("solarized").background_color, Color::Black);
    }

    #[test]
    fn heading_levels_get_distinct_styles() {
        let theme = Theme::dark_default();
        assert_ne!(theme.md_heading_style(1), theme.md_heading_style(2));
        assert_ne!(theme.md_heading_style(2), theme.md_heading_style(3));
        assert_eq!(theme.md_heading_style(4), theme.md_heading_style(6));
    }
}
