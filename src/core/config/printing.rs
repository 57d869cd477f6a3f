use crate::core::config::data::Config;

impl Config {
    /// One line per key, showing defaults for unset values.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec!["Current configuration:".to_string()];
        lines.push(match self.tick_interval_ms {
            Some(ms) => format!("  tick-interval-ms: {ms}"),
            None => format!(
                "  tick-interval-ms: (unset, default: {})",
                self.tick_interval().as_millis()
            ),
        });
        lines.push(match &self.theme {
            Some(theme) => format!("  theme: {theme}"),
            None => "  theme: (unset, default: dark)".to_string(),
        });
        lines.push(format!("  markdown: {}", on_off(self.markdown_enabled())));
        lines.push(format!("  syntax: {}", on_off(self.syntax_enabled())));
        lines
    }

    pub fn print_all(&self) {
        for line in self.describe() {
            println!("{line}");
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
