//! `/global.css` generated from theme tokens.

use crate::config::ThemeSectionConfig;

/// Page layout rules; colors come from the `:root` variables.
const EPISODE_CSS: &str = include_str!("templates/episode.css");

/// Build the stylesheet for `theme`.
///
/// Breakpoints are emitted widest first so narrower ones win.
pub fn global_css(theme: &ThemeSectionConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in theme.palette.entries() {
        css.push_str(&format!("  --{name}: {value};\n"));
    }
    css.push_str("}\n\n");

    let mut breakpoints: Vec<_> = theme.breakpoints.iter().collect();
    breakpoints.sort_by(|a, b| b.max_width.cmp(&a.max_width));
    for bp in breakpoints {
        css.push_str(&format!(
            "@media (max-width: {}px) {{\n  html {{\n    font-size: {};\n  }}\n}}\n\n",
            bp.max_width, bp.font_size
        ));
    }

    let t = &theme.typography;
    css.push_str(&format!(
        "* {{\n  padding: 0;\n  margin: 0;\n  box-sizing: border-box;\n}}\n\n\
         body {{\n  background: var(--gray-50);\n}}\n\n\
         body, input, textarea, button {{\n  font: {} {} {};\n  color: var(--gray-500);\n}}\n\n\
         h1 {{\n  font-size: {};\n}}\n\n\
         h2 {{\n  font-size: {};\n}}\n\n\
         button {{\n  cursor: pointer;\n}}\n\n",
        t.font_weight, t.base_size, t.font_family, t.h1_size, t.h2_size
    ));

    css.push_str(EPISODE_CSS);
    css
}
