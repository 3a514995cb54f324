use std::fmt;

/// A CSS rule: selectors plus property/value declarations.
///
/// `Display` renders the rule the way the stylesheet is written to disk:
///
/// ```text
/// .icon
/// {
///     background-position: 10px 0px;
///     width: 16px;
///     height: 16px;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CssRule {
    /// One or more CSS selectors, written without the leading dot.
    pub selectors: Vec<String>,
    /// Declarations in emit order.
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            write!(f, ".{}", selector)?;
            if i != self.selectors.len() - 1 {
                write!(f, ", ")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{{")?;
        for (property, value) in &self.declarations {
            writeln!(f, "    {}: {};", property, value)?;
        }
        writeln!(f, "}}")
    }
}

/// Renders rules as one stylesheet, a blank line between rules. No rules
/// give an empty string.
pub fn stylesheet(rules: &[CssRule]) -> String {
    let mut css = String::new();
    for (i, rule) in rules.iter().enumerate() {
        css.push_str(&rule.to_string());
        if i != rules.len() - 1 {
            css.push('\n');
        }
    }
    css
}
