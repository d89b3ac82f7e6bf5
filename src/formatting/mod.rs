use crate::core::RoughnessCondition;
use crate::priority::PriorityTier;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    /// ASCII table borders instead of box drawing
    pub ascii: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            ascii: false,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, ascii: bool) -> Self {
        Self { color, ascii }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Plain output: ASCII-only, no colors
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            ascii: true,
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn condition(&self, condition: &RoughnessCondition) -> String;
    fn tier(&self, tier: PriorityTier) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    fn enabled(&self) -> bool {
        self.config.color.should_use_color()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        if self.enabled() {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.enabled() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.enabled() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.enabled() {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn condition(&self, condition: &RoughnessCondition) -> String {
        let label = condition.label();
        if !self.enabled() {
            return label.to_string();
        }
        match condition {
            RoughnessCondition::VeryGood => label.green().to_string(),
            RoughnessCondition::Good => label.blue().to_string(),
            RoughnessCondition::Fair => label.truecolor(243, 156, 18).to_string(),
            RoughnessCondition::Poor => label.red().to_string(),
            RoughnessCondition::Unrecognized(_) => label.bright_black().to_string(),
        }
    }

    fn tier(&self, tier: PriorityTier) -> String {
        let label = tier.label();
        if !self.enabled() {
            return label.to_string();
        }
        match tier {
            PriorityTier::High => label.red().bold().to_string(),
            PriorityTier::Medium => label.yellow().to_string(),
            PriorityTier::Low => label.green().to_string(),
            PriorityTier::None | PriorityTier::Unclassified => label.dimmed().to_string(),
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn condition(&self, condition: &RoughnessCondition) -> String {
        condition.label().to_string()
    }

    fn tier(&self, tier: PriorityTier) -> String {
        tier.label().to_string()
    }
}

/// Pick the formatter matching a configuration
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color == ColorMode::Never {
        Box::new(PlainFormatter)
    } else {
        Box::new(ColoredFormatter::new(config))
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_config_disables_color_and_box_drawing() {
        let config = FormattingConfig::plain();
        assert!(!config.color.should_use_color());
        assert!(config.ascii);
    }

    #[test]
    fn plain_formatter_returns_labels_verbatim() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.condition(&RoughnessCondition::Fair), "Fair");
        assert_eq!(
            formatter.condition(&RoughnessCondition::parse("Rusak")),
            "Rusak"
        );
        assert_eq!(formatter.tier(PriorityTier::High), "High Priority");
        assert_eq!(formatter.header("Report"), "Report");
    }
}
