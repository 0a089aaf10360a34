//! Line cleanup applied to extracted text before it is written out.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::split_lines;
use crate::parser::ExtractOptions;

/// Cleans individual lines of extracted text.
///
/// Characters below U+0020 other than tab, LF and CR are not allowed in XML
/// 1.0 and would make the DOCX unreadable, so they are removed. Lone
/// surrogates cannot appear in a Rust `String`.
pub struct LineCleaner {
    strip_control: bool,
    normalize: bool,
    control_regex: Regex,
}

impl LineCleaner {
    /// Create a cleaner from extraction options.
    pub fn new(options: &ExtractOptions) -> Self {
        Self {
            strip_control: options.strip_control_chars,
            normalize: options.normalize_unicode,
            control_regex: Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F\u{FFFE}\u{FFFF}]").unwrap(),
        }
    }

    /// Clean one page's text, keeping line boundaries intact.
    ///
    /// Lines are split before stripping so that vertical tabs and form
    /// feeds still end a line. The result joins lines with `\n`.
    pub fn clean_page(&self, text: &str) -> String {
        if !self.strip_control && !self.normalize {
            return text.to_string();
        }
        split_lines(text)
            .into_iter()
            .map(|line| self.clean_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Clean a single line.
    pub fn clean_line(&self, line: &str) -> String {
        let mut out = if self.strip_control {
            self.control_regex.replace_all(line, "").to_string()
        } else {
            line.to_string()
        };
        if self.normalize {
            out = out.nfc().collect();
        }
        out
    }
}

impl Default for LineCleaner {
    fn default() -> Self {
        Self::new(&ExtractOptions::default())
    }
}
