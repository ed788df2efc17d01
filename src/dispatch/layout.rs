//! Category padding and grouping.
//!
//! Both depend on global write history, so the state lives with the
//! dispatcher worker and is mutated only there.

use crate::compose::Category;

use super::request::LayoutUpdate;

/// Width of a text fragment in characters.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cross-logger formatting state.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    padding: bool,
    max_width: usize,
    grouping: bool,
    last_category: String,
}

impl Layout {
    pub fn new(padding: bool, max_width: usize, grouping: bool) -> Self {
        Self {
            padding,
            max_width,
            grouping,
            last_category: String::new(),
        }
    }

    pub fn apply(&mut self, update: LayoutUpdate) {
        match update {
            LayoutUpdate::Padding { enabled, max_width } => {
                self.padding = enabled;
                self.max_width = max_width;
            }
            LayoutUpdate::Grouping(enabled) => self.grouping = enabled,
        }
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn last_category(&self) -> &str {
        &self.last_category
    }

    /// Build the final line (without terminator) and record the category
    /// as the last one written.
    pub fn render(&mut self, category: &Category, text: &str) -> String {
        let mut label = category.compose();
        let width = text_width(&label);

        let padding = if self.padding {
            (self.max_width + 1).saturating_sub(width)
        } else if !category.name.is_empty() {
            1
        } else {
            0
        };

        if self.grouping && category.name == self.last_category {
            label = " ".repeat(width);
        }

        let mut line = String::with_capacity(label.len() + padding + text.len());
        line.push_str(&label);
        line.extend(std::iter::repeat(' ').take(padding));
        line.push_str(text);

        self.last_category.clear();
        self.last_category.push_str(&category.name);

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_padding_aligns_to_widest() {
        let mut layout = Layout::new(true, 7, false);

        let info = layout.render(&Category::bracketed("INFO"), "t msg");
        let empty = layout.render(&Category::new(""), "t msg");
        let wide = layout.render(&Category::new("OUTGOIN"), "t msg");

        assert_eq!(info, "[INFO]  t msg");
        assert_eq!(empty, "        t msg");
        assert_eq!(wide, "OUTGOIN t msg");
    }

    #[test]
    fn test_no_padding() {
        let mut layout = Layout::new(false, 20, false);

        assert_eq!(layout.render(&Category::bracketed("INFO"), "t msg"), "[INFO] t msg");
        assert_eq!(layout.render(&Category::new(""), " msg"), " msg");
    }

    #[test]
    fn test_narrower_max_width_never_underflows() {
        let mut layout = Layout::new(true, 2, false);
        assert_eq!(layout.render(&Category::new("ERROR"), "x"), "ERRORx");
    }

    #[test]
    fn test_grouping_blanks_repeated_label() {
        let mut layout = Layout::new(true, 7, true);

        let first = layout.render(&Category::bracketed("ERROR"), "a");
        let second = layout.render(&Category::bracketed("ERROR"), "b");
        let other = layout.render(&Category::bracketed("INFO"), "c");
        let third = layout.render(&Category::bracketed("ERROR"), "d");

        assert_eq!(first, "[ERROR] a");
        assert_eq!(second, "        b");
        assert_eq!(other, "[INFO]  c");
        assert_eq!(third, "[ERROR] d");
        assert_eq!(layout.last_category(), "ERROR");
    }

    #[test]
    fn test_grouping_compares_names_across_formatters() {
        let mut layout = Layout::new(false, 0, true);

        layout.render(&Category::bracketed("DB"), "a");
        let plain = layout.render(&Category::new("DB"), "b");
        assert_eq!(plain, "   b");
    }

    #[test]
    fn test_updates() {
        let mut layout = Layout::default();
        layout.apply(LayoutUpdate::Padding {
            enabled: true,
            max_width: 9,
        });
        layout.apply(LayoutUpdate::Grouping(true));

        assert_eq!(layout.max_width(), 9);
        layout.render(&Category::new("A"), "x");
        assert_eq!(layout.render(&Category::new("A"), "y"), "          y");
    }

    proptest! {
        #[test]
        fn prop_timestamp_column_is_aligned(
            names in proptest::collection::vec("[A-Z]{0,12}", 1..8),
            grouping in any::<bool>(),
        ) {
            let categories: Vec<Category> = names.iter().map(|n| Category::bracketed(n)).collect();
            let max_width = categories
                .iter()
                .map(|c| text_width(&c.compose()))
                .max()
                .unwrap_or(0);

            let mut layout = Layout::new(true, max_width, grouping);
            for category in &categories {
                let line = layout.render(category, "ts");
                prop_assert_eq!(line.find("ts"), Some(max_width + 1));
            }
        }
    }
}
