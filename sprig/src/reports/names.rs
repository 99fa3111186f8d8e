//! Names command report data structures.

use sprig_core::IdentifierForms;

use super::output::{Output, Report};

/// The identifier forms derived from one raw name.
#[derive(Debug)]
pub struct NamesReport {
    /// The name as given.
    pub raw: String,
    /// Derived forms.
    pub forms: IdentifierForms,
}

impl Report for NamesReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(self.forms.title());
        out.key_value("input", &self.raw);
        out.key_value("words", &self.forms.words().join(" "));
        out.newline();
        out.key_value_indented("title", self.forms.title());
        out.key_value_indented("file", self.forms.file());
        out.key_value_indented("symbol", self.forms.symbol());
        out.key_value_indented("snake", self.forms.snake());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::BufferOutput;

    #[test]
    fn test_render_names() {
        let report = NamesReport {
            raw: "São Paulo Plugin".to_string(),
            forms: sprig_core::derive("São Paulo Plugin").unwrap(),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.text(),
            "# Sao Paulo Plugin\n\
             input: São Paulo Plugin\n\
             words: sao paulo plugin\n\
             \n  \
             title: Sao Paulo Plugin\n  \
             file: sao-paulo-plugin\n  \
             symbol: Sao_Paulo_Plugin\n  \
             snake: sao_paulo_plugin"
        );
    }
}
