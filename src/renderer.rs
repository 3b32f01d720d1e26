use std::path::Path;

use crate::error::BuildError;

/// An HTML template with literal `{{name}}` placeholders.
#[derive(Debug, Clone)]
pub(crate) struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read the template from disk. Templates are loaded fresh for every page.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        std::fs::read_to_string(path)
            .map(Self::new)
            .map_err(|e| BuildError::io(path, e))
    }

    /// Replace every `{{key}}` with its value, in the order given.
    /// Placeholders not listed are left as they are.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> String {
        substitutions
            .iter()
            .fold(self.source.clone(), |out, (key, value)| {
                out.replace(&format!("{{{{{key}}}}}"), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        let tpl = Template::new("<title>{{title}}</title><h1>{{title}}</h1>{{date}}");
        assert_eq!(
            tpl.render(&[("title", "Hi"), ("date", "13 Nov. 2025")]),
            "<title>Hi</title><h1>Hi</h1>13 Nov. 2025"
        );
    }

    #[test]
    fn test_render_leaves_unknown_tokens() {
        let tpl = Template::new("{{title}} {{content}} {{unused}}");
        assert_eq!(tpl.render(&[("title", "T")]), "T {{content}} {{unused}}");
    }

    #[test]
    fn test_render_does_not_escape() {
        let tpl = Template::new("<main>{{content}}</main>");
        assert_eq!(
            tpl.render(&[("content", "<p>a & b</p>")]),
            "<main><p>a & b</p></main>"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Template::load(&dir.path().join("nope.html")).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
