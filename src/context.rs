use std::path::{Path, PathBuf};

/// Which kind of content a collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentKind {
    Writing,
    Curation,
}

/// Where one content kind reads from and writes to.
#[derive(Debug, Clone)]
pub(crate) struct Collection {
    pub kind: ContentKind,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub index_file: PathBuf,
    /// Prefix of detail page links in the index, relative to the index page.
    pub link_prefix: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub article_template: PathBuf,
    pub entry_template: PathBuf,
    pub collections: Vec<Collection>,
}

impl Context {
    /// Conventional site layout under `root`.
    pub fn from_root(root: &Path) -> Self {
        let assets = root.join("assets");
        let templates = assets.join("templates");
        Self {
            article_template: templates.join("article_template.html"),
            entry_template: templates.join("entry_template.html"),
            collections: vec![
                Collection {
                    kind: ContentKind::Writing,
                    source_dir: assets.join("articles").join("markdown"),
                    output_dir: assets.join("articles").join("html"),
                    index_file: root.join("writing.html"),
                    link_prefix: "assets/articles/html".to_string(),
                },
                Collection {
                    kind: ContentKind::Curation,
                    source_dir: assets.join("curation").join("markdown"),
                    output_dir: assets.join("curation").join("html"),
                    index_file: root.join("curation.html"),
                    link_prefix: "assets/curation/html".to_string(),
                },
            ],
        }
    }
}
