use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::{debug, info};

use crate::{
    context::{Collection, ContentKind, Context},
    error::BuildError,
    index::update_index,
    metadata::{parse_front_matter, FrontMatter},
    renderer::Template,
};

use self::{
    data::{CurationImages, Entry, EntryDates},
    utils::{
        add_image_captions, render_curation_entry, render_curation_header, render_markdown,
        render_tag_links, sort_entry,
    },
};

mod data;
mod utils;

/// A parsed source document, before its page is written.
struct Source {
    file_name: String,
    stem: String,
    meta: FrontMatter,
    body: String,
}

fn read_source(path: &Path) -> anyhow::Result<Source> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let text = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
    let (meta, body) = parse_front_matter(&file_name, &text)?;
    Ok(Source {
        file_name,
        stem,
        meta,
        body,
    })
}

/// Markdown files directly inside `dir`, in lexicographic order.
/// A missing directory holds no sources.
fn list_sources(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];
    if !dir.is_dir() {
        debug!("{dir:?} does not exist, no sources to build");
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir).with_context(|| format!("while listing {dir:?}"))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn required_date(
    source: &Source,
    field: &'static str,
) -> Result<chrono::NaiveDateTime, BuildError> {
    source
        .meta
        .date(field)?
        .ok_or_else(|| BuildError::MissingRequiredField {
            file: source.file_name.clone(),
            field,
        })
}

/// Parse one source file, write its detail page and return its listing entry.
fn generate_page(ctx: &Context, collection: &Collection, path: &Path) -> anyhow::Result<Entry> {
    let source = read_source(path)?;
    let title = source
        .meta
        .string("title")
        .unwrap_or_else(|| source.stem.clone());

    let (dates, images) = match collection.kind {
        ContentKind::Writing => {
            let dates = EntryDates {
                start: required_date(&source, "date")?,
                end: None,
            };
            (dates, None)
        }
        ContentKind::Curation => {
            let dates = EntryDates {
                start: required_date(&source, "start-date")?,
                end: source.meta.date("end-date")?,
            };
            let image = |key: &str| {
                source
                    .meta
                    .string(key)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };
            let images = CurationImages {
                left: image("image-left"),
                middle: image("image-middle"),
                right: image("image-right"),
            };
            (dates, Some(images))
        }
    };

    let mut content = add_image_captions(&render_markdown(&source.body));
    if collection.kind == ContentKind::Curation {
        content = format!("{}\n{content}", render_curation_header());
    }

    let template = Template::load(&ctx.article_template)?;
    let page = template.render(&[
        ("title", title.as_str()),
        ("date", dates.label().as_str()),
        ("content", content.as_str()),
    ]);

    let file_name = format!("{}.html", source.stem);
    let out_path = collection.output_dir.join(&file_name);
    std::fs::write(&out_path, page).map_err(|e| BuildError::io(&out_path, e))?;
    info!("generated {out_path:?}");

    Ok(Entry {
        title,
        dates,
        tags: source.meta.tags(),
        link: format!("{}/{file_name}", collection.link_prefix),
        images,
    })
}

fn render_entry(ctx: &Context, kind: ContentKind, entry: &Entry) -> anyhow::Result<String> {
    match kind {
        ContentKind::Writing => {
            let template = Template::load(&ctx.entry_template)?;
            Ok(template.render(&[
                ("date", entry.dates.start_label().as_str()),
                ("link", entry.link.as_str()),
                ("title", entry.title.as_str()),
                ("tags", render_tag_links(&entry.tags, kind).as_str()),
            ]))
        }
        ContentKind::Curation => Ok(render_curation_entry(entry)),
    }
}

/// Build every page of one collection, then regenerate its index listing.
pub(crate) fn build_collection(ctx: &Context, collection: &Collection) -> anyhow::Result<()> {
    info!(
        "building {:?} from {:?}",
        collection.kind, collection.source_dir
    );
    fs_extra::dir::create_all(&collection.output_dir, false)
        .with_context(|| format!("while creating {:?}", collection.output_dir))?;

    let mut entries = vec![];
    for path in list_sources(&collection.source_dir)? {
        debug!("processing {path:?}");
        let entry = generate_page(ctx, collection, &path)
            .with_context(|| format!("while generating from {path:?}"))?;
        entries.push(entry);
    }

    entries.sort_by(sort_entry);

    let blocks = entries
        .iter()
        .map(|entry| render_entry(ctx, collection.kind, entry))
        .collect::<anyhow::Result<Vec<_>>>()?;
    update_index(&collection.index_file, &blocks)
        .with_context(|| format!("while updating {:?}", collection.index_file))?;
    info!(
        "{} entries written to {:?}",
        entries.len(),
        collection.index_file
    );
    Ok(())
}

pub(crate) fn generate(ctx: &Context) -> anyhow::Result<()> {
    for collection in ctx.collections.iter() {
        build_collection(ctx, collection)?;
    }
    Ok(())
}
