use std::{cmp::Ordering, sync::LazyLock};

use maud::{html, Markup, PreEscaped};
use pulldown_cmark::{html as cmark_html, Options, Parser};
use regex::{Captures, Regex, RegexBuilder};

use crate::{context::ContentKind, metadata::Tag};

use super::data::{CurationImages, Entry};

// a paragraph holding nothing but one <img> with an alt attribute
static IMAGE_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"<p>\s*(<img[^>]*alt="([^"]*)"[^>]*>)\s*</p>"#)
        .case_insensitive(true)
        .build()
        .expect("image paragraph pattern")
});

pub(super) fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(body, options);
    let mut out = String::new();
    cmark_html::push_html(&mut out, parser);
    out
}

/// Turn `<p><img alt="..."></p>` into a `<figure>` captioned with the alt text.
/// Images that share their paragraph with anything else are left alone.
pub(super) fn add_image_captions(html: &str) -> String {
    IMAGE_PARAGRAPH
        .replace_all(html, |caps: &Captures| {
            let img = &caps[1];
            let caption = caps[2].trim();
            html! {
                figure.md-figure {
                    (PreEscaped(img))
                    @if !caption.is_empty() {
                        figcaption { (PreEscaped(caption)) }
                    }
                }
            }
            .into_string()
        })
        .into_owned()
}

/// One anchor per tag, each followed by a newline. Labels and hrefs are
/// front matter HTML and go in unescaped.
///
/// Curation listings trim linked tag text and drop tags left without any;
/// writing listings keep linked tags as written.
pub(super) fn render_tag_links(tags: &[Tag], kind: ContentKind) -> String {
    let mut out = String::new();
    for tag in tags {
        let anchor = match tag {
            Tag::Plain(label) => html! { a href="#" { (PreEscaped(label)) } },
            Tag::Linked { text, href } => {
                let text = match kind {
                    ContentKind::Writing => text.as_str(),
                    ContentKind::Curation => text.trim(),
                };
                if kind == ContentKind::Curation && text.is_empty() {
                    continue;
                }
                html! { a href=(PreEscaped(href)) target="_blank" { (PreEscaped(text)) } }
            }
        };
        out.push_str(&anchor.into_string());
        out.push('\n');
    }
    out
}

pub(super) fn image_or_placeholder(src: &str) -> Markup {
    let src = src.trim();
    html! {
        @if src.is_empty() {
            div.curation-img.placeholder {}
        } @else {
            img src=(PreEscaped(src)) alt="" loading="lazy";
        }
    }
}

/// Newest first. Equal dates keep their discovery order.
pub(super) fn sort_entry(a: &Entry, b: &Entry) -> Ordering {
    b.dates.start.cmp(&a.dates.start)
}

/// Header block of a curation detail page. Its image row is empty for now.
pub(super) fn render_curation_header() -> String {
    html! {
        div.curation-detail {
            div.curation-detail-images {}
        }
    }
    .into_string()
}

/// Curation list item: the date pair on the left, images, title link and tags on the right.
pub(super) fn render_curation_entry(entry: &Entry) -> String {
    let no_images = CurationImages::default();
    let images = entry.images.as_ref().unwrap_or(&no_images);
    html! {
        div.curation-entry {
            div.curation-dates {
                div.curation-date-top { (entry.dates.start_label()) }
                div.curation-sep aria-hidden="true" { "—" }
                div.curation-date-bottom { (entry.dates.bottom_label()) }
            }
            div.curation-main {
                div.curation-images {
                    (image_or_placeholder(&images.left))
                    (image_or_placeholder(&images.middle))
                    (image_or_placeholder(&images.right))
                }
                div.curation-text {
                    a.curation-title href=(PreEscaped(&entry.link)) target="_blank" { (PreEscaped(&entry.title)) }
                    div.meta {
                        (PreEscaped(render_tag_links(&entry.tags, ContentKind::Curation)))
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::data::EntryDates;
    use super::*;

    fn entry(title: &str, (y, m, d): (i32, u32, u32)) -> Entry {
        Entry {
            title: title.to_string(),
            dates: EntryDates {
                start: NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                end: None,
            },
            tags: vec![],
            link: format!("assets/articles/html/{title}.html"),
            images: None,
        }
    }

    #[test]
    fn test_caption_lone_image() {
        let out = add_image_captions(r#"<p><img src="a.png" alt="cat"></p>"#);
        assert_eq!(
            out,
            r#"<figure class="md-figure"><img src="a.png" alt="cat"><figcaption>cat</figcaption></figure>"#
        );
    }

    #[test]
    fn test_caption_skips_image_with_text() {
        let html = r#"<p><img src="a.png" alt="cat">text</p>"#;
        assert_eq!(add_image_captions(html), html);
    }

    #[test]
    fn test_caption_empty_alt_has_no_figcaption() {
        let out = add_image_captions(&render_markdown("![](a.png)"));
        assert!(out.contains(r#"<figure class="md-figure"><img src="a.png" alt="" /></figure>"#));
        assert!(!out.contains("figcaption"));
    }

    #[test]
    fn test_caption_from_markdown() {
        let out = add_image_captions(&render_markdown("Intro\n\n![A quiet harbour](harbour.jpg)\n"));
        assert!(out.contains("<p>Intro</p>"));
        assert!(out.contains("<figcaption>A quiet harbour</figcaption>"));
        assert!(!out.contains("<p><img"));
    }

    #[test]
    fn test_render_markdown_tables_and_fences() {
        let out = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nlet x = 1;\n```\n");
        assert!(out.contains("<table>"));
        assert!(out.contains("<td>1</td>"));
        assert!(out.contains(r#"<code class="language-rust">let x = 1;"#));
    }

    fn sample_tags() -> Vec<Tag> {
        vec![
            Tag::Plain("essay".to_string()),
            Tag::Linked {
                text: " Source ".to_string(),
                href: "https://example.com".to_string(),
            },
            Tag::Linked {
                text: "".to_string(),
                href: "https://blank.example".to_string(),
            },
        ]
    }

    #[test]
    fn test_render_tag_links_curation_trims_and_skips_blank() {
        assert_eq!(
            render_tag_links(&sample_tags(), ContentKind::Curation),
            "<a href=\"#\">essay</a>\n<a href=\"https://example.com\" target=\"_blank\">Source</a>\n"
        );
        assert_eq!(render_tag_links(&[], ContentKind::Curation), "");
    }

    #[test]
    fn test_render_tag_links_writing_keeps_text_as_written() {
        assert_eq!(
            render_tag_links(&sample_tags(), ContentKind::Writing),
            concat!(
                "<a href=\"#\">essay</a>\n",
                "<a href=\"https://example.com\" target=\"_blank\"> Source </a>\n",
                "<a href=\"https://blank.example\" target=\"_blank\"></a>\n",
            )
        );
        assert_eq!(render_tag_links(&[], ContentKind::Writing), "");
    }

    #[test]
    fn test_render_tag_links_inserts_html_unescaped() {
        let tags = vec![
            Tag::Plain("R&amp;D".to_string()),
            Tag::Linked {
                text: "<em>Docs</em>".to_string(),
                href: "/search?a=1&b=2".to_string(),
            },
        ];
        assert_eq!(
            render_tag_links(&tags, ContentKind::Writing),
            "<a href=\"#\">R&amp;D</a>\n<a href=\"/search?a=1&b=2\" target=\"_blank\"><em>Docs</em></a>\n"
        );
    }

    #[test]
    fn test_image_or_placeholder() {
        assert_eq!(
            image_or_placeholder(" img/a.jpg ").into_string(),
            r#"<img src="img/a.jpg" alt="" loading="lazy">"#
        );
        assert_eq!(
            image_or_placeholder("").into_string(),
            r#"<div class="curation-img placeholder"></div>"#
        );
    }

    #[test]
    fn test_sort_entry_newest_first() {
        let mut entries = vec![
            entry("a", (2024, 1, 1)),
            entry("b", (2025, 6, 1)),
            entry("c", (2023, 12, 31)),
        ];
        entries.sort_by(sort_entry);
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["b", "a", "c"]);
    }

    #[test]
    fn test_sort_entry_across_year_boundary() {
        // "01 Jan. 2025" sorts before "13 Nov. 2024" as text
        let mut entries = vec![entry("old", (2024, 11, 13)), entry("new", (2025, 1, 1))];
        entries.sort_by(sort_entry);
        assert_eq!(entries[0].title, "new");
    }

    #[test]
    fn test_render_curation_entry() {
        let mut e = entry("show", (2025, 3, 1));
        e.dates.end = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap().and_hms_opt(0, 0, 0);
        e.tags = vec![Tag::Plain("exhibition".to_string())];
        e.images = Some(CurationImages {
            left: "l.jpg".to_string(),
            middle: "".to_string(),
            right: "r.jpg".to_string(),
        });
        let out = render_curation_entry(&e);
        assert!(out.contains(r#"<div class="curation-date-top">01 Mar. 2025</div>"#));
        assert!(out.contains(r#"<div class="curation-sep" aria-hidden="true">—</div>"#));
        assert!(out.contains(r#"<div class="curation-date-bottom">02 Apr. 2025</div>"#));
        assert!(out.contains(
            r#"<img src="l.jpg" alt="" loading="lazy"><div class="curation-img placeholder"></div><img src="r.jpg" alt="" loading="lazy">"#
        ));
        assert!(out.contains(
            r#"<a class="curation-title" href="assets/articles/html/show.html" target="_blank">show</a>"#
        ));
        assert!(out.contains(r##"<div class="meta"><a href="#">exhibition</a>"##));
    }

    #[test]
    fn test_render_curation_entry_keeps_title_markup() {
        let out = render_curation_entry(&entry("<em>X</em>", (2025, 3, 1)));
        assert!(out.contains(r#"target="_blank"><em>X</em></a>"#));
        assert!(!out.contains("&lt;em&gt;"));
    }

    #[test]
    fn test_render_curation_entry_single_date() {
        let out = render_curation_entry(&entry("solo", (2025, 3, 1)));
        assert!(out.contains(r#"<div class="curation-date-bottom">01 Mar. 2025</div>"#));
        assert_eq!(out.matches("curation-img placeholder").count(), 3);
    }
}
