use crate::cli::{CatalogArgs, Cli, Command, OutputArgs};
use crate::gutendex::{self, Book, BookQuery};
use crate::normalizer::{self, ProcessedText, Section};
use crate::source::{Catalog, FileSource, GutendexSource, TextSource};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

struct ConvertedSection {
    title: String,
    filename: String,
    line: usize,
    reading_minutes: usize,
    content: String,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    book: Option<&'a Book>,
    #[serde(flatten)]
    text: &'a ProcessedText,
}

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::File { input } => {
            let stem = input
                .file_stem()
                .context("Input file has no name")?
                .to_string_lossy()
                .into_owned();
            convert(&FileSource::new(input), &stem, &cli.options)
        }
        Command::Book { id, catalog } => {
            let source = GutendexSource::new(open_catalog(catalog)?, *id);
            convert(&source, &source.describe(), &cli.options)
        }
        Command::List {
            page,
            search,
            topic,
            popular,
            catalog,
        } => {
            let query = BookQuery {
                page: *page,
                search: search.clone(),
                topic: topic.clone(),
            };
            list(&open_catalog(catalog)?, &query, *popular, cli.options.json)
        }
    }
}

fn open_catalog(args: &CatalogArgs) -> Result<Catalog> {
    Catalog::new(&args.gutendex_url, Duration::from_secs(args.timeout_secs))
        .context("Failed to set up HTTP client")
}

fn list(catalog: &Catalog, query: &BookQuery, popular: bool, json: bool) -> Result<()> {
    let page = catalog
        .list(query)
        .with_context(|| format!("Failed to list page {} of the catalog", query.page))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let listing = if popular {
        gutendex::format_listing(page.most_downloaded())
    } else {
        gutendex::format_listing(&page.results)
    };
    print!("{}", listing);

    eprintln!(
        "Showing {} of {} books (page {}{})",
        page.results.len(),
        page.count,
        query.page,
        if page.next.is_some() { ", more available" } else { "" }
    );

    Ok(())
}

pub fn convert(source: &dyn TextSource, stem: &str, options: &OutputArgs) -> Result<()> {
    let raw = source
        .fetch()
        .with_context(|| format!("Failed to load {}", source.describe()))?;

    let processed = normalizer::process(&raw.text);
    debug!(
        raw_bytes = raw.text.len(),
        cleaned_bytes = processed.cleaned.len(),
        chapters = processed.chapters.len(),
        "processed text"
    );

    if options.json {
        let report = Report {
            book: raw.book.as_ref(),
            text: &processed,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let output_path = resolve_output_path(options, stem);
    let metadata_header = gutendex::format_metadata(raw.book.as_ref(), &processed);

    if options.single {
        write_single_file(&output_path, &metadata_header, &processed.cleaned)?;
    } else {
        let sections = convert_sections(&processed.sections());
        write_folder(&output_path, &metadata_header, &sections)?;
    }

    eprintln!(
        "Processed {} ({} chapters detected, ~{} min read) to {}",
        source.describe(),
        processed.chapters.len(),
        processed.reading_minutes,
        output_path.display()
    );

    Ok(())
}

fn resolve_output_path(options: &OutputArgs, stem: &str) -> PathBuf {
    if let Some(ref path) = options.output {
        return path.clone();
    }

    if options.single {
        PathBuf::from(format!("{}.txt", stem))
    } else {
        PathBuf::from(stem)
    }
}

fn convert_sections(sections: &[Section<'_>]) -> Vec<ConvertedSection> {
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| ConvertedSection {
            title: section.title.clone(),
            filename: format!("section-{:02}.txt", i + 1),
            line: section.line,
            reading_minutes: normalizer::estimate(section.text),
            content: section.text.to_string(),
        })
        .collect()
}

fn write_single_file(output_path: &Path, metadata_header: &str, body: &str) -> Result<()> {
    let mut content = String::with_capacity(metadata_header.len() + body.len() + 1);
    content.push_str(metadata_header);
    content.push_str(body);
    content.push('\n');

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(output_path, &content)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    Ok(())
}

fn write_folder(
    output_dir: &Path,
    metadata_header: &str,
    sections: &[ConvertedSection],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for section in sections {
        let path = output_dir.join(&section.filename);
        fs::write(&path, format!("{}\n", section.content))
            .with_context(|| format!("Failed to write section: {}", path.display()))?;
    }

    // README.md carries the metadata and the table of contents
    let mut readme = String::new();
    readme.push_str(metadata_header);
    readme.push_str("## Table of Contents\n\n");

    for (i, section) in sections.iter().enumerate() {
        readme.push_str(&format!(
            "{}. [{}]({}) (line {}, ~{} min)\n",
            i + 1,
            toc_title(&section.title),
            section.filename,
            section.line,
            section.reading_minutes
        ));
    }

    readme.push('\n');

    fs::write(output_dir.join("README.md"), &readme)
        .with_context(|| "Failed to write README.md")?;

    Ok(())
}

// Headings may wrap onto the next line; keep each entry on one line.
fn toc_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}
