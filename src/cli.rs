//! CLI implementation for html2md

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use html_markdown_converter::limits::DEFAULT_MAX_INPUT_BYTES;
use html_markdown_converter::{
    ConversionError, ConversionOptions, FilterSet, InputLimits, MarkdownConverter, write_markdown,
};

#[derive(Parser, Debug)]
#[command(name = "html2md")]
#[command(about = "Convert HTML documents to Markdown")]
#[command(version)]
pub struct Cli {
    /// HTML file to convert (reads standard input when omitted)
    input: Option<PathBuf>,

    /// Write Markdown to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Remove elements with this tag and their content (repeatable or comma-separated)
    #[arg(
        long = "filter-tags",
        alias = "filter-tag",
        value_name = "TAG",
        value_delimiter = ','
    )]
    filter_tags: Vec<String>,

    /// Also remove script, style, noscript, meta and link elements
    #[arg(long)]
    strip_non_content: bool,

    /// Stop indenting lists beyond this nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    max_size: usize,

    /// Log conversion details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn options(&self) -> ConversionOptions {
        let mut filter_tags: FilterSet = self.filter_tags.iter().collect();
        if self.strip_non_content {
            filter_tags = filter_tags.union(&FilterSet::non_content());
        }

        ConversionOptions {
            filter_tags,
            max_list_depth: self.max_depth,
            limits: InputLimits {
                max_input_bytes: (self.max_size > 0).then_some(self.max_size),
                ..InputLimits::default()
            },
        }
    }
}

/// Run the conversion described by parsed arguments
pub fn run_with(cli: Cli) -> Result<()> {
    let options = cli.options();
    tracing::debug!(
        filter_tags = options.filter_tags.len(),
        max_list_depth = ?options.max_list_depth,
        "starting conversion"
    );
    let converter = MarkdownConverter::with_options(options);

    let markdown = match &cli.input {
        Some(path) => converter
            .convert_file(path)
            .with_context(|| format!("Failed to convert {}", path.display()))?,
        None => {
            let mut html = Vec::new();
            io::stdin()
                .read_to_end(&mut html)
                .map_err(|e| ConversionError::io("<stdin>", e))?;
            converter
                .convert_bytes(&html)
                .context("Failed to convert standard input")?
        }
    };

    match &cli.output {
        Some(path) => write_markdown(path, &markdown)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(markdown.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| ConversionError::io("<stdout>", e))?;
        }
    }
    Ok(())
}
