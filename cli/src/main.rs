//! pdfdesk CLI - PDF to DOCX and merging with a clickable table of contents

mod server;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfdesk::{
    assemble, extract_text_document, plan, to_docx, ExtractOptions, PageSize, SourceDocument,
    TocOptions, MERGED_FILE_NAME,
};

use server::ServerConfig;

#[derive(Parser)]
#[command(name = "pdfdesk")]
#[command(version)]
#[command(about = "Convert PDFs to DOCX and merge PDFs behind a clickable table of contents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of a PDF into a .docx document
    Docx {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <name>.docx next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip pages whose text cannot be extracted
        #[arg(long)]
        lenient: bool,

        /// Apply Unicode NFC normalization
        #[arg(long)]
        nfc: bool,
    },

    /// Merge PDFs behind a table of contents page
    Merge {
        /// Input PDF files, in merge order
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Continue the table of contents on extra pages instead of dropping entries
        #[arg(long)]
        paginate: bool,

        /// Page size of the table of contents
        #[arg(long, value_enum, default_value = "a4")]
        page_size: PageSizeArg,

        /// Heading of the table of contents
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the table of contents layout without writing a PDF
    Toc {
        /// Input PDF files, in merge order
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Print the full layout as JSON
        #[arg(long)]
        json: bool,

        /// Continue the table of contents on extra pages
        #[arg(long)]
        paginate: bool,
    },

    /// Serve the upload form over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "PDFDESK_BIND", default_value = "127.0.0.1:8501")]
        bind: String,

        /// Largest accepted request body in megabytes
        #[arg(long, env = "PDFDESK_MAX_UPLOAD_MB", default_value = "64")]
        max_upload_mb: usize,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// 595 x 842 points
    A4,
    /// 612 x 792 points
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Docx {
            input,
            output,
            lenient,
            nfc,
        } => cmd_docx(&input, output.as_deref(), lenient, nfc),
        Commands::Merge {
            inputs,
            output,
            paginate,
            page_size,
            title,
        } => {
            let mut options = TocOptions::new().with_page_size(page_size.into());
            if paginate {
                options = options.paginate();
            }
            if let Some(title) = title {
                options = options.with_title(title);
            }
            cmd_merge(&inputs, output.as_deref(), &options)
        }
        Commands::Toc {
            inputs,
            json,
            paginate,
        } => cmd_toc(&inputs, json, paginate),
        Commands::Serve {
            bind,
            max_upload_mb,
        } => cmd_serve(bind, max_upload_mb),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(len: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// `<stem>.docx` beside the input.
fn default_docx_path(input: &Path) -> PathBuf {
    input.with_extension("docx")
}

fn cmd_docx(
    input: &Path,
    output: Option<&Path>,
    lenient: bool,
    nfc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new().with_normalization(nfc);
    if lenient {
        options = options.lenient();
    }

    let pb = progress_bar(3)?;

    pb.set_message("Loading PDF...");
    let source = SourceDocument::open(input)?;
    pb.inc(1);

    pb.set_message("Extracting text...");
    let text = extract_text_document(&source, options)?;
    pb.inc(1);

    pb.set_message("Writing DOCX...");
    let docx = to_docx(&text)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_docx_path(input));
    fs::write(&path, &docx.bytes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "{} {} ({} pages, {} paragraphs)",
        "Saved to".green(),
        path.display(),
        text.page_count(),
        docx.paragraphs
    );
    Ok(())
}

fn load_sources(
    inputs: &[PathBuf],
    pb: &ProgressBar,
) -> Result<Vec<SourceDocument>, Box<dyn std::error::Error>> {
    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        pb.set_message(format!("Loading {}...", input.display()));
        sources.push(SourceDocument::open(input)?);
        pb.inc(1);
    }
    Ok(sources)
}

fn cmd_merge(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &TocOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = progress_bar(inputs.len() as u64 + 1)?;
    let sources = load_sources(inputs, &pb)?;

    pb.set_message("Building table of contents...");
    let merged = assemble(sources, options)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(MERGED_FILE_NAME));
    fs::write(&path, &merged.bytes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "{} {} ({} pages)",
        "Saved to".green(),
        path.display(),
        merged.page_count
    );
    if merged.layout.dropped > 0 {
        println!(
            "{} {} entries did not fit on the contents page; use --paginate to keep them",
            "Warning:".yellow().bold(),
            merged.layout.dropped
        );
    }
    Ok(())
}

fn cmd_toc(inputs: &[PathBuf], json: bool, paginate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = TocOptions::new();
    if paginate {
        options = options.paginate();
    }

    let sources = inputs
        .iter()
        .map(SourceDocument::open)
        .collect::<pdfdesk::Result<Vec<_>>>()?;
    let layout = plan(&sources, &options);

    if json {
        println!("{}", layout.to_json()?);
        return Ok(());
    }

    println!("{}", options.title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for line in &layout.lines {
        println!("{:>5}  {}", line.entry.start_page, line.entry.title);
    }
    if layout.dropped > 0 {
        println!("{}", format!("({} entries dropped)", layout.dropped).dimmed());
    }
    println!();
    println!(
        "{}: {} ({} TOC)",
        "Pages".bold(),
        layout.total_pages(),
        layout.toc_page_count
    );
    println!("{}: {}", "Bookmarks".bold(), layout.bookmarks.len());
    Ok(())
}

fn cmd_serve(bind: String, max_upload_mb: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig {
        bind,
        max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
    };
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::run(config))?;
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfdesk".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to DOCX and merging with a clickable table of contents");
    println!();
    println!("License: MIT");
}
