// quote-pdf: Generate client quotes as PDF documents

use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use quote_pdf::format::{format_quote_date, parse_date, quote_filename};
use quote_pdf::input::{parse_item_arg, ClientOverrides, QuoteInput};
use quote_pdf::logo::load_logo;
use quote_pdf::{
    generate_pdf, logger, render_quote, AccessGate, AppError, CompanyInfo, QuoteSession,
    RecordingCanvas,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Generate PDF quotes for clients")]
struct Args {
    /// Admin username
    #[arg(short, long, env = "QUOTE_USERNAME")]
    username: String,

    /// Admin password
    #[arg(short, long, env = "QUOTE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Quote file (JSON with client fields and an items array)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Client name
    #[arg(long)]
    customer_name: Option<String>,

    /// Client email
    #[arg(long)]
    customer_email: Option<String>,

    /// Client phone
    #[arg(long)]
    customer_phone: Option<String>,

    /// Client address
    #[arg(long)]
    customer_address: Option<String>,

    /// Project description (max 10,000 characters)
    #[arg(long)]
    project_description: Option<String>,

    /// Line item, repeatable; added after items from the quote file
    #[arg(long = "item", value_name = "DESC:QTY:PRICE")]
    items: Vec<String>,

    /// Quote date (YYYY-MM-DD format, defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Logo image (file path or URL), overrides the company profile
    #[arg(long)]
    logo: Option<String>,

    /// Company profile (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output filename (defaults to <prefix>_<Client_Name>_<date>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Validate and lay out the quote without writing a file
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let company = CompanyInfo::load(args.config.as_deref())?;
    let date = parse_date(args.date.as_deref())?;

    // Sign in
    let mut gate = AccessGate::new(company.admin.clone());
    gate.login(&args.username, &args.password)?;
    let mut session = QuoteSession::start(&gate)?;

    // Collect form fields and items
    let mut input = match args.input {
        Some(ref path) => QuoteInput::load(path)?,
        None => QuoteInput::default(),
    };
    input.apply(ClientOverrides {
        customer_name: args.customer_name,
        customer_email: args.customer_email,
        customer_phone: args.customer_phone,
        customer_address: args.customer_address,
        project_description: args.project_description,
    });
    for arg in &args.items {
        input.items.push(parse_item_arg(arg)?);
    }

    let rejected = session.add_items(input.items);
    for error in rejected.errors() {
        warn!(field = %error.field, "{}", error.message);
    }
    info!(items = session.items().len(), total = %session.total(), "items collected");

    let form = session.submit_with(input.client, rejected)?;

    // Logo is best-effort
    let logo = args
        .logo
        .as_deref()
        .or(company.logo.as_deref())
        .and_then(|source| match load_logo(source) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(error = %e, "logo unavailable, using text logo");
                None
            }
        });

    if args.dry_run {
        let (width, height) = company.page_size.dimensions_mm();
        let mut canvas = RecordingCanvas::new(width, height);
        let summary = render_quote(&mut canvas, &form, &company, logo.as_ref(), date);

        println!("✓ Quote is valid (dry run, nothing written)");
        println!("  Client: {}", form.customer_name);
        println!("  Items: {}  Total: {}", form.items.len(), form.total());
        println!("  Pages: {}", summary.pages);
        return Ok(());
    }

    let (bytes, summary) = generate_pdf(&form, &company, logo.as_ref(), date)?;

    let output_file = args.output.unwrap_or_else(|| {
        PathBuf::from(quote_filename(
            &company.file_prefix,
            &form.customer_name,
            &date,
        ))
    });
    write_document(&output_file, &bytes)?;
    gate.logout();

    println!("✓ Generated: {}", output_file.display());
    println!("  Client: {}", form.customer_name);
    println!("  Date: {}", format_quote_date(&date));
    println!("  Items: {}  Total: {}", form.items.len(), form.total());
    println!("  Pages: {}", summary.pages);

    Ok(())
}

fn write_document(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
