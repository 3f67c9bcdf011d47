//! Lists an issuer's recent 10-K filings, downloads the most recent one and previews it.
//!
//! Run with: `cargo run --example ten_k -- "Example Company" example@email.com 936468`

use std::env;

use sec_filings::{Cik, Client, Config, FORM_10K, Kind, PREVIEW_CHARS, preview};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let company_name = args.next().unwrap_or_else(|| "Example Company".to_owned());
    let email = args.next().unwrap_or_else(|| "example@email.com".to_owned());
    let cik: Cik = args.next().as_deref().unwrap_or("936468").parse()?;

    let config = Config::builder()
        .company_name(company_name)
        .email(email)
        .build();
    let client = Client::new(config)?;

    let filings = client.filing_index().filings(cik, FORM_10K)?;
    if filings.is_empty() {
        info!(%cik, "no 10-K filings found");
        return Ok(());
    }

    for filing in &filings {
        info!(
            filing_date = %filing.filing_date,
            accession_number = %filing.accession_number,
            form = %filing.form,
            primary_document = filing.primary_document.as_deref().unwrap_or("N/A"),
            "10-K filing"
        );
    }

    let latest = &filings[0];
    let path = client
        .documents()
        .download_filing(cik, latest, &client.config().output_dir)?;
    info!(path = %path.display(), "downloaded most recent 10-K");

    match preview(&path, PREVIEW_CHARS) {
        Ok(text) => info!("file preview:\n{text}..."),
        Err(e) if e.kind() == Kind::FileIo => warn!(error = %e, "could not preview document"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
