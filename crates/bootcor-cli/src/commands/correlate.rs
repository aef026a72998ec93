//! Correlate command - point estimate for a single column pair.

use std::path::PathBuf;

use bootcor::{Dataset, Parser, ParserConfig, correlation};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    x: String,
    y: String,
    parser: ParserConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (table, source) = Parser::with_config(parser).parse_file(&file)?;
    let data = Dataset::from_table(&table, &[x.as_str(), y.as_str()])?;
    let (xs, ys) = data.pair(&x, &y)?;
    let r = correlation(xs, ys)?;

    if verbose {
        println!(
            "{} {} ({} rows, {} complete for this pair)",
            "Read".cyan().bold(),
            source.file.white(),
            source.row_count,
            data.row_count()
        );
    }

    println!("r({}, {}) = {}", x, y, format!("{r:.4}").white().bold());
    Ok(())
}
