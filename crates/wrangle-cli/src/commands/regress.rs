//! Regress command - one-feature linear regression with a held-out test set.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::regression::{paired_values, train_test_split, LinearRegression};

use super::{build_wrangler, heading, require_file};
use crate::cli::SourceArgs;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    x: String,
    y: String,
    test_size: f64,
    seed: u64,
    source: SourceArgs,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let wrangler = build_wrangler(&source)?;

    let (table, _) = wrangler.load(&file)?;
    let (table, _) = wrangler.clean(table)?;

    let (xs, ys) = paired_values(&table, &x, &y)?;
    let dropped = table.row_count() - xs.len();
    let split = train_test_split(&xs, &ys, test_size, seed)?;

    let model = LinearRegression::fit(&split.x_train, &split.y_train)?;
    let train_r2 = model.r_squared(&split.x_train, &split.y_train)?;
    let test_r2 = model.r_squared(&split.x_test, &split.y_test)?;
    let test_mse = model.mean_squared_error(&split.x_test, &split.y_test)?;

    if json_output {
        let result = serde_json::json!({
            "x": x,
            "y": y,
            "model": model,
            "train_rows": split.x_train.len(),
            "test_rows": split.x_test.len(),
            "dropped_rows": dropped,
            "train_r_squared": train_r2,
            "test_r_squared": test_r2,
            "test_mse": test_mse,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let fmt_opt = |v: Option<f64>| v.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string());

    println!(
        "{} {} ~ {}",
        "Linear regression".cyan().bold(),
        y.white(),
        x.white()
    );
    println!();
    println!(
        "  {} = {:.4} + {:.4} × {}",
        y, model.intercept, model.slope, x
    );
    println!();

    heading("Fit:");
    println!(
        "  Rows:        {} train, {} test{}",
        split.x_train.len(),
        split.x_test.len(),
        if dropped > 0 {
            format!(", {} dropped (missing)", dropped).dimmed().to_string()
        } else {
            String::new()
        }
    );
    println!("  Train R²:    {}", fmt_opt(train_r2));
    println!("  Test R²:     {}", fmt_opt(test_r2).white().bold());
    println!("  Test MSE:    {}", fmt_opt(test_mse));

    Ok(())
}
