use crate::error::{NominaError, NominaResult};
use crate::roster::{write_template, RosterImporter};
use crate::rut::{normalize_national_id, validate_national_id};
use crate::types::RosterImportResult;
use crate::upload::UploadPolicy;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Students listed in the import summary
const PREVIEW_COUNT: usize = 5;

/// Execute the import command
pub fn import(
    input: PathBuf,
    output: Option<PathBuf>,
    strict_rut: bool,
    verbose: bool,
) -> NominaResult<()> {
    println!("{}", "📋 Nómina - Roster Import".bold().green());
    println!("   Input:  {}", input.display());
    if let Some(out) = &output {
        println!("   Output: {}", out.display());
    }
    println!();

    let size = fs::metadata(&input)?.len();
    UploadPolicy::default().check(&input.to_string_lossy(), size)?;

    if verbose {
        println!("{}", "📖 Reading spreadsheet...".cyan());
    }

    let result = RosterImporter::new()
        .strict_rut(strict_rut)
        .import_path(&input)?;

    print_summary(&result, verbose);

    if let Some(out) = output {
        if verbose {
            println!("{}", "💾 Writing students...".cyan());
        }
        write_result(&result, &out)?;
        println!("{}", "✅ Import Complete!".bold().green());
        println!("   Students file: {}\n", out.display());
    }

    Ok(())
}

fn print_summary(result: &RosterImportResult, verbose: bool) {
    println!("   Sheet: {}", result.sheet_name.bright_blue());
    println!(
        "   {} {}",
        result.total.to_string().bold().green(),
        "valid students found".green()
    );

    let preview = if verbose {
        result.students.len()
    } else {
        PREVIEW_COUNT
    };
    for student in result.students.iter().take(preview) {
        println!(
            "      {}  {}",
            student.national_id.bright_white(),
            student.full_name()
        );
    }
    if result.students.len() > preview {
        println!("      ... and {} more", result.students.len() - preview);
    }

    if !result.skipped.is_empty() {
        println!();
        println!(
            "   {} {}",
            "⚠️ ".yellow(),
            format!("{} rows skipped", result.skipped.len()).yellow()
        );
        for skipped in &result.skipped {
            println!("      Row {}: {}", skipped.row, skipped.reason);
        }
    }
    println!();
}

/// Serialize as YAML for .yaml/.yml outputs, JSON otherwise
fn write_result(result: &RosterImportResult, output: &Path) -> NominaResult<()> {
    let is_yaml = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let contents = if is_yaml {
        serde_yaml::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };

    fs::write(output, contents)?;
    Ok(())
}

/// Execute the template command
pub fn template(output: PathBuf) -> NominaResult<()> {
    write_template(&output)?;

    println!("{}", "✅ Template written".bold().green());
    println!("   File: {}\n", output.display());
    Ok(())
}

/// Execute the rut command
pub fn rut(ids: Vec<String>) -> NominaResult<()> {
    let mut invalid = Vec::new();

    for id in &ids {
        let normalized = normalize_national_id(id);
        if validate_national_id(&normalized) {
            println!("   {} {}", "✅".green(), normalized.bold());
        } else {
            println!("   {} {}", "❌".red(), normalized.bold().red());
            invalid.push(normalized);
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(NominaError::Validation(format!(
            "invalid RUT check digit: {}",
            invalid.join(", ")
        )))
    }
}
