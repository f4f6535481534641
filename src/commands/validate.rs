use anyhow::Result;
use colored::Colorize;
use miette::Report;

use bigbio_validate::loader::load_dataset;
use bigbio_validate::validation::{ValidationError, Validator};

use super::DatasetArgs;

pub fn validate_command(args: &DatasetArgs) -> Result<()> {
    println!("Validating dataset: {}", args.path.display());

    let loader = args.loader()?;
    let dataset = load_dataset(&loader, &args.view)?;
    let validator = Validator::new(&dataset);

    for stats in validator.statistics() {
        println!("{stats}");
    }

    match validator.run() {
        Ok(report) => {
            for check in &report.checks {
                println!("{} {check}", "✓".green());
            }
            println!("\n✅ All validations passed for '{}'!", dataset.name);
            Ok(())
        }
        Err(err) => report_failure(err),
    }
}

fn report_failure(err: ValidationError) -> Result<()> {
    let kind = err.kind();
    eprintln!();
    eprintln!("{:?}", Report::new(err));
    anyhow::bail!("Validation failed ({kind:?})");
}
