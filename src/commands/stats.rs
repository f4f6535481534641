use anyhow::Result;
use bigbio_validate::loader::load_dataset;
use bigbio_validate::validation::Validator;

use super::DatasetArgs;

pub fn stats_command(args: &DatasetArgs) -> Result<()> {
    let loader = args.loader()?;
    let dataset = load_dataset(&loader, &args.view)?;

    dataset.pretty_print();
    println!();
    for stats in Validator::new(&dataset).statistics() {
        println!("{stats}");
    }

    Ok(())
}
