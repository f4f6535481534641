use anyhow::Result;
use bigbio_validate::schema::map_task;

pub fn inspect_command(task: &str) -> Result<()> {
    let Some(family) = map_task(task) else {
        anyhow::bail!(
            "{task} is not recognized; run `bigbio-validate list` to see the supported tasks"
        );
    };

    println!("Task '{task}' maps to the {family} family ({})\n", family.description());
    family.schema().pretty_print();

    Ok(())
}
