use anyhow::Result;
use bigbio_validate::schema::{TASKS, TaskFamily};

pub fn list_command() -> Result<()> {
    println!("Supported tasks:");

    for family in TaskFamily::ALL {
        let tasks: Vec<_> = TASKS
            .iter()
            .filter(|(_, f)| *f == family)
            .map(|(task, _)| *task)
            .collect();
        println!("  {:<14} {}", family.as_str(), tasks.join(", "));
    }

    Ok(())
}
