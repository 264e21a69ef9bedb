//! The `deploy` command.

use super::generate;
use crate::config::Project;
use crate::error::CliError;
use crate::tools::Tool;

/// Regenerate, then run `deploy.command` from the project root.
pub fn deploy(project: &Project) -> Result<String, CliError> {
    let command = project.deploy_command()?;
    generate(project)?;
    let (program, args) = command
        .split_first()
        .ok_or_else(|| CliError::Usage("deploy.command is empty".to_string()))?;
    let output = Tool::new(program.as_str())
        .args(args.iter().map(String::as_str))
        .current_dir(&project.root)
        .run()?;
    Ok(output)
}
