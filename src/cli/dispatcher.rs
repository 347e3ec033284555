use anyhow::{Result, anyhow};
use clap::CommandFactory;

use crate::cli::{Cli, handlers};

/// A command, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// Every command the binary understands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "new",
        aliases: &["init"],
        handler: handlers::new::handle,
    },
    CommandDefinition {
        name: "clean",
        aliases: &[],
        handler: handlers::clean::handle,
    },
    CommandDefinition {
        name: "build",
        aliases: &[],
        handler: handlers::build::handle,
    },
    CommandDefinition {
        name: "deploy",
        aliases: &[],
        handler: handlers::deploy::handle,
    },
    CommandDefinition {
        name: "versions",
        aliases: &["ls"],
        handler: handlers::versions::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `cepgen <command> [args...]` to the command's handler.
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((name, rest)) = all_args.split_first() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let command = find_command(name).ok_or_else(|| anyhow!(t!("error.unknown_command"), name = name))?;
    (command.handler)(rest.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_by_name_and_alias() {
        assert_eq!(find_command("new").map(|c| c.name), Some("new"));
        assert_eq!(find_command("init").map(|c| c.name), Some("new"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("versions"));
        assert!(find_command("publish").is_none());
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let err = dispatch(vec!["publish".to_string()]).unwrap_err();
        assert!(err.to_string().contains("publish"));
    }
}
