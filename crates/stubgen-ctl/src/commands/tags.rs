//! `stubgen tags`: list, add and remove stored tags.

use stubgen_sdk::tags::TagStore;

use crate::cli_config::CliConfig;
use crate::output;
use crate::TagCommands;

pub(crate) fn handle_tags_command(cmd: TagCommands, config: &CliConfig) -> anyhow::Result<()> {
    let mut store = TagStore::load(config.tags_path());

    match cmd {
        TagCommands::List => {
            if store.tags().is_empty() {
                output::warning("No tags defined.");
                return Ok(());
            }
            output::header("Tags:");
            for tag in store.tags() {
                output::item(&tag.name);
                output::dim(format!("    {}", tag.route_prefix));
            }
            output::blank();
            output::dim(format!("Stored in {}", store.path().display()));
        }

        TagCommands::Add { name, route_prefix } => {
            if store.add(&name, route_prefix.as_deref().unwrap_or_default())? {
                let name = name.trim();
                let prefix = store.route_prefix(name).unwrap_or_default();
                output::success(format!("Added tag '{name}' ({prefix})"));
            } else {
                output::warning(format!("Tag '{}' already exists.", name.trim()));
            }
        }

        TagCommands::Remove { name } => {
            if store.remove(&name)? {
                output::success(format!("Removed tag '{}'", name.trim()));
            } else {
                output::warning(format!("Tag '{}' not found.", name.trim()));
            }
        }
    }

    Ok(())
}
