//! Project initialization command

use anyhow::Result;
use garrison_session::Workspace;
use std::fs;
use std::path::Path;

pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);

    if project_dir.exists() {
        anyhow::bail!("Directory '{}' already exists", name);
    }

    fs::create_dir_all(project_dir.join(".garrison"))?;

    // Starter spawn script with a small folder layout
    fs::write(
        project_dir.join("bot_spawn_commands.txt"),
        r#"// Starter spawn layout - edit with `garrison point` commands
# Base
bot spawn 1 Guard 10 0 5 90
bot spawn 1 Guard -4 0 12 180
## Roof
bot spawn 1 Sniper 0 20 0 270
# Field
spawn 1 Crate 6 0 -3 0 45 0
"#,
    )?;

    fs::write(
        project_dir.join(".garrison/config.toml"),
        r#"[editor]
default_script = "bot_spawn_commands.txt"
workspace = "workspace.json"
"#,
    )?;

    let workspace = Workspace::new(project_dir.join("bot_spawn_commands.txt"));
    workspace.save(project_dir.join("workspace.json"))?;

    println!("Created Garrison project: {}", name);
    println!("");
    println!("Project structure:");
    println!("  {}/", name);
    println!("  ├── .garrison/");
    println!("  │   └── config.toml");
    println!("  ├── bot_spawn_commands.txt");
    println!("  └── workspace.json");
    println!("");
    println!("Next steps:");
    println!("  cd {}", name);
    println!("  garrison script info");
    println!("  garrison point list");

    Ok(())
}
