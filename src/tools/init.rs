use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::CONFIG_CANDIDATES;

const TEMPLATE_FILE: &str = "qtc-open.toml";

const TEMPLATE: &str = r#"# Path to the Qt Creator executable, or to the directory that holds it.
# Empty means `qtcreator` from PATH. QTC_OPEN_QTCREATOR_PATH overrides this.
qtCreatorPath = ""

# Open the file given with --file instead of a folder.
openWithFile = false

# "workspace" opens the workspace folder as-is.
# "projectRoot" opens the nearest directory with a CMakeLists.txt or *.pro file.
targetMode = "workspace"
"#;

/// Writes a commented `qtc-open.toml` into `dir`.
pub fn write_template(dir: &Path, force: bool) -> Result<()> {
    if !force {
        if let Some((existing, _)) = CONFIG_CANDIDATES
            .iter()
            .find(|(file, _)| dir.join(file).exists())
        {
            bail!("{existing} already exists in {}. Use --force to overwrite.", dir.display());
        }
    }

    let path = dir.join(TEMPLATE_FILE);
    fs::write(&path, TEMPLATE.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
