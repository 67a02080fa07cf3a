//! pgaes - render a page from a template directory.
//!
//! A worked example of driving lookout from a CLI: template directories
//! become search locations, the view id and context come from the command
//! line, and an optional config file rewires engines and view aliases.
//!
//! ```text
//! pgaes home --context '{"title": "Hello"}'
//! pgaes about --dir themes/dark --dir templates
//! ```

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Context as _};
use clap::Parser;

use lookout::{Config, Context, FilesystemLocation, ViewBuilder, ViewKind};

/// Extensions the example searches for, highest priority first.
const PAGE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".html", ".txt"];

#[derive(Parser)]
#[command(name = "pgaes", about = "Render a page through lookout view resolution")]
struct Args {
    /// View identifier to render (e.g. "home")
    view: String,

    /// Template directories to search, highest priority first
    #[arg(short, long = "dir", default_value = "templates")]
    dirs: Vec<PathBuf>,

    /// Render context as a JSON object
    #[arg(short, long)]
    context: Option<String>,

    /// View kind: a configured alias or a registered view name
    #[arg(short, long)]
    kind: Option<String>,

    /// Configuration file (YAML or JSON), layered over the defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .with_defaults(),
        None => Config::defaults(),
    };

    let builder = ViewBuilder::new(config);
    for dir in &args.dirs {
        builder.add_location(Rc::new(FilesystemLocation::new(
            dir.clone(),
            PAGE_EXTENSIONS.iter().copied(),
        )))?;
    }

    let context = match &args.context {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("parsing --context")?;
            Context::from_serialize(&value)
                .map_err(|e| anyhow!("--context must be a JSON object: {e}"))?
        }
        None => Context::new(),
    };

    let kind = args.kind.as_deref().map(ViewKind::named);
    let view = builder.create(&args.view, kind)?;

    if view.uri().is_empty() {
        eprintln!("note: no template matched \"{}\"", args.view);
    }

    print!("{}", view.render(&context)?);
    Ok(())
}
