use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hydro_figures::scripts::{render_all, select};
use hydro_figures::submodules::{figures::RenderConfig, layout::DataLayout, sources::LoadContext};

#[derive(Parser, Debug)]
#[command(author, version, about = "Comparison figures for the relativistic viscous hydro tests")]
struct Args {
    /// Path to a data layout TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the solver output folders (overrides config)
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Directory figures are written to (overrides config)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Log resolved paths
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Print the selected figures without rendering
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Scripts (`fig1`) or figures (`test2/KTPlot2`, `smoothtest1`); all when empty
    #[arg(value_name = "FIGURE")]
    figures: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut layout = match &args.config {
        Some(path) => DataLayout::from_toml_file(path)?,
        None => DataLayout::default(),
    };
    if let Some(root) = args.data_root {
        layout.data_root = root;
    }
    if let Some(out_dir) = args.out_dir {
        layout.out_dir = out_dir;
    }

    let selection = select(&args.figures)?;
    if args.list {
        for (script, figures) in &selection {
            for figure in figures {
                println!("{}/{}", script, figure.name);
            }
        }
        return Ok(());
    }

    let ctx = LoadContext::new(layout);
    let config = RenderConfig::default();
    let mut written = 0;
    let mut failed = Vec::new();
    for (script, figures) in &selection {
        let summary = render_all(script, figures, &ctx, &config);
        written += summary.written.len();
        failed.extend(summary.failed);
    }
    info!(count = written, out_dir = %ctx.layout.out_dir.display(), "figures written");
    if !failed.is_empty() {
        return Err(format!("{} figure(s) failed: {}", failed.len(), failed.join(", ")).into());
    }
    Ok(())
}
