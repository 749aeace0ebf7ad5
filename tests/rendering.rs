use std::fs;

use hydro_figures::scripts::{render_all, tests12, Scheme};
use hydro_figures::submodules::{
    figures::{render_figure, RenderConfig},
    layout::DataLayout,
    sources::LoadContext,
};
use tempfile::tempdir;

fn context(root: &std::path::Path) -> LoadContext {
    let mut layout = DataLayout::with_root(root);
    layout.out_dir = root.join("figures");
    LoadContext::new(layout)
}

#[test]
fn initial_conditions_render_to_png() {
    let dir = tempdir().unwrap();
    let ctx = context(dir.path());
    let path = render_figure(&tests12::initial_conditions(), &ctx, &RenderConfig::default(), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("test1_ic.png"));
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn failed_figure_does_not_stop_the_script() {
    let dir = tempdir().unwrap();
    let ctx = context(dir.path());
    let figures = [tests12::kt_plot1b(Scheme::DensityFrame), tests12::initial_conditions()];
    let summary = render_all("tests12", &figures, &ctx, &RenderConfig::default());
    assert_eq!(summary.failed, vec!["tests12/KTPlot1b_DF".to_string()]);
    assert_eq!(summary.written, vec![dir.path().join("figures/tests12/test1_ic.png")]);
    assert!(summary.written[0].is_file());
}
