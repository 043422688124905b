//! Generate SVG cut sheets and a JSON sheet file from a net job.
//!
//! Usage: `render_net <job.json> [output-dir]`

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use net_format::{load_job, run_job, save_sheet, NetSheet, SheetMetadata, SvgSink};
use net_kernel::PrismKernel;
use net_ops::emit_net;
use tracing::info;

const DEFAULT_OUTPUT_DIR: &str = "out";

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("nets")
        .to_string()
}

fn render(job_path: &Path, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let json = fs::read_to_string(job_path)?;
    let job = load_job(&json)?;
    let stem = file_stem(job_path);

    let mut kernel = PrismKernel::new();
    // Every net is built before anything is written.
    let nets = run_job(&job, &mut kernel)?;

    fs::create_dir_all(out_dir)?;
    println!("=== {stem}: {} nets ===", nets.len());
    for named in &nets {
        let mut sink = SvgSink::new(&named.name);
        emit_net(&named.net, &mut sink);
        let path = out_dir.join(format!("{}.svg", named.name));
        fs::write(&path, sink.finish())?;
        println!(
            "  {name}: {panels} panels, {curves} curves -> {path}",
            name = named.name,
            panels = named.net.panels.len(),
            curves = sink.path_count(),
            path = path.display(),
        );
    }

    let sheet = NetSheet::new(SheetMetadata::new(&stem), job.parameters, nets);
    let sheet_path = out_dir.join(format!("{stem}.sheet.json"));
    fs::write(&sheet_path, save_sheet(&sheet)?)?;
    info!(id = %sheet.id, path = %sheet_path.display(), "sheet written");
    println!("  sheet {} -> {}", sheet.id, sheet_path.display());
    Ok(())
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(job_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: render_net <job.json> [output-dir]");
        return ExitCode::from(2);
    };
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    match render(&job_path, &out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
