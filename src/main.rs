use crate::convert::convert;
use crate::scan::find_xml_files;
use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::{fs, io};
use structopt::StructOpt;

mod convert;
mod extract;
mod model;
mod report;
mod scan;

#[derive(StructOpt, Debug)]
#[structopt()]
struct Opt {
    /// Silence all diagnostics
    #[structopt(short = "q", long)]
    quiet: bool,

    /// Verbose mode (-v, -vv, -vvv, -vvvv). The levels are warnings, informational, debugging, and trace message.
    #[structopt(short = "v", long, parse(from_occurrences))]
    verbose: usize,

    /// Timestamp (sec, ms, ns, none)
    #[structopt(short = "t", long = "timestamp")]
    ts: Option<stderrlog::Timestamp>,

    /// An optional target file to write the CSV to.
    #[structopt(short = "o", long)]
    output: Option<PathBuf>,

    /// Quote fields that contain commas, quotes or line breaks.
    #[structopt(long)]
    quote: bool,

    /// Directory holding the JUnit XML reports.
    #[structopt(parse(from_os_str))]
    directory: PathBuf,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    stderrlog::new()
        .module(module_path!())
        .quiet(opt.quiet)
        .verbosity(opt.verbose)
        .timestamp(opt.ts.unwrap_or(stderrlog::Timestamp::Off))
        .init()?;

    let files = find_xml_files(&opt.directory);
    if files.is_empty() {
        return Err(anyhow!(
            "No XML files found in directory: {}",
            opt.directory.display()
        ));
    }

    let out_writer = match opt.output {
        Some(path) => Box::new(
            fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ) as Box<dyn io::Write>,
        None => Box::new(io::stdout().lock()) as Box<dyn io::Write>,
    };

    let summary = convert(files, out_writer, opt.quote)?;
    info!(
        "Wrote {} row(s), skipped {} file(s)",
        summary.written, summary.skipped
    );

    Ok(())
}
