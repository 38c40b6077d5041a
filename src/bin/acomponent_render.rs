use std::{fs::File,
          io::{BufWriter, Write},
          path::PathBuf};

use acomponent::{Component, Mode, trace::set_trace};
use acomponent_render::describe::load_file;
use anyhow::{Result, Context, bail};
use clap::Parser as ClapParser;


#[derive(clap::Parser, Debug)]
/// Render a JSON page description to markup.
struct Args {
    /// The page description file
    #[clap(required(true))]
    file: PathBuf,

    /// Stream output while walking the tree instead of building the
    /// whole string first
    #[clap(long)]
    stream: bool,

    /// Render in both modes and twice each, and fail if any of the
    /// outputs differ
    #[clap(long)]
    check: bool,

    /// Print a trace of the render passes to stderr (same as setting
    /// ACOMPONENT_TRACE=1)
    #[clap(long)]
    trace: bool,

    /// Write to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

fn check(page: &Component) -> Result<String> {
    let buffered = page.render_in(Mode::Buffered)?;
    for mode in [Mode::Buffered, Mode::Streaming] {
        let again = page.render_in(mode)?;
        if again != buffered {
            bail!("{mode:?} output differs from the first buffered render:\n\
                   {buffered:?}\nvs.\n{again:?}")
        }
    }
    Ok(buffered)
}

fn emit(page: &Component, args: &Args, out: &mut impl Write) -> Result<()> {
    if args.check {
        out.write_all(check(page)?.as_bytes())?;
    } else if args.stream {
        page.print_to(out)?;
    } else {
        out.write_all(page.render()?.as_bytes())?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.trace {
        set_trace(true);
    }

    let page = load_file(&args.file)?;

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("creating output file {path:?}"))?;
        emit(&page, &args, &mut BufWriter::new(file))
    } else {
        emit(&page, &args, &mut std::io::stdout().lock())
    }
}
