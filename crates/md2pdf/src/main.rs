use crate::prelude::{eprintln, println, *};
use clap::Parser;
use std::path::PathBuf;

mod convert;
mod error;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert a Markdown file into a paginated PDF with a title header and page footers"
)]
pub struct App {
    /// Markdown file to convert
    input: PathBuf,

    /// Output PDF path (defaults to the input path with a .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Title shown in the page header (defaults to the first `# ` heading)
    #[arg(short, long)]
    title: Option<String>,

    /// Paper size
    #[arg(long, value_enum, default_value_t = PageSizeArg::A4)]
    page_size: PageSizeArg,

    /// Whether to display additional information.
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
}

impl From<PageSizeArg> for pdf::PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => pdf::PageSize::A4,
            PageSizeArg::Letter => pdf::PageSize::Letter,
        }
    }
}

fn init_logger(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let app = App::parse();

    init_logger(app.verbose);
    color_eyre::install()?;

    let options = convert::Options {
        input: app.input,
        output: app.output,
        title: app.title,
        page_size: app.page_size.into(),
    };

    match convert::run(&options) {
        Ok(path) => {
            println!("Generated: {}", path.display());
            Ok(())
        }
        Err(err) => {
            match &err {
                Error::NotFound(_) => eprintln!("Error: {err}"),
                Error::RenderFailure(_) => eprintln!("Error generating PDF: {err}"),
            }
            std::process::exit(1);
        }
    }
}
