use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use structopt::StructOpt;

use safeloader::board::{find_board, BOARDS};
use safeloader::inspect;
use safeloader::safeloader::meta::build_date;
use safeloader::safeloader::ImageBuilder;

mod cli;

fn open<P: AsRef<Path>>(path: P) -> Result<File, anyhow::Error> {
    File::open(&path)
        .with_context(|| format!("Can not read input firmware {}", path.as_ref().display()))
}

fn build(opts: &cli::BuildOpts, source_date_epoch: Option<&str>) -> Result<(), anyhow::Error> {
    let profile = find_board(&opts.board)?;
    let date = build_date(source_date_epoch)?;

    ImageBuilder::new(&profile)
        .revision(opts.revision)
        .add_jffs2_eof(opts.jffs2_eof)
        .sysupgrade(opts.sysupgrade)
        .build_date(date)
        .write_image(&opts.kernel, &opts.rootfs, &opts.output)
        .with_context(|| format!("Failed to build image for {}", profile.id))?;

    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    use cli::Command;

    // Create a logger with a timestamp, the level is controlled by RUST_LOG
    pretty_env_logger::init_timed();

    let opts = cli::Opts::from_args();

    match &opts.command {
        Command::Info { image } => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());

            inspect::info(&mut open(image)?, &mut out)
                .with_context(|| format!("Failed to read image {}", image.display()))?;
            out.flush()?;
        }
        Command::Build(build_opts) => {
            build(build_opts, opts.source_date_epoch.as_deref())?;
        }
        Command::Extract { image, output_dir } => {
            inspect::extract(&mut open(image)?, output_dir).with_context(|| {
                format!(
                    "Failed to extract {} to {}",
                    image.display(),
                    output_dir.display()
                )
            })?;
        }
        Command::Convert { image, output } => {
            let mut input = open(image)?;
            let mut writer = BufWriter::new(File::create(output).with_context(|| {
                format!("Can not open output firmware {}", output.display())
            })?);

            inspect::convert(&mut input, &mut writer)
                .with_context(|| format!("Failed to convert {}", image.display()))?;
            writer.flush()?;
        }
        Command::Boards => {
            for board in BOARDS {
                println!("{}", board.id);
            }
        }
    }

    Ok(())
}
