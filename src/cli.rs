use std::path::PathBuf;

use structopt::StructOpt;

use safeloader::Error;

/// Parses a revision given as `r<number>` or `<number>`
pub fn parse_revision(src: &str) -> Result<u32, Error> {
    let digits = src.strip_prefix('r').unwrap_or(src);

    digits
        .parse()
        .map_err(|_| Error::InvalidRevision(src.to_owned()))
}

#[derive(StructOpt, Debug)]
pub struct BuildOpts {
    /// The board to build the image for
    #[structopt(short = "B", long = "board")]
    pub board: String,
    /// The kernel image
    #[structopt(short = "k", long = "kernel")]
    pub kernel: PathBuf,
    /// The root filesystem image
    #[structopt(short = "r", long = "rootfs")]
    pub rootfs: PathBuf,
    /// The name of the file to write the image to
    #[structopt(short = "o", long = "output")]
    pub output: PathBuf,
    /// Revision stored in the soft-version partition
    #[structopt(long = "revision", default_value = "0", parse(try_from_str = parse_revision))]
    pub revision: u32,
    /// Append a JFFS2 end-of-filesystem marker to the root filesystem
    #[structopt(short = "j", long = "jffs2-eof")]
    pub jffs2_eof: bool,
    /// Build a sysupgrade image instead of a factory image
    #[structopt(short = "S", long = "sysupgrade")]
    pub sysupgrade: bool,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Print the contents of an image
    Info {
        /// The image to inspect
        image: PathBuf,
    },
    /// Build an image from a kernel and a root filesystem
    Build(BuildOpts),
    /// Extract all partitions of an image
    Extract {
        /// The image to extract
        image: PathBuf,
        /// An existing directory to write the partitions to
        #[structopt(short = "d", long = "output-dir")]
        output_dir: PathBuf,
    },
    /// Convert a factory image to a sysupgrade image
    Convert {
        /// The factory image
        image: PathBuf,
        /// The name of the file to write the sysupgrade image to
        #[structopt(short = "o", long = "output")]
        output: PathBuf,
    },
    /// List the supported boards
    Boards,
}

#[derive(StructOpt, Debug)]
pub struct Opts {
    #[structopt(subcommand)]
    pub command: Command,

    /// Unix timestamp used as the build date of soft-version partitions
    #[structopt(env = "SOURCE_DATE_EPOCH", long = "source-date-epoch", global = true)]
    pub source_date_epoch: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_parse_revisions() {
        assert_eq!(parse_revision("r12").unwrap(), 12);
        assert_eq!(parse_revision("3").unwrap(), 3);
        assert!(matches!(parse_revision("rev1"), Err(Error::InvalidRevision(_))));
        assert!(matches!(parse_revision("r"), Err(Error::InvalidRevision(_))));
    }

    #[test]
    fn it_should_parse_build_options() {
        let opts = Opts::from_iter(&[
            "safeloader",
            "build",
            "--board",
            "CPE510",
            "--kernel",
            "kernel.bin",
            "--rootfs",
            "rootfs.bin",
            "--output",
            "factory.bin",
            "--revision",
            "r4",
            "--jffs2-eof",
        ]);

        match opts.command {
            Command::Build(build) => {
                assert_eq!(build.board, "CPE510");
                assert_eq!(build.revision, 4);
                assert!(build.jffs2_eof);
                assert!(!build.sysupgrade);
            }
            command => panic!("unexpected command {:?}", command),
        }
    }
}
