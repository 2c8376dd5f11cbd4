//! numsgen - Nothing-up-my-sleeve constant generator.
//!
//! Prints the first COUNT constants of the seed x encoding x transform x
//! decoding space, one line of four hex words per constant.

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use numsgen::config::GeneratorConfig;
use numsgen::decoding::Decoding;
use numsgen::encoding::Encoding;
use numsgen::generator::{log2, parse_count, GenerateError, Generator, Tables};
use numsgen::output::{ConsoleOutput, Output};
use numsgen::seed::{Function, NamedConstant};

#[derive(Parser)]
#[command(name = "numsgen")]
#[command(about = "Generate nothing-up-my-sleeve constants from well-known irrational numbers")]
#[command(version)]
struct Cli {
    /// Number of constants to emit
    count: Option<String>,

    /// Skip this many constants before emitting
    #[arg(long, default_value_t = 0)]
    skip: u64,

    /// Primes fed to the seed functions (e.g., 2,3,5)
    #[arg(long, value_delimiter = ',')]
    prime: Vec<u64>,

    /// Significant digits per seed (e.g., 16,32,64)
    #[arg(long, value_delimiter = ',')]
    precision: Vec<usize>,

    /// Functions applied to primes (ln, log10, sqrt, cbrt, cos, sin, tan)
    #[arg(long, value_delimiter = ',')]
    function: Vec<Function>,

    /// Named constants (phi, pi, e, euler, zeta3, logpi)
    #[arg(long, value_delimiter = ',')]
    constant: Vec<NamedConstant>,

    /// Encodings (int10, int2, int2_noprefix, hex_lo, hex_hi, raw, base64_int, base64_raw)
    #[arg(long, value_delimiter = ',')]
    encoding: Vec<Encoding>,

    /// Transform selectors (e.g., md5, hmac, hmac-sha1:aax64, pbkdf2-sha1:32)
    #[arg(long, value_delimiter = ',')]
    transform: Vec<String>,

    /// Decodings (be, le)
    #[arg(long, value_delimiter = ',')]
    decoding: Vec<Decoding>,

    /// Do not derive seeds from reciprocals
    #[arg(long)]
    no_reciprocals: bool,

    /// Append position and table labels to each line
    #[arg(short, long)]
    verbose: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Print table sizes and the size of the space, then exit
    #[arg(long)]
    list: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new().with_reciprocals(!self.no_reciprocals);

        if !self.prime.is_empty() {
            config = config.with_primes(self.prime.clone());
        }
        if !self.precision.is_empty() {
            config = config.with_precisions(self.precision.clone());
        }
        if !self.function.is_empty() {
            config = config.with_functions(self.function.clone());
        }
        if !self.constant.is_empty() {
            config = config.with_constants(self.constant.clone());
        }
        if !self.encoding.is_empty() {
            config = config.with_encodings(self.encoding.clone());
        }
        if !self.transform.is_empty() {
            config = config.with_transform_selectors(self.transform.clone());
        }
        if !self.decoding.is_empty() {
            config = config.with_decodings(self.decoding.clone());
        }

        config
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let tables = Tables::build(&cli.config())?;
    let generator = Generator::new(tables)?;

    if cli.list {
        print_tables(&generator);
        return Ok(ExitCode::SUCCESS);
    }

    let max = generator.max_count();
    if cli.skip >= max {
        eprintln!("{}", GenerateError::InvalidStart { start: cli.skip, max });
        return Ok(ExitCode::FAILURE);
    }

    let count = match parse_count(cli.count.as_deref().unwrap_or(""), max - cli.skip) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let out: Box<dyn Output> = match &cli.output {
        Some(path) => Box::new(ConsoleOutput::to_file(path)?.with_verbose(cli.verbose)),
        None => Box::new(ConsoleOutput::new().with_verbose(cli.verbose)),
    };

    run_generate(&generator, cli.skip, count, out.as_ref(), cli.progress)?;
    Ok(ExitCode::SUCCESS)
}

fn run_generate(
    generator: &Generator,
    skip: u64,
    count: u64,
    output: &dyn Output,
    progress: bool,
) -> Result<()> {
    let pb = if progress {
        let pb = ProgressBar::new(count);
        pb.set_style(numsgen::default_progress_style());
        Some(pb)
    } else {
        None
    };

    for constant in generator.generate_from(skip, count)? {
        output.constant(&constant?, generator.tables())?;
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    output.flush()?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(())
}

fn print_tables(generator: &Generator) {
    let [seeds, encodings, transforms, decodings] = generator.tables().dimensions();
    let max = generator.max_count();

    println!("seeds:      {}", seeds);
    println!("encodings:  {}", encodings);
    println!("transforms: {}", transforms);
    println!("decodings:  {}", decodings);
    println!("max:        {} (~2^{:.2})", max, log2(max));
}
