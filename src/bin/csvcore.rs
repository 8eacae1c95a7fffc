//! Thin CLI wrapper around the `csvcore` library: reads a CSV file (or
//! stdin) and writes each unquoted row to stdout, tab-separated. No parsing
//! logic lives here — it exists to exercise the library end to end.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser as _;
use csvcore::{parse_reader, Config, PerRowError, RowInfo, Value};

#[derive(clap::Parser)]
#[command(name = "csvcore", about = "Stream a CSV file and print its rows tab-separated")]
struct Args {
    /// Input file; reads stdin when omitted.
    file: Option<String>,

    /// Column delimiter byte.
    #[arg(short = 'd', long = "delimiter", default_value_t = ',')]
    delimiter: char,

    /// Quote byte.
    #[arg(short = 'q', long = "quote", default_value_t = '"')]
    quote: char,

    /// Escape byte. Defaults to the quote byte.
    #[arg(short = 'e', long = "escape")]
    escape: Option<char>,

    /// Null-string sentinel recognized in unquoted cells.
    #[arg(short = 'n', long = "null-str")]
    null_str: Option<String>,

    /// Skip the first row.
    #[arg(short = 'H', long = "skip-header")]
    skip_header: bool,
}

fn main() -> ExitCode {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "warn");
    }
    tracing_subscriber::fmt().with_writer(io::stderr).with_target(false).init();

    let args = Args::parse();
    let mut builder = Config::builder()
        .delimiter(args.delimiter as u8)
        .quote(args.quote as u8)
        .skip_header(args.skip_header);
    if let Some(escape) = args.escape {
        builder = builder.escape(escape as u8);
    }
    if let Some(null_str) = &args.null_str {
        builder = builder.null_str(null_str.as_bytes().to_vec());
    }
    let config = builder.build();

    let result = match &args.file {
        Some(path) => File::open(path)
            .map_err(|e| e.to_string())
            .and_then(|f| run(f, config).map_err(|e| e.to_string())),
        None => run(io::stdin().lock(), config).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("csvcore: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run<R: io::Read>(source: R, config: Config) -> Result<(), csvcore::ParserError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_row = |cells: &[Value<'_>], _: RowInfo| -> Result<(), PerRowError> {
        (|| -> io::Result<()> {
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    out.write_all(b"\t")?;
                }
                match cell {
                    Value::Null => {}
                    Value::Bytes(b) => out.write_all(b)?,
                }
            }
            out.write_all(b"\n")
        })()
        .map_err(|e| PerRowError::new(e.to_string()))
    };
    parse_reader(source, config, &mut write_row)
}
