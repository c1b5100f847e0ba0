#[macro_use]
extern crate clap;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process;

use clap::Arg;

use ippvm::{InputSource, Io, Lines, Processor};

#[derive(Debug)]
enum Error {
    Usage(String),
    Open(String, io::Error),
    Load(ippxml::Error),
    Run(ippvm::Error),
}

impl Error {
    fn code(&self) -> i32 {
        match self {
            Error::Usage(_) => 10,
            Error::Open(_, _) => 11,
            Error::Load(err) => err.code(),
            Error::Run(err) => err.code(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Usage(message) => {
                write!(f, "Missing parameter or illegal combination: {}", message)
            }
            Error::Open(path, err) => write!(f, "Cannot open input file \"{}\": {}", path, err),
            Error::Load(err) => err.fmt(f),
            Error::Run(err) => err.fmt(f),
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            err.code()
        }
    };
    // Destructors do not run past process::exit, so surface any buffered
    // program output first.
    io::stdout().flush().ok();
    process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let app = app_from_crate!()
        .arg(
            Arg::with_name("source")
                .long("source")
                .takes_value(true)
                .value_name("FILE")
                .help("Program source XML; read from stdin when absent"),
        )
        .arg(
            Arg::with_name("input")
                .long("input")
                .takes_value(true)
                .value_name("FILE")
                .help("Program input; read from stdin when absent"),
        );

    let matches = match app.get_matches_safe() {
        Ok(matches) => matches,
        Err(err) => {
            if err.kind == clap::ErrorKind::HelpDisplayed
                || err.kind == clap::ErrorKind::VersionDisplayed
            {
                err.exit();
            }
            return Err(Error::Usage(err.message));
        }
    };

    let source_path = matches.value_of("source");
    let input_path = matches.value_of("input");
    if source_path.is_none() && input_path.is_none() {
        return Err(Error::Usage(
            "at least one of --source and --input is required".to_string(),
        ));
    }

    let source = read_source(source_path)?;
    let program = ippxml::load(&source).map_err(Error::Load)?;

    let stdin = io::stdin();
    let mut input: Box<dyn InputSource + '_> = match input_path {
        Some(path) => Box::new(Lines::new(BufReader::new(open(path)?))),
        None => Box::new(Lines::new(stdin.lock())),
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut output = stdout.lock();
    let mut log = stderr.lock();
    let mut channels = Io {
        input: &mut *input,
        output: &mut output,
        log: &mut log,
    };

    let mut processor = Processor::new();
    processor.run(&program, &mut channels).map_err(Error::Run)
}

fn open(path: &str) -> Result<File, Error> {
    File::open(path).map_err(|err| Error::Open(path.to_string(), err))
}

fn read_source(path: Option<&str>) -> Result<String, Error> {
    let mut source = String::new();
    match path {
        Some(path) => {
            open(path)?
                .read_to_string(&mut source)
                .map_err(|err| Error::Open(path.to_string(), err))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|err| Error::Open("stdin".to_string(), err))?;
        }
    }
    Ok(source)
}
