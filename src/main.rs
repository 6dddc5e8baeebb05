use clap::{arg,crate_version,ArgMatches,Command};
use num_traits::ToPrimitive;
use slzw::{lzw,Error,ExitStatus};
use std::io::{Read,Write};
use std::process::ExitCode;

const RCH: &str = "unreachable was reached";

fn open_input(path: Option<&String>) -> Result<Box<dyn Read>,Error> {
    match path {
        Some(path_in) => match std::fs::File::open(path_in) {
            Ok(f) => Ok(Box::new(f)),
            Err(e) => {
                eprintln!("couldn't open file {} for reading",path_in);
                Err(Error::Io(e))
            }
        },
        None => Ok(Box::new(std::io::stdin().lock()))
    }
}

fn open_output(path: Option<&String>) -> Result<Box<dyn Write>,Error> {
    match path {
        Some(path_out) => match std::fs::File::create(path_out) {
            Ok(f) => Ok(Box::new(f)),
            Err(e) => {
                eprintln!("couldn't open file {} for writing",path_out);
                Err(Error::Io(e))
            }
        },
        None => Ok(Box::new(std::io::stdout().lock()))
    }
}

fn run(matches: &ArgMatches) -> Result<(),Error> {
    let (name,cmd) = matches.subcommand().expect(RCH);
    let mut reader = open_input(cmd.get_one::<String>("input"))?;
    let mut writer = open_output(cmd.get_one::<String>("output"))?;
    match name {
        "compress" => {
            let (in_size,out_size) = lzw::compress(&mut reader,&mut writer,&lzw::STD_OPTIONS)?;
            eprintln!("compressed {} into {}",in_size,out_size);
        },
        "expand" => {
            let (in_size,out_size) = lzw::expand(&mut reader,&mut writer,&lzw::STD_OPTIONS)?;
            eprintln!("expanded {} into {}",in_size,out_size);
        },
        _ => panic!("{}",RCH)
    }
    Ok(())
}

fn exit_with(status: ExitStatus) -> ExitCode {
    ExitCode::from(status.to_u8().unwrap_or(1))
}

fn main() -> ExitCode
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Compress:      `slzw compress -i my_expanded -o my_compressed`
Expand:        `slzw expand -i my_compressed -o my_expanded`
Pipe:          `cat my_expanded | slzw compress > my_compressed`

Input and output default to the standard streams.
Exit status is 1 for usage or file errors, 2 for a corrupt compressed stream.";

    let mut main_cmd = Command::new("slzw")
        .about("Compress and expand with 9 to 12 bit LZW")
        .after_long_help(long_help)
        .subcommand_required(true)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path, standard input if omitted").required(false))
        .arg(arg!(-o --output <PATH> "output path, standard output if omitted").required(false))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path, standard input if omitted").required(false))
        .arg(arg!(-o --output <PATH> "output path, standard output if omitted").required(false))
        .about("expand a file"));

    let matches = match main_cmd.try_get_matches() {
        Ok(m) => m,
        Err(e) => {
            let _ = e.print();
            return match e.use_stderr() {
                true => exit_with(ExitStatus::UserError),
                false => exit_with(ExitStatus::Success)
            };
        }
    };

    match run(&matches) {
        Ok(()) => exit_with(ExitStatus::Success),
        Err(e) => {
            match &e {
                Error::Io(_) => eprintln!("***Error: {}",e),
                _ => eprintln!("***expand: Error --- {}",e)
            }
            exit_with(e.exit_status())
        }
    }
}
