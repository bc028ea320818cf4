use laoskit::{init_logging, parse_args, Command, BUILD_DATE, USAGE, VERSION};

fn main() -> anyhow::Result<()> {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("laoskit: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => println!("{}", USAGE),
        Command::Version => println!("laoskit {} (built {})", VERSION, BUILD_DATE),
        Command::Run(options) => {
            // Initialize logging
            init_logging(options.log_json)?;

            if let Err(e) = laoskit::run(&options) {
                tracing::error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
