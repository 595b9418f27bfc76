use cidrex::cli::Args;
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    let args = Args::parse();
    //
    log::info!("#Start main()");

    cidrex::run(&args)?;

    Ok(())
}

// Use log4rs.yml when present; otherwise diagnostics go to stderr at warn
// level so they never mix into the stdout address stream.
fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .expect("Error building default log config");
    log4rs::init_config(config).expect("Error initializing log4rs");
}
