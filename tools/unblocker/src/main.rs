mod cli;
mod commands;
mod setup;

use cli::Cli;

fn main() {
    let args = Cli::parse_args();
    setup::init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let cfg = setup::load_configuration(args)?;
    let mut dataset = setup::load_dataset(&cfg)?;
    let out = commands::execute(args, &cfg, &mut dataset)?;
    println!("{}", out);
    Ok(())
}
