use clap::Parser;

#[tokio::main]
async fn main() {
    use authgate::util::cli::*;

    dotenv::dotenv().ok();

    let opts = Options::parse();
    match run_cli_action(opts) {
        Ok(()) => println!("OK!"),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
