use clap::Parser;
use task_manager_cli::app;
use task_manager_cli::commands::cli;
use task_manager_cli::error::exit_code_for_error;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let mut stdout = std::io::stdout().lock();

    let exit = match app::run_app(args, &mut stdout).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}
