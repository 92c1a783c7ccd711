//! policy-check: run terraform plan generation and an OPA policy query
//! against a `<service>/<resource>/<attribute>` test directory.
//!
//! Usage: `policy-check <target_directory> <attribute>`
//!
//! After resolving the target, an interactive menu runs any selection of:
//!   1. terraform init
//!   2. terraform plan -out=plan
//!   3. terraform show -json plan > plan.json
//!   4. opa eval of `data.terraform.gcp.security.<service>.<resource>.<attribute>.summary.message`
//!
//! The first failing command ends the process with that command's exit code.

use clap::Parser;
use policy_check::config::Config;
use policy_check::error::FAILURE_EXIT_CODE;
use policy_check::exec::ShellExecutor;
use std::io;

#[derive(Parser, Debug)]
#[command(
    name = "policy-check",
    version,
    about = "Interactive terraform plan + OPA policy check runner",
    after_help = "Example: policy-check inputs/gcp/google_kms/google_kms_crypto_key_version/state state"
)]
struct Cli {
    #[arg(help = "Test directory ending in <service>/<resource>/<attribute>")]
    target_directory: String,
    #[arg(help = "Attribute to check; overrides the one in the directory name")]
    attribute: String,
    #[arg(short, long, help = "Mirror debug logs to stderr")]
    verbose: bool,
}

/// Parse arguments, mapping clap's usage-error status to 1.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { FAILURE_EXIT_CODE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn main() {
    let cli = parse_cli();
    policy_check::logging::init(cli.verbose);
    let config = Config::load();

    let base_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine current directory: {e}");
            std::process::exit(FAILURE_EXIT_CODE);
        }
    };

    let result = policy_check::run(
        &base_dir,
        &cli.target_directory,
        &cli.attribute,
        &config,
        ShellExecutor,
        io::stdin().lock(),
        io::stdout(),
    );

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
