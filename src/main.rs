//! Binary entry point for `release-bump`.

use release_bump::ReleaseError;
use std::process;

fn main() {
    match release_bump::run() {
        Ok(()) => {}
        Err(ReleaseError::Usage(usage)) => {
            eprint!("{}", usage);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
