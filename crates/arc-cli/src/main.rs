//! arc-helper - a friendlier front end for arc
//!
//! Resolves partial reviewer names, fills in `land --onto`, and keeps your
//! settings file in step with the team defaults before handing off to arc.
//!
//! ## Quick Start
//!
//! ```bash
//! # Send a diff to reviewers by partial name
//! arc-helper run -- diff --rr=craig,ben
//!
//! # See who a fragment resolves to
//! arc-helper resolve silver
//!
//! # Pull in the team's default settings
//! arc-helper update-settings --default-file /opt/team/default.arcrc
//! ```

mod commands;
mod context;
mod prompt;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
