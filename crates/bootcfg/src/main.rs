//! # bootcfg CLI
//!
//! A thin client over `bootcfg-store`. Parsing and output live in `src/cli/`;
//! this file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - config loading + logging (mod.rs)                        │
//! │  - one handler per subcommand over &dyn Store (commands.rs) │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  bootcfg-store: Store trait, FileStore                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers return the text to print instead of printing, so they are tested
//! against `MemStore` without a terminal. The binary itself is covered by
//! `assert_cmd` tests in `tests/`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
