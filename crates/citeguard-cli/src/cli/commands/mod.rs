use super::args::*;

pub mod check;
pub mod explain_codes;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Check(args) => check::run(args),
        Command::ExplainCodes => explain_codes::run(),
    }
}
