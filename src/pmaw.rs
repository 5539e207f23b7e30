extern crate clap;
use clap::*;

mod cmd_pmaw;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = Command::new("pmaw")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`pmaw` - Parallel Minimal Absent Words")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_pmaw::maw::make_subcommand())
        .subcommand(cmd_pmaw::lw::make_subcommand())
        .subcommand(cmd_pmaw::rw::make_subcommand())
        .subcommand(cmd_pmaw::present::make_subcommand())
        .subcommand(cmd_pmaw::kernel::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Extremal words:
    * maw     - Minimal absent words of each text and of both
    * rw      - Relative words under frequency thresholds
    * present - MAWs of the first text that occur in the second

* Distances:
    * lw     - Weighted-length distance over MAWs
    * kernel - Markovian string kernel with a length correction

Set RUST_LOG=info to see run summaries.

"###,
        );

    match app.get_matches().subcommand() {
        Some(("maw", sub_matches)) => cmd_pmaw::maw::execute(sub_matches),
        Some(("lw", sub_matches)) => cmd_pmaw::lw::execute(sub_matches),
        Some(("rw", sub_matches)) => cmd_pmaw::rw::execute(sub_matches),
        Some(("present", sub_matches)) => cmd_pmaw::present::execute(sub_matches),
        Some(("kernel", sub_matches)) => cmd_pmaw::kernel::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
