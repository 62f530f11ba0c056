use olympics_stats::cli::run_cli;

fn main() -> anyhow::Result<()> {
    run_cli()
}
