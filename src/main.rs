fn main() -> anyhow::Result<()> {
    ai_model_monitor::cli::run()
}
