fn main() {
    trial_pipeline::cli::run();
}
