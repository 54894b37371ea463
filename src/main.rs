fn main() {
    sanity_report::cli::run();
}
