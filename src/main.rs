fn main() -> std::process::ExitCode {
    drivescore_dashboard_lib::run()
}
