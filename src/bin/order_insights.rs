use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    order_insights::cli::run_dashboard(std::env::args().skip(1))
}
