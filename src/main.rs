use tsp_solver::config::Config;
use tsp_solver::run;

fn main() {
    env_logger::init();

    std::process::exit(match run(Config::from_args()) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("{}", e);
            -1
        }
    })
}
