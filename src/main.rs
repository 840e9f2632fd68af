//! staffcheck main entrypoint.

use staffcheck::run;
use staffcheck::ui::messages::app_error;

fn main() {
    if let Err(e) = run() {
        app_error(&e);
        std::process::exit(1);
    }
}
