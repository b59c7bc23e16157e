//! tapfeed main entrypoint.

use tapfeed::run;
use tapfeed::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
