mod entry;
mod logger;

use boom::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
