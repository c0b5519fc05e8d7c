mod cli;
mod demo;
mod infra;
mod report;

use style_quiz::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
