mod catalog;
mod config;
mod error;
mod library;
mod render;
mod runtime;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
