use lista::{error, App, Result};

fn main() -> Result<()> {
    error::setup_panic_handler();

    println!("lista - Minimal list manager for the terminal");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::new()?;
    app.run()?;

    Ok(())
}
