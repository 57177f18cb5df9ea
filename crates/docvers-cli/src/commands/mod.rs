pub mod changelog;
pub mod expand;

use std::path::Path;

/// Write `text` to `output`, or to stdout when no file is given
pub fn emit(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
