use anyhow::Result;

fn main() -> Result<()> {
    rapport_cli::main_entry()
}
