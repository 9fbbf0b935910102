use anyhow::{Result, bail};
use clap::Parser;
use typelist::{cli, extract, model};

fn main() -> Result<()> {
    let args = cli::Args::parse();

    if args.version {
        println!("{}", model::TOOL_VERSION);
        return Ok(());
    }

    let Some(file) = args.file else {
        bail!("need a go file");
    };
    if file.extension().and_then(|ext| ext.to_str()) != Some("go") {
        bail!("need a go file, got {}", file.display());
    }

    let catalog = extract::extract_file(&file)?;
    // no trailing newline after the document
    print!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}
