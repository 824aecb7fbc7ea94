use anyhow::Result;
use clap::Parser;

use media_ripper::{MediaRipper, RipCommand};

#[tokio::main]
async fn main() -> Result<()> {
    let args = RipCommand::parse();

    let ripper = MediaRipper::new(
        &args.input,
        &args.output,
        args.base_url,
        !args.keep_originals,
    )?;

    ripper.rip().await?;

    println!("✅ Media ripping completed successfully!");
    Ok(())
}
