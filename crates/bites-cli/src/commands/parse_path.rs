//! Parse-path command - split a storage path into bucket and key.

use clap::Args;

use bites_core::StorageLocation;

/// Arguments for the parse-path command.
#[derive(Args)]
pub struct ParsePathArgs {
    /// Storage path such as s3://bucket/key
    #[arg(required = true)]
    path: String,

    /// Required scheme
    #[arg(short, long, default_value = "s3")]
    scheme: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ParsePathArgs) -> anyhow::Result<()> {
    let location = StorageLocation::parse_with_scheme(&args.path, &args.scheme)?;

    if args.json {
        println!("{}", serde_json::to_string(&location)?);
    } else {
        println!("Scheme: {}", location.scheme);
        println!("Bucket: {}", location.bucket);
        println!("Key:    {}", location.key);
    }

    Ok(())
}
