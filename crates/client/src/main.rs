//! guestbook-client CLI entry point.

use clap::Parser;

use guestbook_client::cli::{Cli, Commands};
use guestbook_client::image::read_image_file;
use guestbook_client::output::{pretty, render};
use guestbook_client::{ClientError, GuestbookClient};
use guestbook_core::guest::thank_you_link;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GuestbookClient::new(&cli.base_url);

    match cli.command {
        Commands::List => {
            let guests = client.list_guests().await?;
            println!("{}", render(&guests, cli.format, |g| pretty::format_guests(g)));
        }
        Commands::Get { id } => {
            let guest = client.get_guest(&id).await?;
            println!("{}", render(&guest, cli.format, pretty::format_guest));
        }
        Commands::Create(args) => {
            let image = match (args.image, args.image_file) {
                (Some(image), _) => image,
                (None, Some(path)) => read_image_file(&path).await?,
                (None, None) => {
                    return Err(ClientError::InvalidInput(
                        "either --image or --image-file is required".to_string(),
                    )
                    .into())
                }
            };

            let guest = client.create_guest(&args.name, &image).await?;
            println!(
                "{}",
                render(&guest, cli.format, |g| format!(
                    "Created:\n{}",
                    pretty::format_created(g)
                ))
            );
        }
        Commands::Delete { id } => {
            client.delete_guest(&id).await?;
            if !cli.quiet {
                println!("Deleted guest {}", id);
            }
        }
        Commands::Link { id, site_url } => {
            // Refuse to hand out links for guests that do not exist.
            let guest = client.get_guest(&id).await?;
            let site = site_url.unwrap_or_else(|| client.base_url().to_string());
            let link = thank_you_link(&site, &guest.id);
            if !cli.quiet {
                eprintln!("Thank-you link for {}:", guest.name);
            }
            println!("{}", link);
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", render(&health, cli.format, pretty::format_health));
        }
    }

    Ok(())
}
