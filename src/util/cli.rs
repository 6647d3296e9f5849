use crate::auth::Store;
use crate::core::models::ClientRegistration;
use crate::core::types::{ClientId, ClientSecret, RedirectUri};
use crate::db::DbStore;
use crate::provider::error::Error;
use crate::util::random::{FromRandom, OsRandom};

use clap::Parser;

#[derive(Parser)]
#[clap(
    name = "authgate-util",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    #[clap(long, env = "DATABASE_URL")]
    database_url: String,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    ListClients(ListClients),
    CreateClient(CreateClient),
    DeleteClient(DeleteClient),
}

#[derive(Parser)]
struct ListClients;

/// Register a client, or update an existing one in place.
#[derive(Parser)]
struct CreateClient {
    #[clap(short, long)]
    id: String,
    #[clap(short, long)]
    name: String,
    #[clap(short, long)]
    redirect_uri: String,
    #[clap(short, long, default_value = "")]
    website: String,
    #[clap(short, long, default_value = "")]
    logo: String,
    /// Generated and printed when omitted.
    #[clap(short, long)]
    secret: Option<String>,
}

#[derive(Parser)]
struct DeleteClient {
    #[clap(short, long)]
    id: String,
}

fn list_clients(store: &DbStore) -> Result<(), Error> {
    for client in store.list_clients()? {
        let pending = if client.code.is_some() { " [code pending]" } else { "" };
        println!(
            "{} (name: \"{}\", redirect_uri: {}){}",
            client.id, client.name, client.redirect_uri.0, pending
        );
    }
    Ok(())
}

fn create_client(c: &CreateClient, store: &DbStore) -> Result<(), Error> {
    let (secret, generated) = match &c.secret {
        Some(secret) => (ClientSecret(secret.clone()), false),
        None => (ClientSecret::from_random(&OsRandom)?, true),
    };

    let registration = ClientRegistration {
        id: ClientId(c.id.clone()),
        name: c.name.clone(),
        secret: secret.clone(),
        redirect_uri: RedirectUri(c.redirect_uri.clone()),
        website: c.website.clone(),
        logo: c.logo.clone(),
    };

    let client = store.put_client(registration)?;
    println!("Saved client {}", client.id);
    if generated {
        println!("client_secret: {}", secret.as_ref());
    }
    Ok(())
}

fn delete_client(c: &DeleteClient, store: &DbStore) -> Result<(), Error> {
    store.delete_client(&ClientId(c.id.clone()))
}

pub fn run_cli_action(opts: Options) -> Result<(), Error> {
    use SubCommand::*;

    let store = DbStore::acquire(&opts.database_url, 1)?;
    store.migrate()?;

    match &opts.command {
        ListClients(_) => list_clients(&store),
        CreateClient(c) => create_client(c, &store),
        DeleteClient(c) => delete_client(c, &store),
    }
}
