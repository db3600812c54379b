//! Burrow card catalog CLI.
//!
//! Owns the catalog service for the lifetime of the process.

mod cli;

use anyhow::bail;
use burrow_catalog::{Card, Catalog, CatalogService, Deck, QueryResult};
use clap::Parser;
use cli::{Cli, Command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let default_level = if cli.verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|err| anyhow::anyhow!(err))?;

	let mut config = cli.resolve_config()?;
	info!(source = ?config.source, "starting burrow");

	if !matches!(cli.command, Command::Watch) {
		// One-shot commands load inline.
		config.load_on_start = false;
	}
	let service = CatalogService::start(config.source.open(), &config);

	let outcome: anyhow::Result<()> = match cli.command {
		Command::Decks => service.reload_now().await.map(|catalog| print_decks(&catalog)).map_err(Into::into),
		Command::List { deck } => service.reload_now().await.map(|catalog| print_list(&catalog, deck)).map_err(Into::into),
		Command::Show { id } => match service.reload_now().await {
			Ok(_) => match service.lookup(id) {
				QueryResult::Found(card) => {
					print_card(&card);
					Ok(())
				}
				QueryResult::NotFound => Err(anyhow::anyhow!("card {id} not found")),
			},
			Err(err) => Err(err.into()),
		},
		Command::Watch => watch(&service).await,
	};

	service.shutdown().await;
	outcome
}

async fn watch(service: &CatalogService) -> anyhow::Result<()> {
	let mut sub = service.subscribe();
	let trigger = service.trigger();
	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	loop {
		tokio::select! {
			line = lines.next_line() => match line? {
				Some(_) => {
					if !trigger.request() {
						bail!("catalog service stopped");
					}
				}
				None => return Ok(()),
			},
			catalog = sub.next() => match catalog {
				Some(catalog) => println!("catalog: {} cards across {} decks", catalog.len(), decks_present(&catalog)),
				None => return Ok(()),
			},
		}
	}
}

fn decks_present(catalog: &Catalog) -> usize {
	Deck::ALL.iter().filter(|&&deck| catalog.by_deck(deck).next().is_some()).count()
}

fn print_decks(catalog: &Catalog) {
	for deck in Deck::ALL {
		let info = deck.info();
		println!(
			"{:<8} #{:06X}  {:>3} cards  {}",
			info.title,
			info.color,
			catalog.by_deck(deck).count(),
			info.description
		);
	}
}

fn print_list(catalog: &Catalog, deck: Option<Deck>) {
	let cards: Box<dyn Iterator<Item = &Card>> = match deck {
		Some(deck) => Box::new(catalog.by_deck(deck)),
		None => Box::new(catalog.iter()),
	};
	for card in cards {
		println!("{:>5}  {:<7} {}", card.id.to_string(), card.deck.info().title, card.title);
	}
}

fn print_card(card: &Card) {
	println!("{} {}", card.id, card.title);
	println!("{} deck · {}", card.deck.info().title, card.deck.info().description);
	println!("type: {}", card.kind.label());
	println!("bunny required: {:?}", card.bunny_requirement);
	println!();
	println!("{}", card.text);
}
