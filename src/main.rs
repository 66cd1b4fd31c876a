// Offerboard
// Main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use offerboard::models::membership::{AddOn, MembershipCart, PromoClock, Tier};
use offerboard::models::offer::{Offer, OfferId};
use offerboard::models::settings::AppConfig;
use offerboard::services::api::ApiClient;
use offerboard::services::board::{OfferAction, OfferBoard};
use offerboard::services::countdown::OfferCountdownEngine;
use offerboard::services::creators::{rank_creators, CreatorTab};
use offerboard::services::settings::SettingsService;

#[derive(Parser, Debug)]
#[command(name = "offerboard", about = "City offers, creators and memberships in the terminal")]
struct Args {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show current offers with live countdowns
    Offers {
        /// Print once and exit instead of following the countdown
        #[arg(long)]
        once: bool,
    },
    /// List creators
    Creators {
        #[arg(long, default_value = "all-time")]
        tab: CreatorTab,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Price a membership
    Membership {
        #[arg(long)]
        tier: Option<Tier>,
        /// Add-on service by name; repeatable
        #[arg(long = "addon")]
        addons: Vec<String>,
    },
    /// Directions (or website) for one offer
    Directions {
        offer_id: String,
        /// Open the link in the system browser
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location()?,
    };
    let config = settings.load()?;
    log::info!("Starting Offerboard for {} ({})", config.city, config.api.base_url);

    match args.command {
        Command::Offers { once } => run_offers(&config, once).await,
        Command::Creators { tab, search } => run_creators(&config, tab, &search).await,
        Command::Membership { tier, addons } => run_membership(tier, &addons),
        Command::Directions { offer_id, open } => run_directions(&config, &offer_id, open).await,
    }
}

async fn load_board(config: &AppConfig) -> Result<OfferBoard> {
    let api = ApiClient::new(&config.api)?;
    let mut board = OfferBoard::new(OfferCountdownEngine::new(&config.countdown));
    board.load(&api).await;
    Ok(board)
}

async fn run_offers(config: &AppConfig, once: bool) -> Result<()> {
    let board = load_board(config).await?;
    if !board.is_visible() {
        println!("No offers in {} right now.", config.city);
        return Ok(());
    }

    print_sections(&board);
    if once {
        return Ok(());
    }

    let mut updates = board.engine().subscribe();
    if updates.borrow().all_expired() {
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print_timers(&board);
                if updates.borrow_and_update().all_expired() {
                    println!("All offers have expired.");
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    Ok(())
}

fn print_sections(board: &OfferBoard) {
    let sections = board.sections();
    print_group(board, "🔥 Trending Offers", &sections.trending);
    print_group(board, "Flash Deals ⚡", &sections.flash_deals);
    print_group(board, "Featured", &sections.featured);
    print_group(board, "More Offers", &sections.more);
    print_group(board, "Events", &sections.events);
}

fn print_group(board: &OfferBoard, title: &str, offers: &[&Offer]) {
    if offers.is_empty() {
        return;
    }
    println!("\n{}", title);
    for offer in offers {
        let card = board.card(offer);
        let id = card.id.as_ref().map(ToString::to_string).unwrap_or_default();
        println!(
            "  [{}] {} · {} · {} · {}",
            id,
            card.name,
            card.store.as_deref().unwrap_or("-"),
            card.price.as_deref().unwrap_or("-"),
            card.timer
        );
    }
}

fn print_timers(board: &OfferBoard) {
    let line = board
        .offers()
        .iter()
        .filter(|offer| {
            offer
                .key()
                .is_some_and(|id| board.engine().remaining(id).is_some())
        })
        .map(|offer| format!("{}: {}", offer.display_name(), board.timer_label(offer)))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{}", line);
}

async fn run_creators(config: &AppConfig, tab: CreatorTab, search: &str) -> Result<()> {
    let api = ApiClient::new(&config.api)?;
    let creators = match api.fetch_creators().await {
        Ok(creators) => creators,
        Err(err) => {
            log::error!("Creators fetch failed: {}", err);
            Vec::new()
        }
    };

    let ranked = rank_creators(&creators, tab, search);
    println!("Top Creators in {} · {}", config.city, tab.label());
    if ranked.is_empty() {
        println!("  No creators found.");
    }
    for creator in &ranked {
        println!(
            "  {} ({}) ★ {:.1} · {} collaborations · {} · {}",
            creator.name,
            creator.category,
            creator.rating,
            creator.collaborations,
            creator.phone,
            creator.email
        );
        for (network, url) in creator.social.links() {
            println!("      {}: {}", network, url);
        }
    }
    Ok(())
}

fn run_membership(tier: Option<Tier>, addons: &[String]) -> Result<()> {
    let clock = PromoClock::default();
    println!("Special launch discounts ending soon: {}", clock);
    for tier in Tier::ALL {
        println!(
            "  {:<9} ₹{} (was ₹{}, save {}%)",
            tier.label(),
            tier.discounted_price(),
            tier.original_price(),
            tier.discount_percent()
        );
    }

    let mut cart = MembershipCart::new();
    cart.select_tier(tier);
    for name in addons {
        let addon = AddOn::from_name(name)
            .with_context(|| format!("Unknown add-on service '{}'", name))?;
        if !cart.is_selected(addon) {
            cart.toggle(addon);
        }
    }

    let summary = cart.purchase();
    println!("\nSelected tier: {}", summary.tier.map(Tier::label).unwrap_or("none"));
    for service in &summary.services {
        println!("  + {}", service);
    }
    println!("Total: ₹{} · offer ends in {}", summary.total, clock.long_label());
    Ok(())
}

async fn run_directions(config: &AppConfig, raw_id: &str, open: bool) -> Result<()> {
    let board = load_board(config).await?;
    let id = OfferId::parse(raw_id);
    let detail = board
        .detail(&id)
        .with_context(|| format!("No offer with id {}", id))?;

    println!("{} · {}", detail.card.name, detail.card.timer);
    println!("Valid until: {}", detail.valid_until);
    println!("{}", detail.details);
    match &detail.action {
        OfferAction::GetDirections(Some(url)) | OfferAction::VisitWebsite(Some(url)) => {
            println!("{}", url);
        }
        OfferAction::GetDirections(None) => println!("No address on file."),
        OfferAction::VisitWebsite(None) => println!("No website on file."),
    }

    if open {
        board.open_directions(&id)?;
    }
    Ok(())
}
