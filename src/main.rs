use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use delivery_client::{
    api::ApiClient,
    app_error::AppError,
    bootstrap, config,
    domain::{AccountType, Landing, Rating, summary::format_cents},
    flows::{self, deliveries::AdvanceOutcome},
    models::{Order, ProductId, RestaurantFilter, RestaurantId},
    session::{FileSessionStore, SessionStore},
};
use tracing::error;

/// Command line client for the delivery service.
#[derive(Debug, Parser)]
#[command(name = "delivery", version, about)]
struct Cli {
    /// Backend base URL. Falls back to `DELIVERY_API_URL`.
    #[arg(long, global = true, value_name = "url")]
    api_url: Option<String>,
    /// Session file. Falls back to `DELIVERY_SESSION_FILE`.
    #[arg(long, global = true, value_name = "path")]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and remember the session.
    Login { email: String, password: String },
    /// Forget the stored session.
    Logout,
    /// Choose which role a dual-role user acts as.
    Select { account_type: AccountType },
    /// Show or edit the active account.
    #[command(subcommand)]
    Account(AccountCommand),
    /// List restaurants.
    Restaurants {
        /// Minimum average rating.
        #[arg(long)]
        rating: Option<u8>,
        /// Price range, 1 to 3.
        #[arg(long)]
        price: Option<u8>,
    },
    /// Show a restaurant's menu.
    Menu { restaurant: RestaurantId },
    /// Place an order.
    Order {
        restaurant: RestaurantId,
        /// `product_id=quantity`, repeatable.
        #[arg(
            long = "item",
            value_name = "id=qty",
            value_parser = parse_item,
            required = true
        )]
        items: Vec<(ProductId, u32)>,
    },
    /// List your past orders.
    History,
    /// Rate the restaurant of a delivered order.
    Rate {
        order: u64,
        stars: u8,
        /// Seconds to wait before re-reading the restaurant average.
        #[arg(long, default_value_t = 4)]
        wait_secs: u64,
    },
    /// List every delivery.
    Deliveries,
    /// Courier views.
    #[command(subcommand)]
    Courier(CourierCommand),
}

#[derive(Debug, Subcommand)]
enum AccountCommand {
    Show,
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum CourierCommand {
    /// Orders assigned to you.
    Orders,
    /// Move an order one step towards delivered.
    Advance { order: u64 },
}

fn parse_item(raw: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=qty, got {raw}"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|error| format!("bad product id {id}: {error}"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|error| format!("bad quantity {quantity}: {error}"))?;
    Ok((id, quantity))
}

fn print_order(order: &Order) {
    let rating = order
        .restaurant_rating
        .map_or_else(|| "not rated".to_string(), |stars| format!("{stars}/5"));
    println!(
        "#{} {} [{}] {} ({})",
        order.id,
        order.restaurant_name,
        order.status,
        format_cents(order.total_cost),
        rating
    );
    for item in &order.products {
        println!(
            "    {} x {} {}",
            item.quantity,
            item.product_name,
            format_cents(item.line_total())
        );
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    if let Some(path) = cli.session_file {
        config.session.path = path;
    }
    let client = ApiClient::from_config(&config.api)?;
    let store = FileSessionStore::new(config.session.path);
    let store: &dyn SessionStore = &store;

    match cli.command {
        Command::Login { email, password } => {
            match flows::login::login(&client, store, &email, &password).await? {
                Landing::AccountSelection => {
                    println!("Logged in. Choose an account: `delivery select customer|courier`.")
                }
                Landing::CustomerApp => println!("Logged in as customer."),
                Landing::CourierApp => println!("Logged in as courier."),
            }
        }
        Command::Logout => {
            flows::login::logout(store)?;
            println!("Logged out.");
        }
        Command::Select { account_type } => {
            flows::login::select_account(store, account_type)?;
            println!("Acting as {account_type}.");
        }
        Command::Account(AccountCommand::Show) => {
            let account = flows::account::load_account(&client, store).await?;
            println!("Account:       {}", account.account_type);
            println!("Login email:   {}", account.primary_email);
            println!("Contact email: {}", account.account_email);
            println!("Phone:         {}", account.account_phone);
        }
        Command::Account(AccountCommand::Update { email, phone }) => {
            let current = flows::account::load_account(&client, store).await?;
            let email = email.unwrap_or(current.account_email);
            let phone = phone.unwrap_or(current.account_phone);
            flows::account::update_account(&client, store, &email, &phone).await?;
            println!("Account updated.");
        }
        Command::Restaurants { rating, price } => {
            let filter = RestaurantFilter {
                id: None,
                rating,
                price_range: price,
            };
            for restaurant in flows::ordering::browse_restaurants(&client, &filter).await? {
                let rating = restaurant
                    .rating
                    .map_or_else(|| "-".to_string(), |stars| format!("{stars}/5"));
                println!(
                    "{:>3}  {:<24} {:<3} {}",
                    restaurant.id,
                    restaurant.name,
                    restaurant.price_label(),
                    rating
                );
            }
        }
        Command::Menu { restaurant } => {
            let menu = flows::ordering::load_menu(&client, restaurant).await?;
            if let Some(info) = &menu.restaurant {
                println!("{} ({})", info.name, info.price_label());
            }
            for product in &menu.products {
                println!(
                    "{:>3}  {:<28} {}",
                    product.id,
                    product.name,
                    format_cents(product.cost)
                );
            }
        }
        Command::Order { restaurant, items } => {
            let menu = flows::ordering::load_menu(&client, restaurant).await?;
            let mut cart = menu.cart();
            for (product_id, quantity) in items {
                cart.set_quantity(product_id, quantity);
            }
            let order = flows::ordering::place_order(&client, store, &cart, &menu.products).await?;
            println!("Order placed.");
            print_order(&order);
        }
        Command::History => {
            for order in flows::history::order_history(&client, store).await? {
                print_order(&order);
            }
        }
        Command::Rate {
            order,
            stars,
            wait_secs,
        } => {
            let rating = Rating::new(stars)?;
            let settle = Duration::from_secs(wait_secs);
            let outcome =
                flows::rating::rate_customer_order(&client, store, order, rating, settle).await?;
            println!("{}", outcome.message());
        }
        Command::Deliveries => {
            for delivery in flows::deliveries::all_deliveries(&client).await? {
                let courier = delivery
                    .courier_id
                    .map_or_else(|| "-".to_string(), |id| id.to_string());
                println!(
                    "#{} order #{} courier {} [{}]",
                    delivery.id, delivery.order_id, courier, delivery.status
                );
            }
        }
        Command::Courier(CourierCommand::Orders) => {
            for order in flows::deliveries::courier_orders(&client, store).await? {
                println!(
                    "#{} {} -> {} [{}]",
                    order.id,
                    order.restaurant_name,
                    flows::deliveries::drop_off_address(&order),
                    order.status
                );
            }
        }
        Command::Courier(CourierCommand::Advance { order }) => {
            match flows::deliveries::advance_delivery(&client, store, order).await? {
                AdvanceOutcome::Advanced { from, to } => {
                    println!("Order #{order} is now {to} (was {from}).")
                }
                AdvanceOutcome::AlreadyDelivered => {
                    println!("Order #{order} is already delivered.")
                }
                AdvanceOutcome::Unrecognised(status) => {
                    println!("Order #{order} has unknown status {status}; left unchanged.")
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    bootstrap::init_env();
    bootstrap::init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:?}", err);
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
