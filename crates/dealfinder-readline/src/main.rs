use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use dealfinder_application::App;
use dealfinder_core::error::DealfinderError;
use dealfinder_core::product::Product;
use dealfinder_core::search::SearchStatus;
use dealfinder_core::session::{Credentials, Registration};
use dealfinder_core::view::{FilterCriteria, SortKey, available_sources, build_view};
use dealfinder_infrastructure::ConfigStorage;

const COMMANDS: &[&str] = &[
    "/login",
    "/register",
    "/logout",
    "/whoami",
    "/search",
    "/results",
    "/show",
    "/similar",
    "/fav",
    "/favorites",
    "/history",
    "/replay",
    "/histdel",
    "/histclear",
    "/recommended",
    "/help",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("{}", "No products.".bright_black());
        return;
    }
    for product in products {
        println!(
            "{} {} {}  {}",
            product.id.bright_black(),
            product.name.bright_white(),
            format!("KSh {}", product.price).bright_green(),
            format!("{} ({:.1})", product.source, product.rating).bright_black(),
        );
    }
}

fn print_error(err: &DealfinderError) {
    println!("{}", err.to_string().red());
}

fn parse_sort(word: &str) -> Option<SortKey> {
    match word {
        "relevance" => Some(SortKey::Relevance),
        "price-low" => Some(SortKey::PriceAsc),
        "price-high" => Some(SortKey::PriceDesc),
        "rating" => Some(SortKey::Rating),
        _ => None,
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_white());
    println!("  /login <user> <password>        authenticate");
    println!("  /register <user> <email> <pw>   create an account");
    println!("  /logout                         end the session");
    println!("  /whoami                         show the current session");
    println!("  /search <query>                 search the catalog");
    println!("  /results [sort] [min] [max]     view results (relevance|price-low|price-high|rating)");
    println!("  /show <id>                      product detail");
    println!("  /similar <id>                   similar products");
    println!("  /fav <id>                       toggle a favorite");
    println!("  /favorites                      list favorites");
    println!("  /history                        list search history");
    println!("  /replay <entry-id>              run a past search again");
    println!("  /histdel <entry-id>             delete one history entry");
    println!("  /histclear                      clear all history");
    println!("  /recommended                    list recommendations");
    println!("  quit                            exit");
}

async fn dispatch(app: &App, trimmed: &str) {
    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("/login", [username, password]) => {
            let credentials = Credentials {
                username: username.to_string(),
                password: password.to_string(),
            };
            match app.login(&credentials).await {
                Ok(session) => {
                    println!("{}", format!("Welcome back, {}!", session.display_name).green())
                }
                Err(err) => print_error(&err),
            }
        }
        ("/register", [username, email, password]) => {
            let registration = Registration {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            };
            match app.register(&registration).await {
                Ok(session) => {
                    println!("{}", format!("Welcome, {}!", session.display_name).green())
                }
                Err(err) => print_error(&err),
            }
        }
        ("/logout", []) => {
            app.logout().await;
            println!("{}", "Logged out.".green());
        }
        ("/whoami", []) => match app.session().current() {
            Some(session) => println!(
                "{}",
                format!("{} (#{})", session.display_name, session.principal_id).bright_white()
            ),
            None => println!("{}", "Browsing anonymously.".bright_black()),
        },
        ("/search", args) if !args.is_empty() => {
            let query = args.join(" ");
            let snapshot = app.search().search(&query).await;
            match snapshot.status {
                SearchStatus::Succeeded => {
                    println!(
                        "{}",
                        format!("{} results for \"{}\"", snapshot.products.len(), snapshot.query)
                            .bright_white()
                    );
                    print_products(&snapshot.products);
                }
                _ => println!(
                    "{}",
                    snapshot.error.unwrap_or_else(|| "Search failed.".to_string()).red()
                ),
            }
        }
        ("/results", args) => {
            let mut criteria = FilterCriteria::default();
            if let Some(sort) = args.first() {
                match parse_sort(sort) {
                    Some(sort) => criteria.sort = sort,
                    None => {
                        println!("{}", "Unknown sort key.".red());
                        return;
                    }
                }
            }
            if let Some(min) = args.get(1).and_then(|v| v.parse().ok()) {
                criteria.price_min = min;
            }
            if let Some(max) = args.get(2).and_then(|v| v.parse().ok()) {
                criteria.price_max = max;
            }

            let snapshot = app.search().snapshot();
            let view = build_view(&snapshot.products, &criteria);
            let sources = available_sources(&snapshot.products);
            println!(
                "{}",
                format!("{} of {} results  [sources: {}]", view.len(), snapshot.products.len(), sources.join(", "))
                    .bright_white()
            );
            print_products(&view);
        }
        ("/show", [id]) => match app.product(id).await {
            Ok(product) => {
                println!("{}", product.name.bright_white().bold());
                println!(
                    "{}  {}",
                    format!("KSh {}", product.price).bright_green(),
                    format!("{} ({:.1})", product.source, product.rating).bright_black(),
                );
                if app.favorites().is_favorite(&product.id) {
                    println!("{}", "In your favorites.".bright_magenta());
                }
                if let Some(description) = &product.description {
                    println!("{description}");
                }
                if let Some(specs) = &product.specs {
                    for (label, value) in specs {
                        println!("  {}: {}", label.bright_black(), value);
                    }
                }
                println!("{}", product.url.bright_blue());
            }
            Err(err) => print_error(&err),
        },
        ("/similar", [id]) => match app.similar(id).await {
            Ok(products) => print_products(&products),
            Err(err) => print_error(&err),
        },
        ("/fav", [id]) => match app.favorites().toggle(id).await {
            Ok(true) => println!("{}", "Added to favorites.".green()),
            Ok(false) => println!("{}", "Removed from favorites.".green()),
            Err(err) => print_error(&err),
        },
        ("/favorites", []) => {
            if let Err(err) = app.favorites().refresh().await {
                print_error(&err);
                return;
            }
            print_products(&app.favorites().products());
        }
        ("/history", []) => {
            if let Err(err) = app.history().refresh().await {
                print_error(&err);
                return;
            }
            let entries = app.history().entries();
            if entries.is_empty() {
                println!("{}", "No search history.".bright_black());
            }
            for entry in entries {
                println!(
                    "{} {}  {}",
                    format!("#{}", entry.id).bright_black(),
                    entry.query.bright_white(),
                    entry.timestamp.format("%Y-%m-%d %H:%M").to_string().bright_black(),
                );
            }
        }
        ("/replay", [id]) => match id.parse() {
            Ok(entry_id) => match app.replay(entry_id).await {
                Ok(snapshot) => {
                    println!(
                        "{}",
                        format!("Searching again for \"{}\"...", snapshot.query).bright_white()
                    );
                    print_products(&snapshot.products);
                }
                Err(err) => print_error(&err),
            },
            Err(_) => println!("{}", "Expected a numeric entry id.".red()),
        },
        ("/histdel", [id]) => match id.parse() {
            Ok(entry_id) => match app.history().remove_one(entry_id).await {
                Ok(()) => println!("{}", "Search removed from history.".green()),
                Err(err) => print_error(&err),
            },
            Err(_) => println!("{}", "Expected a numeric entry id.".red()),
        },
        ("/histclear", []) => match app.history().clear_all().await {
            Ok(()) => println!("{}", "Search history cleared.".green()),
            Err(err) => print_error(&err),
        },
        ("/recommended", []) => {
            if let Err(err) = app.recommendations().refresh().await {
                print_error(&err);
                return;
            }
            print_products(&app.recommendations().products());
        }
        ("/help", _) => print_help(),
        _ => println!("{}", "Unknown command, try /help".bright_black()),
    }
}

/// The main entry point for the dealfinder readline REPL application.
///
/// Sets up a rustyline-based REPL that:
/// 1. Loads the client configuration and wires the application facade
/// 2. Attempts a silent session restore from the persisted token
/// 3. Provides command completion and hints for the slash commands
/// 4. Dispatches each line against the facade
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ConfigStorage::new()?.load()?;
    let app = App::from_config(&config)?;

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Dealfinder ===".bright_magenta().bold());
    match app.restore().await {
        Some(session) => println!(
            "{}",
            format!("Welcome back, {}!", session.display_name).green()
        ),
        None => println!("{}", "Browsing anonymously. /login to sign in.".bright_black()),
    }
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                let _ = rl.add_history_entry(trimmed);
                dispatch(&app, trimmed).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Readline error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
