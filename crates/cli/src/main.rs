use anyhow::{Context, Result, anyhow, bail};
use browser::{
    BrowserConfig, CharacterBrowser, CharacterDetail, LOAD_FAILED_MESSAGE, LoadState,
    PaletteColor, SessionGate, SessionStore,
};
use catalog::{FilterChoice, FilterSelection};
use clap::{Parser, Subcommand};
use colored::{Color, Colorize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// Holocron - Star Wars character browser
#[derive(Parser)]
#[command(name = "holocron")]
#[command(about = "Browse, search and filter Star Wars characters", long_about = None)]
struct Cli {
    /// API base URL (overrides HOLOCRON_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session file location (overrides HOLOCRON_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Maximum concurrent detail requests (overrides HOLOCRON_MAX_CONCURRENCY)
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Characters per page (overrides HOLOCRON_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        #[arg(long)]
        username: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List characters, one page at a time
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,

        /// Homeworld name, or "none" for characters without one
        #[arg(long, default_value = "")]
        homeworld: FilterChoice,

        /// Film title, or "none" for characters in no film
        #[arg(long, default_value = "")]
        film: FilterChoice,

        /// Species name, or "none" for characters without a species
        #[arg(long, default_value = "")]
        species: FilterChoice,
    },

    /// Show one character in detail
    Show {
        /// Character name (case-insensitive) or record URL
        character: String,
    },

    /// Print the homeworld, film and species filter options
    Filters,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = BrowserConfig::load();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(path) = cli.session_file {
        config = config.with_session_file(path);
    }
    if let Some(max) = cli.concurrency {
        config = config.with_max_concurrency(max);
    }
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }
    debug!("Using configuration: {:?}", config);

    let mut gate = SessionGate::open(SessionStore::new(config.session_file.clone()))
        .context("Failed to open session")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Login { username, password } => handle_login(&mut gate, &username, password)?,
        Commands::Logout => handle_logout(&mut gate)?,
        Commands::Whoami => handle_whoami(&gate),
        Commands::List {
            page,
            search,
            homeworld,
            film,
            species,
        } => {
            let selection = FilterSelection::new()
                .with_homeworld(homeworld)
                .with_film(film)
                .with_species(species);
            handle_list(&config, &gate, page, search, selection).await?
        }
        Commands::Show { character } => handle_show(&config, &gate, &character).await?,
        Commands::Filters => handle_filters(&config, &gate).await?,
    }

    Ok(())
}

/// Handle the 'login' command
fn handle_login(gate: &mut SessionGate, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    if gate.login(username, &password)? {
        println!("{} Signed in as {}", "✓".green(), username.bold());
        Ok(())
    } else {
        bail!("Invalid username or password")
    }
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Handle the 'logout' command
fn handle_logout(gate: &mut SessionGate) -> Result<()> {
    gate.logout()?;
    println!("{} Signed out", "✓".green());
    Ok(())
}

/// Handle the 'whoami' command
fn handle_whoami(gate: &SessionGate) {
    match gate.user() {
        Some(session) => println!("{} (token: {})", session.username.bold(), session.token),
        None => println!("Not signed in"),
    }
}

/// Load the roster, stopping early on Ctrl-C.
async fn load_browser(config: &BrowserConfig, gate: &SessionGate) -> Result<CharacterBrowser> {
    if !gate.is_authenticated() {
        bail!("Not signed in. Run `holocron login --username <name>` first");
    }

    let source = config.connect().context("Failed to build API client")?;
    let mut browser = CharacterBrowser::new(source, config, gate.handle());

    let cancel = browser.cancellation();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    println!("Loading characters from {}...", config.base_url);
    let start = Instant::now();
    let loaded = browser.load().await;
    interrupt.abort();

    match loaded.context("Character load did not finish")? {
        LoadState::Loaded => {
            println!(
                "{} Loaded {} characters in {:.2?}",
                "✓".green(),
                browser.characters().len(),
                start.elapsed()
            );
            Ok(browser)
        }
        _ => Err(anyhow!(browser.error().unwrap_or(LOAD_FAILED_MESSAGE).to_string())),
    }
}

/// Handle the 'list' command
async fn handle_list(
    config: &BrowserConfig,
    gate: &SessionGate,
    page: usize,
    search: String,
    selection: FilterSelection,
) -> Result<()> {
    let mut browser = load_browser(config, gate).await?;
    browser.set_search(search)?;
    browser.set_selection(selection)?;
    browser.go_to_page(page);

    let cards = browser.page_cards();
    if cards.is_empty() {
        println!("{}", "No characters match the current search and filters".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Characters ({} matching, page {} of {}):",
            browser.filtered().len(),
            browser.current_page(),
            browser.total_pages()
        )
        .bold()
        .blue()
    );
    for card in &cards {
        println!(
            "{} {} - born {}, from {}, {}",
            "■".color(palette(card.color)),
            card.name.bold(),
            card.birth_year,
            card.homeworld,
            card.films
        );
    }

    print_page_window(&browser);
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(config: &BrowserConfig, gate: &SessionGate, character: &str) -> Result<()> {
    let mut browser = load_browser(config, gate).await?;
    let detail = browser
        .select(character)
        .ok_or_else(|| anyhow!("Character {} not found", character))?;
    print_detail(&detail);
    Ok(())
}

/// Handle the 'filters' command
async fn handle_filters(config: &BrowserConfig, gate: &SessionGate) -> Result<()> {
    let browser = load_browser(config, gate).await?;
    let index = browser.index();

    let sections = [
        ("Homeworlds", index.homeworlds.as_slice()),
        ("Films", index.films.as_slice()),
        ("Species", index.species.as_slice()),
    ];
    for (title, options) in sections {
        println!("{}", format!("{title}:").bold().blue());
        if options.is_empty() {
            println!("  {}", "(unavailable)".dimmed());
        }
        for option in options {
            println!("  - {}", option);
        }
    }
    println!("Use \"none\" to select characters without a value.");
    Ok(())
}

fn print_page_window(browser: &CharacterBrowser) {
    let window = browser.page_window();
    let current = browser.current_page();

    let mut strip: Vec<String> = Vec::new();
    if browser.current_page() > 1 {
        strip.push("«".to_string());
    }
    if let Some(first) = window.first {
        strip.push(first.to_string());
        if window.leading_gap {
            strip.push("…".to_string());
        }
    }
    for page in &window.pages {
        if *page == current {
            strip.push(format!("[{page}]").bold().to_string());
        } else {
            strip.push(page.to_string());
        }
    }
    if let Some(last) = window.last {
        if window.trailing_gap {
            strip.push("…".to_string());
        }
        strip.push(last.to_string());
    }
    if current < browser.total_pages() {
        strip.push("»".to_string());
    }

    println!("{}", strip.join(" "));
}

fn print_detail(detail: &CharacterDetail) {
    println!("{}", detail.name.bold().color(palette(detail.color)));
    if let Some(portrait) = &detail.portrait {
        println!("{}", portrait.dimmed());
    }
    println!("{}", "Personal Info".bold().blue());
    println!("{}Height: {}", "• ".green(), detail.height);
    println!("{}Mass: {}", "• ".green(), detail.mass);
    println!("{}Birth Year: {}", "• ".green(), detail.birth_year);
    println!("{}Films: {}", "• ".green(), detail.film_count);
    println!("{}Added: {}", "• ".green(), detail.added);

    println!("{}", "Homeworld".bold().blue());
    println!("{}Name: {}", "• ".cyan(), detail.homeworld.name);
    println!("{}Terrain: {}", "• ".cyan(), detail.homeworld.terrain);
    println!("{}Climate: {}", "• ".cyan(), detail.homeworld.climate);
    println!("{}Population: {}", "• ".cyan(), detail.homeworld.population);

    if !detail.species.is_empty() {
        println!("{}", "Species".bold().blue());
        for name in &detail.species {
            println!("{}{}", "• ".cyan(), name);
        }
    }
}

fn palette(color: PaletteColor) -> Color {
    match color {
        PaletteColor::Red => Color::Red,
        PaletteColor::Blue => Color::Blue,
        PaletteColor::Green => Color::Green,
        PaletteColor::Yellow => Color::Yellow,
        PaletteColor::Purple => Color::Magenta,
        PaletteColor::Pink => Color::BrightMagenta,
        PaletteColor::Indigo => Color::BrightBlue,
        PaletteColor::Teal => Color::Cyan,
        PaletteColor::Orange => Color::TrueColor {
            r: 255,
            g: 165,
            b: 0,
        },
    }
}
