// region:    --- Imports
use auction_client::api::{ApiClient, AuctionApi};
use auction_client::auction::commands::{
    handle_create_listing, handle_delete_listing, handle_update_listing, ListingForm,
};
use auction_client::auth::model::LoginRequest;
use auction_client::auth::{handle_login, handle_logout, handle_register, RegisterForm};
use auction_client::bidding::commands::{handle_place_bid, PlaceBidCommand};
use auction_client::config::Config;
use auction_client::detail::load_detail;
use auction_client::error::ClientResult;
use auction_client::feed::{ListingFeed, ScrollPosition};
use auction_client::profile::{handle_update_profile, load_profile, ProfileForm};
use auction_client::search::{self, SearchController, SearchResults};
use auction_client::session::{FileSessionStore, Session, SessionStore};
use auction_client::view::terminal::{TerminalErrorSink, TerminalNavigator};
use auction_client::view::{home_banner, listing_id_from_location, nav_links, ErrorSink};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Cli
/// 경매 마켓플레이스 터미널 클라이언트
#[derive(Parser, Debug)]
#[command(name = "auction", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login { email: String, password: String },
    /// Register a new account, then log in
    Register {
        name: String,
        email: String,
        password: String,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        banner: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Browse listings; press Enter to load more, `q` to quit
    Feed {
        /// Load this many pages and exit instead of waiting for input
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Show one auction (listing id or `/listing/index.html?id=...`)
    Show { location: String },
    /// Place a bid on an auction
    Bid { location: String, amount: String },
    /// Search listings; without a query, each input line is searched after a short pause
    Search { query: Option<String> },
    /// Show your profile
    Profile,
    /// Update your profile
    EditProfile {
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        banner: Option<String>,
    },
    /// Create a new auction listing
    Create {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Image URL (up to three)
        #[arg(long = "image")]
        images: Vec<String>,
        /// YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339
        #[arg(long)]
        deadline: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit one of your listings
    Edit {
        location: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Delete one of your listings
    Delete { location: String },
    /// Issue an API key for the current session
    ApiKey {
        #[arg(long)]
        name: Option<String>,
    },
}
// endregion: --- Cli

// region:    --- Main
#[tokio::main]
async fn main() -> ExitCode {
    // .env 먼저 읽어야 RUST_LOG 가 적용된다
    dotenvy::dotenv().ok();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let errors = TerminalErrorSink;

    let store = FileSessionStore::new(&config.session_file);
    let session = match store.load() {
        Ok(session) => session,
        Err(e) => {
            error!("{:<12} --> 세션 로드 실패: {}", "Main", e);
            Session::anonymous()
        }
    };

    let api = match ApiClient::new(&config) {
        Ok(api) => api.with_session(&session),
        Err(e) => {
            errors.display_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };
    info!("{:<12} --> API: {}", "Main", api.base_url());

    match run(cli.command, &config, api, &session, &store).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            errors.display_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Command,
    config: &Config,
    api: ApiClient,
    session: &Session,
    store: &FileSessionStore,
) -> ClientResult<()> {
    let nav = TerminalNavigator;

    match command {
        Command::Login { email, password } => {
            let session = handle_login(LoginRequest { email, password }, &api, store, &nav).await?;
            println!(
                "Login successful! Welcome, {}.",
                session.display_name.as_deref().unwrap_or_default()
            );
        }
        Command::Register {
            name,
            email,
            password,
            bio,
            avatar,
            banner,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                bio,
                avatar_url: avatar,
                banner_url: banner,
            };
            handle_register(form, &api, store, &nav).await?;
            println!("Registration successful!");
        }
        Command::Logout => handle_logout(store, &nav)?,
        Command::Feed { pages } => run_feed(config, &api, session, pages).await?,
        Command::Show { location } => {
            let view = load_detail(&api, session, &location).await?;
            print!("{}", view);
        }
        Command::Bid { location, amount } => {
            let cmd = PlaceBidCommand::from_form(&location, &amount)?;
            let view = handle_place_bid(cmd, &api, session).await?;
            println!("Bid created successfully!");
            print!("{}", view);
        }
        Command::Search { query: Some(query) } => {
            print!("{}", search::search(&api, &query).await?);
        }
        Command::Search { query: None } => run_search(config, api).await?,
        Command::Profile => {
            let view = load_profile(&api, session).await?;
            print!("{}", view);
        }
        Command::EditProfile {
            bio,
            avatar,
            banner,
        } => {
            let name = session.require_name()?;
            let mut form = ProfileForm::from_profile(&api.profile(name).await?);
            if bio.is_some() {
                form.bio = bio;
            }
            if avatar.is_some() {
                form.avatar_url = avatar;
            }
            if banner.is_some() {
                form.banner_url = banner;
            }
            let view = handle_update_profile(form, &api, session, &nav).await?;
            print!("{}", view);
        }
        Command::Create {
            title,
            description,
            images,
            deadline,
            tags,
        } => {
            let form = ListingForm {
                title,
                description,
                images,
                deadline,
                tags,
            };
            let listing = handle_create_listing(form, &api, session, &nav).await?;
            println!("Created listing {}", listing.id);
        }
        Command::Edit {
            location,
            title,
            description,
            images,
            deadline,
        } => {
            session.require_token()?;
            let id = listing_id_from_location(&location)?;
            let mut form = ListingForm::from_listing(&api.listing(&id).await?);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if !images.is_empty() {
                form.images = images;
            }
            if let Some(deadline) = deadline {
                form.deadline = deadline;
            }
            handle_update_listing(&id, form, &api, session, &nav).await?;
            println!("Listing updated.");
        }
        Command::Delete { location } => {
            let id = listing_id_from_location(&location)?;
            handle_delete_listing(&id, &api, session, &nav).await?;
            println!("Auction Listing deleted successfully.");
        }
        Command::ApiKey { name } => {
            let key = api.create_api_key(name.as_deref()).await?;
            println!("{}", key);
        }
    }
    Ok(())
}
// endregion: --- Main

// region:    --- Interactive
const CARD_ROWS: f64 = 5.0;
const VIEWPORT_ROWS: f64 = 40.0;

/// 피드: 첫 페이지 후 Enter 마다 화면 하단까지 스크롤한 것으로 처리
async fn run_feed(
    config: &Config,
    api: &ApiClient,
    session: &Session,
    pages: Option<u32>,
) -> ClientResult<()> {
    println!("{}", nav_links(session));
    let banner = home_banner(session);
    println!("{} [{} → {}]\n", banner.body, banner.link_text, banner.link.href());

    let mut feed = ListingFeed::new(config.feed_page_size);
    let added = feed.load_next(api).await?;
    print_new_cards(&feed, 0, added);

    if let Some(pages) = pages {
        for _ in 1..pages {
            if feed.is_exhausted() {
                break;
            }
            let before = feed.cards().len();
            let added = feed.load_next(api).await?;
            print_new_cards(&feed, before, added);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !feed.is_exhausted() {
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        if line.trim() == "q" {
            break;
        }

        let scroll_height = feed.cards().len() as f64 * CARD_ROWS;
        let position = ScrollPosition {
            scroll_top: (scroll_height - VIEWPORT_ROWS).max(0.0),
            client_height: VIEWPORT_ROWS,
            scroll_height,
        };
        let before = feed.cards().len();
        match feed.on_scroll(api, position).await {
            Some(Ok(added)) => print_new_cards(&feed, before, added),
            Some(Err(e)) => TerminalErrorSink.display_error(&e.to_string()),
            None => {}
        }
    }

    if feed.is_exhausted() {
        println!("Reached the last page of listings.");
    }
    Ok(())
}

fn print_new_cards(feed: &ListingFeed, from: usize, count: usize) {
    for card in &feed.cards()[from..from + count] {
        println!("{}\n", card);
    }
}

/// 검색: 입력 줄마다 디바운스 후 결과 출력
async fn run_search(config: &Config, api: ApiClient) -> ClientResult<()> {
    let api: Arc<dyn AuctionApi> = Arc::new(api);
    let (mut controller, mut results) = SearchController::new(api, config.search_debounce);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => controller.on_input(&line),
                _ => break,
            },
            Some(update) = results.recv() => show_search_update(update),
        }
    }

    // 입력 종료 후 대기 중인 검색까지 끝낸 뒤 남은 결과 출력
    controller.finish().await;
    while let Ok(update) = results.try_recv() {
        show_search_update(update);
    }
    Ok(())
}

fn show_search_update(update: SearchResults) {
    match update {
        SearchResults::Cleared => println!("(cleared)"),
        SearchResults::Failed(message) => TerminalErrorSink.display_error(&message),
        other => print!("{}", other),
    }
}
// endregion: --- Interactive
